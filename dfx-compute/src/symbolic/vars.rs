//! Inference of the variable of differentiation.

use crate::{
    engine::ExecutionEngine,
    error::{
        kind::{AmbiguousVariable, NoVariable, UnexpectedAssignment},
        Error,
    },
};
use dfx_parser::parser::ast::Expr;

/// Returns the single free variable of `expr`.
///
/// Registered variables are looked through, and so are the bodies of invoked functions, where
/// only names that are not parameters count. A parameter bound in the top frame counts as a
/// variable, so `deriv(t^2)` in the body of `f(t)` is taken with respect to `t`.
pub fn get_var(expr: &Expr, eng: &mut ExecutionEngine) -> Result<String, Error> {
    let mut vars = Vec::new();
    collect(expr, eng, &mut vars)?;

    match vars.len() {
        0 => Err(Error::spanless(NoVariable { expr: expr.to_string() })),
        1 => Ok(vars.remove(0)),
        _ => Err(Error::spanless(AmbiguousVariable { vars })),
    }
}

/// Returns the distinct free variables of `expr`, in order of first appearance.
pub fn free_vars(expr: &Expr, eng: &mut ExecutionEngine) -> Result<Vec<String>, Error> {
    let mut vars = Vec::new();
    collect(expr, eng, &mut vars)?;
    Ok(vars)
}

fn push(vars: &mut Vec<String>, name: &str) {
    if !vars.iter().any(|var| var == name) {
        vars.push(name.to_owned());
    }
}

fn collect(expr: &Expr, eng: &mut ExecutionEngine, vars: &mut Vec<String>) -> Result<(), Error> {
    match expr {
        Expr::Constant(_) | Expr::E => Ok(()),
        Expr::Function(name) => {
            if eng.frame_arg(name).is_some() {
                push(vars, name);
                return Ok(());
            }

            match eng.function(name) {
                Some(func) if func.is_variable() => {
                    let body = func.body.clone();
                    eng.with_frame(Vec::new(), name, &[], |eng| collect(&body, eng, vars))
                },
                Some(_) => Ok(()),
                None => {
                    push(vars, name);
                    Ok(())
                },
            }
        },
        Expr::Invocation(invocation) => {
            for arg in &invocation.args {
                collect(arg, eng, vars)?;
            }

            let name = match &*invocation.callee {
                Expr::Function(name) => name,
                callee => return collect(callee, eng, vars),
            };
            if eng.frame_arg(name).is_some() {
                return Ok(());
            }

            let Some(func) = eng.function(name).cloned() else {
                return Ok(());
            };
            let identity = func.params.iter().cloned().map(Expr::Function).collect();
            let body_vars = eng.with_frame(identity, &func.name, &func.params, |eng| {
                free_vars(&func.body, eng)
            })?;
            for var in body_vars.iter().filter(|var| !func.params.contains(var)) {
                push(vars, var);
            }
            Ok(())
        },
        Expr::Differentiation(differentiation) => collect(&differentiation.expr, eng, vars),
        Expr::Assignment(_) => Err(Error::spanless(UnexpectedAssignment)),
        Expr::Binary(binary) => {
            collect(&binary.lhs, eng, vars)?;
            collect(&binary.rhs, eng, vars)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfx_parser::parser::Parser;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Expr {
        Parser::new(source).unwrap().parse_stmt().unwrap()
    }

    #[test]
    fn single_variable() {
        let mut eng = ExecutionEngine::new();
        assert_eq!(get_var(&parse("x^2 + 3 * x"), &mut eng).unwrap(), "x");
        assert_eq!(get_var(&parse("ln(t) * e"), &mut eng).unwrap(), "t");
    }

    #[test]
    fn ambiguous() {
        let mut eng = ExecutionEngine::new();
        let err = get_var(&parse("y * x + x"), &mut eng).unwrap_err();
        let kind = err.downcast_ref::<AmbiguousVariable>().unwrap();
        assert_eq!(kind.vars, vec!["y".to_string(), "x".to_string()]);
    }

    #[test]
    fn no_variable() {
        let mut eng = ExecutionEngine::new();
        assert!(get_var(&parse("2 + e"), &mut eng).unwrap_err().is::<NoVariable>());

        eng.execute(&parse("a = 5")).unwrap();
        assert!(get_var(&parse("a^2"), &mut eng).unwrap_err().is::<NoVariable>());
    }

    #[test]
    fn through_functions() {
        let mut eng = ExecutionEngine::new();
        eng.execute(&parse("f(x) = x^2")).unwrap();
        eng.execute(&parse("g(x) = x * k")).unwrap();

        assert_eq!(get_var(&parse("f(s + 1)"), &mut eng).unwrap(), "s");
        assert_eq!(get_var(&parse("f(3) + u"), &mut eng).unwrap(), "u");
        assert_eq!(free_vars(&parse("g(y)"), &mut eng).unwrap(), vec!["y".to_string(), "k".to_string()]);
    }

    #[test]
    fn unknown_callee_is_not_a_variable() {
        let mut eng = ExecutionEngine::new();
        assert_eq!(get_var(&parse("h(x)"), &mut eng).unwrap(), "x");
    }

    #[test]
    fn bound_parameters() {
        let mut eng = ExecutionEngine::new();
        eng.push_frame(vec![Expr::Constant(3.0)]).unwrap();
        eng.bind_frame_parameters("f", &["t".into()]).unwrap();

        assert_eq!(get_var(&parse("t^2"), &mut eng).unwrap(), "t");
        eng.pop_frame();
    }
}
