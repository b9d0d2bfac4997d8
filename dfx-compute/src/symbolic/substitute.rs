//! Replacing names with what they stand for.

use crate::{
    engine::ExecutionEngine,
    error::{kind::UnexpectedAssignment, Error},
};
use dfx_parser::parser::ast::{Binary, Expr, Invocation};
use super::derivative;

/// Returns `expr` with bound parameters, variables, and invocations of user-defined functions
/// replaced.
///
/// - A name bound in the top frame becomes the argument it is bound to. The argument is not
///   substituted again, since it was already substituted in the caller's frame.
/// - A name registered as a variable becomes its value.
/// - An invocation of a user-defined function becomes the function's body, evaluated in a new
///   frame binding its parameters to the substituted arguments.
///
/// Anything else is left alone.
pub fn substitute(expr: &Expr, eng: &mut ExecutionEngine) -> Result<Expr, Error> {
    match expr {
        Expr::Constant(_) | Expr::E => Ok(expr.clone()),
        Expr::Function(name) => {
            if let Some(arg) = eng.frame_arg(name) {
                return Ok(arg.clone());
            }

            match eng.function(name) {
                Some(func) if func.is_variable() => {
                    let body = func.body.clone();
                    eng.with_frame(Vec::new(), name, &[], |eng| substitute(&body, eng))
                },
                _ => Ok(expr.clone()),
            }
        },
        Expr::Invocation(invocation) => self::invocation(invocation, eng),
        Expr::Differentiation(differentiation) => {
            // inside a function body, the variable of differentiation may be one of the
            // parameters, so the derivative has to be taken before they are replaced
            if eng.depth() > 0 {
                let derivative = derivative::evaluate(differentiation, eng)?;
                return substitute(&derivative, eng);
            }

            Ok(Expr::differentiation(
                substitute(&differentiation.expr, eng)?,
                differentiation.respect.clone(),
            ))
        },
        Expr::Assignment(_) => Err(Error::spanless(UnexpectedAssignment)),
        Expr::Binary(binary) => Ok(Expr::Binary(Binary::new(
            substitute(&binary.lhs, eng)?,
            binary.op,
            substitute(&binary.rhs, eng)?,
        ))),
    }
}

fn invocation(invocation: &Invocation, eng: &mut ExecutionEngine) -> Result<Expr, Error> {
    let args = invocation.args
        .iter()
        .map(|arg| substitute(arg, eng))
        .collect::<Result<Vec<_>, _>>()?;

    // the callee of `f(x)` names a function, so it is only replaced if `f` is a parameter, as in
    // `apply(f, x) = f(x)`
    let callee = match &*invocation.callee {
        Expr::Function(name) => eng.frame_arg(name).cloned().unwrap_or_else(|| invocation.callee.as_ref().clone()),
        callee => substitute(callee, eng)?,
    };

    let func = match &callee {
        Expr::Function(name) => eng.function(name).cloned(),
        _ => None,
    };

    match func {
        Some(func) => {
            let body = eng.with_frame(args, &func.name, &func.params, |eng| substitute(&func.body, eng))?;
            eng.check_size([&body])?;
            Ok(body)
        },
        None => Ok(Expr::invocation(callee, args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::{EngineConfigBuilder, Function},
        error::kind::{ArityMismatch, ExpressionTooLarge, RecursionDepthExceeded},
        symbolic::Symbolic,
    };
    use dfx_parser::parser::Parser;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Expr {
        Parser::new(source).unwrap().parse_stmt().unwrap()
    }

    fn define(eng: &mut ExecutionEngine, source: &str) {
        eng.execute(&parse(source)).unwrap();
    }

    #[test]
    fn leaves_unknown_names() {
        let mut eng = ExecutionEngine::new();
        let expr = parse("x + y * g(z)");
        assert_eq!(substitute(&expr, &mut eng).unwrap(), expr);
    }

    #[test]
    fn frame_arguments() {
        let mut eng = ExecutionEngine::new();
        eng.push_frame(vec![parse("y + 1")]).unwrap();
        eng.bind_frame_parameters("f", &["x".into()]).unwrap();

        assert_eq!(substitute(&parse("x^2"), &mut eng).unwrap(), parse("(y + 1)^2"));
        eng.pop_frame();
    }

    #[test]
    fn arguments_are_not_substituted_twice() {
        let mut eng = ExecutionEngine::new();
        eng.register_function(Function::variable("x", parse("1")));
        eng.push_frame(vec![parse("x")]).unwrap();
        eng.bind_frame_parameters("f", &["y".into()]).unwrap();

        // the frame binds `y` to the name `x` as written by the caller
        assert_eq!(substitute(&parse("y"), &mut eng).unwrap(), parse("x"));
        eng.pop_frame();
    }

    #[test]
    fn invocations() {
        let mut eng = ExecutionEngine::new();
        define(&mut eng, "f(x) = x^2 + 3 * x");
        define(&mut eng, "g(a, b) = f(a) * b");

        assert_eq!(substitute(&parse("f(2)"), &mut eng).unwrap(), parse("2^2 + 3 * 2"));
        assert_eq!(substitute(&parse("g(y, 4)"), &mut eng).unwrap(), parse("(y^2 + 3 * y) * 4"));
        assert_eq!(eng.depth(), 0);
    }

    #[test]
    fn variables() {
        let mut eng = ExecutionEngine::new();
        define(&mut eng, "a = 5");
        define(&mut eng, "b = a + 1");
        define(&mut eng, "f(a) = a * b");

        assert_eq!(substitute(&parse("b"), &mut eng).unwrap(), parse("5 + 1"));
        assert_eq!(substitute(&parse("f(2)"), &mut eng).unwrap(), parse("2 * (5 + 1)"));
    }

    #[test]
    fn higher_order() {
        let mut eng = ExecutionEngine::new();
        define(&mut eng, "apply(f, x) = f(x)");
        define(&mut eng, "sq(x) = x^2");

        assert_eq!(substitute(&parse("apply(sq, 3)"), &mut eng).unwrap(), parse("3^2"));
        assert_eq!(substitute(&parse("apply(h, 3)"), &mut eng).unwrap(), parse("h(3)"));
    }

    #[test]
    fn derivative_in_body() {
        let mut eng = ExecutionEngine::new();
        define(&mut eng, "f(t) = deriv(t^2, t)");

        let result = substitute(&parse("f(3)"), &mut eng).unwrap().simplify(&mut eng).unwrap();
        assert_eq!(result, parse("6"));
    }

    #[test]
    fn derivative_at_top_level_is_kept() {
        let mut eng = ExecutionEngine::new();
        define(&mut eng, "a = 2");

        assert_eq!(substitute(&parse("deriv(a * x)"), &mut eng).unwrap(), parse("deriv(2 * x)"));
    }

    #[test]
    fn errors() {
        let mut eng = ExecutionEngine::new();
        define(&mut eng, "f(x, y) = x + y");
        define(&mut eng, "r(x) = r(x) + 1");

        assert!(substitute(&parse("f(1)"), &mut eng).unwrap_err().is::<ArityMismatch>());
        assert!(substitute(&parse("r(1)"), &mut eng).unwrap_err().is::<RecursionDepthExceeded>());
        assert_eq!(eng.depth(), 0);
    }

    #[test]
    fn growing_arguments() {
        let mut eng = ExecutionEngine::new();
        define(&mut eng, "f(x) = f(x + x)");
        define(&mut eng, "g(x, y) = g(x * y + ln(x) / y, y^x - x) * x + y^2");

        assert!(substitute(&parse("f(1)"), &mut eng).unwrap_err().is::<ExpressionTooLarge>());
        assert!(substitute(&parse("g(1, 2)"), &mut eng).unwrap_err().is::<ExpressionTooLarge>());
        assert_eq!(eng.depth(), 0);
    }

    #[test]
    fn growing_expansion() {
        let mut eng = ExecutionEngine::with_config(
            EngineConfigBuilder::new().max_expr_size(50).build(),
        );
        define(&mut eng, "p(x) = x * x");
        define(&mut eng, "q(x) = p(x) * p(x)");
        define(&mut eng, "r(x) = q(x) * q(x)");
        define(&mut eng, "s(x) = r(x) * r(x)");

        assert_eq!(substitute(&parse("s(y)"), &mut eng).unwrap().size(), 31);
        // only the expansion of a single invocation is bounded
        assert_eq!(substitute(&parse("s(y) * s(y)"), &mut eng).unwrap().size(), 63);

        define(&mut eng, "t(x) = s(x) * s(x)");
        let err = substitute(&parse("t(y)"), &mut eng).unwrap_err();
        assert_eq!(err.downcast_ref::<ExpressionTooLarge>().unwrap().size, 63);
    }
}
