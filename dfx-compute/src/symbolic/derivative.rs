//! Structural differentiation.

use crate::{
    engine::ExecutionEngine,
    error::{
        kind::{ArityMismatch, IndeterminateForm, NonFiniteResult, Undifferentiable, UnexpectedAssignment},
        Error,
    },
};
use dfx_parser::parser::ast::{BinOpKind, Binary, Differentiation, Expr, Invocation};
use super::vars::get_var;

fn zero() -> Expr {
    Expr::Constant(0.0)
}

fn one() -> Expr {
    Expr::Constant(1.0)
}

/// Returns the value of an expression built only from numbers and `e`.
fn constant_value(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Binary(binary) => Some(binary.op.apply(
            constant_value(&binary.lhs)?,
            constant_value(&binary.rhs)?,
        )),
        expr => expr.value(),
    }
}

/// Returns the derivative of `expr` with respect to the variable named `respect`.
///
/// Within the body of a function being invoked, parameters of that function other than
/// `respect` are held constant.
pub fn derivative(expr: &Expr, eng: &mut ExecutionEngine, respect: &str) -> Result<Expr, Error> {
    match expr {
        Expr::Constant(_) | Expr::E => Ok(zero()),
        Expr::Function(name) => function(name, eng, respect),
        Expr::Invocation(invocation) => self::invocation(invocation, eng, respect),
        Expr::Differentiation(differentiation) => {
            let inner = evaluate(differentiation, eng)?;
            derivative(&inner, eng, respect)
        },
        Expr::Assignment(_) => Err(Error::spanless(UnexpectedAssignment)),
        Expr::Binary(binary) => self::binary(binary, eng, respect),
    }
}

/// Evaluates a [`Differentiation`] node, inferring the variable of differentiation if it was not
/// given.
pub fn evaluate(differentiation: &Differentiation, eng: &mut ExecutionEngine) -> Result<Expr, Error> {
    let respect = match &differentiation.respect {
        Some(respect) => respect.clone(),
        None => get_var(&differentiation.expr, eng)?,
    };
    derivative(&differentiation.expr, eng, &respect)
}

fn function(name: &str, eng: &mut ExecutionEngine, respect: &str) -> Result<Expr, Error> {
    if name == respect || eng.frame_arg(name).is_some() {
        return Ok(if name == respect { one() } else { zero() });
    }

    match eng.function(name) {
        Some(func) if func.is_variable() => {
            let body = func.body.clone();
            eng.with_frame(Vec::new(), name, &[], |eng| derivative(&body, eng, respect))
        },
        _ => Ok(zero()),
    }
}

/// Differentiates an invocation of a user-defined function with the chain rule:
///
/// ```text
/// d/dx f(g1, ..., gn) = sum of (df/dpi)(g1, ..., gn) * gi'
/// ```
///
/// When `respect` is not one of the parameters, the body may also depend on it directly, and
/// that partial derivative is added as well.
fn invocation(invocation: &Invocation, eng: &mut ExecutionEngine, respect: &str) -> Result<Expr, Error> {
    let Some(name) = invocation.name() else {
        return Err(Error::spanless(Undifferentiable {
            expr: invocation.to_string(),
            reason: "only invocations of named functions can be differentiated".to_string(),
        }));
    };

    if let Some(arg) = eng.frame_arg(name) {
        return Err(Error::spanless(Undifferentiable {
            expr: invocation.to_string(),
            reason: format!("`{}` is bound to `{}`, which is not a named function", name, arg),
        }));
    }

    let func = eng.retrieve_function(name)?.clone();
    if func.arity() != invocation.args.len() {
        return Err(Error::spanless(ArityMismatch {
            name: func.name.clone(),
            expected: func.arity(),
            given: invocation.args.len(),
        }));
    }

    let identity = func.params.iter().cloned().map(Expr::Function).collect::<Vec<_>>();
    let mut terms = Vec::with_capacity(func.arity() + 1);

    for (param, arg) in func.params.iter().zip(&invocation.args) {
        let partial = eng.with_frame(identity.clone(), &func.name, &func.params, |eng| {
            derivative(&func.body, eng, param)
        })?;
        let partial = eng.with_frame(invocation.args.clone(), &func.name, &func.params, |eng| {
            super::substitute::substitute(&partial, eng)
        })?;
        terms.push(Expr::product(partial, derivative(arg, eng, respect)?));
    }

    if !func.params.iter().any(|param| param == respect) {
        let direct = eng.with_frame(identity, &func.name, &func.params, |eng| {
            derivative(&func.body, eng, respect)
        })?;
        let direct = eng.with_frame(invocation.args.clone(), &func.name, &func.params, |eng| {
            super::substitute::substitute(&direct, eng)
        })?;
        terms.push(direct);
    }

    Ok(terms
        .into_iter()
        .reduce(Expr::sum)
        .unwrap_or_else(zero))
}

fn binary(binary: &Binary, eng: &mut ExecutionEngine, respect: &str) -> Result<Expr, Error> {
    let (lhs, rhs) = (&*binary.lhs, &*binary.rhs);
    match binary.op {
        BinOpKind::Add => Ok(Expr::sum(derivative(lhs, eng, respect)?, derivative(rhs, eng, respect)?)),
        BinOpKind::Sub => Ok(Expr::difference(derivative(lhs, eng, respect)?, derivative(rhs, eng, respect)?)),
        BinOpKind::Mul => {
            // (uv)' = u'v + uv'
            let (du, dv) = (derivative(lhs, eng, respect)?, derivative(rhs, eng, respect)?);
            Ok(Expr::sum(
                Expr::product(du, rhs.clone()),
                Expr::product(lhs.clone(), dv),
            ))
        },
        BinOpKind::Div => {
            // (u/v)' = (u'v - uv') / v^2
            let (du, dv) = (derivative(lhs, eng, respect)?, derivative(rhs, eng, respect)?);
            Ok(Expr::quotient(
                Expr::difference(
                    Expr::product(du, rhs.clone()),
                    Expr::product(lhs.clone(), dv),
                ),
                Expr::power(rhs.clone(), Expr::Constant(2.0)),
            ))
        },
        BinOpKind::Exp => power(lhs, rhs, eng, respect),
        BinOpKind::Log => log(lhs, rhs, eng, respect),
    }
}

fn power(base: &Expr, exp: &Expr, eng: &mut ExecutionEngine, respect: &str) -> Result<Expr, Error> {
    match (constant_value(base), constant_value(exp)) {
        (Some(b), Some(x)) => {
            if b == 0.0 && x == 0.0 {
                return Err(Error::spanless(IndeterminateForm { form: "0^0".to_string() }));
            }
            if !b.powf(x).is_finite() {
                return Err(Error::spanless(NonFiniteResult {
                    expr: Expr::power(base.clone(), exp.clone()).to_string(),
                }));
            }
            Ok(zero())
        },
        // (u^n)' = n * u^(n - 1) * u'
        (_, Some(_)) => Ok(Expr::product(
            Expr::product(
                exp.clone(),
                Expr::power(base.clone(), Expr::difference(exp.clone(), one())),
            ),
            derivative(base, eng, respect)?,
        )),
        // (b^v)' = b^v * ln(b) * v'
        (Some(_), _) => Ok(Expr::product(
            Expr::product(
                Expr::power(base.clone(), exp.clone()),
                Expr::ln(base.clone()),
            ),
            derivative(exp, eng, respect)?,
        )),
        // (u^v)' = u^v * (v' * ln(u) + v * u' / u)
        (None, None) => {
            let (du, dv) = (derivative(base, eng, respect)?, derivative(exp, eng, respect)?);
            Ok(Expr::product(
                Expr::power(base.clone(), exp.clone()),
                Expr::sum(
                    Expr::product(dv, Expr::ln(base.clone())),
                    Expr::quotient(Expr::product(exp.clone(), du), base.clone()),
                ),
            ))
        },
    }
}

fn log(base: &Expr, arg: &Expr, eng: &mut ExecutionEngine, respect: &str) -> Result<Expr, Error> {
    let du = derivative(arg, eng, respect)?;
    if constant_value(base).is_some() {
        // log_b(u)' = u' / (u * ln(b))
        return Ok(Expr::quotient(du, Expr::product(arg.clone(), Expr::ln(base.clone()))));
    }

    // log_v(u) = ln(u) / ln(v), so
    // log_v(u)' = (u'/u * ln(v) - ln(u) * v'/v) / ln(v)^2
    let dv = derivative(base, eng, respect)?;
    Ok(Expr::quotient(
        Expr::difference(
            Expr::product(Expr::quotient(du, arg.clone()), Expr::ln(base.clone())),
            Expr::product(Expr::ln(arg.clone()), Expr::quotient(dv, base.clone())),
        ),
        Expr::power(Expr::ln(base.clone()), Expr::Constant(2.0)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::Function,
        error::kind::{AmbiguousVariable, FunctionNotFound, RecursionDepthExceeded},
        symbolic::Symbolic,
    };
    use assert_float_eq::assert_float_relative_eq;
    use dfx_parser::parser::Parser;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Expr {
        Parser::new(source).unwrap().parse_stmt().unwrap()
    }

    /// Evaluates `expr` numerically with `x` set to `value`.
    fn eval_at(eng: &mut ExecutionEngine, expr: &Expr, value: f64) -> f64 {
        eng.register_function(Function::variable("x", Expr::Constant(value)));
        let result = expr.substitute(eng).unwrap().simplify(eng).unwrap();
        eng.deregister_function("x");
        result.value().unwrap()
    }

    /// Checks the symbolic derivative of `source` against a central difference at each point.
    fn check_numerically(eng: &mut ExecutionEngine, source: &str, points: &[f64]) {
        let expr = parse(source);
        let derivative = derivative(&expr, eng, "x").unwrap();

        for &x in points {
            let h = 1e-6;
            let expected = (eval_at(eng, &expr, x + h) - eval_at(eng, &expr, x - h)) / (2.0 * h);
            let actual = eval_at(eng, &derivative, x);
            assert_float_relative_eq!(actual, expected, 1e-4);
        }
    }

    fn simplified(eng: &mut ExecutionEngine, source: &str) -> Expr {
        let expr = parse(source);
        derivative(&expr, eng, "x").unwrap().simplify(eng).unwrap()
    }

    #[test]
    fn leaves() {
        let mut eng = ExecutionEngine::new();
        assert_eq!(derivative(&parse("5"), &mut eng, "x").unwrap(), zero());
        assert_eq!(derivative(&parse("e"), &mut eng, "x").unwrap(), zero());
        assert_eq!(derivative(&parse("x"), &mut eng, "x").unwrap(), one());
        assert_eq!(derivative(&parse("y"), &mut eng, "x").unwrap(), zero());
    }

    #[test]
    fn polynomial() {
        let mut eng = ExecutionEngine::new();
        assert_eq!(simplified(&mut eng, "x^2 + 3 * x"), parse("2 * x + 3"));
        assert_eq!(simplified(&mut eng, "x^3"), parse("3 * x^2"));
        assert_eq!(simplified(&mut eng, "5 * x - 2"), parse("5"));
    }

    #[test]
    fn rules_numerically() {
        let mut eng = ExecutionEngine::new();
        let points = [0.5, 1.3, 2.0, 3.7];
        check_numerically(&mut eng, "x^2 * (x - 1)", &points);
        check_numerically(&mut eng, "(x + 1) / (x^2 + 1)", &points);
        check_numerically(&mut eng, "2^x", &points);
        check_numerically(&mut eng, "e^(x^2)", &points);
        check_numerically(&mut eng, "x^x", &points);
        check_numerically(&mut eng, "ln(x)", &points);
        check_numerically(&mut eng, "log(10, x^2 + 1)", &points);
        check_numerically(&mut eng, "log(x + 1, 3 * x)", &points);
    }

    #[test]
    fn chain_rule() {
        let mut eng = ExecutionEngine::new();
        eng.execute(&parse("f(x) = x^2 + 3 * x")).unwrap();
        eng.execute(&parse("g(a, b) = a * b^2")).unwrap();

        assert_eq!(simplified(&mut eng, "f(x)"), parse("2 * x + 3"));
        check_numerically(&mut eng, "f(2 * x)", &[0.5, 1.0, 2.5]);
        check_numerically(&mut eng, "g(x, x + 1)", &[0.5, 1.0, 2.5]);
        check_numerically(&mut eng, "f(f(x))", &[0.5, 1.0, 2.5]);
    }

    #[test]
    fn chain_rule_free_variables() {
        let mut eng = ExecutionEngine::new();
        eng.execute(&parse("h(y) = x * y")).unwrap();
        check_numerically(&mut eng, "h(3)", &[1.0, 2.0]);
        check_numerically(&mut eng, "h(x)", &[1.0, 2.0]);
    }

    #[test]
    fn variable_definitions() {
        let mut eng = ExecutionEngine::new();
        eng.execute(&parse("a = 5")).unwrap();
        eng.execute(&parse("b = x^2")).unwrap();

        assert_eq!(simplified(&mut eng, "a * x"), parse("a"));
        assert_eq!(simplified(&mut eng, "b"), parse("2 * x"));
    }

    #[test]
    fn nested_differentiation() {
        let mut eng = ExecutionEngine::new();
        assert_eq!(simplified(&mut eng, "deriv(x^3)"), parse("6 * x"));
    }

    #[test]
    fn constant_power() {
        let mut eng = ExecutionEngine::new();
        assert_eq!(derivative(&parse("2^3"), &mut eng, "x").unwrap(), zero());
        assert_eq!(derivative(&parse("(1 + 1)^(4 - 1)"), &mut eng, "x").unwrap(), zero());
        let err = derivative(&parse("0^0"), &mut eng, "x").unwrap_err();
        assert!(err.is::<IndeterminateForm>());
    }

    #[test]
    fn errors() {
        let mut eng = ExecutionEngine::new();
        assert!(derivative(&parse("q(x)"), &mut eng, "x").unwrap_err().is::<FunctionNotFound>());
        assert!(derivative(&parse("(x + 1)(2)"), &mut eng, "x").unwrap_err().is::<Undifferentiable>());
        assert!(derivative(&parse("deriv(x + y)"), &mut eng, "x").unwrap_err().is::<AmbiguousVariable>());

        eng.execute(&parse("f(x, y) = x + y")).unwrap();
        let err = derivative(&parse("f(x)"), &mut eng, "x").unwrap_err();
        let kind = err.downcast_ref::<ArityMismatch>().unwrap();
        assert_eq!((kind.name.as_str(), kind.expected, kind.given), ("f", 2, 1));

        eng.execute(&parse("r(x) = r(x)")).unwrap();
        assert!(derivative(&parse("r(x)"), &mut eng, "x").unwrap_err().is::<RecursionDepthExceeded>());
        assert_eq!(eng.depth(), 0);
    }
}
