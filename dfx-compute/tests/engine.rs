use dfx_compute::{
    engine::{Execution, ExecutionEngine, Function},
    error::kind::{
        AmbiguousVariable,
        ArityMismatch,
        ExpressionTooLarge,
        FunctionNotFound,
        RecursionDepthExceeded,
    },
    symbolic::Symbolic,
};
use dfx_parser::parser::{ast::Expr, error::kind::NumberTooLarge, Parser};
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Expr {
    Parser::new(source).unwrap().parse_stmt().unwrap()
}

/// Executes every statement of the program, returning the value of the last one.
fn run(eng: &mut ExecutionEngine, source: &str) -> Expr {
    let results = eng.execute_str(source).unwrap();
    match results.last() {
        Some(Execution::Value(value)) => value.clone(),
        other => panic!("program did not end with an expression: {:?}", other),
    }
}

#[test]
fn derivative_of_defined_function() {
    let mut eng = ExecutionEngine::new();
    eng.execute(&parse("f(x) = x^2 + 3 * x")).unwrap();

    let derivative = parse("f(x)").derivative(&mut eng, &Expr::function("x")).unwrap();
    assert_eq!(derivative.simplify(&mut eng).unwrap(), parse("2 * x + 3"));
    assert_eq!(run(&mut eng, "deriv(f(x), x)"), parse("2 * x + 3"));
}

#[test]
fn arithmetic() {
    let mut eng = ExecutionEngine::new();
    assert_eq!(run(&mut eng, "(2 + 3) * 4"), Expr::Constant(20.0));
    assert_eq!(run(&mut eng, "2^3^2"), Expr::Constant(512.0));
    assert_eq!(run(&mut eng, "10 - 4 - 3"), Expr::Constant(3.0));
    assert_eq!(run(&mut eng, "-2^2"), Expr::Constant(-4.0));
}

#[test]
fn symbolic_results() {
    let mut eng = ExecutionEngine::new();
    assert_eq!(run(&mut eng, "x * 1 + 0").to_string(), "x");
    assert_eq!(run(&mut eng, "square(y) = y^2\nsquare(t + 1)").to_string(), "(t + 1)^2");
}

#[test]
fn late_binding() {
    let mut eng = ExecutionEngine::new();
    assert_eq!(run(&mut eng, "a = 1\nf(x) = a * x\na = 2\nf(3)"), Expr::Constant(6.0));
}

#[test]
fn parameters_shadow_variables() {
    let mut eng = ExecutionEngine::new();
    assert_eq!(run(&mut eng, "x = 10\nf(x) = x + 1\nf(2)"), Expr::Constant(3.0));
}

#[test]
fn function_composition() {
    let mut eng = ExecutionEngine::new();
    let source = "f(x) = x^2\ng(x, y) = f(x) + f(y)\nderiv(g(t, 3 * t))";
    assert_eq!(run(&mut eng, source), parse("2 * t + 18 * t"));
}

#[test]
fn arity_mismatch() {
    let mut eng = ExecutionEngine::new();
    eng.execute(&parse("g(a, b) = a * b")).unwrap();

    let err = eng.execute(&parse("g(1)")).unwrap_err();
    let kind = err.downcast_ref::<ArityMismatch>().unwrap();
    assert_eq!((kind.name.as_str(), kind.expected, kind.given), ("g", 2, 1));
}

#[test]
fn ambiguous_variable() {
    let mut eng = ExecutionEngine::new();
    let err = eng.execute(&parse("deriv(x + y)")).unwrap_err();
    let kind = err.downcast_ref::<AmbiguousVariable>().unwrap();
    assert_eq!(kind.vars, vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn recursion_is_bounded() {
    let mut eng = ExecutionEngine::new();
    eng.execute(&parse("f(x) = f(x)")).unwrap();

    let err = eng.execute(&parse("f(1)")).unwrap_err();
    assert!(err.is::<RecursionDepthExceeded>());

    // the engine is still usable afterwards
    assert_eq!(eng.depth(), 0);
    assert_eq!(run(&mut eng, "1 + 1"), Expr::Constant(2.0));
}

#[test]
fn recursion_on_a_small_stack() {
    let worker = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(|| {
            let mut eng = ExecutionEngine::new();
            eng.execute(&parse("f(x) = f(x) * x + 1")).unwrap();

            let err = parse("f(t)").derivative(&mut eng, &Expr::function("t")).unwrap_err();
            assert!(err.is::<RecursionDepthExceeded>());
            let err = eng.execute(&parse("f(2)")).unwrap_err();
            assert!(err.is::<RecursionDepthExceeded>());
            assert_eq!(eng.depth(), 0);
        })
        .unwrap();

    worker.join().unwrap();
}

#[test]
fn recursion_with_growing_arguments() {
    let mut eng = ExecutionEngine::new();
    eng.execute_str("f(x) = f(x + x)").unwrap();

    let err = eng.execute_str("f(1)").unwrap_err();
    assert!(err.is::<ExpressionTooLarge>());
    assert_eq!(eng.depth(), 0);
}

#[test]
fn large_constants_stay_finite() {
    let big = format!("1{}", "0".repeat(200));
    let mut eng = ExecutionEngine::new();

    let value = run(&mut eng, &format!("{} * ({} * x)", big, big));
    assert_eq!(value, parse(&format!("{} * ({} * x)", big, big)));
    assert_eq!(parse(&value.to_string()), value);

    let err = eng.execute_str(&"9".repeat(400)).unwrap_err();
    assert!(err.is::<NumberTooLarge>());
}

#[test]
fn unknown_function_suggestions() {
    let mut eng = ExecutionEngine::new();
    eng.register_function(Function::new("sq", vec!["x".into()], parse("x^2")));

    // unknown functions are kept symbolically until they have to be differentiated
    assert_eq!(run(&mut eng, "sr(2)"), parse("sr(2)"));

    let err = eng.execute(&parse("deriv(sr(x), x)")).unwrap_err();
    let kind = err.downcast_ref::<FunctionNotFound>().unwrap();
    assert_eq!(kind.suggestions, vec!["sq".to_string()]);

    let mut report = Vec::new();
    err.write_report("input", "deriv(sr(x), x)", &mut report).unwrap();
    assert!(String::from_utf8_lossy(&report).contains("unknown function"));
}

#[test]
fn failed_statement_keeps_earlier_definitions() {
    let mut eng = ExecutionEngine::new();
    assert!(eng.execute_str("a = 3\n1 / 0\nb = 4").is_err());
    assert!(eng.function("a").is_some());
    assert!(eng.function("b").is_none());
}
