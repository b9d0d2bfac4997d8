//! Simplification rules for logarithms.

use dfx_parser::parser::ast::{BinOpKind, Expr};
use super::do_binary;

/// `log(a, a) = 1`
pub fn log_self(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Log, |lhs, rhs| {
        (lhs == rhs && !lhs.is_constant_value(1.0)).then_some(Expr::Constant(1.0))
    })
}

/// `log(b, 1) = 0`
pub fn log_one(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Log, |lhs, rhs| {
        (rhs.is_constant_value(1.0) && !lhs.is_constant_value(1.0)).then_some(Expr::Constant(0.0))
    })
}

/// Applies all logarithm rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    log_self(expr).or_else(|| log_one(expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn logarithms() {
        let x = Expr::function("x");
        assert_eq!(log_self(&Expr::log(x.clone(), x.clone())), Some(Expr::Constant(1.0)));
        assert_eq!(log_one(&Expr::log(x.clone(), Expr::Constant(1.0))), Some(Expr::Constant(0.0)));
        assert_eq!(log_self(&Expr::log(Expr::Constant(2.0), x)), None);
    }
}
