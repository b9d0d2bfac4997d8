//! Simplification rules for powers.

use dfx_parser::parser::ast::{BinOpKind, Expr};
use super::do_binary;

/// `a^1 = a`
pub fn power_one(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Exp, |lhs, rhs| {
        rhs.is_constant_value(1.0).then(|| lhs.clone())
    })
}

/// `a^0 = 1`, where `a` is not `0`
pub fn power_zero(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Exp, |lhs, rhs| {
        (rhs.is_constant_value(0.0) && !lhs.is_constant_value(0.0)).then_some(Expr::Constant(1.0))
    })
}

/// `1^a = 1`
pub fn one_power(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Exp, |lhs, _| {
        lhs.is_constant_value(1.0).then_some(Expr::Constant(1.0))
    })
}

/// Applies all power rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    power_one(expr)
        .or_else(|| power_zero(expr))
        .or_else(|| one_power(expr))
}
