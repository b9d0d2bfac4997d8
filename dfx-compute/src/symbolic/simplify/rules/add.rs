//! Simplification rules for addition and subtraction.

use dfx_parser::parser::ast::{BinOpKind, Expr};
use super::do_binary;

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Add, |lhs, rhs| {
        if lhs.is_constant_value(0.0) {
            Some(rhs.clone())
        } else if rhs.is_constant_value(0.0) {
            Some(lhs.clone())
        } else {
            None
        }
    })
}

/// `a-0 = a`
pub fn subtract_zero(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Sub, |lhs, rhs| {
        rhs.is_constant_value(0.0).then(|| lhs.clone())
    })
}

/// `a-a = 0`
pub fn subtract_self(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Sub, |lhs, rhs| {
        (lhs == rhs).then_some(Expr::Constant(0.0))
    })
}

/// Applies all addition rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    add_zero(expr)
        .or_else(|| subtract_zero(expr))
        .or_else(|| subtract_self(expr))
}
