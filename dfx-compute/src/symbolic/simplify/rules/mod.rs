//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. Rules only look at the node they are given; its children are already
//! simplified by the time a rule runs.

pub mod add;
pub mod log;
pub mod multiply;
pub mod power;

use dfx_parser::parser::ast::{BinOpKind, Expr};

/// If the expression is a binary operation of the given kind, calls the given transformation
/// function with the left and right-hand-side of the operation.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_binary(
    expr: &Expr,
    op: BinOpKind,
    f: impl Fn(&Expr, &Expr) -> Option<Expr>,
) -> Option<Expr> {
    match expr {
        Expr::Binary(binary) if binary.op == op => f(&binary.lhs, &binary.rhs),
        _ => None,
    }
}

/// Applies all rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    add::all(expr)
        .or_else(|| multiply::all(expr))
        .or_else(|| power::all(expr))
        .or_else(|| log::all(expr))
}
