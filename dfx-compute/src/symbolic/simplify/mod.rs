//! Simplification of expressions.
//!
//! Simplification is done in passes. Each pass rebuilds the tree bottom-up: the children of a
//! node are simplified first, then operations on two constants are folded into a single
//! constant, then the rules in [`rules`] are tried on the node. Passes are repeated until the
//! tree stops changing, or until the configured maximum number of passes is reached.
//!
//! Every rule preserves the value of the expression.

pub mod fold;
pub mod rules;

use crate::{
    engine::ExecutionEngine,
    error::{kind::UnexpectedAssignment, Error},
};
use dfx_parser::parser::ast::{Binary, Expr};
use super::derivative;
use tracing::{trace, warn};

/// Simplifies the expression until it reaches a fixed point.
///
/// [`Expr::Differentiation`] nodes are evaluated, and their results simplified in turn.
pub fn simplify(expr: &Expr, eng: &mut ExecutionEngine) -> Result<Expr, Error> {
    let max_passes = eng.config().max_simplify_passes;
    let mut current = pass(expr, eng)?;

    for passes in 1..max_passes {
        let next = pass(&current, eng)?;
        if next == current {
            trace!(passes, "simplification reached a fixed point");
            return Ok(current);
        }
        current = next;
    }

    warn!(max_passes, expr = %current, "simplification stopped before reaching a fixed point");
    Ok(current)
}

/// Runs a single simplification pass.
fn pass(expr: &Expr, eng: &mut ExecutionEngine) -> Result<Expr, Error> {
    match expr {
        Expr::Constant(_) | Expr::E | Expr::Function(_) => Ok(expr.clone()),
        Expr::Invocation(invocation) => {
            let callee = match &*invocation.callee {
                callee @ Expr::Function(_) => callee.clone(),
                callee => pass(callee, eng)?,
            };
            let args = invocation.args
                .iter()
                .map(|arg| pass(arg, eng))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::invocation(callee, args))
        },
        Expr::Differentiation(differentiation) => {
            let derivative = derivative::evaluate(differentiation, eng)?;
            pass(&derivative, eng)
        },
        Expr::Assignment(_) => Err(Error::spanless(UnexpectedAssignment)),
        Expr::Binary(binary) => {
            let binary = Binary::new(pass(&binary.lhs, eng)?, binary.op, pass(&binary.rhs, eng)?);
            if let Some(folded) = fold::fold(&binary)? {
                return Ok(folded);
            }

            let expr = Expr::Binary(binary);
            Ok(rules::all(&expr).unwrap_or(expr))
        },
    }
}
