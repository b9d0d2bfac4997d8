//! Folding of operations on constants.

use crate::error::{
    kind::{IndeterminateForm, NonFiniteResult},
    Error,
};
use dfx_parser::parser::ast::{BinOpKind, Binary, Expr};

/// Evaluates an operation whose operands are both constants, returning the resulting
/// [`Expr::Constant`]. `e` counts as a constant.
///
/// Returns `Ok(None)` if either operand is not a constant, and an error if the operation has no
/// finite real value.
pub fn fold(binary: &Binary) -> Result<Option<Expr>, Error> {
    let (Some(lhs), Some(rhs)) = (binary.lhs.value(), binary.rhs.value()) else {
        return Ok(None);
    };

    if binary.op == BinOpKind::Exp && lhs == 0.0 && rhs == 0.0 {
        return Err(Error::spanless(IndeterminateForm { form: "0^0".to_string() }));
    }

    let value = binary.op.apply(lhs, rhs);
    if !value.is_finite() {
        return Err(Error::spanless(NonFiniteResult { expr: binary.to_string() }));
    }

    // avoid producing `-0`, which renders differently from `0`
    Ok(Some(Expr::Constant(if value == 0.0 { 0.0 } else { value })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fold_op(lhs: Expr, op: BinOpKind, rhs: Expr) -> Result<Option<Expr>, Error> {
        fold(&Binary::new(lhs, op, rhs))
    }

    #[test]
    fn constants() {
        let c = Expr::Constant;
        assert_eq!(fold_op(c(2.0), BinOpKind::Add, c(3.0)).unwrap(), Some(c(5.0)));
        assert_eq!(fold_op(c(2.0), BinOpKind::Sub, c(3.0)).unwrap(), Some(c(-1.0)));
        assert_eq!(fold_op(c(2.0), BinOpKind::Mul, c(3.0)).unwrap(), Some(c(6.0)));
        assert_eq!(fold_op(c(3.0), BinOpKind::Div, c(2.0)).unwrap(), Some(c(1.5)));
        assert_eq!(fold_op(c(2.0), BinOpKind::Exp, c(3.0)).unwrap(), Some(c(8.0)));
        assert_eq!(fold_op(c(10.0), BinOpKind::Log, c(100.0)).unwrap(), Some(c(2.0)));
        assert_eq!(fold_op(Expr::E, BinOpKind::Log, Expr::E).unwrap(), Some(c(1.0)));
    }

    #[test]
    fn negative_zero() {
        let c = Expr::Constant;
        assert_eq!(fold_op(c(-1.0), BinOpKind::Mul, c(0.0)).unwrap(), Some(c(0.0)));
        assert_eq!(fold_op(c(-1.0), BinOpKind::Mul, c(0.0)).unwrap().unwrap().to_string(), "0");
    }

    #[test]
    fn non_constants() {
        assert_eq!(fold_op(Expr::function("x"), BinOpKind::Add, Expr::Constant(1.0)).unwrap(), None);
    }

    #[test]
    fn undefined() {
        let c = Expr::Constant;
        assert!(fold_op(c(1.0), BinOpKind::Div, c(0.0)).unwrap_err().is::<NonFiniteResult>());
        assert!(fold_op(c(-8.0), BinOpKind::Exp, c(0.5)).unwrap_err().is::<NonFiniteResult>());
        assert!(fold_op(c(1.0), BinOpKind::Log, c(1.0)).unwrap_err().is::<NonFiniteResult>());
        assert!(fold_op(c(0.0), BinOpKind::Exp, c(0.0)).unwrap_err().is::<IndeterminateForm>());
    }
}
