//! Simplification rules for multiplication and division.

use dfx_parser::parser::ast::{BinOpKind, Expr};
use super::do_binary;

/// `0a = 0`
/// `a0 = 0`
pub fn multiply_zero(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Mul, |lhs, rhs| {
        (lhs.is_constant_value(0.0) || rhs.is_constant_value(0.0)).then_some(Expr::Constant(0.0))
    })
}

/// `1a = a`
/// `a1 = a`
pub fn multiply_one(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Mul, |lhs, rhs| {
        if lhs.is_constant_value(1.0) {
            Some(rhs.clone())
        } else if rhs.is_constant_value(1.0) {
            Some(lhs.clone())
        } else {
            None
        }
    })
}

/// `a/1 = a`
pub fn divide_one(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Div, |lhs, rhs| {
        rhs.is_constant_value(1.0).then(|| lhs.clone())
    })
}

/// `c1(c2a) = (c1c2)a`
/// `(c1a)c2 = (c1c2)a`
///
/// where `c1` and `c2` are numbers.
pub fn combine_coefficients(expr: &Expr) -> Option<Expr> {
    do_binary(expr, BinOpKind::Mul, |lhs, rhs| {
        let (outer, product) = match (lhs, rhs) {
            (Expr::Constant(outer), product) | (product, Expr::Constant(outer)) => (outer, product),
            _ => return None,
        };
        do_binary(product, BinOpKind::Mul, |inner_lhs, inner_rhs| match inner_lhs {
            Expr::Constant(inner) => {
                let coefficient = outer * inner;
                coefficient.is_finite().then(|| Expr::product(
                    Expr::Constant(coefficient),
                    inner_rhs.clone(),
                ))
            },
            _ => None,
        })
    })
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    multiply_zero(expr)
        .or_else(|| multiply_one(expr))
        .or_else(|| divide_one(expr))
        .or_else(|| combine_coefficients(expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn x() -> Expr {
        Expr::function("x")
    }

    #[test]
    fn identity_factors() {
        assert_eq!(multiply_zero(&Expr::product(x(), Expr::Constant(0.0))), Some(Expr::Constant(0.0)));
        assert_eq!(multiply_one(&Expr::product(Expr::Constant(1.0), x())), Some(x()));
        assert_eq!(divide_one(&Expr::quotient(x(), Expr::Constant(1.0))), Some(x()));

        // `1 / x` is not `x`
        assert_eq!(divide_one(&Expr::quotient(Expr::Constant(1.0), x())), None);
    }

    #[test]
    fn coefficients() {
        let expr = Expr::product(Expr::Constant(2.0), Expr::product(Expr::Constant(3.0), x()));
        assert_eq!(combine_coefficients(&expr), Some(Expr::product(Expr::Constant(6.0), x())));

        let expr = Expr::product(Expr::product(Expr::Constant(3.0), x()), Expr::Constant(2.0));
        assert_eq!(combine_coefficients(&expr), Some(Expr::product(Expr::Constant(6.0), x())));

        let expr = Expr::product(Expr::Constant(2.0), Expr::product(x(), Expr::Constant(3.0)));
        assert_eq!(combine_coefficients(&expr), None);
    }

    #[test]
    fn coefficients_stay_finite() {
        let expr = Expr::product(Expr::Constant(1e200), Expr::product(Expr::Constant(1e200), x()));
        assert_eq!(combine_coefficients(&expr), None);
    }
}
