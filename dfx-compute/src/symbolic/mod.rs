//! Symbolic manipulation of expressions.
//!
//! Every operation here works on the [`Expr`] trees produced by [`dfx_parser`], and is driven by
//! an [`ExecutionEngine`] that supplies the user-defined functions and the current call frame.
//! Each operation returns a new tree; the input is never modified.
//!
//! # Substitution
//!
//! [`Symbolic::substitute`] replaces names with what they stand for. A parameter of the function
//! being invoked is replaced by its argument, a variable is replaced by its value, and an
//! invocation of a user-defined function is replaced by the function's body, with the arguments
//! substituted for the parameters. Unknown names are left alone, so the result may still contain
//! free variables.
//!
//! # Differentiation
//!
//! [`Symbolic::derivative`] applies the usual rules of differentiation structurally, and produces
//! an unsimplified tree. Invocations of user-defined functions are differentiated with the chain
//! rule.
//!
//! ```
//! use dfx_compute::{engine::ExecutionEngine, symbolic::Symbolic};
//! use dfx_parser::parser::{ast::Expr, Parser};
//!
//! let mut eng = ExecutionEngine::new();
//! let expr = Parser::new("x^2 + 3 * x").unwrap().parse_stmt().unwrap();
//!
//! let derivative = expr.derivative(&mut eng, &Expr::function("x")).unwrap();
//! let simplified = derivative.simplify(&mut eng).unwrap();
//! assert_eq!(simplified.to_string(), "2 * x + 3");
//! ```
//!
//! # Simplification
//!
//! [`Symbolic::simplify`] folds operations on constants and removes identity elements such as
//! `x + 0` and `x^1`, in passes, until the tree stops changing.

pub mod derivative;
pub mod simplify;
pub mod substitute;
pub mod vars;

use crate::{
    engine::ExecutionEngine,
    error::{kind::NonVariableRespect, Error},
};
use dfx_parser::parser::ast::Expr;

/// Symbolic operations on an expression.
pub trait Symbolic {
    /// Returns the derivative of the expression with respect to the given variable. The result
    /// is not simplified.
    ///
    /// `respect` must be a variable, i.e. an [`Expr::Function`].
    fn derivative(&self, eng: &mut ExecutionEngine, respect: &Expr) -> Result<Expr, Error>;

    /// Returns the expression with every bound parameter, variable, and invocation of a
    /// user-defined function replaced by what it stands for.
    fn substitute(&self, eng: &mut ExecutionEngine) -> Result<Expr, Error>;

    /// Returns a simplified expression with the same value.
    fn simplify(&self, eng: &mut ExecutionEngine) -> Result<Expr, Error>;

    /// Returns the single free variable of the expression.
    ///
    /// Returns an error if there is no free variable, or if there are several.
    fn get_var(&self, eng: &mut ExecutionEngine) -> Result<String, Error>;

    /// Returns true if the expressions are structurally equal after both are substituted and
    /// simplified.
    ///
    /// The comparison is sensitive to the order of operands, so `x + 1` does not equal `1 + x`.
    fn equals(&self, eng: &mut ExecutionEngine, other: &Expr) -> Result<bool, Error>;
}

impl Symbolic for Expr {
    fn derivative(&self, eng: &mut ExecutionEngine, respect: &Expr) -> Result<Expr, Error> {
        match respect {
            Expr::Function(name) => derivative::derivative(self, eng, name),
            _ => Err(Error::spanless(NonVariableRespect)),
        }
    }

    fn substitute(&self, eng: &mut ExecutionEngine) -> Result<Expr, Error> {
        substitute::substitute(self, eng)
    }

    fn simplify(&self, eng: &mut ExecutionEngine) -> Result<Expr, Error> {
        simplify::simplify(self, eng)
    }

    fn get_var(&self, eng: &mut ExecutionEngine) -> Result<String, Error> {
        vars::get_var(self, eng)
    }

    fn equals(&self, eng: &mut ExecutionEngine, other: &Expr) -> Result<bool, Error> {
        let lhs = self.substitute(eng)?.simplify(eng)?;
        let rhs = other.substitute(eng)?.simplify(eng)?;
        Ok(lhs == rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfx_parser::parser::Parser;

    fn parse(source: &str) -> Expr {
        Parser::new(source).unwrap().parse_stmt().unwrap()
    }

    #[test]
    fn non_variable_respect() {
        let mut eng = ExecutionEngine::new();
        let err = parse("x^2").derivative(&mut eng, &Expr::Constant(2.0)).unwrap_err();
        assert!(err.is::<NonVariableRespect>());
    }

    #[test]
    fn equals_after_simplification() {
        let mut eng = ExecutionEngine::new();
        assert!(parse("x * 1 + 0").equals(&mut eng, &parse("x")).unwrap());
        assert!(parse("2 + 3").equals(&mut eng, &parse("5")).unwrap());
        assert!(!parse("x + 1").equals(&mut eng, &parse("1 + x")).unwrap());
    }

    #[test]
    fn equals_through_functions() {
        let mut eng = ExecutionEngine::new();
        eng.execute(&parse("f(x) = x^2")).unwrap();
        assert!(parse("f(3)").equals(&mut eng, &parse("9")).unwrap());
        assert!(parse("f(y)").equals(&mut eng, &parse("y^2")).unwrap());
    }

    #[test]
    fn clone_is_independent() {
        let original = parse("f(x) + 2 * y");
        let mut copy = original.clone();
        assert_eq!(copy, original);

        if let Expr::Binary(binary) = &mut copy {
            *binary.rhs = Expr::Constant(0.0);
        }
        assert_ne!(copy, original);
        assert_eq!(original, parse("f(x) + 2 * y"));
    }
}
