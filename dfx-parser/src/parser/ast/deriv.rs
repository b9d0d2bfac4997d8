use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::fmt;
use super::expr::Expr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The derivative of an expression, written `deriv(expr)` or `deriv(expr, x)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Differentiation {
    /// The expression to differentiate.
    pub expr: Box<Expr>,

    /// The variable to differentiate with respect to. If [`None`], the variable is inferred from
    /// `expr` when the derivative is computed.
    pub respect: Option<String>,
}

impl Differentiation {
    /// Creates a new derivative node.
    pub fn new(expr: Expr, respect: Option<String>) -> Self {
        Self {
            expr: Box::new(expr),
            respect,
        }
    }
}

impl Parse for Differentiation {
    /// Parses `deriv(expr)` or `deriv(expr, x)`.
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let start = input.cursor;
        let token = input.next_token()?;
        if token.kind != TokenKind::Name || token.lexeme != "deriv" {
            input.cursor = start;
            return Err(input.unexpected(&[TokenKind::Name]));
        }

        let args = input.parse_args()?;
        let given = args.len();
        let mut args = args.into_iter();
        match (args.next(), args.next(), args.next()) {
            (Some((expr, _)), None, None) => Ok(Self::new(expr, None)),
            (Some((expr, _)), Some((Expr::Function(respect), _)), None) => Ok(Self::new(expr, Some(respect))),
            (Some(_), Some((_, respect_span)), None) => {
                Err(Error::new(vec![respect_span], kind::NonVariableRespect))
            },
            _ => Err(Error::new(vec![input.span_from(start)], kind::BuiltinArity {
                name: "deriv",
                expected: "1 or 2",
                given,
                usage: "deriv(expr) or deriv(expr, x)",
            })),
        }
    }
}

impl fmt::Display for Differentiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.respect {
            Some(respect) => write!(f, "deriv({}, {})", self.expr, respect),
            None => write!(f, "deriv({})", self.expr),
        }
    }
}
