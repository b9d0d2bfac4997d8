use crate::{
    parser::{error::Error, Parse, Parser, RESERVED},
    tokenizer::TokenKind,
};
use std::fmt;
use super::expr::Expr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An application of an expression to a list of arguments, such as `f(x, 2)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Invocation {
    /// The expression being applied. This is usually an [`Expr::Function`].
    pub callee: Box<Expr>,

    /// The arguments, in order.
    pub args: Vec<Expr>,
}

impl Invocation {
    /// Creates a new invocation.
    pub fn new(callee: Expr, args: Vec<Expr>) -> Self {
        Self {
            callee: Box::new(callee),
            args,
        }
    }

    /// Returns the name of the callee, if the callee is an [`Expr::Function`].
    pub fn name(&self) -> Option<&str> {
        self.callee.as_function()
    }

    /// Parses an argument list applied to `callee`, such as `(3)` in `(f)(3)`. Returns `callee`
    /// unchanged if no argument list follows.
    pub(crate) fn parse_applied(input: &mut Parser, callee: Expr) -> Result<Expr, Error> {
        if !input.at(TokenKind::OpenParen) {
            return Ok(callee);
        }

        let args = input.parse_args()?
            .into_iter()
            .map(|(arg, _)| arg)
            .collect();
        Ok(Expr::Invocation(Self::new(callee, args)))
    }
}

impl Parse for Invocation {
    /// Parses an invocation of a named function, such as `f(x, 2)`.
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let start = input.cursor;
        let token = input.next_token()?;
        if token.kind != TokenKind::Name || RESERVED.contains(&token.lexeme) {
            input.cursor = start;
            return Err(input.unexpected(&[TokenKind::Name]));
        }

        let args = input.parse_args()?
            .into_iter()
            .map(|(arg, _)| arg)
            .collect();
        Ok(Self::new(Expr::Function(token.lexeme.to_owned()), args))
    }
}

/// Writes a comma-separated list of expressions.
pub(crate) fn fmt_args(f: &mut fmt::Formatter<'_>, args: &[Expr]) -> fmt::Result {
    let mut iter = args.iter();
    if let Some(arg) = iter.next() {
        write!(f, "{}", arg)?;
        for arg in iter {
            write!(f, ", {}", arg)?;
        }
    }
    Ok(())
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.callee {
            Expr::Function(name) => write!(f, "{}(", name)?,
            callee => write!(f, "({})(", callee)?,
        }
        fmt_args(f, &self.args)?;
        write!(f, ")")
    }
}
