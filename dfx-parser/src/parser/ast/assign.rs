use crate::{
    parser::{error::{kind, Error}, Parse, Parser, RESERVED},
    tokenizer::TokenKind,
};
use std::fmt;
use super::{binary::Binary, call::Invocation, expr::Expr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function header, such as `f(x, y)` in `f(x, y) = x + y`, or `a` in `a = 5`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FuncHeader {
    /// The name of the function being defined.
    pub name: String,

    /// The names of the formal parameters, in order.
    pub params: Vec<String>,
}

impl FuncHeader {
    /// Returns the header as the [`Invocation`] it was declared with, such as `f(x, y)`.
    pub fn to_invocation(&self) -> Invocation {
        Invocation::new(
            Expr::Function(self.name.clone()),
            self.params.iter().cloned().map(Expr::Function).collect(),
        )
    }
}

impl Parse for FuncHeader {
    /// Parses a name, optionally followed by a parenthesized list of parameter names.
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let start = input.cursor;
        let token = input.next_token()?;
        if token.kind != TokenKind::Name || RESERVED.contains(&token.lexeme) {
            return Err(Error::new(vec![token.span], kind::InvalidAssignmentTarget));
        }

        let name = token.lexeme.to_owned();
        if !input.at(TokenKind::OpenParen) {
            return Ok(Self { name, params: Vec::new() });
        }

        let params = input.parse_args()?
            .into_iter()
            .map(|(arg, _)| match arg {
                Expr::Function(param) => Some(param),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::new(vec![input.span_from(start)], kind::InvalidAssignmentTarget))?;
        Ok(Self { name, params })
    }
}

/// Succeeds if the current token is the `=` of an assignment.
fn expect_assign(_: &FuncHeader, input: &Parser) -> Result<(), Error> {
    if input.at(TokenKind::Assign) {
        Ok(())
    } else {
        Err(input.unexpected(&[TokenKind::Assign]))
    }
}

impl fmt::Display for FuncHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, self.params.join(", "))
        }
    }
}

/// The definition of a function, such as `f(x) = x^2`.
///
/// This node only appears at the top level of a statement; it never produces a value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    /// The name and formal parameters of the function.
    pub header: FuncHeader,

    /// The body of the function.
    pub body: Box<Expr>,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(header: FuncHeader, body: Expr) -> Self {
        Self {
            header,
            body: Box::new(body),
        }
    }
}

impl Assignment {
    /// Returns true if the tokens at the cursor begin an assignment: a function header followed
    /// by `=`. The cursor is not moved.
    pub(crate) fn is_next(input: &mut Parser) -> bool {
        let start = input.cursor;
        let found = input.try_parse_then::<FuncHeader, _>(expect_assign).is_ok();
        input.cursor = start;
        found
    }
}

impl Parse for Assignment {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let header = input.try_parse_then::<FuncHeader, _>(expect_assign)?;
        input.next_token()?;
        let body = Binary::parse_expr(input, 0)?;
        Ok(Self::new(header, body))
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.header, self.body)
    }
}
