//! The kinds of errors that can occur while tokenizing or parsing source code.

use ariadne::Fmt;
use dfx_attrs::ErrorKind;
use dfx_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// A character that does not begin any token was found in the source code.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid character `{}` at position {}", character, position),
    labels = ["this character is not part of the language"],
    help = format!("expressions may only contain letters, numbers, whitespace, and {}", "+ - * / ^ = ( ) ,".fg(EXPR)),
)]
pub struct InvalidCharacter {
    /// The offending character.
    pub character: char,

    /// The byte offset of the character in the source code.
    pub position: usize,
}

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of file",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of file",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = "add a closing parenthesis `)` somewhere after this",
)]
pub struct UnclosedParenthesis;

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// The left-hand side of an assignment is not a function header.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid assignment target",
    labels = ["this cannot be assigned to"],
    help = format!(
        "the left side must be a name such as {}, optionally followed by parameter names, such as {}",
        "a".fg(EXPR),
        "f(x, y)".fg(EXPR),
    ),
)]
pub struct InvalidAssignmentTarget;

/// A builtin form, such as `log` or `deriv`, was given the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} argument(s), but {} were given", name, expected, given),
    labels = ["in this call"],
    help = format!("usage: {}", usage.fg(EXPR)),
)]
pub struct BuiltinArity {
    /// The name of the builtin form.
    pub name: &'static str,

    /// A human readable description of the accepted argument count.
    pub expected: &'static str,

    /// The number of arguments given.
    pub given: usize,

    /// An example of correct usage.
    pub usage: &'static str,
}

/// The variable of differentiation is not a bare variable name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot differentiate with respect to a non-variable",
    labels = ["this must be a variable name"],
    help = format!("for example, {}", "deriv(x^2, x)".fg(EXPR)),
)]
pub struct NonVariableRespect;

/// A number literal is too large to be represented as a finite number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "number is too large",
    labels = ["this number"],
    help = format!("numbers must be smaller than {:e}", f64::MAX),
)]
pub struct NumberTooLarge;
