use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};
use super::{
    assign::Assignment,
    binary::{Binary, BinOpKind},
    call::Invocation,
    deriv::Differentiation,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The rendering precedence of an expression, in order from lowest precedence (binds loosest) to
/// highest precedence (binds tightest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    /// Assignments, which can only appear at the top level.
    Assign,

    /// Addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Negative numbers, such as `-2`.
    Neg,

    /// Exponentiation (`^`).
    Exp,

    /// Anything that never needs parentheses, such as names and calls.
    Atom,
}

/// A node of the expression tree.
///
/// Structural equality ([`PartialEq`]) compares the variant, constant values, operators, and
/// children in order. It does not look through function definitions; use the engine's `equals`
/// in `dfx-compute` for that.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A finite real number, such as `2` or `3.14`.
    Constant(f64),

    /// Euler's number, written `e`.
    E,

    /// A name, such as `x` or `f`. Depending on the context, this is either a free variable, a
    /// parameter of the function being evaluated, or a reference to a defined function.
    Function(String),

    /// An application of an expression to arguments, such as `f(x, 2)`.
    Invocation(Invocation),

    /// A derivative, such as `deriv(x^2, x)`.
    Differentiation(Differentiation),

    /// The definition of a function, such as `f(x) = x^2`.
    Assignment(Assignment),

    /// A binary operation, such as `x + 1` or `log(2, x)`.
    Binary(Binary),
}

impl Expr {
    /// Creates a reference to the given name.
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }

    /// Creates an invocation of `callee` with the given arguments.
    pub fn invocation(callee: Expr, args: Vec<Expr>) -> Self {
        Self::Invocation(Invocation::new(callee, args))
    }

    /// Creates a binary expression.
    pub fn binary(lhs: Expr, op: BinOpKind, rhs: Expr) -> Self {
        Self::Binary(Binary::new(lhs, op, rhs))
    }

    /// Creates `lhs + rhs`.
    pub fn sum(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(lhs, BinOpKind::Add, rhs)
    }

    /// Creates `lhs - rhs`.
    pub fn difference(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(lhs, BinOpKind::Sub, rhs)
    }

    /// Creates `lhs * rhs`.
    pub fn product(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(lhs, BinOpKind::Mul, rhs)
    }

    /// Creates `lhs / rhs`.
    pub fn quotient(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(lhs, BinOpKind::Div, rhs)
    }

    /// Creates `base ^ exponent`.
    pub fn power(base: Expr, exponent: Expr) -> Self {
        Self::binary(base, BinOpKind::Exp, exponent)
    }

    /// Creates `log(base, arg)`.
    pub fn log(base: Expr, arg: Expr) -> Self {
        Self::binary(base, BinOpKind::Log, arg)
    }

    /// Creates the natural logarithm `ln(arg)`, which is `log(e, arg)`.
    pub fn ln(arg: Expr) -> Self {
        Self::log(Expr::E, arg)
    }

    /// Creates a derivative of `expr`, optionally naming the variable of differentiation.
    pub fn differentiation(expr: Expr, respect: Option<String>) -> Self {
        Self::Differentiation(Differentiation::new(expr, respect))
    }

    /// Returns true if the expression is a number ([`Expr::Constant`] or [`Expr::E`]).
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_) | Self::E)
    }

    /// Returns true if the expression is [`Expr::E`].
    pub fn is_e(&self) -> bool {
        matches!(self, Self::E)
    }

    /// Returns the numeric value of the expression, if it is a number.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Constant(value) => Some(*value),
            Self::E => Some(std::f64::consts::E),
            _ => None,
        }
    }

    /// Returns true if the expression is a number equal to `value`.
    pub fn is_constant_value(&self, value: f64) -> bool {
        self.value() == Some(value)
    }

    /// Returns the name if the expression is an [`Expr::Function`].
    pub fn as_function(&self) -> Option<&str> {
        match self {
            Self::Function(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + match self {
            Self::Constant(_) | Self::E | Self::Function(_) => 0,
            Self::Invocation(invocation) => {
                invocation.callee.size() + invocation.args.iter().map(Self::size).sum::<usize>()
            },
            Self::Differentiation(differentiation) => differentiation.expr.size(),
            Self::Assignment(assignment) => assignment.body.size(),
            Self::Binary(binary) => binary.lhs.size() + binary.rhs.size(),
        }
    }

    /// Returns the precedence of this expression when it is rendered.
    pub(crate) fn precedence(&self) -> Precedence {
        match self {
            Self::Constant(value) if value.is_sign_negative() => Precedence::Neg,
            Self::Binary(binary) => binary.op.precedence(),
            Self::Assignment(_) => Precedence::Assign,
            _ => Precedence::Atom,
        }
    }
}

/// The tokens that may begin an expression.
const EXPR_START: &[TokenKind] = &[
    TokenKind::Number,
    TokenKind::Name,
    TokenKind::OpenParen,
    TokenKind::Sub,
];

impl Expr {
    /// Parses an optionally negated operand. Negation binds looser than exponentiation, so
    /// `-2^2` is `-(2^2)`.
    pub(crate) fn parse_operand(input: &mut Parser) -> Result<Self, Error> {
        if !input.at(TokenKind::Sub) {
            return Self::parse_atom(input);
        }

        input.cursor += 1;
        let precedence = input.ops
            .precedence_of(BinOpKind::Exp)
            .unwrap_or_else(|| input.ops.max_precedence() + 1);
        let operand = Binary::parse_expr(input, precedence)?;
        Ok(match operand {
            Self::Constant(value) => Self::Constant(-value),
            operand => Self::product(Self::Constant(-1.0), operand),
        })
    }

    /// Parses a number, a name, a call, a builtin form, or a parenthesized expression.
    fn parse_atom(input: &mut Parser) -> Result<Self, Error> {
        let start = input.cursor;
        let token = input.next_token()?;

        match token.kind {
            TokenKind::Number => {
                let value = token.lexeme.parse::<f64>()
                    .map_err(|_| Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                        expected: &[TokenKind::Number],
                        found: token.kind,
                    }))?;
                if !value.is_finite() {
                    return Err(Error::new(vec![token.span], kind::NumberTooLarge));
                }
                Ok(Self::Constant(value))
            },
            TokenKind::Name => match token.lexeme {
                "e" => Ok(Self::E),
                "deriv" => {
                    input.cursor = start;
                    Differentiation::parse(input).map(Self::Differentiation)
                },
                "log" | "ln" => {
                    let args = input.parse_args()?;
                    Self::parse_log(token.lexeme, args, input.span_from(start))
                },
                _ if input.at(TokenKind::OpenParen) => {
                    input.cursor = start;
                    Invocation::parse(input).map(Self::Invocation)
                },
                name => Ok(Self::Function(name.to_owned())),
            },
            TokenKind::OpenParen => {
                if input.at(TokenKind::CloseParen) {
                    return Err(Error::new(vec![token.span.start..input.span().end], kind::EmptyParenthesis));
                }

                let expr = Binary::parse_expr(input, 0)?;
                if !input.at(TokenKind::CloseParen) {
                    return Err(Error::new(vec![token.span], kind::UnclosedParenthesis));
                }
                input.cursor += 1;
                Invocation::parse_applied(input, expr)
            },
            _ => {
                input.cursor = start;
                Err(input.unexpected(EXPR_START))
            },
        }
    }

    /// Builds the node for `log(base, x)` or `ln(x)` from its arguments.
    fn parse_log(name: &str, args: Vec<(Self, Range<usize>)>, span: Range<usize>) -> Result<Self, Error> {
        let given = args.len();
        let mut args = args.into_iter();
        match (name, args.next(), args.next(), args.next()) {
            ("log", Some((base, _)), Some((arg, _)), None) => Ok(Self::log(base, arg)),
            ("ln", Some((arg, _)), None, None) => Ok(Self::ln(arg)),
            ("log", ..) => Err(Error::new(vec![span], kind::BuiltinArity {
                name: "log",
                expected: "2",
                given,
                usage: "log(base, x)",
            })),
            _ => Err(Error::new(vec![span], kind::BuiltinArity {
                name: "ln",
                expected: "1",
                given,
                usage: "ln(x)",
            })),
        }
    }
}

impl Parse for Expr {
    /// Parses a statement: an assignment if the tokens begin with a function header and `=`,
    /// otherwise an expression.
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if Assignment::is_next(input) {
            return input.try_parse::<Assignment>().map(Self::Assignment);
        }

        let start = input.cursor;
        let expr = Binary::parse_expr(input, 0)?;
        if input.at(TokenKind::Assign) {
            return Err(Error::new(vec![input.span_from(start)], kind::InvalidAssignmentTarget));
        }
        Ok(expr)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{}", value),
            Self::E => write!(f, "e"),
            Self::Function(name) => write!(f, "{}", name),
            Self::Invocation(invocation) => invocation.fmt(f),
            Self::Differentiation(differentiation) => differentiation.fmt(f),
            Self::Assignment(assignment) => assignment.fmt(f),
            Self::Binary(binary) => binary.fmt(f),
        }
    }
}
