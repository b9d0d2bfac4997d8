use crate::{
    parser::{error::Error, Parse, Parser},
    tokenizer::TokenKind,
};
use std::fmt;
use super::expr::{Expr, Precedence};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The operation performed by a [`Binary`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    /// Addition, `lhs + rhs`.
    Add,

    /// Subtraction, `lhs - rhs`.
    Sub,

    /// Multiplication, `lhs * rhs`.
    Mul,

    /// Division, `lhs / rhs`.
    Div,

    /// Exponentiation, `lhs ^ rhs`.
    Exp,

    /// Logarithm of `rhs` in base `lhs`, written `log(lhs, rhs)`.
    ///
    /// This operator has no infix symbol.
    Log,
}

impl BinOpKind {
    /// Returns the symbol of the infix operator, or [`None`] for [`BinOpKind::Log`].
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("+"),
            Self::Sub => Some("-"),
            Self::Mul => Some("*"),
            Self::Div => Some("/"),
            Self::Exp => Some("^"),
            Self::Log => None,
        }
    }

    /// Returns the precedence used when rendering this operator.
    pub(crate) fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Exp => Precedence::Exp,
            Self::Log => Precedence::Atom,
        }
    }

    /// Returns true if the operator is right-associative.
    pub fn is_right_associative(self) -> bool {
        self == Self::Exp
    }

    /// Applies the operator to two numbers.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Exp => lhs.powf(rhs),
            Self::Log => rhs.ln() / lhs.ln(),
        }
    }
}

/// A binary expression, such as `1 + 2` or `log(2, x)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression. For [`BinOpKind::Log`], this is the base.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOpKind,

    /// The right-hand side of the binary expression. For [`BinOpKind::Log`], this is the
    /// argument.
    pub rhs: Box<Expr>,
}

impl Binary {
    /// Creates a new binary expression.
    pub fn new(lhs: Expr, op: BinOpKind, rhs: Expr) -> Self {
        Self {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    /// Parses an expression using precedence climbing. Only infix operators with a precedence of
    /// at least `min_precedence` are consumed; the rest are left for the caller.
    pub fn parse_expr(input: &mut Parser, min_precedence: u8) -> Result<Expr, Error> {
        let mut lhs = Expr::parse_operand(input)?;

        loop {
            let Some(info) = input.current_token().and_then(|token| input.ops.get(token.kind)).copied() else {
                break;
            };
            if info.precedence < min_precedence {
                break;
            }

            input.cursor += 1;
            let rhs = Self::parse_expr(input, info.rhs_precedence())?;
            lhs = Expr::Binary(Self::new(lhs, info.op, rhs));
        }

        Ok(lhs)
    }

    /// Returns true if the operand on the given side must be parenthesized to be rendered (and
    /// parsed back) correctly.
    fn needs_parens(&self, operand: &Expr, right: bool) -> bool {
        let outer = self.op.precedence();
        let inner = operand.precedence();
        if inner < outer {
            return true;
        }

        // `a - (b - c)` and `(a ^ b) ^ c`
        inner == outer && right != self.op.is_right_associative()
    }
}

impl Parse for Binary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match Self::parse_expr(input, 0)? {
            Expr::Binary(binary) => Ok(binary),
            _ => Err(input.unexpected(&[
                TokenKind::Add,
                TokenKind::Sub,
                TokenKind::Mul,
                TokenKind::Div,
                TokenKind::Exp,
            ])),
        }
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.op.symbol() {
            Some(symbol) => symbol,
            None => {
                return if self.lhs.is_e() {
                    write!(f, "ln({})", self.rhs)
                } else {
                    write!(f, "log({}, {})", self.lhs, self.rhs)
                };
            },
        };

        let (lhs_parens, rhs_parens) = (
            self.needs_parens(&self.lhs, false),
            self.needs_parens(&self.rhs, true),
        );

        if lhs_parens {
            write!(f, "({})", self.lhs)?;
        } else {
            write!(f, "{}", self.lhs)?;
        }

        if self.op == BinOpKind::Exp {
            write!(f, "{}", symbol)?;
        } else {
            write!(f, " {} ", symbol)?;
        }

        if rhs_parens {
            write!(f, "({})", self.rhs)
        } else {
            write!(f, "{}", self.rhs)
        }
    }
}
