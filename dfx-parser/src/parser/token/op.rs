//! The table of binary operators used by the parser.

use crate::{parser::ast::BinOpKind, tokenizer::TokenKind};

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary operation is left-associative.
    ///
    /// This means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary operation is right-associative.
    ///
    /// This means `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// How a single infix operator is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    /// The token that spells the operator.
    pub token: TokenKind,

    /// The node the operator builds.
    pub op: BinOpKind,

    /// The precedence of the operator. Higher values bind tighter.
    pub precedence: u8,

    /// The associativity of the operator.
    pub associativity: Associativity,
}

impl OperatorInfo {
    /// Returns the minimum precedence to use when parsing the right-hand side of this operator.
    pub fn rhs_precedence(&self) -> u8 {
        match self.associativity {
            Associativity::Left => self.precedence + 1,
            Associativity::Right => self.precedence,
        }
    }
}

/// An immutable table describing the infix operators recognized by a [`Parser`].
///
/// [`Parser`]: crate::parser::Parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorTable {
    entries: Vec<OperatorInfo>,
}

impl Default for OperatorTable {
    /// The standard table: `+` and `-` at precedence 1, `*` and `/` at precedence 2 (all
    /// left-associative), and `^` at precedence 3 (right-associative).
    fn default() -> Self {
        use Associativity::*;
        Self::new([
            (TokenKind::Add, BinOpKind::Add, 1, Left),
            (TokenKind::Sub, BinOpKind::Sub, 1, Left),
            (TokenKind::Mul, BinOpKind::Mul, 2, Left),
            (TokenKind::Div, BinOpKind::Div, 2, Left),
            (TokenKind::Exp, BinOpKind::Exp, 3, Right),
        ])
    }
}

impl OperatorTable {
    /// Creates a table from `(token, op, precedence, associativity)` entries. If a token appears
    /// more than once, the last entry wins.
    pub fn new(entries: impl IntoIterator<Item = (TokenKind, BinOpKind, u8, Associativity)>) -> Self {
        let mut table: Vec<OperatorInfo> = Vec::new();
        for (token, op, precedence, associativity) in entries {
            table.retain(|info| info.token != token);
            table.push(OperatorInfo { token, op, precedence, associativity });
        }
        Self { entries: table }
    }

    /// Returns the operator spelled by the given token, if any.
    pub fn get(&self, token: TokenKind) -> Option<&OperatorInfo> {
        self.entries.iter().find(|info| info.token == token)
    }

    /// Returns the precedence of the given operator, if it is in the table.
    pub fn precedence_of(&self, op: BinOpKind) -> Option<u8> {
        self.entries.iter().find(|info| info.op == op).map(|info| info.precedence)
    }

    /// Returns the highest precedence in the table.
    pub fn max_precedence(&self) -> u8 {
        self.entries.iter().map(|info| info.precedence).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table() {
        let table = OperatorTable::default();
        assert_eq!(table.get(TokenKind::Add).unwrap().precedence, 1);
        assert_eq!(table.get(TokenKind::Div).unwrap().rhs_precedence(), 3);
        assert_eq!(table.get(TokenKind::Exp).unwrap().associativity, Associativity::Right);
        assert_eq!(table.get(TokenKind::Exp).unwrap().rhs_precedence(), 3);
        assert_eq!(table.get(TokenKind::Assign), None);
        assert_eq!(table.max_precedence(), 3);
    }

    #[test]
    fn later_entries_override() {
        let table = OperatorTable::new([
            (TokenKind::Add, BinOpKind::Add, 1, Associativity::Left),
            (TokenKind::Add, BinOpKind::Add, 4, Associativity::Right),
        ]);
        assert_eq!(table.get(TokenKind::Add).unwrap().precedence, 4);
        assert_eq!(table.precedence_of(BinOpKind::Add), Some(4));
    }
}
