use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\f]+")]
pub enum TokenKind {
    #[regex(r"(\r?\n)+")]
    NewLine,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("=")]
    Assign,

    #[regex(r"[a-zA-Z]+")]
    Name,

    #[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]+")]
    Number,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,
}

/// The broad category a [`TokenKind`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenCategory {
    /// A run of letters, such as `x` or `deriv`.
    Identifier,

    /// A number, such as `2` or `3.14`.
    Number,

    /// One of `+`, `-`, `*`, `/`, `^`, or `=`.
    Operator,

    /// Structural characters: `(`, `)`, `,`, and line breaks.
    Separator,
}

impl TokenKind {
    /// Returns the category of this kind of token.
    pub fn category(self) -> TokenCategory {
        match self {
            TokenKind::Name => TokenCategory::Identifier,
            TokenKind::Number => TokenCategory::Number,
            TokenKind::Add
            | TokenKind::Sub
            | TokenKind::Mul
            | TokenKind::Div
            | TokenKind::Exp
            | TokenKind::Assign => TokenCategory::Operator,
            TokenKind::Comma
            | TokenKind::OpenParen
            | TokenKind::CloseParen
            | TokenKind::NewLine => TokenCategory::Separator,
        }
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token matches the given kind and lexeme.
    pub fn matches(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }
}
