pub mod ast;
pub mod error;
pub mod fmt;
pub mod token;

use ast::Expr;
use error::{kind, Error};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;
use token::op::OperatorTable;

/// Names with a fixed meaning, which cannot be defined or invoked as functions.
pub const RESERVED: &[&str] = &["e", "log", "ln", "deriv"];

/// A parser for the expression language. This is the type to use to parse an arbitrary piece of
/// source code into an expression tree.
///
/// The parser is a precedence-climbing parser driven by an [`OperatorTable`], which it owns.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The infix operators this parser recognizes.
    ops: OperatorTable,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source, using the standard [`OperatorTable`].
    ///
    /// Returns an error if the source contains a character that cannot be tokenized.
    pub fn new(source: &'source str) -> Result<Self, Error> {
        Ok(Self::from_tokens(tokenize_complete(source)?))
    }

    /// Create a new parser over already tokenized source, using the standard
    /// [`OperatorTable`].
    pub fn from_tokens(tokens: Box<[Token<'source>]>) -> Self {
        Self {
            tokens,
            cursor: 0,
            ops: OperatorTable::default(),
        }
    }

    /// Replaces the operator table used by this parser.
    pub fn with_operators(mut self, ops: OperatorTable) -> Self {
        self.ops = ops;
        self
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl dfx_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Creates an error for a current token that is not one of `expected`. At the end of the
    /// stream, this is an EOF error instead.
    pub(crate) fn unexpected(&self, expected: &'static [TokenKind]) -> Error {
        match self.current_token() {
            Some(token) => self.error(kind::UnexpectedToken { expected, found: token.kind }),
            None => self.error(kind::UnexpectedEof),
        }
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the span starting at the token with index `start` and ending at the end of the
    /// previous token.
    pub(crate) fn span_from(&self, start: usize) -> Range<usize> {
        let begin = self.tokens.get(start).map_or(self.eof_span().start, |token| token.span.start);
        let end = self.prev_token().map_or(begin, |token| token.span.end);
        begin..end.max(begin)
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns true if the current token is of the given kind.
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current_token().is_some_and(|token| token.kind == kind)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(kind::UnexpectedEof)),
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        match T::parse(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = || {
            let value = T::parse(self)?;
            predicate(&value, self)?;
            Ok(value)
        };

        match compute() {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses exactly one statement. All the tokens must be consumed by the parser; if not, an
    /// error is returned.
    pub fn parse_stmt(&mut self) -> Result<Expr, Error> {
        self.skip_newlines();
        let stmt = self.try_parse::<Expr>()?;
        self.skip_newlines();
        if self.cursor == self.tokens.len() {
            Ok(stmt)
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }

    /// Parses every statement in the source. Statements are separated by line breaks, and
    /// blank lines are ignored.
    pub fn parse_program(&mut self) -> Result<Vec<Expr>, Error> {
        let mut stmts = Vec::new();

        loop {
            self.skip_newlines();
            if self.cursor == self.tokens.len() {
                return Ok(stmts);
            }

            stmts.push(self.try_parse::<Expr>()?);

            if self.cursor < self.tokens.len() && !self.at(TokenKind::NewLine) {
                return Err(self.error(kind::ExpectedEof));
            }
        }
    }

    fn skip_newlines(&mut self) {
        while self.at(TokenKind::NewLine) {
            self.cursor += 1;
        }
    }

    /// Parses a parenthesized, comma-separated list of arguments, starting at the opening
    /// parenthesis. Each argument is returned with its span.
    pub(crate) fn parse_args(&mut self) -> Result<Vec<(Expr, Range<usize>)>, Error> {
        let open = self.next_token()?;
        if open.kind != TokenKind::OpenParen {
            self.cursor -= 1;
            return Err(self.unexpected(&[TokenKind::OpenParen]));
        }

        let mut args = Vec::new();
        if self.at(TokenKind::CloseParen) {
            self.cursor += 1;
            return Ok(args);
        }

        loop {
            let start = self.cursor;
            let arg = ast::Binary::parse_expr(self, 0)?;
            args.push((arg, self.span_from(start)));

            match self.current_token().map(|token| token.kind) {
                Some(TokenKind::Comma) => self.cursor += 1,
                Some(TokenKind::CloseParen) => {
                    self.cursor += 1;
                    return Ok(args);
                },
                Some(found) if found != TokenKind::NewLine => {
                    return Err(self.error(kind::UnexpectedToken {
                        expected: &[TokenKind::Comma, TokenKind::CloseParen],
                        found,
                    }));
                },
                _ => return Err(Error::new(vec![open.span], kind::UnclosedParenthesis)),
            }
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}
