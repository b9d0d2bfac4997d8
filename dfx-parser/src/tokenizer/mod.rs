pub mod token;

use crate::parser::error::{kind::InvalidCharacter, Error};
use logos::{Lexer, Logos};
pub use token::{Token, TokenCategory, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Returns an error pointing at the first character that does not start any token.
pub fn tokenize_complete(input: &str) -> Result<Box<[Token]>, Error> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token {
                span,
                kind,
                lexeme: lexer.slice(),
            }),
            Err(()) => {
                let character = input[span.start..].chars().next().unwrap_or_default();
                let position = span.start;
                let end = position + character.len_utf8();
                return Err(Error::new(vec![position..end], InvalidCharacter { character, position }));
            },
        }
    }

    Ok(tokens.into_boxed_slice())
}
