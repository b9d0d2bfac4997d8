//! Lexer, parser, and expression tree for the dfx expression language.
//!
//! Source text is first split into [`tokenizer::Token`]s by the [`tokenizer`], then turned into
//! an [`Expr`](parser::ast::Expr) tree by the [`Parser`](parser::Parser):
//!
//! ```
//! use dfx_parser::parser::{ast::Expr, Parser};
//!
//! let expr = Parser::new("x^2 + 3 * x").unwrap().parse_stmt().unwrap();
//! assert_eq!(expr, Expr::sum(
//!     Expr::power(Expr::function("x"), Expr::Constant(2.0)),
//!     Expr::product(Expr::Constant(3.0), Expr::function("x")),
//! ));
//! assert_eq!(expr.to_string(), "x^2 + 3 * x");
//! ```

pub mod parser;
pub mod tokenizer;
