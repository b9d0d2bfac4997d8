//! Symbolic computation on the expressions parsed by [`dfx_parser`].
//!
//! The central type is the [`ExecutionEngine`](engine::ExecutionEngine), which stores the
//! functions defined so far and evaluates statements against them. The actual symbolic
//! operations (substitution, differentiation, simplification) are available on any
//! [`Expr`](dfx_parser::parser::ast::Expr) through the [`Symbolic`](symbolic::Symbolic) trait.
//!
//! ```
//! use dfx_compute::engine::{Execution, ExecutionEngine};
//!
//! let mut eng = ExecutionEngine::new();
//! let results = eng.execute_str("f(x) = x^2 + 3 * x\nderiv(f(x), x)").unwrap();
//!
//! match &results[1] {
//!     Execution::Value(value) => assert_eq!(value.to_string(), "2 * x + 3"),
//!     Execution::Defined(_) => unreachable!(),
//! }
//! ```

pub mod engine;
pub mod error;
pub mod symbolic;
