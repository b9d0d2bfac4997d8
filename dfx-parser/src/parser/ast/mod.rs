//! The expression tree produced by the parser.
//!
//! Every node exclusively owns its children, so [`Clone`] produces a fully independent deep copy
//! of a tree. The tree is acyclic by construction.

pub mod assign;
pub mod binary;
pub mod call;
pub mod deriv;
pub mod expr;

pub use assign::{Assignment, FuncHeader};
pub use binary::{Binary, BinOpKind};
pub use call::Invocation;
pub use deriv::Differentiation;
pub use expr::Expr;
