//! The kinds of errors that can occur while manipulating expressions.
//!
//! These errors are not tied to any region of the source code, as the trees they are raised for
//! are usually produced by earlier transformations rather than by the parser.

use ariadne::Fmt;
use dfx_attrs::ErrorKind;
use dfx_error::{ErrorKind, EXPR};

pub use dfx_parser::parser::error::kind::NonVariableRespect;

/// A function was invoked with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} argument(s), but {} were given", name, expected, given),
    labels = ["this call"],
    help = format!("the definition of `{}` lists {} parameter(s)", name.clone().fg(EXPR), expected),
)]
pub struct ArityMismatch {
    /// The name of the function.
    pub name: String,

    /// The number of formal parameters.
    pub expected: usize,

    /// The number of arguments given.
    pub given: usize,
}

/// A function definition names the same parameter more than once.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("parameter `{}` appears more than once in the definition of `{}`", param, name),
    labels = ["this definition"],
    help = "each parameter must have a distinct name",
)]
pub struct DuplicateParameter {
    /// The name of the function being defined.
    pub name: String,

    /// The repeated parameter.
    pub param: String,
}

/// The function is not defined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        format!("define it first, for example: {}", format!("{}(x) = x", name).fg(EXPR))
    } else {
        format!("did you mean: {}?", suggestions.iter().map(|s| format!("`{}`", s)).collect::<Vec<_>>().join(", "))
    },
)]
pub struct FunctionNotFound {
    /// The name of the function.
    pub name: String,

    /// Defined functions with a similar name.
    pub suggestions: Vec<String>,
}

/// The expression has no well-defined derivative.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `{}`", expr),
    labels = ["here"],
    help = reason.clone(),
)]
pub struct Undifferentiable {
    /// The rendered expression that could not be differentiated.
    pub expr: String,

    /// Why the expression could not be differentiated.
    pub reason: String,
}

/// An indeterminate form such as `0^0` was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is undefined", form),
    labels = ["here"],
)]
pub struct IndeterminateForm {
    /// The rendered indeterminate form.
    pub form: String,
}

/// Evaluating constants produced a value that is not a finite real number, such as `1 / 0`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` does not evaluate to a finite real number", expr),
    labels = ["here"],
)]
pub struct NonFiniteResult {
    /// The rendered expression.
    pub expr: String,
}

/// The variable of differentiation could not be inferred because there are several candidates.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot tell which variable to differentiate with respect to: {}", vars.join(", ")),
    labels = ["this derivative"],
    help = format!("name the variable explicitly, for example: {}", format!("deriv(expr, {})", vars[0]).fg(EXPR)),
)]
pub struct AmbiguousVariable {
    /// The distinct free variables, in order of first appearance. Always has at least two
    /// elements.
    pub vars: Vec<String>,
}

/// The variable of differentiation could not be inferred because there is none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no variable to differentiate with respect to", expr),
    labels = ["this derivative"],
)]
pub struct NoVariable {
    /// The rendered expression.
    pub expr: String,
}

/// Too many nested invocations were evaluated, usually because a function invokes itself.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "maximum recursion depth exceeded",
    labels = ["while evaluating this"],
    help = format!("the maximum depth is {}; check that no function refers to itself", depth.to_string().fg(EXPR)),
    note = "the limit is set by `EngineConfig::max_recursion_depth`",
)]
pub struct RecursionDepthExceeded {
    /// The maximum depth that was exceeded.
    pub depth: usize,
}

/// Evaluating invocations produced an expression with too many nodes, usually because a function
/// invokes itself with ever larger arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expression grew to {} nodes, past the limit of {}", size, limit),
    labels = ["while evaluating this"],
    help = "check that no function invokes itself with arguments that keep growing",
    note = "the limit is set by `EngineConfig::max_expr_size`",
)]
pub struct ExpressionTooLarge {
    /// The number of nodes in the offending expression.
    pub size: usize,

    /// The maximum number of nodes.
    pub limit: usize,
}

/// A function definition was used where a value was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a function definition does not have a value",
    labels = ["this definition"],
    help = "definitions can only appear at the start of a statement",
)]
pub struct UnexpectedAssignment;
