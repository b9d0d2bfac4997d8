/// The default maximum depth of the call-frame stack.
pub const MAX_RECURSION_DEPTH: usize = 256;

/// The default maximum number of simplification passes.
pub const MAX_SIMPLIFY_PASSES: usize = 64;

/// The default maximum number of nodes in the arguments of a frame, or in the result of an
/// invocation.
pub const MAX_EXPR_SIZE: usize = 100_000;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Limits used by an [`ExecutionEngine`](super::ExecutionEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// The maximum number of nested invocations that can be evaluated at once. Exceeding it
    /// fails with [`RecursionDepthExceeded`](crate::error::kind::RecursionDepthExceeded).
    pub max_recursion_depth: usize,

    /// The maximum number of passes the simplifier makes over an expression while looking for
    /// a fixed point.
    pub max_simplify_passes: usize,

    /// The maximum number of nodes the arguments of a single frame, or the expanded body of a
    /// single invocation, may have. Exceeding it fails with
    /// [`ExpressionTooLarge`](crate::error::kind::ExpressionTooLarge).
    pub max_expr_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: MAX_RECURSION_DEPTH,
            max_simplify_passes: MAX_SIMPLIFY_PASSES,
            max_expr_size: MAX_EXPR_SIZE,
        }
    }
}

/// A builder for [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Creates a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum depth of the call-frame stack.
    pub fn max_recursion_depth(mut self, depth: usize) -> Self {
        self.config.max_recursion_depth = depth;
        self
    }

    /// Sets the maximum number of simplification passes. At least one pass is always made.
    pub fn max_simplify_passes(mut self, passes: usize) -> Self {
        self.config.max_simplify_passes = passes.max(1);
        self
    }

    /// Sets the maximum number of nodes in frame arguments and expanded invocations.
    pub fn max_expr_size(mut self, size: usize) -> Self {
        self.config.max_expr_size = size;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> EngineConfig {
        self.config
    }
}
