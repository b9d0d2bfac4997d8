//! The execution engine: a registry of user-defined functions and a stack of call frames.

pub mod config;
pub mod frame;
pub mod func;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use frame::Frame;
pub use func::Function;

use crate::{
    error::{
        kind::{ExpressionTooLarge, FunctionNotFound, RecursionDepthExceeded},
        Error,
    },
    symbolic::Symbolic,
};
use dfx_parser::parser::{ast::Expr, Parser};
use levenshtein::levenshtein;
use std::collections::HashMap;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The native stack space, in bytes, guaranteed to the evaluation of each frame.
pub const RED_ZONE: usize = 64 * 1024;

/// The size of each native stack segment allocated when evaluation runs low on stack space.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// The result of executing a statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Execution {
    /// The statement defined (or redefined) the function with the given name.
    Defined(String),

    /// The statement was an expression, which evaluated to the given value.
    Value(Expr),
}

impl Execution {
    /// Returns the value of the statement, if it was an expression.
    pub fn value(&self) -> Option<&Expr> {
        match self {
            Execution::Value(value) => Some(value),
            Execution::Defined(_) => None,
        }
    }
}

/// Holds the functions defined so far, and the call frames of the invocations currently being
/// evaluated.
///
/// Only the top frame is ever consulted when resolving a parameter name, so a function body sees
/// its own parameters and nothing of its callers'.
#[derive(Debug, Clone, Default)]
pub struct ExecutionEngine {
    /// The registered functions, keyed by name.
    functions: HashMap<String, Function>,

    /// The call frames. The last element is the top of the stack.
    call_stack: Vec<Frame>,

    /// Limits on evaluation.
    config: EngineConfig,
}

impl ExecutionEngine {
    /// Creates an engine with no functions and the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with no functions and the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration of the engine.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Adds a function to the engine, replacing any function with the same name.
    pub fn register_function(&mut self, func: Function) {
        debug!(name = %func.name, params = ?func.params, body = %func.body, "registering function");
        self.functions.insert(func.name.clone(), func);
    }

    /// Returns the function with the given name, if it exists.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Returns the function with the given name.
    ///
    /// Returns an error if no such function is registered.
    pub fn retrieve_function(&self, name: &str) -> Result<&Function, Error> {
        self.functions.get(name).ok_or_else(|| {
            Error::spanless(FunctionNotFound {
                name: name.to_owned(),
                suggestions: self.similar_functions(name),
            })
        })
    }

    /// Removes the function with the given name, returning it. Nothing happens if no such
    /// function is registered.
    pub fn deregister_function(&mut self, name: &str) -> Option<Function> {
        let removed = self.functions.remove(name);
        if removed.is_some() {
            debug!(name, "deregistered function");
        }
        removed
    }

    /// Returns the registered functions, in no particular order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    /// Returns the names of the registered functions with a name similar to the given name,
    /// sorted alphabetically.
    pub fn similar_functions(&self, name: &str) -> Vec<String> {
        let mut similar = self.functions
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .cloned()
            .collect::<Vec<_>>();
        similar.sort();
        similar
    }

    /// Returns the number of frames on the call stack.
    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }

    /// Returns an error if the expressions have more nodes in total than the configured maximum.
    pub fn check_size<'a>(&self, exprs: impl IntoIterator<Item = &'a Expr>) -> Result<(), Error> {
        let limit = self.config.max_expr_size;
        let size = exprs.into_iter().map(Expr::size).sum::<usize>();
        if size > limit {
            return Err(Error::spanless(ExpressionTooLarge { size, limit }));
        }
        Ok(())
    }

    /// Pushes a new frame holding the given arguments.
    ///
    /// Returns an error if the stack would grow past the configured maximum depth, or if the
    /// arguments are larger than the configured maximum size.
    pub fn push_frame(&mut self, args: Vec<Expr>) -> Result<(), Error> {
        if self.call_stack.len() >= self.config.max_recursion_depth {
            return Err(Error::spanless(RecursionDepthExceeded {
                depth: self.config.max_recursion_depth,
            }));
        }
        self.check_size(&args)?;

        trace!(depth = self.call_stack.len() + 1, args = args.len(), "pushing frame");
        self.call_stack.push(Frame::new(args));
        Ok(())
    }

    /// Pops the top frame.
    pub fn pop_frame(&mut self) -> Option<Frame> {
        let frame = self.call_stack.pop();
        trace!(depth = self.call_stack.len(), "popped frame");
        frame
    }

    /// Returns the top frame, if any.
    pub fn top_frame(&self) -> Option<&Frame> {
        self.call_stack.last()
    }

    /// Binds the arguments of the top frame to the given parameter names. `name` is the name of
    /// the function being invoked, used for error reporting.
    ///
    /// Returns an error if the number of parameters differs from the number of arguments. If
    /// there is no frame, the call succeeds only when `params` is empty.
    pub fn bind_frame_parameters(&mut self, name: &str, params: &[String]) -> Result<(), Error> {
        match self.call_stack.last_mut() {
            Some(frame) => frame.bind_parameters(name, params),
            None => Frame::default().bind_parameters(name, params),
        }
    }

    /// Returns the argument bound to the given parameter name in the top frame.
    pub fn frame_arg(&self, name: &str) -> Option<&Expr> {
        self.call_stack.last()?.arg(name)
    }

    /// Returns the parameter names bound in the top frame, in positional order.
    pub fn frame_params(&self) -> Vec<&str> {
        self.call_stack
            .last()
            .map(Frame::params)
            .unwrap_or_default()
    }

    /// Pushes a frame with the given arguments bound to `params`, runs `f`, then pops the frame.
    ///
    /// The frame is popped whether or not `f` succeeds. `f` runs with at least [`RED_ZONE`]
    /// bytes of native stack available, which is allocated on the heap if the current thread
    /// is running low.
    pub fn with_frame<T>(
        &mut self,
        args: Vec<Expr>,
        name: &str,
        params: &[String],
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.push_frame(args)?;
        let result = self
            .bind_frame_parameters(name, params)
            .and_then(|_| stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || f(self)));
        self.pop_frame();
        result
    }

    /// Executes a single statement.
    ///
    /// A definition registers its function and yields [`Execution::Defined`]. Any other
    /// expression is substituted, then simplified.
    pub fn execute(&mut self, stmt: &Expr) -> Result<Execution, Error> {
        match stmt {
            Expr::Assignment(assignment) => {
                let func = Function::from_assignment(assignment)?;
                let name = func.name.clone();
                self.register_function(func);
                Ok(Execution::Defined(name))
            },
            expr => {
                let value = expr.substitute(self)?.simplify(self)?;
                Ok(Execution::Value(value))
            },
        }
    }

    /// Parses the given source as a sequence of statements and executes them in order.
    ///
    /// Execution stops at the first error. Statements executed before it keep their effects.
    pub fn execute_str(&mut self, source: &str) -> Result<Vec<Execution>, Error> {
        let stmts = Parser::new(source)?.parse_program()?;
        stmts.iter().map(|stmt| self.execute(stmt)).collect()
    }
}
