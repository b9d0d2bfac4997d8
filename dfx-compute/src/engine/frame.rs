use crate::error::{kind::ArityMismatch, Error};
use dfx_parser::parser::ast::Expr;
use std::collections::HashMap;

/// The bindings of a single invocation: formal parameter names mapped to the actual argument
/// expressions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Maps each parameter name to the index of its argument.
    parameters: HashMap<String, usize>,

    /// The actual arguments, in order.
    arguments: Vec<Expr>,
}

impl Frame {
    /// Creates a frame holding the given arguments. No parameter is bound yet.
    pub fn new(args: Vec<Expr>) -> Self {
        Self {
            parameters: HashMap::new(),
            arguments: args,
        }
    }

    /// Associates each positional argument with the parameter name at the same position.
    ///
    /// Returns an error if the number of parameters differs from the number of arguments. The
    /// frame is left unchanged in that case.
    pub fn bind_parameters(&mut self, name: &str, params: &[String]) -> Result<(), Error> {
        if params.len() != self.arguments.len() {
            return Err(Error::spanless(ArityMismatch {
                name: name.to_owned(),
                expected: params.len(),
                given: self.arguments.len(),
            }));
        }

        self.parameters = params
            .iter()
            .enumerate()
            .map(|(i, param)| (param.clone(), i))
            .collect();
        Ok(())
    }

    /// Returns the bound parameter names, in positional order.
    pub fn params(&self) -> Vec<&str> {
        let mut params = self.parameters.iter().collect::<Vec<_>>();
        params.sort_by_key(|(_, index)| **index);
        params.into_iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns the argument bound to the given parameter name.
    pub fn arg(&self, name: &str) -> Option<&Expr> {
        self.parameters.get(name).map(|&index| &self.arguments[index])
    }

    /// Returns the arguments, in order.
    pub fn args(&self) -> &[Expr] {
        &self.arguments
    }
}
