use crate::error::{kind::DuplicateParameter, Error};
use dfx_parser::parser::ast::{Assignment, Expr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A user-defined function stored in an [`ExecutionEngine`](super::ExecutionEngine).
///
/// Variables such as `a = 5` are functions with no parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Function {
    /// The name of the function.
    pub name: String,

    /// The names of the formal parameters, in order.
    pub params: Vec<String>,

    /// The body, evaluated with the parameters bound to the arguments of an invocation.
    pub body: Expr,
}

impl Function {
    /// Creates a new function.
    pub fn new(name: impl Into<String>, params: Vec<String>, body: Expr) -> Self {
        Self {
            name: name.into(),
            params,
            body,
        }
    }

    /// Creates a function with no parameters, i.e. a variable.
    pub fn variable(name: impl Into<String>, value: Expr) -> Self {
        Self::new(name, Vec::new(), value)
    }

    /// Creates a function from its definition.
    ///
    /// Returns an error if the definition names a parameter more than once.
    pub fn from_assignment(assignment: &Assignment) -> Result<Self, Error> {
        let header = &assignment.header;
        for (i, param) in header.params.iter().enumerate() {
            if header.params[..i].contains(param) {
                return Err(Error::spanless(DuplicateParameter {
                    name: header.name.clone(),
                    param: param.clone(),
                }));
            }
        }

        Ok(Self::new(header.name.clone(), header.params.clone(), (*assignment.body).clone()))
    }

    /// Returns the number of formal parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Returns true if the function has no parameters.
    pub fn is_variable(&self) -> bool {
        self.params.is_empty()
    }
}
