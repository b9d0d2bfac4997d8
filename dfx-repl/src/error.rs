use std::{fmt, io};

/// Utility enum to package errors that stop the REPL from running at all.
#[derive(Debug)]
pub enum Error {
    /// The input file or stream could not be read.
    Io(io::Error),

    /// The line editor failed.
    Readline(rustyline::error::ReadlineError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read input: {}", err),
            Self::Readline(err) => write!(f, "{}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<rustyline::error::ReadlineError> for Error {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        Self::Readline(err)
    }
}
