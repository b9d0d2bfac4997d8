mod error;

use dfx_compute::engine::{Execution, ExecutionEngine};
use dfx_parser::parser::Parser;
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}, process::ExitCode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// The environment variable holding the log filter, such as `DFX_LOG=dfx_compute=debug`.
const LOG_ENV: &str = "DFX_LOG";

/// Parses and executes every statement of the input, printing the value of each expression.
///
/// Execution stops at the first error, which is reported to stderr. Returns true if every
/// statement succeeded.
fn execute(input: &str, eng: &mut ExecutionEngine) -> bool {
    let stmts = match Parser::new(input).and_then(|mut parser| parser.parse_program()) {
        Ok(stmts) => stmts,
        Err(err) => {
            report(&err, input);
            return false;
        },
    };

    for stmt in &stmts {
        match eng.execute(stmt) {
            Ok(Execution::Defined(name)) => debug!(name = %name, "defined"), // intentionally print nothing
            Ok(Execution::Value(value)) => println!("{}", value),
            Err(err) => {
                report(&err, input);
                return false;
            },
        }
    }

    true
}

/// Reports an error to stderr.
fn report(err: &dfx_error::Error, input: &str) {
    if let Err(io_err) = err.report_to_stderr("input", input) {
        eprintln!("{}", io_err);
    }
}

/// Reads the whole file, or stdin if no file is given.
fn read_source(filename: Option<String>) -> Result<String, Error> {
    let mut input = String::new();
    match filename {
        Some(filename) => BufReader::new(File::open(filename)?).read_to_string(&mut input)?,
        None => io::stdin().read_to_string(&mut input)?,
    };
    Ok(input)
}

/// Runs the interactive mode until the user quits.
fn repl() -> Result<(), Error> {
    let mut rl = DefaultEditor::new()?;
    let mut eng = ExecutionEngine::new();

    fn process_line(rl: &mut DefaultEditor, eng: &mut ExecutionEngine) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        execute(&input, eng);
        Ok(())
    }

    loop {
        match process_line(&mut rl, &mut eng) {
            Ok(()) => (),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err.into()),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args();
    args.next();
    let filename = args.next();

    let result = if filename.is_some() || !io::stdin().is_terminal() {
        // run source file, or source from stdin
        read_source(filename).map(|input| execute(&input, &mut ExecutionEngine::new()))
    } else {
        // run the repl / interactive mode
        repl().map(|_| true)
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}
