pub mod callable;
pub mod class;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod operators;
pub mod output;
pub mod stack;
pub mod stdlib;
pub mod value;

use lox_parser::SyntaxErrors;

pub use error::{ErrorKind, RuntimeError};
pub use interpreter::{Interpreter, Outcome};
pub use output::Output;
pub use value::Value;

/// Exit code for bad command-line usage.
pub const EXIT_USAGE: i32 = 64;
/// Exit code when a static error stopped the program before it ran.
pub const EXIT_SYNTAX: i32 = 65;
/// Exit code when the program failed while running.
pub const EXIT_RUNTIME: i32 = 70;
/// Exit code when the script file could not be read.
pub const EXIT_IO: i32 = 74;

/// Result of running one chunk of source.
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    Completed,
    /// A REPL line that was a bare expression, with its value.
    Value(Value),
    SyntaxErrors(SyntaxErrors),
    RuntimeError(RuntimeError),
}

impl RunResult {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunResult::Completed | RunResult::Value(_) => 0,
            RunResult::SyntaxErrors(_) => EXIT_SYNTAX,
            RunResult::RuntimeError(_) => EXIT_RUNTIME,
        }
    }

    /// The text shown to the user for a failed run.
    pub fn report(&self) -> Option<String> {
        match self {
            RunResult::Completed | RunResult::Value(_) => None,
            RunResult::SyntaxErrors(errors) => Some(errors.to_string()),
            RunResult::RuntimeError(error) => Some(error.report()),
        }
    }
}

/// Renders a program's syntax tree, one S-expression per statement.
pub fn render_ast(source: &str) -> Result<String, SyntaxErrors> {
    let statements = lox_parser::parse(source)?;
    let lines: Vec<String> = statements
        .iter()
        .map(|statement| statement.to_sexpr().to_string())
        .collect();
    Ok(lines.join("\n"))
}

impl Interpreter {
    /// Parses, resolves and runs a program. Nothing runs if any static
    /// error is found.
    pub fn run_source(&mut self, source: &str) -> RunResult {
        let statements = match lox_parser::parse(source) {
            Ok(statements) => statements,
            Err(errors) => return RunResult::SyntaxErrors(errors),
        };
        let locals = match lox_parser::resolve(&statements) {
            Ok(locals) => locals,
            Err(errors) => return RunResult::SyntaxErrors(errors),
        };
        self.extend_locals(locals);

        match self.interpret(&statements) {
            Outcome::Completed => RunResult::Completed,
            Outcome::RuntimeError(error) => RunResult::RuntimeError(error),
        }
    }

    /// A REPL line is first tried as a lone expression, whose value is
    /// returned for echoing; otherwise it runs as statements.
    ///
    /// The expression goes through [`Interpreter::evaluate`] rather than
    /// [`Interpreter::interpret_expression`], which drops the error, so a
    /// failing line can still be reported with its message and line.
    pub fn run_repl_line(&mut self, line: &str) -> RunResult {
        let Some(expr) = lox_parser::parse_expression(line) else {
            return self.run_source(line);
        };
        match lox_parser::resolve_expression(&expr) {
            Ok(locals) => self.extend_locals(locals),
            Err(errors) => return RunResult::SyntaxErrors(errors),
        }
        match self.evaluate(&expr) {
            Ok(value) => RunResult::Value(value),
            Err(error) => RunResult::RuntimeError(error),
        }
    }
}
