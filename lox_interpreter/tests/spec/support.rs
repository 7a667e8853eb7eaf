use lox_interpreter::{Interpreter, Output, RunResult, RuntimeError};

/// Runs a program on a fresh interpreter, returning the result and
/// everything it printed.
pub fn run(source: &str) -> (RunResult, String) {
    let output = Output::buffer();
    let result = Interpreter::with_output(output.clone()).run_source(source);
    (result, output.contents())
}

/// Output of a program expected to run to completion.
pub fn output_of(source: &str) -> String {
    let (result, output) = run(source);
    assert_eq!(result, RunResult::Completed, "output so far: {:?}", output);
    output
}

/// The runtime error a program is expected to stop with, and what it
/// printed before stopping.
pub fn runtime_error(source: &str) -> (RuntimeError, String) {
    match run(source) {
        (RunResult::RuntimeError(error), output) => (error, output),
        (other, _) => panic!("expected a runtime error, got {:?}", other),
    }
}

/// Messages of the static errors a program is expected to be rejected with.
pub fn syntax_errors(source: &str) -> Vec<String> {
    match run(source) {
        (RunResult::SyntaxErrors(errors), output) => {
            assert_eq!(output, "", "nothing runs after a static error");
            errors.errors().iter().map(|e| e.to_string()).collect()
        }
        (other, _) => panic!("expected static errors, got {:?}", other),
    }
}
