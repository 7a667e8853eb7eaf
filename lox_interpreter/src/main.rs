use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

use lox_interpreter::{render_ast, Interpreter, RunResult, Value, EXIT_IO, EXIT_USAGE};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: lox [--ast] [script]";

fn main() {
    // Logs go to stderr so they never mix with program output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut show_ast = false;
    let mut scripts = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--ast" {
            show_ast = true;
        } else {
            scripts.push(arg);
        }
    }

    let code = match scripts.as_slice() {
        [] => run_prompt(show_ast),
        [path] => run_file(path, show_ast),
        _ => {
            eprintln!("{}", USAGE);
            EXIT_USAGE
        }
    };
    process::exit(code);
}

fn run_file(path: &str, show_ast: bool) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            error!(path, "cannot read script: {}", e);
            eprintln!("Error reading file '{}': {}", path, e);
            return EXIT_IO;
        }
    };
    info!(path, "running script");

    if show_ast {
        print_ast(&source);
    }
    let result = Interpreter::new().run_source(&source);
    report(&result);
    result.exit_code()
}

fn run_prompt(show_ast: bool) -> i32 {
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            error!("cannot write prompt: {}", e);
            return EXIT_IO;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                error!("cannot read input: {}", e);
                return EXIT_IO;
            }
            None => return 0,
        };

        if show_ast {
            print_ast(&line);
        }
        let result = interpreter.run_repl_line(&line);
        match &result {
            RunResult::Value(Value::Nil) => {}
            RunResult::Value(value) => println!("{}", Interpreter::stringify(value)),
            _ => report(&result),
        }
    }
}

/// Syntax errors are left for the run that follows to report.
fn print_ast(source: &str) {
    if let Ok(tree) = render_ast(source) {
        println!("{}", tree);
    }
}

fn report(result: &RunResult) {
    if let Some(message) = result.report() {
        eprintln!("{}", message);
    }
}
