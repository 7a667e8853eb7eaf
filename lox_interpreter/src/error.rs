//! Runtime errors and the non-error control signals of statement execution.

use lox_ast::Token;
use thiserror::Error;

use crate::value::Value;

/// What went wrong at runtime. The message text is what the driver shows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("Undefined variable '{0}'.")]
    UndefinedVariable(String),
    #[error("Undefined property '{0}'.")]
    UndefinedProperty(String),
    #[error("Accessing uninitialized variable {0}.")]
    UninitializedAccess(String),
    #[error("{0}")]
    TypeError(&'static str),
    #[error("Cannot compare {left} and {right}.")]
    TypeMismatch {
        left: &'static str,
        right: &'static str,
    },
    #[error("Division by zero is illegal.")]
    DivisionByZero,
    #[error("Can only call functions and classes.")]
    NotCallable,
    #[error("Expected {expected} arguments but got {got}.")]
    ArityMismatch { expected: usize, got: usize },
    #[error("Only instances have {0}.")]
    NotAnInstance(&'static str),
    #[error("Superclass must be a class.")]
    InvalidSuperclass,
    #[error("Stack overflow.")]
    StackOverflow,
    #[error("{0}")]
    Native(String),
    #[error("Failed to write output: {0}")]
    Output(String),
}

/// A runtime error located at the token that triggered it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct RuntimeError {
    pub token: Token,
    pub kind: ErrorKind,
}

impl RuntimeError {
    pub fn new(token: &Token, kind: ErrorKind) -> Self {
        RuntimeError {
            token: token.clone(),
            kind,
        }
    }

    pub fn line(&self) -> usize {
        self.token.line
    }

    /// The driver's report format: the message, then the line on its own.
    pub fn report(&self) -> String {
        format!("{}\n[line {}]", self.kind, self.token.line)
    }
}

/// How a statement finished. Break and return are ordinary outcomes, not
/// errors, so nothing that handles `RuntimeError` can swallow them.
#[derive(Debug, Clone)]
pub enum Flow {
    Normal,
    Break,
    Return(Value),
}

pub type EvalResult<T = Value> = Result<T, RuntimeError>;
pub type ExecResult = Result<Flow, RuntimeError>;
