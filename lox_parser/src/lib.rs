//! Parser for the Lox programming language.
//!
//! This crate turns source text into the AST structures defined in `lox_ast`
//! and runs the static resolution pass over them. It is used by the
//! interpreter library, its `lox` binary and the test suites.

pub mod parser;
pub mod resolver;
pub mod scanner;

use std::fmt;

use lox_ast::{Expr, Stmt, Token, TokenKind};
use thiserror::Error;

pub use parser::Parser;
pub use resolver::{Locals, Resolver};
pub use scanner::Scanner;

/// A static error found before execution starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("[line {line}] Error: {message}")]
    Scan { line: usize, message: String },
    #[error("[line {}] Error{}: {message}", .token.line, location(.token))]
    Parse { token: Token, message: String },
    #[error("[line {}] Error{}: {message}", .token.line, location(.token))]
    Resolve { token: Token, message: String },
}

impl SyntaxError {
    pub fn line(&self) -> usize {
        match self {
            SyntaxError::Scan { line, .. } => *line,
            SyntaxError::Parse { token, .. } | SyntaxError::Resolve { token, .. } => token.line,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SyntaxError::Scan { message, .. }
            | SyntaxError::Parse { message, .. }
            | SyntaxError::Resolve { message, .. } => message,
        }
    }
}

fn location(token: &Token) -> String {
    if token.kind == TokenKind::Eof {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// Every static error of one run, reported together.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct SyntaxErrors(pub Vec<SyntaxError>);

impl fmt::Display for SyntaxErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl SyntaxErrors {
    pub fn errors(&self) -> &[SyntaxError] {
        &self.0
    }
}

/// Scans and parses a whole program.
pub fn parse(source: &str) -> Result<Vec<Stmt>, SyntaxErrors> {
    let (tokens, mut errors) = Scanner::new(source).scan_tokens();
    let (statements, parse_errors) = Parser::new(tokens).parse();
    errors.extend(parse_errors);
    if errors.is_empty() {
        Ok(statements)
    } else {
        Err(SyntaxErrors(errors))
    }
}

/// Parses the source as exactly one expression with nothing after it.
/// Returns `None` on any error so callers can fall back to statement mode.
pub fn parse_expression(source: &str) -> Option<Expr> {
    let (tokens, errors) = Scanner::new(source).scan_tokens();
    if !errors.is_empty() {
        return None;
    }
    Parser::new(tokens).parse_expression()
}

/// Computes the scope depth of every local variable reference.
pub fn resolve(statements: &[Stmt]) -> Result<Locals, SyntaxErrors> {
    let mut resolver = Resolver::new();
    resolver.resolve(statements);
    resolver.finish()
}

/// Resolves a standalone expression (REPL mode).
pub fn resolve_expression(expr: &Expr) -> Result<Locals, SyntaxErrors> {
    let mut resolver = Resolver::new();
    resolver.resolve_expr(expr);
    resolver.finish()
}
