//! Unary and binary operator semantics.
//!
//! Operands arrive already evaluated, left before right. Nothing here can
//! call back into script code, so these are plain functions over values.

use std::cmp::Ordering;

use lox_ast::{Token, TokenKind};

use crate::error::{ErrorKind, EvalResult, RuntimeError};
use crate::value::{comparable, compare, Value};

const OPERAND_NUMBER: &str = "Operand must be a number.";
const OPERANDS_NUMBERS: &str = "Operands must be numbers.";
const OPERANDS_ADDABLE: &str = "Operands must be numbers or strings.";

pub fn evaluate_unary(operator: &Token, right: Value) -> EvalResult {
    match operator.kind {
        TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
        TokenKind::Minus => match right {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(type_error(operator, OPERAND_NUMBER)),
        },
        _ => Err(type_error(operator, "Unknown unary operator.")),
    }
}

pub fn evaluate_binary(left: Value, operator: &Token, right: Value) -> EvalResult {
    match operator.kind {
        TokenKind::Plus => add(left, operator, right),
        TokenKind::Minus => arithmetic(left, operator, right, |a, b| a - b),
        TokenKind::Star => arithmetic(left, operator, right, |a, b| a * b),
        TokenKind::Slash => divide(left, operator, right),

        TokenKind::EqualEqual => equality(&left, operator, &right),
        TokenKind::BangEqual => {
            equality(&left, operator, &right).map(|equal| Value::Bool(!equal.is_truthy()))
        }

        TokenKind::Greater => ordering(&left, operator, &right, |o| o == Ordering::Greater),
        TokenKind::GreaterEqual => ordering(&left, operator, &right, |o| o != Ordering::Less),
        TokenKind::Less => ordering(&left, operator, &right, |o| o == Ordering::Less),
        TokenKind::LessEqual => ordering(&left, operator, &right, |o| o != Ordering::Greater),

        _ => Err(type_error(operator, "Unknown binary operator.")),
    }
}

/// Numbers add. If either side is a string both sides are stringified and
/// concatenated, so `"n" + 1` is `"n1"`.
fn add(left: Value, operator: &Token, right: Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(mut a), right) => {
            a.push_str(&right.to_string());
            Ok(Value::String(a))
        }
        (left, Value::String(b)) => Ok(Value::String(format!("{}{}", left, b))),
        _ => Err(type_error(operator, OPERANDS_ADDABLE)),
    }
}

fn arithmetic(left: Value, operator: &Token, right: Value, op: fn(f64, f64) -> f64) -> EvalResult {
    let (a, b) = numbers(&left, operator, &right)?;
    Ok(Value::Number(op(a, b)))
}

fn divide(left: Value, operator: &Token, right: Value) -> EvalResult {
    let (a, b) = numbers(&left, operator, &right)?;
    if b == 0.0 {
        return Err(RuntimeError::new(operator, ErrorKind::DivisionByZero));
    }
    Ok(Value::Number(a / b))
}

fn numbers(left: &Value, operator: &Token, right: &Value) -> EvalResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(type_error(operator, OPERANDS_NUMBERS)),
    }
}

fn equality(left: &Value, operator: &Token, right: &Value) -> EvalResult {
    check_comparable(left, operator, right)?;
    Ok(Value::Bool(compare(left, right) == Some(Ordering::Equal)))
}

/// Unordered pairs (distinct objects) make every ordering operator false.
fn ordering(
    left: &Value,
    operator: &Token,
    right: &Value,
    accept: fn(Ordering) -> bool,
) -> EvalResult {
    check_comparable(left, operator, right)?;
    Ok(Value::Bool(compare(left, right).is_some_and(accept)))
}

pub fn check_comparable(left: &Value, operator: &Token, right: &Value) -> EvalResult<()> {
    if comparable(left, right) {
        Ok(())
    } else {
        Err(RuntimeError::new(
            operator,
            ErrorKind::TypeMismatch {
                left: left.type_name(),
                right: right.type_name(),
            },
        ))
    }
}

fn type_error(operator: &Token, message: &'static str) -> RuntimeError {
    RuntimeError::new(operator, ErrorKind::TypeError(message))
}
