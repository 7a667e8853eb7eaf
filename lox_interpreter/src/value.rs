use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::callable::Callable;
use crate::class::LoxInstance;

// --- Runtime Values ---

/// Represents a runtime value in the Lox interpreter.
/// Callables and instances are reference-counted and compared by identity.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    Callable(Callable),
    Instance(Rc<LoxInstance>),
}

/// Coarse runtime type, used for comparability checks and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Nil,
    Boolean,
    Number,
    String,
    Function,
    Class,
    Instance,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Function => "function",
            Kind::Class => "class",
            Kind::Instance => "instance",
        }
    }

    /// Tie-break order for values that are not directly comparable:
    /// nil < boolean < number < string < everything else.
    pub fn order(self) -> u8 {
        match self {
            Kind::Nil => 0,
            Kind::Boolean => 1,
            Kind::Number => 2,
            Kind::String => 3,
            Kind::Function | Kind::Class | Kind::Instance => 4,
        }
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Callable(Callable::Class(_)) => Kind::Class,
            Value::Callable(_) => Kind::Function,
            Value::Instance(_) => Kind::Instance,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn type_order(&self) -> u8 {
        self.kind().order()
    }

    /// `nil` and `false` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    fn same_object(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Whether two values may meet in a comparison or equality operator.
///
/// Nil and booleans compare against anything, values of the same kind
/// compare with each other, and numbers compare with strings.
pub fn comparable(left: &Value, right: &Value) -> bool {
    match (left.kind(), right.kind()) {
        (Kind::Nil, _) | (_, Kind::Nil) => true,
        (a, b) if a == b => true,
        (Kind::Number, Kind::String) | (Kind::String, Kind::Number) => true,
        (Kind::Boolean, _) | (_, Kind::Boolean) => true,
        _ => false,
    }
}

/// Orders two comparable values. `None` means unordered: two distinct
/// callables or instances, which are only ever equal to themselves.
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    let ordering = match (left, right) {
        (Value::Nil, Value::Nil) => Ordering::Equal,
        (Value::Nil, _) => Ordering::Less,
        (_, Value::Nil) => Ordering::Greater,

        (Value::Number(a), Value::Number(b)) => compare_numbers(*a, *b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),

        // A string that does not parse orders after the number.
        (Value::Number(a), Value::String(s)) => match parse_number(s) {
            Some(b) => compare_numbers(*a, b),
            None => Ordering::Less,
        },
        (Value::String(s), Value::Number(b)) => match parse_number(s) {
            Some(a) => compare_numbers(a, *b),
            None => Ordering::Greater,
        },

        _ if left.kind() == right.kind() => {
            return left.same_object(right).then_some(Ordering::Equal);
        }
        _ => left.type_order().cmp(&right.type_order()),
    };
    Some(ordering)
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Shortest decimal form that reads back as the same number. Integral
/// values print without a fractional part.
pub fn format_number(n: f64) -> String {
    n.to_string()
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Callable(c) => write!(f, "Callable({})", c),
            Value::Instance(i) => write!(f, "Instance({})", i),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Callable(c) => write!(f, "{}", c),
            Value::Instance(i) => write!(f, "{}", i),
        }
    }
}

/// Structural equality for host code and tests. Lox's own `==` goes
/// through [`compare`], which also equates e.g. `1` and `"1"`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => self.same_object(other),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
