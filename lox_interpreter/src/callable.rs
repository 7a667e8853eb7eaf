use std::fmt;
use std::rc::Rc;

use lox_ast::{FunctionDecl, Token};
use tracing::trace;

use crate::class::{LoxClass, LoxInstance};
use crate::environment::Environment;
use crate::error::{ErrorKind, EvalResult, Flow, RuntimeError};
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Host function signature. Natives get the interpreter so they can call
/// back into script code.
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> Result<Value, String>;

pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub func: NativeFn,
}

/// Represents a closure: a function declaration with its captured lexical
/// environment.
#[derive(Clone)]
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: Environment,
    is_initializer: bool,
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
            .field("name", &self.declaration.name.lexeme)
            .field("arity", &self.arity())
            .field("is_getter", &self.is_getter())
            .field("is_initializer", &self.is_initializer)
            .field("closure", &"...")
            .finish()
    }
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: Environment, is_initializer: bool) -> Self {
        LoxFunction {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    pub fn is_getter(&self) -> bool {
        self.declaration.is_getter
    }

    pub fn is_initializer(&self) -> bool {
        self.is_initializer
    }

    /// Returns a copy of this method whose closure is a fresh frame binding
    /// `this` to `instance`. The original function is left untouched.
    pub fn bind(&self, instance: Rc<LoxInstance>) -> LoxFunction {
        let environment = Environment::new_enclosed(self.closure.clone());
        environment.define("this", Value::Instance(instance));
        LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }

    /// Runs the body in a fresh frame enclosed by the closure. `site` is
    /// the token that triggered the call.
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        site: &Token,
    ) -> EvalResult {
        trace!(function = self.name(), args = arguments.len(), "call");
        let environment = Environment::new_enclosed(self.closure.clone());
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(param.lexeme.clone(), argument);
        }

        let body = &self.declaration.body;
        let flow = interpreter.enter_call(site, |interpreter| {
            interpreter.execute_block(body, environment)
        })?;

        // An initializer hands back the instance however it exits.
        if self.is_initializer {
            return Ok(self.closure.lookup_local("this").unwrap_or(Value::Nil));
        }
        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal | Flow::Break => Ok(Value::Nil),
        }
    }
}

/// Anything a call expression can invoke.
#[derive(Clone)]
pub enum Callable {
    Function(Rc<LoxFunction>),
    Native(Rc<NativeFunction>),
    Class(Rc<LoxClass>),
}

impl Callable {
    pub fn arity(&self) -> usize {
        match self {
            Callable::Function(function) => function.arity(),
            Callable::Native(native) => native.arity,
            Callable::Class(class) => class.arity(),
        }
    }

    /// Invokes the callable. Arity has already been checked by the caller;
    /// `paren` locates failures reported by native code.
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> EvalResult {
        match self {
            Callable::Function(function) => function.call(interpreter, arguments, paren),
            Callable::Native(native) => (native.func)(interpreter, &arguments)
                .map_err(|message| RuntimeError::new(paren, ErrorKind::Native(message))),
            Callable::Class(class) => class.instantiate(interpreter, arguments, paren),
        }
    }

    pub fn ptr_eq(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Function(a), Callable::Function(b)) => Rc::ptr_eq(a, b),
            (Callable::Native(a), Callable::Native(b)) => Rc::ptr_eq(a, b),
            (Callable::Class(a), Callable::Class(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Function(function) => write!(f, "<fn {}>", function.name()),
            Callable::Native(_) => write!(f, "<native fn>"),
            Callable::Class(class) => write!(f, "{}", class.name()),
        }
    }
}

impl From<LoxFunction> for Value {
    fn from(function: LoxFunction) -> Self {
        Value::Callable(Callable::Function(Rc::new(function)))
    }
}
