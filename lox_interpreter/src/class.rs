//! Classes and their instances.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use lox_ast::Token;
use tracing::trace;

use crate::callable::LoxFunction;
use crate::error::{ErrorKind, EvalResult, RuntimeError};
use crate::interpreter::Interpreter;
use crate::value::Value;

const INITIALIZER: &str = "init";

/// A class: its unbound methods plus an optional superclass to search
/// when a method is not found locally. Immutable once created.
pub struct LoxClass {
    name: String,
    superclass: Option<Rc<LoxClass>>,
    methods: HashMap<String, Rc<LoxFunction>>,
}

impl fmt::Debug for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("LoxClass")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|s| &s.name))
            .field("methods", &methods)
            .finish()
    }
}

impl LoxClass {
    pub fn new(
        name: impl Into<String>,
        superclass: Option<Rc<LoxClass>>,
        methods: HashMap<String, Rc<LoxFunction>>,
    ) -> Self {
        LoxClass {
            name: name.into(),
            superclass,
            methods,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn superclass(&self) -> Option<&Rc<LoxClass>> {
        self.superclass.as_ref()
    }

    /// Searches this class, then each superclass in turn.
    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        match self.methods.get(name) {
            Some(method) => Some(Rc::clone(method)),
            None => self.superclass.as_ref()?.find_method(name),
        }
    }

    /// Calling a class takes as many arguments as its initializer.
    pub fn arity(&self) -> usize {
        self.find_method(INITIALIZER)
            .map_or(0, |initializer| initializer.arity())
    }

    pub fn instantiate(
        self: &Rc<Self>,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        site: &Token,
    ) -> EvalResult {
        trace!(class = %self.name, "instantiate");
        let instance = Rc::new(LoxInstance::new(Rc::clone(self)));
        if let Some(initializer) = self.find_method(INITIALIZER) {
            initializer
                .bind(Rc::clone(&instance))
                .call(interpreter, arguments, site)?;
        }
        Ok(Value::Instance(instance))
    }
}

impl fmt::Display for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Represents a runtime instance of a class. Fields have no schema: they
/// appear on first assignment.
pub struct LoxInstance {
    class: Rc<LoxClass>,
    fields: RefCell<HashMap<String, Value>>,
}

impl fmt::Debug for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxInstance")
            .field("class", &self.class.name)
            .field("fields", &self.fields.borrow())
            .finish()
    }
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        LoxInstance {
            class,
            fields: RefCell::new(HashMap::new()),
        }
    }

    pub fn class(&self) -> &Rc<LoxClass> {
        &self.class
    }

    /// Property access: fields shadow methods. A getter runs immediately;
    /// any other method comes back bound to this instance.
    pub fn get(self: &Rc<Self>, name: &Token, interpreter: &mut Interpreter) -> EvalResult {
        let field = self.fields.borrow().get(&name.lexeme).cloned();
        if let Some(value) = field {
            return Ok(value);
        }

        match self.class.find_method(&name.lexeme) {
            Some(method) => {
                let bound = method.bind(Rc::clone(self));
                if bound.is_getter() {
                    bound.call(interpreter, Vec::new(), name)
                } else {
                    Ok(Value::from(bound))
                }
            }
            None => Err(RuntimeError::new(
                name,
                ErrorKind::UndefinedProperty(name.lexeme.clone()),
            )),
        }
    }

    /// Creates or overwrites a field. Methods are never consulted.
    pub fn set(&self, name: &Token, value: Value) {
        self.fields.borrow_mut().insert(name.lexeme.clone(), value);
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }
}

impl fmt::Display for LoxInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}
