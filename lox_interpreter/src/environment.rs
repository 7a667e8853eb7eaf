use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lox_ast::Token;

use crate::error::{ErrorKind, EvalResult, RuntimeError};
use crate::value::Value;

// --- Environment ---

/// A binding is either a value or the marker left by `var x;`, which must
/// be assigned before it is read.
#[derive(Debug, Clone)]
enum Slot {
    Bound(Value),
    Uninitialized,
}

#[derive(Debug)]
struct Frame {
    bindings: HashMap<String, Slot>,
    enclosing: Option<Environment>,
}

/// A scope frame. Cloning the handle shares the frame, which is how
/// closures keep their defining scope alive after it is exited.
#[derive(Debug, Clone)]
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// The outermost (global) frame.
    pub fn new() -> Self {
        Environment {
            frame: Rc::new(RefCell::new(Frame {
                bindings: HashMap::new(),
                enclosing: None,
            })),
        }
    }

    pub fn new_enclosed(enclosing: Environment) -> Self {
        Environment {
            frame: Rc::new(RefCell::new(Frame {
                bindings: HashMap::new(),
                enclosing: Some(enclosing),
            })),
        }
    }

    pub fn enclosing(&self) -> Option<Environment> {
        self.frame.borrow().enclosing.clone()
    }

    /// Binds `name` in this frame, silently replacing any earlier binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.frame
            .borrow_mut()
            .bindings
            .insert(name.into(), Slot::Bound(value));
    }

    pub fn declare_uninitialized(&self, name: impl Into<String>) {
        self.frame
            .borrow_mut()
            .bindings
            .insert(name.into(), Slot::Uninitialized);
    }

    /// Dynamic lookup: this frame first, then each enclosing frame.
    pub fn get(&self, name: &Token) -> EvalResult {
        let enclosing = {
            let frame = self.frame.borrow();
            if let Some(slot) = frame.bindings.get(&name.lexeme) {
                return read_slot(slot, name);
            }
            frame.enclosing.clone()
        };

        match enclosing {
            Some(scope) => scope.get(name),
            None => Err(RuntimeError::new(
                name,
                ErrorKind::UndefinedVariable(name.lexeme.clone()),
            )),
        }
    }

    /// Overwrites the nearest existing binding. Never creates one.
    pub fn assign(&self, name: &Token, value: Value) -> EvalResult<()> {
        let enclosing = {
            let mut frame = self.frame.borrow_mut();
            if let Some(slot) = frame.bindings.get_mut(&name.lexeme) {
                *slot = Slot::Bound(value);
                return Ok(());
            }
            frame.enclosing.clone()
        };

        match enclosing {
            Some(scope) => scope.assign(name, value),
            None => Err(RuntimeError::new(
                name,
                ErrorKind::UndefinedVariable(name.lexeme.clone()),
            )),
        }
    }

    /// The frame exactly `distance` hops out.
    pub fn ancestor(&self, distance: usize) -> Option<Environment> {
        let mut environment = self.clone();
        for _ in 0..distance {
            environment = environment.enclosing()?;
        }
        Some(environment)
    }

    /// Resolved lookup: no search, the binding must live in that frame.
    pub fn get_at(&self, distance: usize, name: &Token) -> EvalResult {
        let scope = self.resolved_scope(distance, name)?;
        let slot = scope.frame.borrow().bindings.get(&name.lexeme).cloned();
        match slot {
            Some(slot) => read_slot(&slot, name),
            None => Err(RuntimeError::new(
                name,
                ErrorKind::UndefinedVariable(name.lexeme.clone()),
            )),
        }
    }

    pub fn assign_at(&self, distance: usize, name: &Token, value: Value) -> EvalResult<()> {
        let scope = self.resolved_scope(distance, name)?;
        scope
            .frame
            .borrow_mut()
            .bindings
            .insert(name.lexeme.clone(), Slot::Bound(value));
        Ok(())
    }

    /// Reads a binding of this frame only, for names the interpreter itself
    /// defines such as `this`.
    pub fn lookup_local(&self, name: &str) -> Option<Value> {
        match self.frame.borrow().bindings.get(name) {
            Some(Slot::Bound(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn resolved_scope(&self, distance: usize, name: &Token) -> EvalResult<Environment> {
        self.ancestor(distance).ok_or_else(|| {
            RuntimeError::new(name, ErrorKind::UndefinedVariable(name.lexeme.clone()))
        })
    }
}

fn read_slot(slot: &Slot, name: &Token) -> EvalResult {
    match slot {
        Slot::Bound(value) => Ok(value.clone()),
        Slot::Uninitialized => Err(RuntimeError::new(
            name,
            ErrorKind::UninitializedAccess(name.lexeme.clone()),
        )),
    }
}
