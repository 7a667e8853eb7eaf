use std::mem;
use std::rc::Rc;

use lox_ast::{ClassDecl, Expr, ExprId, FunctionDecl, Literal, Stmt, Token, TokenKind};
use lox_parser::Locals;
use tracing::{debug, trace};

use crate::callable::{Callable, LoxFunction, NativeFn, NativeFunction};
use crate::class::LoxClass;
use crate::environment::Environment;
use crate::error::{ErrorKind, EvalResult, ExecResult, Flow, RuntimeError};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::output::Output;
use crate::stack::ensure_sufficient_stack;
use crate::stdlib;
use crate::value::Value;

/// Deepest chain of active function calls before a script is stopped.
pub const MAX_CALL_DEPTH: usize = 1000;

/// How a call to [`Interpreter::interpret`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Completed,
    RuntimeError(RuntimeError),
}

/// Tree-walking evaluator.
///
/// `environment` is the frame currently in scope. It is swapped on block
/// and call entry and always restored on exit, so after any statement
/// returns (normally or not) it is back to what it was before.
pub struct Interpreter {
    globals: Environment,
    environment: Environment,
    locals: Locals,
    output: Output,
    call_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_output(Output::Stdout)
    }

    pub fn with_output(output: Output) -> Self {
        let globals = Environment::new();
        stdlib::populate_globals(&globals);
        Interpreter {
            environment: globals.clone(),
            globals,
            locals: Locals::new(),
            output,
            call_depth: 0,
        }
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Records that the expression `id` refers to a binding `depth` frames
    /// out from wherever it is evaluated.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    pub fn extend_locals(&mut self, locals: Locals) {
        self.locals.extend(locals);
    }

    pub fn define_native(&self, name: &str, arity: usize, func: NativeFn) {
        let native = NativeFunction {
            name: name.to_string(),
            arity,
            func,
        };
        self.globals
            .define(name, Value::Callable(Callable::Native(Rc::new(native))));
    }

    /// Runs a program. The first runtime error stops execution and is handed
    /// back; the interpreter stays usable for further input.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Outcome {
        for statement in statements {
            if let Err(error) = self.execute(statement) {
                debug!(line = error.line(), "runtime error: {}", error);
                return Outcome::RuntimeError(error);
            }
        }
        Outcome::Completed
    }

    /// Evaluates one expression, `None` if it failed. The error is only
    /// logged; callers that must report it use [`Interpreter::evaluate`].
    pub fn interpret_expression(&mut self, expr: &Expr) -> Option<Value> {
        match self.evaluate(expr) {
            Ok(value) => Some(value),
            Err(error) => {
                debug!(line = error.line(), "runtime error: {}", error);
                None
            }
        }
    }

    pub fn stringify(value: &Value) -> String {
        value.to_string()
    }

    // --- Statements ---

    pub fn execute(&mut self, statement: &Stmt) -> ExecResult {
        match statement {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Print { keyword, value } => {
                let value = self.evaluate(value)?;
                self.output
                    .println(&Self::stringify(&value))
                    .map_err(|e| RuntimeError::new(keyword, ErrorKind::Output(e.to_string())))?;
                Ok(Flow::Normal)
            }
            Stmt::Var { name, initializer } => {
                match initializer {
                    Some(expr) => {
                        let value = self.evaluate(expr)?;
                        self.environment.define(name.lexeme.clone(), value);
                    }
                    None => self.environment.declare_uninitialized(name.lexeme.clone()),
                }
                Ok(Flow::Normal)
            }
            Stmt::Block(statements) => {
                let scope = Environment::new_enclosed(self.environment.clone());
                self.execute_block(statements, scope)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body)? {
                        Flow::Normal => {}
                        Flow::Break => break,
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Break(_) => Ok(Flow::Break),
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Function(decl) => {
                self.function_declaration(decl);
                Ok(Flow::Normal)
            }
            Stmt::Class(decl) => {
                self.class_declaration(decl)?;
                Ok(Flow::Normal)
            }
        }
    }

    /// Runs `statements` with `environment` as the current frame, then puts
    /// the previous frame back whatever the outcome.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Environment) -> ExecResult {
        let previous = mem::replace(&mut self.environment, environment);
        let result = self.execute_sequence(statements);
        self.environment = previous;
        result
    }

    fn execute_sequence(&mut self, statements: &[Stmt]) -> ExecResult {
        for statement in statements {
            match self.execute(statement)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    fn function_declaration(&mut self, decl: &Rc<FunctionDecl>) {
        trace!(name = %decl.name.lexeme, "define function");
        let function = LoxFunction::new(Rc::clone(decl), self.environment.clone(), false);
        self.environment
            .define(decl.name.lexeme.clone(), Value::from(function));
    }

    fn class_declaration(&mut self, decl: &ClassDecl) -> EvalResult<()> {
        trace!(name = %decl.name.lexeme, "define class");
        let superclass = match &decl.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Callable(Callable::Class(class)) => Some(class),
                _ => {
                    let token = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => &decl.name,
                    };
                    return Err(RuntimeError::new(token, ErrorKind::InvalidSuperclass));
                }
            },
            None => None,
        };

        // Declared first so methods can refer to the class by name.
        self.environment.define(decl.name.lexeme.clone(), Value::Nil);

        let method_scope = match &superclass {
            Some(superclass) => {
                let scope = Environment::new_enclosed(self.environment.clone());
                scope.define("super", Value::Callable(Callable::Class(Rc::clone(superclass))));
                scope
            }
            None => self.environment.clone(),
        };

        let methods = decl
            .methods
            .iter()
            .map(|method| {
                let is_initializer = method.name.lexeme == "init";
                let function =
                    LoxFunction::new(Rc::clone(method), method_scope.clone(), is_initializer);
                (method.name.lexeme.clone(), Rc::new(function))
            })
            .collect();

        let class = LoxClass::new(decl.name.lexeme.clone(), superclass, methods);
        self.environment
            .assign(&decl.name, Value::Callable(Callable::Class(Rc::new(class))))
    }

    // --- Expressions ---

    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Literal(literal) => Ok(literal_value(literal)),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Variable { id, name } => self.look_up_variable(*id, name),
            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;
                match self.locals.get(id) {
                    Some(&distance) => self.environment.assign_at(distance, name, value.clone())?,
                    None => self.globals.assign(name, value.clone())?,
                }
                Ok(value)
            }
            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;
                evaluate_unary(operator, right)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                evaluate_binary(left, operator, right)
            }
            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let short_circuits = match operator.kind {
                    TokenKind::Or => left.is_truthy(),
                    _ => !left.is_truthy(),
                };
                if short_circuits {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }
            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }
                self.call(callee, values, paren)
            }
            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => instance.get(name, self),
                _ => Err(RuntimeError::new(name, ErrorKind::NotAnInstance("properties"))),
            },
            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(RuntimeError::new(name, ErrorKind::NotAnInstance("fields")));
                };
                let value = self.evaluate(value)?;
                instance.set(name, value.clone());
                Ok(value)
            }
            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),
            Expr::Super {
                id,
                keyword,
                method,
            } => self.super_method(*id, keyword, method),
        }
    }

    /// Calls any callable value with already-evaluated arguments. Natives
    /// use this to call back into script functions.
    pub fn call(&mut self, callee: Value, arguments: Vec<Value>, paren: &Token) -> EvalResult {
        let Value::Callable(callable) = callee else {
            return Err(RuntimeError::new(paren, ErrorKind::NotCallable));
        };
        if arguments.len() != callable.arity() {
            return Err(RuntimeError::new(
                paren,
                ErrorKind::ArityMismatch {
                    expected: callable.arity(),
                    got: arguments.len(),
                },
            ));
        }
        callable.call(self, arguments, paren)
    }

    /// Runs one function body as a new call frame. `site` locates the
    /// error if the depth limit is hit. The depth is restored however the
    /// body exits.
    pub fn enter_call<T>(
        &mut self,
        site: &Token,
        body: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        if self.call_depth >= MAX_CALL_DEPTH {
            debug!(depth = self.call_depth, line = site.line, "call depth limit reached");
            return Err(RuntimeError::new(site, ErrorKind::StackOverflow));
        }
        self.call_depth += 1;
        let result = ensure_sufficient_stack(|| body(self));
        self.call_depth -= 1;
        result
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> EvalResult {
        match self.locals.get(&id) {
            Some(&distance) => self.environment.get_at(distance, name),
            None => self.globals.get(name),
        }
    }

    /// `super` lives one frame outside the frame binding `this`.
    fn super_method(&mut self, id: ExprId, keyword: &Token, method: &Token) -> EvalResult {
        let distance = self.locals.get(&id).copied().ok_or_else(|| {
            RuntimeError::new(keyword, ErrorKind::UndefinedVariable(keyword.lexeme.clone()))
        })?;
        let Value::Callable(Callable::Class(superclass)) = self.environment.get_at(distance, keyword)?
        else {
            return Err(RuntimeError::new(keyword, ErrorKind::InvalidSuperclass));
        };

        let this = Token::new(TokenKind::This, "this", keyword.line);
        let Value::Instance(instance) = self.environment.get_at(distance.saturating_sub(1), &this)?
        else {
            return Err(RuntimeError::new(keyword, ErrorKind::NotAnInstance("properties")));
        };

        let Some(function) = superclass.find_method(&method.lexeme) else {
            return Err(RuntimeError::new(
                method,
                ErrorKind::UndefinedProperty(method.lexeme.clone()),
            ));
        };
        let bound = function.bind(instance);
        if bound.is_getter() {
            bound.call(self, Vec::new(), method)
        } else {
            Ok(Value::from(bound))
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::String(s.clone()),
    }
}
