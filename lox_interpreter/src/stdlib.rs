use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::callable::{Callable, NativeFn, NativeFunction};
use crate::environment::Environment;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Native functions every program starts with, as (name, arity, function).
const BUILT_INS: &[(&str, usize, NativeFn)] = &[("clock", 0, clock)];

pub fn populate_globals(globals: &Environment) {
    for &(name, arity, func) in BUILT_INS {
        let native = NativeFunction {
            name: name.to_string(),
            arity,
            func,
        };
        globals.define(name, Value::Callable(Callable::Native(Rc::new(native))));
    }
}

/// Seconds since the Unix epoch, with sub-second precision.
fn clock(_: &mut Interpreter, _: &[Value]) -> Result<Value, String> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| Value::Number(elapsed.as_secs_f64()))
        .map_err(|e| format!("System clock is before the Unix epoch: {}", e))
}
