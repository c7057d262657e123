use std::collections::HashMap;
use std::rc::Rc;

use crate::environment::prelude::{Builtin, NativeFn, Value};

use super::error::RuntimeErrorType;
use super::interpreter::Interpreter;

pub fn builtin(name: &str, arity: Option<usize>, func: NativeFn) -> Value {
    Value::Builtin(Rc::new(Builtin {
        name: name.into(),
        arity,
        func,
    }))
}

/// Global builtins every program gets.
pub fn install(interpreter: &mut Interpreter) {
    let global = interpreter.envs.global();

    let mut define = |name: &str, value: Value| {
        interpreter.envs.define(global, name.into(), value);
    };

    let print = builtin("vyblij", Some(1), print);
    define("vyblij", print.clone());
    // aliases
    define("řekni", print.clone());
    define("pisni", print);

    define("fčil", builtin("fčil", Some(0), now_seconds));
    define("házej", builtin("házej", Some(1), throw));
    define("typ", builtin("typ", Some(1), type_of));
    define("__arr", builtin("__arr", None, make_array));
    define("__obj", builtin("__obj", None, make_object));
}

fn print(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let value = args.into_iter().next().unwrap_or(Value::Null);

    interpreter.emit_line(format!("{value}"));

    Ok(Value::Null)
}

fn now_seconds(_: &mut Interpreter, _: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let millis = chrono::Utc::now().timestamp_millis();

    Ok(Value::Number(millis as f64 / 1000.0))
}

fn throw(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let value = args.into_iter().next().unwrap_or(Value::Null);

    Err(RuntimeErrorType::Thrown { value })
}

fn type_of(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let value = args.into_iter().next().unwrap_or(Value::Null);

    Ok(Value::string(value.type_name()))
}

fn make_array(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::array(args))
}

/// Alternating key/value arguments, keys coerced to strings.
fn make_object(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut map = HashMap::new();
    let mut args = args.into_iter();

    while let Some(key) = args.next() {
        let value = args.next().unwrap_or(Value::Null);
        map.insert(format!("{key}"), value);
    }

    Ok(Value::object(map))
}
