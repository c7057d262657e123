use std::{cell::RefCell, collections::HashMap, fmt::Display, rc::Rc};

use crate::eval::prelude::{Interpreter, RuntimeErrorType};
use crate::parser::prelude::Statement;

use super::environment::EnvId;

/// Runtime values. Arrays and objects are shared by reference, so two
/// clones of the same array see each other's mutations.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<HashMap<String, Value>>>),
    Function(Rc<Function>),
    Builtin(Rc<Builtin>),
}

#[derive(Debug)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<Vec<Statement>>,
    pub env: EnvId,
}

pub type NativeFn = fn(&mut Interpreter, Vec<Value>) -> Result<Value, RuntimeErrorType>;

/// A native function. `arity: None` means variadic.
#[derive(Debug)]
pub struct Builtin {
    pub name: String,
    pub arity: Option<usize>,
    pub func: NativeFn,
}

impl Value {
    pub fn array(values: Vec<Value>) -> Self {
        Self::Array(Rc::new(RefCell::new(values)))
    }

    pub fn object(map: HashMap<String, Value>) -> Self {
        Self::Object(Rc::new(RefCell::new(map)))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::String(value) => !value.is_empty(),
            _ => true,
        }
    }

    /// Numeric coercion. Strings are trimmed and parsed, everything
    /// that has no numeric reading becomes NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(true) => 1.0,
            Self::Bool(false) => 0.0,
            Self::Number(value) => *value,
            Self::String(value) => {
                let trimmed = value.trim();

                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            },
            _ => f64::NAN,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(true) => "pravda",
            Self::Bool(false) => "nepravda",
            Self::Number(_) => "číslo",
            Self::String(_) => "řetězec",
            Self::Array(_) => "pole",
            Self::Object(_) => "mapa",
            Self::Function(_) | Self::Builtin(_) => "funkce",
        }
    }
}

/// Primitives compare by value, everything shared compares by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Number(value) => write!(f, "{}", fmt_number(*value)),
            Value::String(value) => write!(f, "{value}"),
            Value::Array(values) => {
                let rendered = values.borrow().iter()
                    .map(|value| format!("{value}"))
                    .collect::<Vec<String>>();

                write!(f, "[{}]", rendered.join(", "))
            },
            Value::Object(map) => {
                let map = map.borrow();

                // sorted keys keep the output deterministic
                let mut keys = map.keys().collect::<Vec<&String>>();
                keys.sort();

                let rendered = keys.into_iter()
                    .map(|key| format!("{}: {}", key, map[key]))
                    .collect::<Vec<String>>();

                write!(f, "{{{}}}", rendered.join(", "))
            },
            Value::Function(function) => write!(f, "<rob {}>", function.name),
            Value::Builtin(builtin) => match builtin.name.contains('.') {
                true => write!(f, "<{}>", builtin.name),
                false => write!(f, "<builtin {}>", builtin.name)
            }
        }
    }
}

fn fmt_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".into()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity".into() } else { "-Infinity".into() }
    } else if value == value.trunc() && value.abs() < 1e18 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(!Value::string("").is_truthy());

        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(-1.0).is_truthy());
        assert!(Value::string("ne").is_truthy());
        assert!(Value::array(vec![]).is_truthy());
        assert!(Value::object(HashMap::new()).is_truthy());
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::Null.as_number(), 0.0);
        assert_eq!(Value::Bool(true).as_number(), 1.0);
        assert_eq!(Value::string("  42.5 ").as_number(), 42.5);
        assert_eq!(Value::string("").as_number(), 0.0);
        assert!(Value::string("deset").as_number().is_nan());
        assert!(Value::array(vec![]).as_number().is_nan());
    }

    #[test]
    fn test_identity_equality() {
        let a = Value::array(vec![Value::Number(1.0)]);
        let b = a.clone();
        let c = Value::array(vec![Value::Number(1.0)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Value::Number(3.0)), "3");
        assert_eq!(format!("{}", Value::Number(3.25)), "3.25");
        assert_eq!(format!("{}", Value::Number(f64::NAN)), "NaN");
        assert_eq!(format!("{}", Value::Number(f64::INFINITY)), "Infinity");

        let array = Value::array(vec![Value::Number(1.0), Value::string("a")]);
        assert_eq!(format!("{array}"), "[1, a]");

        let mut map = HashMap::new();
        map.insert("b".to_string(), Value::Number(2.0));
        map.insert("a".to_string(), Value::Number(1.0));
        assert_eq!(format!("{}", Value::object(map)), "{a: 1, b: 2}");
    }
}
