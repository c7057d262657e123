use crate::{environment::prelude::Value, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
    UnknownVariable { name: String },
    NotCallable,
    NullMember { name: String },
    ArityMismatch { expected: usize, got: usize },
    ImportUnavailable,
    ImportPathNotString,
    ImportFailed { message: String },
    CapabilityDenied { capability: &'static str },
    StrayBreak,
    StrayContinue,
    InvalidArgument { message: String },
    Io { message: String },
    /// Raised by `házej` and caught by `chyť`.
    Thrown { value: Value },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            RuntimeErrorType::UnknownVariable { name } => (
                format!("Neznámá proměnná '{name}'"),
                vec![]
            ),
            RuntimeErrorType::NotCallable => (
                "Volat lze jen funkce".into(),
                vec![]
            ),
            RuntimeErrorType::NullMember { name } => (
                format!("Nelze číst vlastnost '{name}' z null"),
                vec![]
            ),
            RuntimeErrorType::ArityMismatch { expected, got } => (
                format!("Arity: čekám {expected}, dostal {got}"),
                vec![]
            ),
            RuntimeErrorType::ImportUnavailable => (
                "Importy nejsou dostupné (bez loaderu)".into(),
                vec![]
            ),
            RuntimeErrorType::ImportPathNotString => (
                "vokno očekává stringovou cestu".into(),
                vec![]
            ),
            RuntimeErrorType::ImportFailed { message } => (
                format!("Import selhal: {message}"),
                vec![]
            ),
            RuntimeErrorType::CapabilityDenied { capability } => (
                format!("Schopnost '{capability}' není povolena"),
                vec!["Run with `--unsafe-fs` to enable filesystem access.".into()]
            ),
            RuntimeErrorType::StrayBreak => (
                "`vypadni` mimo smyčku".into(),
                vec![]
            ),
            RuntimeErrorType::StrayContinue => (
                "`přeskoč` mimo smyčku".into(),
                vec![]
            ),
            RuntimeErrorType::InvalidArgument { message } => (
                message.clone(),
                vec![]
            ),
            RuntimeErrorType::Io { message } => (
                message.clone(),
                vec![]
            ),
            RuntimeErrorType::Thrown { value } => (
                format!("{value}"),
                vec![]
            ),
        }
    }
}

impl RuntimeErrorType {
    /// The value a `chyť` binding receives. `házej` payloads pass
    /// through unchanged, engine errors become their message string.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Thrown { value } => value.clone(),
            other => {
                let error = RuntimeError {
                    error: other.clone(),
                    location: SrcSpan::default()
                };

                Value::String(error.details().0)
            }
        }
    }
}

pub fn runtime_error<T>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, location })
}
