use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedCharacter { ch: char },
    // одиночные `&`, `|`, `?` запрещены
    IncompleteOperator { ch: char, expected: &'static str },
    UnterminatedString,
    UnterminatedComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (String, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedCharacter { ch } => {
                (format!("Don't know what to do with `{ch}`"), vec![])
            },
            LexicalErrorType::IncompleteOperator { ch, expected } => {
                (
                    format!("There is no bare `{ch}` operator"),
                    vec![format!("Did you mean `{expected}`?")]
                )
            },
            LexicalErrorType::UnterminatedString => {
                ("Missing closing `\"` before end of input".to_string(), vec![])
            },
            LexicalErrorType::UnterminatedComment => {
                ("Missing closing `*/` before end of input".to_string(), vec![])
            }
        }
    }
}
