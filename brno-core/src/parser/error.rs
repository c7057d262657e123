use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    ExpectedExpression,
    MissingTerminator,
    InvalidAssignmentTarget,
    InvalidPostfixTarget,
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("Expected an identifier".into(), vec![]),
            ParseErrorType::ExpectedExpression => ("Expected an expression".into(), vec![]),
            ParseErrorType::MissingTerminator => (
                "Expected the `piča` terminator".into(),
                vec!["Every simple statement must end with `piča`.".into()]
            ),
            ParseErrorType::InvalidAssignmentTarget => (
                "Invalid assignment target".into(),
                vec!["Only a bare variable can be assigned to.".into()]
            ),
            ParseErrorType::InvalidPostfixTarget => (
                "Invalid `++`/`--` target".into(),
                vec!["Postfix `++` and `--` apply only to a bare variable.".into()]
            ),
            ParseErrorType::UnexpectedEof => ("Unexpected end of file".into(), vec![]),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Number(_) => "a Number".to_string(),
                    Token::String(_) => "a String".to_string(),
                    Token::Ident(_) => "an Identifier".to_string(),
                    _ if token.is_keyword() => format!("the keyword `{}`", token.as_literal()),
                    _ => format!("`{}`", token.as_literal())
                };

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this".into(), messages)
            },
            ParseErrorType::LexError { error } => error.details()
        }
    }
}
