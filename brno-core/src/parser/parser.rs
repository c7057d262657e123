use crate::{lexer::prelude::{LexResult, Lexer, LexicalError, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Module, Parsed, Program};

pub trait Parse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub comments: Vec<SrcSpan>,
    pub lex_errors: Vec<LexicalError>,

    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            comments: vec![],
            lex_errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        loop {
            match self.tokens.next() {
                Some(Ok((start, Token::Comment, end))) => {
                    self.comments.push(SrcSpan { start, end })
                },
                Some(Err(err)) => {
                    self.lex_errors.push(err);

                    break;
                },
                Some(Ok(tok)) => {
                    next = Some(tok);

                    break;
                },
                None => {
                    break;
                }
            }
        }

        self.current_token = self.next_token.take();
        self.next_token = next.take();

        t
    }

    pub fn current_span(&self) -> SrcSpan {
        match &self.current_token {
            Some((start, _, end)) => SrcSpan { start: *start, end: *end },
            None => SrcSpan { start: 0, end: 0 }
        }
    }

    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some((_, token, _)) => Precedence::from(token),
            None => Precedence::Lowest
        }
    }

    pub fn parse(&mut self) -> Result<Parsed, ParseError> {
        let program = Program::parse(self, None);

        if self.lex_errors.len() > 0 {
            let error = self.lex_errors[0];

            return parse_error(
                ParseErrorType::LexError { error },
                error.location
            );
        }

        let module = Module {
            name: "".into(),
            program: program?
        };

        Ok(Parsed {
            module,
            comments: std::mem::take(&mut self.comments)
        })
    }

    /// Advances past the current token if it matches, returning its span.
    pub fn accept(&mut self, token: &Token) -> Option<(u32, u32)> {
        match &self.current_token {
            Some((start, tok, end)) if tok == token => {
                let span = (*start, *end);
                self.step();
                Some(span)
            },
            _ => None
        }
    }

    pub fn current_is(&self, token: &Token) -> bool {
        matches!(&self.current_token, Some((_, tok, _)) if tok == token)
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: vec![format!("`{}`", token.as_literal())],
                    },
                    SrcSpan { start, end }
                )
            },
            None => {
                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            Some(t) => {
                let (start, _, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::ExpectedIdent,
                    SrcSpan { start, end }
                )
            },
            None => {
                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        }
    }

    /// Every simple statement ends with the `piča` keyword. Structured
    /// statements (blocks, loops, conditionals, try) are brace-delimited
    /// and skip this.
    pub fn expect_terminator(&mut self) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Terminator, end)) => {
                self.step();
                Ok((start, end))
            },
            Some(t) => {
                let (start, _, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::MissingTerminator,
                    SrcSpan { start, end }
                )
            },
            None => {
                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Assign,
    Nullish,
    Or,
    And,
    Equals,
    Relational,
    Sum,
    Product,
    Power,
}

impl Precedence {
    /// The minimum precedence for the right operand of a left-associative
    /// operator at this level.
    pub fn next(self) -> Self {
        match self {
            Self::Lowest => Self::Assign,
            Self::Assign => Self::Nullish,
            Self::Nullish => Self::Or,
            Self::Or => Self::And,
            Self::And => Self::Equals,
            Self::Equals => Self::Relational,
            Self::Relational => Self::Sum,
            Self::Sum => Self::Product,
            Self::Product => Self::Power,
            Self::Power => Self::Power,
        }
    }
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::Eq
            | Token::PlusEq | Token::MinusEq
            | Token::StarEq | Token::SlashEq | Token::PercentEq => Self::Assign,
            Token::QuestionQuestion => Self::Nullish,
            Token::OrOr => Self::Or,
            Token::AndAnd => Self::And,
            Token::EqEq | Token::BangEq => Self::Equals,
            Token::Lt | Token::LtEq | Token::Gt | Token::GtEq => Self::Relational,
            Token::Plus | Token::Minus => Self::Sum,
            Token::Star | Token::Slash | Token::Percent => Self::Product,
            Token::StarStar => Self::Power,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_module(src: &str) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);
    let parsed = parser.parse()?;

    Ok(parsed)
}

pub fn parse_module_from_stream(stream: impl Iterator<Item = char>) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);
    let parsed = parser.parse()?;

    Ok(parsed)
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
