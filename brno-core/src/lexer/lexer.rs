use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

// таблица ключевых слов, регистрозависимая
pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"nech" => Token::Let,
		"rob" => Token::Fun,
		"vrat" => Token::Return,
		"esli" => Token::If,
		"inak" => Token::Else,
		"šalina" => Token::While,
		"okruh" => Token::For,
		"vyblij" => Token::Print,
		"vokno" => Token::Import,
		"zkus" => Token::Try,
		"chyť" => Token::Catch,
		"potom" => Token::Finally,
		"vypadni" => Token::Break,
		"přeskoč" => Token::Continue,
		"rožni" => Token::True,
		"zhasni" => Token::False,
		"null" => Token::Null,
		"piča" => Token::Terminator,

		_ => return None
	})
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
	done: bool,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
            input,
			done: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
		let span = match self.ch {
			Some(ch) => match ch {
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'{' => self.eat_one_char(Token::LBrace),
				'}' => self.eat_one_char(Token::RBrace),
				'[' => self.eat_one_char(Token::LBracket),
				']' => self.eat_one_char(Token::RBracket),
				',' => self.eat_one_char(Token::Comma),
				'.' => self.eat_one_char(Token::Dot),

				// максимальное поглощение: сперва пробуем двухсимвольный вариант
				'+' => match self.next_ch {
					Some('+') => self.eat_two_chars(Token::PlusPlus),
					Some('=') => self.eat_two_chars(Token::PlusEq),
					_ => self.eat_one_char(Token::Plus)
				},
				'-' => match self.next_ch {
					Some('-') => self.eat_two_chars(Token::MinusMinus),
					Some('=') => self.eat_two_chars(Token::MinusEq),
					_ => self.eat_one_char(Token::Minus)
				},
				'*' => match self.next_ch {
					Some('*') => self.eat_two_chars(Token::StarStar),
					Some('=') => self.eat_two_chars(Token::StarEq),
					_ => self.eat_one_char(Token::Star)
				},
				'/' => match self.next_ch {
					Some('/') => return self.lex_line_comment(),
					Some('*') => return self.lex_block_comment(),
					Some('=') => self.eat_two_chars(Token::SlashEq),
					_ => self.eat_one_char(Token::Slash)
				},
				'%' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::PercentEq),
					_ => self.eat_one_char(Token::Percent)
				},
				'!' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::BangEq),
					_ => self.eat_one_char(Token::Bang)
				},
				'=' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::EqEq),
					_ => self.eat_one_char(Token::Eq)
				},
				'<' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::LtEq),
					_ => self.eat_one_char(Token::Lt)
				},
				'>' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::GtEq),
					_ => self.eat_one_char(Token::Gt)
				},

				'&' => match self.next_ch {
					Some('&') => self.eat_two_chars(Token::AndAnd),
					_ => return self.incomplete_operator('&', "&&")
				},
				'|' => match self.next_ch {
					Some('|') => self.eat_two_chars(Token::OrOr),
					_ => return self.incomplete_operator('|', "||")
				},
				'?' => match self.next_ch {
					Some('?') => self.eat_two_chars(Token::QuestionQuestion),
					_ => return self.incomplete_operator('?', "??")
				},

				'"' => return self.lex_string(),

				'0'..='9' => return Ok(self.lex_number()),

				c if c.is_alphabetic() || c == '_' => {
					return Ok(self.lex_ident());
				},

				' ' | '\t' | '\r' | '\n' => {
					let _ = self.next_char();

					return self.next_token();
				},

				c => {
					return Err(LexicalError {
						error: LexicalErrorType::UnrecognizedCharacter { ch: c },
						location: SrcSpan::from(self.position, self.next_position),
					});
				}
			},
			None => {
				self.eat_one_char(Token::Eof)
			}
		};

		Ok(span)
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += 1;

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn incomplete_operator(&mut self, ch: char, expected: &'static str) -> LexResult {
		let location = SrcSpan::from(self.position, self.next_position);
		self.next_char();

		Err(LexicalError {
			error: LexicalErrorType::IncompleteOperator { ch, expected },
			location,
		})
	}

	fn lex_ident(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut ident = String::new();

		loop {
			match self.ch {
				// юникодные буквы и цифры, как и в оригинале
				Some(ch) if ch.is_alphanumeric() || ch == '_' => {
					ident.push(self.next_char().expect("ident char"))
				},
				_ => break
			}
		}

		let end_pos = self.position;

		let token = match str_to_keyword(&ident) {
			Some(keyword) => keyword,
			None => Token::Ident(ident)
		};

		(start_pos, token, end_pos)
	}

	fn lex_number(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut value = String::new();

		while matches!(self.ch, Some(ch) if ch.is_ascii_digit()) {
			value.push(self.next_char().expect("digit"));
		}

		// точка съедается только когда за ней идёт цифра
		if self.ch == Some('.') && matches!(self.next_ch, Some(ch) if ch.is_ascii_digit()) {
			value.push(self.next_char().expect("period"));

			while matches!(self.ch, Some(ch) if ch.is_ascii_digit()) {
				value.push(self.next_char().expect("digit"));
			}
		}

		let end_pos = self.position;
		let number = value.parse::<f64>().expect("digit run is a valid float");

		(start_pos, Token::Number(number), end_pos)
	}

	fn lex_string(&mut self) -> LexResult {
		let start_pos = self.position;

		self.next_char(); // opening quote

		let mut value = String::new();

		loop {
			match self.ch {
				Some('"') => break,
				Some(_) => value.push(self.next_char().expect("string char")),
				None => return Err(LexicalError {
					error: LexicalErrorType::UnterminatedString,
					location: SrcSpan::from(start_pos, self.position),
				})
			}
		}

		self.next_char(); // closing quote

		Ok((start_pos, Token::String(value), self.position))
	}

	fn lex_line_comment(&mut self) -> LexResult {
		let start_pos = self.position;

		while !matches!(self.ch, Some('\n') | None) {
			self.next_char();
		}

		Ok((start_pos, Token::Comment, self.position))
	}

	fn lex_block_comment(&mut self) -> LexResult {
		let start_pos = self.position;

		self.next_char(); // slash
		self.next_char(); // star

		loop {
			match (self.ch, self.next_ch) {
				(Some('*'), Some('/')) => {
					self.next_char();
					self.next_char();
					break;
				},
				(Some(_), _) => {
					self.next_char();
				},
				(None, _) => return Err(LexicalError {
					error: LexicalErrorType::UnterminatedComment,
					location: SrcSpan::from(start_pos, self.position),
				})
			}
		}

		Ok((start_pos, Token::Comment, self.position))
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		let token = self.next_token();

		match &token {
			Ok((_, Token::Eof, _)) | Err(_) => self.done = true,
			_ => {}
		}

		Some(token)
	}
}
