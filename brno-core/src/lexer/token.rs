use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    // всегда 64-битный float, без целочисленного варианта
    Number(f64),
    String(String),

    // // ... и /* ... */, обе формы выбрасываются парсером
    Comment,

    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }
    LBracket, // [
    RBracket, // ]
    Comma, // ,
    Dot, // .

    Plus, // +
    Minus, // -
    Star, // *
    Slash, // /
    Percent, // %
    StarStar, // **

    PlusPlus, // ++
    MinusMinus, // --
    PlusEq, // +=
    MinusEq, // -=
    StarEq, // *=
    SlashEq, // /=
    PercentEq, // %=

    Bang, // !
    BangEq, // !=
    Eq, // =
    EqEq, // ==
    Lt, // <
    LtEq, // <=
    Gt, // >
    GtEq, // >=
    AndAnd, // &&
    OrOr, // ||
    QuestionQuestion, // ??

    // обязательный терминатор простых операторов
    Terminator, // piča

    Let, // nech
    Fun, // rob
    Return, // vrat
    If, // esli
    Else, // inak
    While, // šalina
    For, // okruh
    Print, // vyblij
    Import, // vokno
    Try, // zkus
    Catch, // chyť
    Finally, // potom
    Break, // vypadni
    Continue, // přeskoč
    True, // rožni
    False, // zhasni
    Null, // null

    Eof,
}

impl Token {
    pub fn is_keyword(&self) -> bool {
        match self {
            Token::Let
            | Token::Fun
            | Token::Return
            | Token::If
            | Token::Else
            | Token::While
            | Token::For
            | Token::Print
            | Token::Import
            | Token::Try
            | Token::Catch
            | Token::Finally
            | Token::Break
            | Token::Continue
            | Token::True
            | Token::False
            | Token::Null
            | Token::Terminator => true,
            _ => false
        }
    }

    // `+=` и родня раскрываются парсером в `name = name OP rhs`
    pub fn compound_assign_base(&self) -> Option<Token> {
        match self {
            Token::PlusEq => Some(Token::Plus),
            Token::MinusEq => Some(Token::Minus),
            Token::StarEq => Some(Token::Star),
            Token::SlashEq => Some(Token::Slash),
            Token::PercentEq => Some(Token::Percent),
            _ => None
        }
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Number(value) => format!("{}", value),
            Token::String(value) => value.clone(),
            Token::Comment => "comment".to_string(),

            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::LBracket => "[".to_string(),
            Token::RBracket => "]".to_string(),
            Token::Comma => ",".to_string(),
            Token::Dot => ".".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),
            Token::StarStar => "**".to_string(),

            Token::PlusPlus => "++".to_string(),
            Token::MinusMinus => "--".to_string(),
            Token::PlusEq => "+=".to_string(),
            Token::MinusEq => "-=".to_string(),
            Token::StarEq => "*=".to_string(),
            Token::SlashEq => "/=".to_string(),
            Token::PercentEq => "%=".to_string(),

            Token::Bang => "!".to_string(),
            Token::BangEq => "!=".to_string(),
            Token::Eq => "=".to_string(),
            Token::EqEq => "==".to_string(),
            Token::Lt => "<".to_string(),
            Token::LtEq => "<=".to_string(),
            Token::Gt => ">".to_string(),
            Token::GtEq => ">=".to_string(),
            Token::AndAnd => "&&".to_string(),
            Token::OrOr => "||".to_string(),
            Token::QuestionQuestion => "??".to_string(),

            Token::Terminator => "piča".to_string(),

            Token::Let => "nech".to_string(),
            Token::Fun => "rob".to_string(),
            Token::Return => "vrat".to_string(),
            Token::If => "esli".to_string(),
            Token::Else => "inak".to_string(),
            Token::While => "šalina".to_string(),
            Token::For => "okruh".to_string(),
            Token::Print => "vyblij".to_string(),
            Token::Import => "vokno".to_string(),
            Token::Try => "zkus".to_string(),
            Token::Catch => "chyť".to_string(),
            Token::Finally => "potom".to_string(),
            Token::Break => "vypadni".to_string(),
            Token::Continue => "přeskoč".to_string(),
            Token::True => "rožni".to_string(),
            Token::False => "zhasni".to_string(),
            Token::Null => "null".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}
