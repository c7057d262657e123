use std::fmt::Display;

use crate::{
    lexer::prelude::{LexResult, Token},
    parser::prelude::{parse_error, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

#[derive(Debug)]
pub struct Parsed {
    pub module: Module,
    pub comments: Vec<SrcSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub program: Program
}

// program -> { <declaration> } EOF
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.current_span().start;
        let mut statements = vec![];

        loop {
            match &parser.current_token {
                Some((_, Token::Eof, _)) | None => break,
                _ => statements.push(Statement::parse(parser, None)?)
            }
        }

        let end = match statements.last() {
            Some(statement) => statement.location().end,
            None => start
        };

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join(" "))
    }
}

// declaration -> <letDecl> | <funDecl> | <statement>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(ExpressionStatement),
    Let(LetStatement),
    Block(Block),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Function(FunctionDeclaration),
    Return(ReturnStatement),
    Import(ImportStatement),
    Try(TryStatement),
    Break { location: SrcSpan },
    Continue { location: SrcSpan },
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let res = match &parser.current_token {
            Some((_, Token::Let, _)) => Self::Let(LetStatement::parse(parser, None)?),
            // `rob name(...)` is a declaration; a bare `rob (...)` is an
            // anonymous function in expression position
            Some((_, Token::Fun, _)) if matches!(&parser.next_token, Some((_, Token::Ident(_), _))) => {
                Self::Function(FunctionDeclaration::parse(parser, None)?)
            },
            Some((_, Token::LBrace, _)) => Self::Block(Block::parse(parser, None)?),
            Some((_, Token::If, _)) => Self::If(IfStatement::parse(parser, None)?),
            Some((_, Token::While, _)) => Self::While(WhileStatement::parse(parser, None)?),
            Some((_, Token::For, _)) => Self::For(ForStatement::parse(parser, None)?),
            Some((_, Token::Return, _)) => Self::Return(ReturnStatement::parse(parser, None)?),
            Some((_, Token::Import, _)) => Self::Import(ImportStatement::parse(parser, None)?),
            Some((_, Token::Try, _)) => Self::Try(TryStatement::parse(parser, None)?),
            Some((_, Token::Print, _)) => parse_print_sugar(parser)?,
            Some((start, Token::Break, _)) => {
                let start = *start;
                parser.step();
                let (_, end) = parser.expect_terminator()?;

                Self::Break { location: SrcSpan { start, end } }
            },
            Some((start, Token::Continue, _)) => {
                let start = *start;
                parser.step();
                let (_, end) = parser.expect_terminator()?;

                Self::Continue { location: SrcSpan { start, end } }
            },
            Some(_) => Self::Expression(ExpressionStatement::parse(parser, None)?),
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        Ok(res)
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Expression(statement) => statement.location,
            Self::Let(statement) => statement.location,
            Self::Block(block) => block.location,
            Self::If(statement) => statement.location,
            Self::While(statement) => statement.location,
            Self::For(statement) => statement.location,
            Self::Function(statement) => statement.location,
            Self::Return(statement) => statement.location,
            Self::Import(statement) => statement.location,
            Self::Try(statement) => statement.location,
            Self::Break { location } => *location,
            Self::Continue { location } => *location,
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression(statement) => write!(f, "{statement}"),
            Self::Let(statement) => write!(f, "{statement}"),
            Self::Block(block) => write!(f, "{block}"),
            Self::If(statement) => write!(f, "{statement}"),
            Self::While(statement) => write!(f, "{statement}"),
            Self::For(statement) => write!(f, "{statement}"),
            Self::Function(statement) => write!(f, "{statement}"),
            Self::Return(statement) => write!(f, "{statement}"),
            Self::Import(statement) => write!(f, "{statement}"),
            Self::Try(statement) => write!(f, "{statement}"),
            Self::Break { .. } => write!(f, "vypadni piča"),
            Self::Continue { .. } => write!(f, "přeskoč piča"),
        }
    }
}

// `vyblij(expr) piča` is sugar for a call to the `vyblij` builtin
fn parse_print_sugar<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>
) -> Result<Statement, ParseError> {
    let (start, _) = parser.expect_one(Token::Print)?;
    parser.expect_one(Token::LParen)?;
    let argument = Expression::parse(parser, None)?;
    let (_, callee_end) = parser.expect_one(Token::RParen)?;
    let (_, end) = parser.expect_terminator()?;

    let location = SrcSpan { start, end };
    let call = Call {
        callee: Expression::Variable(Variable {
            name: "vyblij".into(),
            location: SrcSpan { start, end: callee_end }
        }),
        arguments: vec![argument],
        location,
    };

    Ok(Statement::Expression(ExpressionStatement {
        expression: Expression::Call(Box::new(call)),
        location,
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for ExpressionStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let expression = Expression::parse(parser, None)?;
        let start = expression.location().start;
        let (_, end) = parser.expect_terminator()?;

        Ok(Self {
            expression,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} piča", self.expression)
    }
}

// letDecl -> nech <identifier> [= <expression>] piča
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub name: String,
    pub value: Option<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for LetStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Let)?;
        let (_, name, _) = parser.expect_ident()?;

        let value = match parser.accept(&Token::Eq) {
            Some(_) => Some(Expression::parse(parser, None)?),
            None => None
        };

        let (_, end) = parser.expect_terminator()?;

        Ok(Self {
            name,
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for LetStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "nech {} = {} piča", self.name, value),
            None => write!(f, "nech {} piča", self.name)
        }
    }
}

// block -> { "{" } { <declaration> } { "}" }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Block {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LBrace)?;
        let mut statements = vec![];

        loop {
            match &parser.current_token {
                Some((_, Token::RBrace, _))
                | Some((_, Token::Eof, _))
                | None => break,
                _ => statements.push(Statement::parse(parser, None)?)
            }
        }

        let (_, end) = parser.expect_one(Token::RBrace)?;

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{{ {} }}", statements.join(" "))
    }
}

// ifStmt -> esli ( <expression> ) <statement> [inak <statement>]
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub consequence: Box<Statement>,
    pub alternative: Option<Box<Statement>>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for IfStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;
        parser.expect_one(Token::LParen)?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(Token::RParen)?;

        let consequence = Box::new(Statement::parse(parser, None)?);

        let (alternative, end) = match parser.accept(&Token::Else) {
            Some(_) => {
                let statement = Statement::parse(parser, None)?;
                let end = statement.location().end;

                (Some(Box::new(statement)), end)
            },
            None => (None, consequence.location().end)
        };

        Ok(Self {
            condition,
            consequence,
            alternative,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "esli ({}) {}", self.condition, self.consequence)?;

        if let Some(alternative) = &self.alternative {
            write!(f, " inak {}", alternative)?;
        }

        Ok(())
    }
}

// whileStmt -> šalina ( <expression> ) <statement>
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for WhileStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::While)?;
        parser.expect_one(Token::LParen)?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(Token::RParen)?;

        let body = Box::new(Statement::parse(parser, None)?);
        let end = body.location().end;

        Ok(Self {
            condition,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "šalina ({}) {}", self.condition, self.body)
    }
}

// forStmt -> okruh ( [init] piča [cond] piča [step] ) <statement>
//
// There is no generic for node: the loop is desugared at parse time into
// its init/condition/step parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub init: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub step: Option<Expression>,
    pub body: Box<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for ForStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::For)?;
        parser.expect_one(Token::LParen)?;

        let init = match &parser.current_token {
            Some((_, Token::Terminator, _)) => {
                parser.step();
                None
            },
            Some((_, Token::Let, _)) => {
                Some(Box::new(Statement::Let(LetStatement::parse(parser, None)?)))
            },
            _ => {
                let statement = ExpressionStatement::parse(parser, None)?;
                Some(Box::new(Statement::Expression(statement)))
            }
        };

        let condition = match parser.current_is(&Token::Terminator) {
            true => None,
            false => Some(Expression::parse(parser, None)?)
        };
        parser.expect_terminator()?;

        let step = match parser.current_is(&Token::RParen) {
            true => None,
            false => Some(Expression::parse(parser, None)?)
        };
        parser.expect_one(Token::RParen)?;

        let body = Box::new(Statement::parse(parser, None)?);
        let end = body.location().end;

        Ok(Self {
            init,
            condition,
            step,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ForStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "okruh (")?;

        match &self.init {
            Some(init) => write!(f, "{init} ")?,
            None => write!(f, "piča ")?
        }

        match &self.condition {
            Some(condition) => write!(f, "{condition} piča")?,
            None => write!(f, "piča")?
        }

        if let Some(step) = &self.step {
            write!(f, " {step}")?;
        }

        write!(f, ") {}", self.body)
    }
}

// funDecl -> rob <identifier> ( [<params>] ) <block>
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for FunctionDeclaration {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Fun)?;
        let (_, name, _) = parser.expect_ident()?;
        let params = parse_params(parser)?;
        let body = Block::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self {
            name,
            params,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for FunctionDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rob {}({}) {}", self.name, self.params.join(", "), self.body)
    }
}

fn parse_params<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>
) -> Result<Vec<String>, ParseError> {
    parser.expect_one(Token::LParen)?;

    let mut params = vec![];

    if !parser.current_is(&Token::RParen) {
        loop {
            let (_, name, _) = parser.expect_ident()?;
            params.push(name);

            if parser.accept(&Token::Comma).is_none() {
                break;
            }
        }
    }

    parser.expect_one(Token::RParen)?;

    Ok(params)
}

// returnStmt -> vrat [<expression>] piča
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for ReturnStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Return)?;

        let value = match parser.current_is(&Token::Terminator) {
            true => None,
            false => Some(Expression::parse(parser, None)?)
        };

        let (_, end) = parser.expect_terminator()?;

        Ok(Self {
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "vrat {} piča", value),
            None => write!(f, "vrat piča")
        }
    }
}

// importStmt -> vokno <expression> piča
//
// The path may be any expression as long as it evaluates to a string.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    pub path: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for ImportStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Import)?;
        let path = Expression::parse(parser, None)?;
        let (_, end) = parser.expect_terminator()?;

        Ok(Self {
            path,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ImportStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vokno {} piča", self.path)
    }
}

// tryStmt -> zkus <block> [chyť ( [<identifier>] ) <block>] [potom <block>]
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    pub body: Block,
    pub binding: Option<String>,
    pub handler: Option<Block>,
    pub finalizer: Option<Block>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for TryStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Try)?;
        let body = Block::parse(parser, None)?;
        let mut end = body.location.end;

        let (binding, handler) = match parser.accept(&Token::Catch) {
            Some(_) => {
                parser.expect_one(Token::LParen)?;

                let binding = match &parser.current_token {
                    Some((_, Token::Ident(_), _)) => {
                        let (_, name, _) = parser.expect_ident()?;
                        Some(name)
                    },
                    _ => None
                };

                parser.expect_one(Token::RParen)?;

                let handler = Block::parse(parser, None)?;
                end = handler.location.end;

                (binding, Some(handler))
            },
            None => (None, None)
        };

        let finalizer = match parser.accept(&Token::Finally) {
            Some(_) => {
                let block = Block::parse(parser, None)?;
                end = block.location.end;

                Some(block)
            },
            None => None
        };

        Ok(Self {
            body,
            binding,
            handler,
            finalizer,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for TryStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "zkus {}", self.body)?;

        if let Some(handler) = &self.handler {
            let binding = self.binding.as_deref().unwrap_or("");
            write!(f, " chyť ({binding}) {handler}")?;
        }

        if let Some(finalizer) = &self.finalizer {
            write!(f, " potom {finalizer}")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Variable(Variable),
    Assign(Box<Assign>),
    Unary(Box<Unary>),
    Binary(Box<Binary>),
    Call(Box<Call>),
    Postfix(Postfix),
    Get(Box<Get>),
    Function(Box<FunctionLiteral>),
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Literal(literal) => literal.location,
            Self::Variable(variable) => variable.location,
            Self::Assign(assign) => assign.location,
            Self::Unary(unary) => unary.location,
            Self::Binary(binary) => binary.location,
            Self::Call(call) => call.location,
            Self::Postfix(postfix) => postfix.location,
            Self::Get(get) => get.location,
            Self::Function(literal) => literal.location,
        }
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let min = precedence.unwrap_or(Precedence::Lowest);
        let mut left = parse_unary(parser)?;

        loop {
            let (operator, op_precedence) = match &parser.current_token {
                Some((_, token, _)) => {
                    let op_precedence = Precedence::from(token);

                    if op_precedence == Precedence::Lowest || op_precedence < min {
                        break;
                    }

                    (token.clone(), op_precedence)
                },
                None => break
            };

            parser.step();

            left = match op_precedence {
                Precedence::Assign => parse_assignment(parser, left, operator)?,
                // `**` is right-associative, so the right operand parses at
                // the same level
                Precedence::Power => {
                    let right = Expression::parse(parser, Some(Precedence::Power))?;
                    binary(left, operator, right)
                },
                _ => {
                    let right = Expression::parse(parser, Some(op_precedence.next()))?;
                    binary(left, operator, right)
                }
            };
        }

        Ok(left)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Variable(variable) => write!(f, "{}", variable.name),
            Self::Assign(assign) => write!(f, "{} = {}", assign.name, assign.value),
            Self::Unary(unary) => write!(f, "{}{}", unary.operator, unary.operand),
            Self::Binary(binary) => write!(f, "{} {} {}", binary.left, binary.operator, binary.right),
            Self::Call(call) => {
                let arguments = call.arguments.iter()
                    .map(|argument| format!("{argument}"))
                    .collect::<Vec<String>>();

                write!(f, "{}({})", call.callee, arguments.join(", "))
            },
            Self::Postfix(postfix) => write!(f, "{}{}", postfix.name, postfix.operator),
            Self::Get(get) => write!(f, "{}.{}", get.object, get.name),
            Self::Function(literal) => {
                write!(f, "rob ({}) {}", literal.params.join(", "), literal.body)
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            LiteralValue::Number(value) => write!(f, "{value}"),
            LiteralValue::String(value) => write!(f, "\"{value}\""),
            LiteralValue::Bool(true) => write!(f, "rožni"),
            LiteralValue::Bool(false) => write!(f, "zhasni"),
            LiteralValue::Null => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: String,
    pub value: Expression,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: Token,
    pub operand: Expression,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Expression,
    pub operator: Token,
    pub right: Expression,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Expression,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub struct Postfix {
    pub name: String,
    pub operator: Token,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub struct Get {
    pub object: Expression,
    pub name: String,
    pub location: SrcSpan
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub params: Vec<String>,
    pub body: Block,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for FunctionLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Fun)?;
        let params = parse_params(parser)?;
        let body = Block::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self {
            params,
            body,
            location: SrcSpan { start, end }
        })
    }
}

fn binary(left: Expression, operator: Token, right: Expression) -> Expression {
    let location = SrcSpan {
        start: left.location().start,
        end: right.location().end
    };

    Expression::Binary(Box::new(Binary { left, operator, right, location }))
}

// `name = rhs` and the compound forms; `x += 1` desugars to `x = x + 1`
fn parse_assignment<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>,
    target: Expression,
    operator: Token
) -> Result<Expression, ParseError> {
    let (name, target_location) = match &target {
        Expression::Variable(variable) => (variable.name.clone(), variable.location),
        other => return parse_error(
            ParseErrorType::InvalidAssignmentTarget,
            other.location()
        ),
    };

    let value = Expression::parse(parser, Some(Precedence::Assign))?;
    let location = SrcSpan {
        start: target_location.start,
        end: value.location().end
    };

    let value = match operator.compound_assign_base() {
        Some(base) => Expression::Binary(Box::new(Binary {
            left: Expression::Variable(Variable {
                name: name.clone(),
                location: target_location
            }),
            operator: base,
            right: value,
            location,
        })),
        None => value
    };

    Ok(Expression::Assign(Box::new(Assign { name, value, location })))
}

fn parse_unary<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>
) -> Result<Expression, ParseError> {
    match &parser.current_token {
        Some((start, Token::Bang, _)) | Some((start, Token::Minus, _)) => {
            let start = *start;
            let (_, operator, _) = parser.next_token().expect("checked current token");

            let operand = parse_unary(parser)?;
            let location = SrcSpan { start, end: operand.location().end };

            Ok(Expression::Unary(Box::new(Unary { operator, operand, location })))
        },
        _ => parse_postfix(parser)
    }
}

// postfix chain: calls, member access and `++`/`--` are left-to-right
// chainable, e.g. `a.b(c).d++`
fn parse_postfix<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>
) -> Result<Expression, ParseError> {
    let mut expression = parse_primary(parser)?;

    loop {
        if parser.accept(&Token::LParen).is_some() {
            let mut arguments = vec![];

            if !parser.current_is(&Token::RParen) {
                loop {
                    arguments.push(Expression::parse(parser, None)?);

                    if parser.accept(&Token::Comma).is_none() {
                        break;
                    }
                }
            }

            let (_, end) = parser.expect_one(Token::RParen)?;
            let location = SrcSpan { start: expression.location().start, end };

            expression = Expression::Call(Box::new(Call {
                callee: expression,
                arguments,
                location
            }));
        } else if parser.accept(&Token::Dot).is_some() {
            let (_, name, end) = parser.expect_ident()?;
            let location = SrcSpan { start: expression.location().start, end };

            expression = Expression::Get(Box::new(Get {
                object: expression,
                name,
                location
            }));
        } else if parser.current_is(&Token::PlusPlus) || parser.current_is(&Token::MinusMinus) {
            let (_, operator, end) = parser.next_token().expect("checked current token");

            let name = match &expression {
                Expression::Variable(variable) => variable.name.clone(),
                other => return parse_error(
                    ParseErrorType::InvalidPostfixTarget,
                    other.location()
                ),
            };

            let location = SrcSpan { start: expression.location().start, end };

            expression = Expression::Postfix(Postfix { name, operator, location });
        } else {
            break;
        }
    }

    Ok(expression)
}

fn parse_primary<T: Iterator<Item = LexResult>>(
    parser: &mut Parser<T>
) -> Result<Expression, ParseError> {
    match parser.current_token.take() {
        Some((start, Token::Number(value), end)) => {
            parser.step();

            Ok(Expression::Literal(Literal {
                value: LiteralValue::Number(value),
                location: SrcSpan { start, end }
            }))
        },
        Some((start, Token::String(value), end)) => {
            parser.step();

            Ok(Expression::Literal(Literal {
                value: LiteralValue::String(value),
                location: SrcSpan { start, end }
            }))
        },
        Some((start, Token::True, end)) => {
            parser.step();

            Ok(Expression::Literal(Literal {
                value: LiteralValue::Bool(true),
                location: SrcSpan { start, end }
            }))
        },
        Some((start, Token::False, end)) => {
            parser.step();

            Ok(Expression::Literal(Literal {
                value: LiteralValue::Bool(false),
                location: SrcSpan { start, end }
            }))
        },
        Some((start, Token::Null, end)) => {
            parser.step();

            Ok(Expression::Literal(Literal {
                value: LiteralValue::Null,
                location: SrcSpan { start, end }
            }))
        },
        Some((start, Token::Ident(name), end)) => {
            parser.step();

            Ok(Expression::Variable(Variable {
                name,
                location: SrcSpan { start, end }
            }))
        },
        Some((_, Token::LParen, _)) => {
            parser.step();

            let expression = Expression::parse(parser, None)?;
            parser.expect_one(Token::RParen)?;

            Ok(expression)
        },
        // `[a, b, c]` desugars into a call to the variadic `__arr` builtin
        Some((start, Token::LBracket, bracket_end)) => {
            parser.step();

            let mut arguments = vec![];

            if !parser.current_is(&Token::RBracket) {
                loop {
                    arguments.push(Expression::parse(parser, None)?);

                    if parser.accept(&Token::Comma).is_none() {
                        break;
                    }
                }
            }

            let (_, end) = parser.expect_one(Token::RBracket)?;

            Ok(Expression::Call(Box::new(Call {
                callee: Expression::Variable(Variable {
                    name: "__arr".into(),
                    location: SrcSpan { start, end: bracket_end }
                }),
                arguments,
                location: SrcSpan { start, end }
            })))
        },
        Some((start, Token::Fun, end)) => {
            parser.current_token = Some((start, Token::Fun, end));

            let literal = FunctionLiteral::parse(parser, None)?;

            Ok(Expression::Function(Box::new(literal)))
        },
        Some(t) => {
            let (start, _, end) = t.clone();
            parser.current_token = Some(t);

            parse_error(
                ParseErrorType::ExpectedExpression,
                SrcSpan { start, end }
            )
        },
        None => parse_error(
            ParseErrorType::UnexpectedEof,
            SrcSpan { start: 0, end: 0 }
        )
    }
}
