use std::rc::Rc;

use crate::{
    environment::prelude::{EnvId, Environments, Function, Value},
    lexer::prelude::Token,
    parser::prelude::{
        parse_module, Expression, ImportStatement, LiteralValue, ParseError,
        Program, Statement, TryStatement
    },
    utils::prelude::{ConsoleOutputEmitterIO, OutputEmitterIO, SrcSpan}
};

use super::error::{runtime_error, RuntimeError, RuntimeErrorType};
use super::{builtins, stdlib};

/// Source provider for `vokno`. The CLI passes a filesystem loader,
/// embedders can pass anything.
pub trait ModuleLoader {
    fn load(&self, path: &str) -> Result<String, String>;
}

/// Turns imported source text into a runnable program. Injected at
/// construction so the interpreter itself stays parser-agnostic.
pub type CompileFn = Box<dyn Fn(&str) -> Result<Program, ParseError>>;

pub fn compile_capability() -> CompileFn {
    Box::new(|src| parse_module(src).map(|parsed| parsed.module.program))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    pub fs_enabled: bool,
}

pub struct Config {
    pub loader: Option<Box<dyn ModuleLoader>>,
    pub compile: CompileFn,
    pub capabilities: Capabilities,
    pub output: Rc<dyn OutputEmitterIO>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loader: None,
            compile: compile_capability(),
            capabilities: Capabilities::default(),
            output: Rc::new(ConsoleOutputEmitterIO),
        }
    }
}

/// How a statement finished. Loops absorb `Break`/`Continue`, calls
/// absorb `Return`, everything else passes the signal upward.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
    Break,
    Continue,
}

pub struct Interpreter {
    pub envs: Environments,
    loader: Option<Box<dyn ModuleLoader>>,
    compile: CompileFn,
    capabilities: Capabilities,
    output: Rc<dyn OutputEmitterIO>,
}

impl Interpreter {
    pub fn new(config: Config) -> Self {
        let mut interpreter = Self {
            envs: Environments::new(),
            loader: config.loader,
            compile: config.compile,
            capabilities: config.capabilities,
            output: config.output,
        };

        builtins::install(&mut interpreter);
        stdlib::install(&mut interpreter);

        interpreter
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn emit_line(&self, line: String) {
        self.output.emit_line(line);
    }

    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let global = self.envs.global();

        for statement in &program.statements {
            match self.exec(statement, global)? {
                Flow::Normal => {},
                // a top level `vrat` just stops the program
                Flow::Return(_) => break,
                Flow::Break => {
                    return runtime_error(RuntimeErrorType::StrayBreak, statement.location())
                },
                Flow::Continue => {
                    return runtime_error(RuntimeErrorType::StrayContinue, statement.location())
                },
            }
        }

        Ok(())
    }

    pub fn exec(&mut self, statement: &Statement, env: EnvId) -> Result<Flow, RuntimeError> {
        match statement {
            Statement::Expression(statement) => {
                self.eval(&statement.expression, env)?;

                Ok(Flow::Normal)
            },
            Statement::Let(statement) => {
                let value = match &statement.value {
                    Some(value) => self.eval(value, env)?,
                    None => Value::Null
                };

                self.envs.define(env, statement.name.clone(), value);

                Ok(Flow::Normal)
            },
            Statement::Block(block) => {
                let block_env = self.envs.push(env);

                self.exec_block(&block.statements, block_env)
            },
            Statement::If(statement) => {
                if self.eval(&statement.condition, env)?.is_truthy() {
                    self.exec(&statement.consequence, env)
                } else if let Some(alternative) = &statement.alternative {
                    self.exec(alternative, env)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Statement::While(statement) => {
                while self.eval(&statement.condition, env)?.is_truthy() {
                    match self.exec(&statement.body, env)? {
                        Flow::Normal | Flow::Continue => {},
                        Flow::Break => break,
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }

                Ok(Flow::Normal)
            },
            Statement::For(statement) => {
                let loop_env = self.envs.push(env);

                if let Some(init) = &statement.init {
                    match self.exec(init, loop_env)? {
                        Flow::Normal => {},
                        flow => return Ok(flow),
                    }
                }

                loop {
                    let proceed = match &statement.condition {
                        Some(condition) => self.eval(condition, loop_env)?.is_truthy(),
                        None => true
                    };

                    if !proceed {
                        break;
                    }

                    match self.exec(&statement.body, loop_env)? {
                        // the step still runs after `přeskoč`
                        Flow::Normal | Flow::Continue => {},
                        Flow::Break => break,
                        flow @ Flow::Return(_) => return Ok(flow),
                    }

                    if let Some(step) = &statement.step {
                        self.eval(step, loop_env)?;
                    }
                }

                Ok(Flow::Normal)
            },
            Statement::Function(declaration) => {
                let function = Value::Function(Rc::new(Function {
                    name: declaration.name.clone(),
                    params: declaration.params.clone(),
                    body: Rc::new(declaration.body.statements.clone()),
                    env,
                }));

                self.envs.define(env, declaration.name.clone(), function);

                Ok(Flow::Normal)
            },
            Statement::Return(statement) => {
                let value = match &statement.value {
                    Some(value) => self.eval(value, env)?,
                    None => Value::Null
                };

                Ok(Flow::Return(value))
            },
            Statement::Import(statement) => self.exec_import(statement, env),
            Statement::Try(statement) => self.exec_try(statement, env),
            Statement::Break { .. } => Ok(Flow::Break),
            Statement::Continue { .. } => Ok(Flow::Continue),
        }
    }

    pub fn exec_block(&mut self, statements: &[Statement], env: EnvId) -> Result<Flow, RuntimeError> {
        for statement in statements {
            match self.exec(statement, env)? {
                Flow::Normal => {},
                flow => return Ok(flow),
            }
        }

        Ok(Flow::Normal)
    }

    fn exec_try(&mut self, statement: &TryStatement, env: EnvId) -> Result<Flow, RuntimeError> {
        let body_env = self.envs.push(env);
        let result = self.exec_block(&statement.body.statements, body_env);

        // control flow signals are not errors and skip the handler
        let result = match (result, &statement.handler) {
            (Err(error), Some(handler)) => {
                let catch_env = self.envs.push(env);

                if let Some(binding) = &statement.binding {
                    self.envs.define(catch_env, binding.clone(), error.error.to_value());
                }

                self.exec_block(&handler.statements, catch_env)
            },
            (result, _) => result,
        };

        if let Some(finalizer) = &statement.finalizer {
            let final_env = self.envs.push(env);

            match self.exec_block(&finalizer.statements, final_env)? {
                Flow::Normal => {},
                // a signal out of `potom` wins over the body's outcome
                flow => return Ok(flow),
            }
        }

        result
    }

    fn exec_import(&mut self, statement: &ImportStatement, env: EnvId) -> Result<Flow, RuntimeError> {
        let location = statement.location;

        let path = match self.eval(&statement.path, env)? {
            Value::String(path) => path,
            _ => return runtime_error(
                RuntimeErrorType::ImportPathNotString,
                statement.path.location()
            ),
        };

        let loader = match &self.loader {
            Some(loader) => loader,
            None => return runtime_error(RuntimeErrorType::ImportUnavailable, location),
        };

        let src = loader.load(&path).map_err(|message| RuntimeError {
            error: RuntimeErrorType::ImportFailed { message },
            location,
        })?;

        let program = (self.compile)(&src).map_err(|error| RuntimeError {
            error: RuntimeErrorType::ImportFailed { message: error.details().0 },
            location,
        })?;

        // imports run straight in the global scope and merge into it,
        // re-importing simply runs the module again
        let global = self.envs.global();

        self.exec_block(&program.statements, global)
    }

    pub fn eval(&mut self, expression: &Expression, env: EnvId) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Literal(literal) => Ok(match &literal.value {
                LiteralValue::Number(value) => Value::Number(*value),
                LiteralValue::String(value) => Value::String(value.clone()),
                LiteralValue::Bool(value) => Value::Bool(*value),
                LiteralValue::Null => Value::Null,
            }),
            Expression::Variable(variable) => {
                match self.envs.get(env, &variable.name) {
                    Some(value) => Ok(value),
                    None => runtime_error(
                        RuntimeErrorType::UnknownVariable { name: variable.name.clone() },
                        variable.location
                    )
                }
            },
            Expression::Assign(assign) => {
                let value = self.eval(&assign.value, env)?;

                if !self.envs.assign(env, &assign.name, value.clone()) {
                    return runtime_error(
                        RuntimeErrorType::UnknownVariable { name: assign.name.clone() },
                        assign.location
                    );
                }

                Ok(value)
            },
            Expression::Unary(unary) => {
                let operand = self.eval(&unary.operand, env)?;

                Ok(match &unary.operator {
                    Token::Bang => Value::Bool(!operand.is_truthy()),
                    _ => Value::Number(-operand.as_number()),
                })
            },
            Expression::Binary(binary) => {
                self.eval_binary(&binary.operator, &binary.left, &binary.right, env)
            },
            Expression::Call(call) => {
                let callee = self.eval(&call.callee, env)?;

                let mut arguments = Vec::with_capacity(call.arguments.len());
                for argument in &call.arguments {
                    arguments.push(self.eval(argument, env)?);
                }

                self.call_value(callee, arguments, call.location)
            },
            Expression::Postfix(postfix) => {
                let current = match self.envs.get(env, &postfix.name) {
                    Some(value) => value,
                    None => return runtime_error(
                        RuntimeErrorType::UnknownVariable { name: postfix.name.clone() },
                        postfix.location
                    )
                };

                let stepped = match &postfix.operator {
                    Token::PlusPlus => current.as_number() + 1.0,
                    _ => current.as_number() - 1.0,
                };

                self.envs.assign(env, &postfix.name, Value::Number(stepped));

                // the expression yields the value before the step,
                // uncoerced
                Ok(current)
            },
            Expression::Get(get) => {
                let object = self.eval(&get.object, env)?;

                match object {
                    Value::Null => runtime_error(
                        RuntimeErrorType::NullMember { name: get.name.clone() },
                        get.location
                    ),
                    Value::Object(map) => {
                        Ok(map.borrow().get(&get.name).cloned().unwrap_or(Value::Null))
                    },
                    _ => Ok(Value::Null),
                }
            },
            Expression::Function(literal) => {
                Ok(Value::Function(Rc::new(Function {
                    name: "<anon>".into(),
                    params: literal.params.clone(),
                    body: Rc::new(literal.body.statements.clone()),
                    env,
                })))
            },
        }
    }

    fn eval_binary(
        &mut self,
        operator: &Token,
        left: &Expression,
        right: &Expression,
        env: EnvId
    ) -> Result<Value, RuntimeError> {
        // the short-circuit operators evaluate the right side lazily
        match operator {
            Token::AndAnd => {
                let left = self.eval(left, env)?;

                return match left.is_truthy() {
                    true => self.eval(right, env),
                    false => Ok(left)
                };
            },
            Token::OrOr => {
                let left = self.eval(left, env)?;

                return match left.is_truthy() {
                    true => Ok(left),
                    false => self.eval(right, env)
                };
            },
            Token::QuestionQuestion => {
                let left = self.eval(left, env)?;

                return match left.is_null() {
                    true => self.eval(right, env),
                    false => Ok(left)
                };
            },
            _ => {}
        }

        let left = self.eval(left, env)?;
        let right = self.eval(right, env)?;

        let value = match operator {
            // `+` concatenates as soon as either side is a string
            Token::Plus => match (&left, &right) {
                (Value::String(_), _) | (_, Value::String(_)) => {
                    Value::String(format!("{left}{right}"))
                },
                _ => Value::Number(left.as_number() + right.as_number()),
            },
            Token::Minus => Value::Number(left.as_number() - right.as_number()),
            Token::Star => Value::Number(left.as_number() * right.as_number()),
            Token::Slash => Value::Number(left.as_number() / right.as_number()),
            Token::Percent => Value::Number(left.as_number() % right.as_number()),
            Token::StarStar => Value::Number(left.as_number().powf(right.as_number())),
            Token::EqEq => Value::Bool(left == right),
            Token::BangEq => Value::Bool(left != right),
            Token::Lt => Value::Bool(left.as_number() < right.as_number()),
            Token::LtEq => Value::Bool(left.as_number() <= right.as_number()),
            Token::Gt => Value::Bool(left.as_number() > right.as_number()),
            Token::GtEq => Value::Bool(left.as_number() >= right.as_number()),
            _ => unreachable!("the parser only produces binary operators"),
        };

        Ok(value)
    }

    pub fn call_value(
        &mut self,
        callee: Value,
        arguments: Vec<Value>,
        location: SrcSpan
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Function(function) => {
                if function.params.len() != arguments.len() {
                    return runtime_error(
                        RuntimeErrorType::ArityMismatch {
                            expected: function.params.len(),
                            got: arguments.len()
                        },
                        location
                    );
                }

                self.call_function(&function, arguments, location)
            },
            Value::Builtin(builtin) => {
                if let Some(arity) = builtin.arity {
                    if arity != arguments.len() {
                        return runtime_error(
                            RuntimeErrorType::ArityMismatch {
                                expected: arity,
                                got: arguments.len()
                            },
                            location
                        );
                    }
                }

                (builtin.func)(self, arguments)
                    .map_err(|error| RuntimeError { error, location })
            },
            _ => runtime_error(RuntimeErrorType::NotCallable, location),
        }
    }

    /// Call without arity checking, used for stdlib callbacks which
    /// always receive the full `(item, index, collection)` triple.
    /// Surplus arguments are dropped, missing ones become null.
    pub fn call_lenient(
        &mut self,
        callee: Value,
        mut arguments: Vec<Value>,
        location: SrcSpan
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Function(function) => {
                arguments.truncate(function.params.len());

                self.call_function(&function, arguments, location)
            },
            other => self.call_value(other, arguments, location),
        }
    }

    fn call_function(
        &mut self,
        function: &Function,
        arguments: Vec<Value>,
        location: SrcSpan
    ) -> Result<Value, RuntimeError> {
        let env = self.envs.push(function.env);
        let mut arguments = arguments.into_iter();

        for param in &function.params {
            let value = arguments.next().unwrap_or(Value::Null);
            self.envs.define(env, param.clone(), value);
        }

        let body = function.body.clone();

        match self.exec_block(&body, env)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
            Flow::Break => runtime_error(RuntimeErrorType::StrayBreak, location),
            Flow::Continue => runtime_error(RuntimeErrorType::StrayContinue, location),
        }
    }
}
