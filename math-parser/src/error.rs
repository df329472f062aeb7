use thiserror::Error;

/// Malformed input detected while scanning or converting to postfix form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },
    #[error("Failed to parse number: {0}")]
    InvalidNumber(String),
    #[error("Mismatched closing parenthesis")]
    MismatchedClosingParen,
    #[error("Mismatched opening parenthesis")]
    MismatchedOpeningParen,
    #[error("Not enough operands for '{0}'")]
    NotEnoughOperands(String),
    #[error("Unexpected operand '{0}'")]
    UnexpectedOperand(String),
    #[error("Unexpected operator '{0}'")]
    UnexpectedOperator(String),
    #[error("Too many operands")]
    TooManyOperands,
    #[error("Empty expression")]
    EmptyExpression,
}

/// A well-formed program that refers to something the engine cannot honor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
    #[error("Unknown constant: {0}")]
    UnknownConstant(String),
    #[error("Operator '{0}' cannot be evaluated")]
    NotEvaluable(String),
    #[error("Left operand must be a variable")]
    AssignmentTarget,
}

/// Failures that only show up while running a program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),
    #[error("Operator '{symbol}' expects {expected} operands, found {found}")]
    StackUnderflow {
        symbol: String,
        expected: usize,
        found: usize,
    },
    #[error("Malformed program: {0} values left on the stack")]
    MalformedProgram(usize),
    #[error("Cannot convert operator '{0}' to a number")]
    NotANumber(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Semantic,
    Runtime,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("Semantic error: {0}")]
    Semantic(#[from] SemanticError),
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::Semantic(_) => ErrorKind::Semantic,
            Error::Runtime(_) => ErrorKind::Runtime,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
