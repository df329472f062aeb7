use std::collections::HashMap;

use crate::error::{Result, RuntimeError, SemanticError};
use crate::tokenizer::Token;

/// Named values visible to a running program: fixed constants and the
/// variables written by assignment.
#[derive(Debug, Default, Clone)]
pub struct Bindings {
    constants: HashMap<String, f64>,
    variables: HashMap<String, f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self {
            constants: HashMap::new(),
            variables: HashMap::new(),
        }
    }

    pub(crate) fn define_constant(&mut self, name: &str, value: f64) {
        self.constants.insert(name.to_string(), value);
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    pub fn constant(&self, name: &str) -> Result<f64> {
        self.constants
            .get(name)
            .copied()
            .ok_or_else(|| SemanticError::UnknownConstant(name.to_string()).into())
    }

    pub fn variable(&self, name: &str) -> Result<f64> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()).into())
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, f64)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Creates or overwrites a variable.
    pub fn assign(&mut self, name: &str, value: f64) {
        log::trace!("{} = {}", name, value);
        self.variables.insert(name.to_string(), value);
    }

    /// Resolves an operand token to its numeric value.
    pub fn value_of(&self, token: &Token) -> Result<f64> {
        match token {
            Token::Number(n) => Ok(*n),
            Token::Constant(name) => self.constant(name),
            Token::Variable(name) => self.variable(name),
            Token::Operator(symbol) => Err(RuntimeError::NotANumber(symbol.clone()).into()),
        }
    }
}
