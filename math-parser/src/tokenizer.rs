use std::iter;

use crate::error::SyntaxError;
use crate::operator::OperatorRegistry;

/// A single entry of a postfix program.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Number(f64),
    Variable(String),
    Constant(String),
    /// Refers to a registry entry by symbol; behavior is looked up when the token is applied.
    Operator(String),
}

impl Token {
    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(name) | Token::Constant(name) | Token::Operator(name) => {
                write!(f, "{}", name)
            }
        }
    }
}

/// Raw lexical unit of an infix expression, before any operator classification.
#[derive(Debug, PartialEq, Clone)]
pub enum Lexeme {
    Number(f64),
    Identifier(String),
    Symbol(String),
    LParen,
    RParen,
}

#[derive(Debug, PartialEq, Clone)]
pub struct TokenizedInput(pub Vec<Lexeme>);

impl std::ops::Deref for TokenizedInput {
    type Target = Vec<Lexeme>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for TokenizedInput {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Splits an expression into lexemes. Single-character symbols are accepted
/// only when the registry knows them.
pub struct Tokenizer<'a> {
    registry: &'a OperatorRegistry,
}

impl<'a> Tokenizer<'a> {
    pub fn new(registry: &'a OperatorRegistry) -> Self {
        Self { registry }
    }

    pub fn tokenize(&self, input: &str) -> Result<TokenizedInput, SyntaxError> {
        use Lexeme::*;

        let mut lexemes = Vec::new();
        let mut chars = input.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                c if c.is_whitespace() => {}
                c if c.is_ascii_digit() || c == '.' => {
                    let literal: String = iter::once(c)
                        .chain(iter::from_fn(|| {
                            chars
                                .by_ref()
                                .next_if(|(_, c)| c.is_ascii_digit() || *c == '.')
                                .map(|(_, c)| c)
                        }))
                        .collect();
                    let num: f64 = literal
                        .parse()
                        .map_err(|_| SyntaxError::InvalidNumber(literal.clone()))?;
                    lexemes.push(Number(num));
                }
                c if c.is_ascii_alphabetic() => {
                    let name: String = iter::once(c)
                        .chain(iter::from_fn(|| {
                            chars
                                .by_ref()
                                .next_if(|(_, c)| c.is_ascii_alphabetic())
                                .map(|(_, c)| c)
                        }))
                        .collect();
                    lexemes.push(Identifier(name));
                }
                '(' => lexemes.push(LParen),
                ')' => lexemes.push(RParen),
                c => {
                    let symbol = c.to_string();
                    if !self.registry.is_operator(&symbol) {
                        return Err(SyntaxError::UnexpectedCharacter { ch: c, offset });
                    }
                    lexemes.push(Symbol(symbol));
                }
            }
        }

        log::trace!("tokenized {:?} into {} lexemes", input, lexemes.len());

        Ok(TokenizedInput(lexemes))
    }
}
