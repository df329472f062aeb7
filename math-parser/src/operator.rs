use std::collections::HashMap;
use std::sync::Arc;

use crate::bindings::Bindings;
use crate::error::{Result, SemanticError};
use crate::tokenizer::Token;

/// Callback applied to an operator's operands, given in left-to-right order.
pub type Evaluate = Arc<dyn Fn(&[Token], &mut Bindings) -> Result<Token> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Unary,
    Binary,
    Function,
    /// Drives the converter's stack discipline only.
    Bracket,
    /// Separates function arguments; a no-op at run time.
    Comma,
}

/// Precedence of the built-in functions.
pub const FUNCTION_PRECEDENCE: i32 = 5;

#[derive(Clone)]
pub struct Operator {
    pub kind: OperatorKind,
    pub precedence: i32,
    pub right_associative: bool,
    /// Set for operators that follow their operand, e.g. a factorial suffix.
    pub postfix: bool,
    pub operand_count: usize,
    pub evaluate: Option<Evaluate>,
    /// Stamped by [`OperatorRegistry::register`].
    pub symbol: String,
}

impl std::fmt::Debug for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Operator")
            .field("symbol", &self.symbol)
            .field("kind", &self.kind)
            .field("precedence", &self.precedence)
            .field("right_associative", &self.right_associative)
            .field("postfix", &self.postfix)
            .field("operand_count", &self.operand_count)
            .finish_non_exhaustive()
    }
}

impl Operator {
    /// Builds an operator from a raw token-level callback.
    ///
    /// The callback receives the unresolved operand tokens, so it can inspect
    /// variable names (this is how assignment is written). Use
    /// [`Bindings::value_of`] to turn a token into a number.
    pub fn new<F>(
        kind: OperatorKind,
        precedence: i32,
        right_associative: bool,
        operand_count: usize,
        evaluate: F,
    ) -> Self
    where
        F: Fn(&[Token], &mut Bindings) -> Result<Token> + Send + Sync + 'static,
    {
        Self {
            kind,
            precedence,
            right_associative,
            postfix: false,
            operand_count,
            evaluate: Some(Arc::new(evaluate)),
            symbol: String::new(),
        }
    }

    /// Builds an operator whose operands are resolved to numbers before `f` runs.
    pub fn numeric<F>(
        kind: OperatorKind,
        precedence: i32,
        right_associative: bool,
        operand_count: usize,
        f: F,
    ) -> Self
    where
        F: Fn(&[f64]) -> Result<f64> + Send + Sync + 'static,
    {
        Self::new(
            kind,
            precedence,
            right_associative,
            operand_count,
            move |args, bindings| {
                let values = args
                    .iter()
                    .map(|arg| bindings.value_of(arg))
                    .collect::<Result<Vec<f64>>>()?;
                f(&values).map(Token::Number)
            },
        )
    }

    pub fn binary<F>(precedence: i32, right_associative: bool, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::numeric(
            OperatorKind::Binary,
            precedence,
            right_associative,
            2,
            move |args| Ok(f(args[0], args[1])),
        )
    }

    /// Prefix operator; right-associative so that repeated application chains.
    pub fn unary<F>(precedence: i32, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::numeric(OperatorKind::Unary, precedence, true, 1, move |args| {
            Ok(f(args[0]))
        })
    }

    /// Suffix operator such as `!`.
    pub fn postfix<F>(precedence: i32, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        let mut op = Self::numeric(OperatorKind::Unary, precedence, false, 1, move |args| {
            Ok(f(args[0]))
        });
        op.postfix = true;
        op
    }

    pub fn function<F>(operand_count: usize, f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self::numeric(
            OperatorKind::Function,
            FUNCTION_PRECEDENCE,
            false,
            operand_count,
            move |args| Ok(f(args)),
        )
    }

    pub fn bracket() -> Self {
        Self::marker(OperatorKind::Bracket)
    }

    pub fn comma() -> Self {
        Self::marker(OperatorKind::Comma)
    }

    fn marker(kind: OperatorKind) -> Self {
        Self {
            kind,
            precedence: 0,
            right_associative: false,
            postfix: false,
            operand_count: 0,
            evaluate: None,
            symbol: String::new(),
        }
    }

    /// Applies the operator to `args`, which must hold exactly `operand_count` tokens.
    pub fn apply(&self, args: &[Token], bindings: &mut Bindings) -> Result<Token> {
        match &self.evaluate {
            Some(evaluate) => evaluate(args, bindings),
            None => Err(SemanticError::NotEvaluable(self.symbol.clone()).into()),
        }
    }

    /// Whether the operator stops the converter from popping past it.
    pub(crate) fn is_barrier(&self) -> bool {
        matches!(
            self.kind,
            OperatorKind::Bracket | OperatorKind::Comma | OperatorKind::Function
        )
    }
}

/// Symbol-to-descriptor table consulted by the converter, evaluator and compiler.
#[derive(Debug, Default, Clone)]
pub struct OperatorRegistry {
    operators: HashMap<String, Operator>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self {
            operators: HashMap::new(),
        }
    }

    /// Stores `op` under `symbol`. An existing entry is replaced.
    pub fn register(&mut self, symbol: &str, mut op: Operator) {
        op.symbol = symbol.to_string();
        if self.operators.insert(symbol.to_string(), op).is_some() {
            log::debug!("operator '{}' overridden", symbol);
        }
    }

    pub fn lookup(&self, symbol: &str) -> Result<&Operator> {
        self.operators
            .get(symbol)
            .ok_or_else(|| SemanticError::UnknownOperator(symbol.to_string()).into())
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.operators.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
