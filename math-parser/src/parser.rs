use crate::bindings::Bindings;
use crate::builtins;
use crate::compiler::Compiler;
use crate::error::Result;
use crate::operator::{Operator, OperatorRegistry};
use crate::rpn_converter::{RPNExpr, RpnConverter};
use crate::rpn_evaluator::RpnEvaluator;
use crate::tokenizer::Tokenizer;

/// An expression engine: the operator registry, constants and variables of
/// one session.
///
/// Variables written by `=` persist across calls on the same instance.
///
/// ```
/// use math_parser::MathParser;
///
/// let mut parser = MathParser::new();
/// assert_eq!(parser.evaluate("2 + 2 * 2").unwrap(), 6.0);
///
/// parser.evaluate("x = 5").unwrap();
/// assert_eq!(parser.evaluate("x + 1").unwrap(), 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct MathParser {
    registry: OperatorRegistry,
    bindings: Bindings,
}

impl Default for MathParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MathParser {
    /// Creates an engine with the built-in operators, functions and constants.
    pub fn new() -> Self {
        let mut parser = Self::empty();
        builtins::register_operators(&mut parser.registry);
        builtins::register_constants(&mut parser.bindings);
        parser
    }

    /// Creates an engine that knows no operators or constants.
    pub fn empty() -> Self {
        Self {
            registry: OperatorRegistry::new(),
            bindings: Bindings::new(),
        }
    }

    pub fn register_operator(&mut self, symbol: &str, op: Operator) {
        self.registry.register(symbol, op);
    }

    pub fn register_constant(&mut self, symbol: &str, value: f64) {
        self.bindings.define_constant(symbol, value);
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Converts an infix expression to its raw postfix form.
    pub fn to_rpn(&self, expression: &str) -> Result<RPNExpr> {
        let tokens = Tokenizer::new(&self.registry).tokenize(expression)?;
        RpnConverter::convert(&tokens, &self.registry, &self.bindings)
    }

    /// Converts and constant-folds an expression into a reusable program.
    pub fn compile(&mut self, expression: &str) -> Result<RPNExpr> {
        let rpn = self.to_rpn(expression)?;
        Compiler::new().compile(&rpn, &self.registry, &mut self.bindings)
    }

    /// Parses, folds and runs an expression.
    pub fn evaluate(&mut self, expression: &str) -> Result<f64> {
        let program = self.compile(expression)?;
        self.evaluate_rpn(&program)
    }

    /// Runs a program against the current variables.
    pub fn evaluate_rpn(&mut self, program: &RPNExpr) -> Result<f64> {
        RpnEvaluator::evaluate(program, &self.registry, &mut self.bindings)
    }

    pub fn variable(&self, name: &str) -> Result<f64> {
        self.bindings.variable(name)
    }
}
