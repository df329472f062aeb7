//! Infix expression engine: converts arithmetic text to Reverse Polish
//! Notation with an extended shunting-yard pass, folds constant
//! subexpressions, and runs the result on a stack machine.
//!
//! Operators, functions and constants are user-extensible, and variables
//! assigned with `=` persist for the lifetime of a [`MathParser`].

pub mod bindings;
pub mod builtins;
pub mod compiler;
pub mod error;
pub mod ffi;
pub mod operator;
pub mod parser;
pub mod rpn_converter;
pub mod rpn_evaluator;
pub mod tokenizer;

pub use error::{Error, ErrorKind, RuntimeError, SemanticError, SyntaxError};
pub use operator::{Operator, OperatorKind};
pub use parser::MathParser;
pub use rpn_converter::RPNExpr;
pub use tokenizer::Token;
