use std::f64::consts;

use crate::bindings::Bindings;
use crate::error::{RuntimeError, SemanticError};
use crate::operator::{Operator, OperatorKind, OperatorRegistry};
use crate::tokenizer::Token;

/// Registry symbol of prefix negation; the converter rewrites `-` to it in operand position.
pub const UNARY_MINUS: &str = "~";

pub fn register_operators(registry: &mut OperatorRegistry) {
    registry.register("(", Operator::bracket());
    registry.register(")", Operator::bracket());
    registry.register(",", Operator::comma());

    registry.register("=", assignment());

    registry.register("+", Operator::binary(1, false, |a, b| a + b));
    registry.register("-", Operator::binary(1, false, |a, b| a - b));
    registry.register("*", Operator::binary(2, false, |a, b| a * b));
    registry.register(
        "/",
        Operator::numeric(OperatorKind::Binary, 2, false, 2, |args| {
            if args[1] == 0.0 {
                return Err(RuntimeError::DivisionByZero.into());
            }
            Ok(args[0] / args[1])
        }),
    );
    registry.register("^", Operator::binary(4, true, f64::powf));
    registry.register(UNARY_MINUS, Operator::unary(3, |a| -a));

    registry.register("sqrt", Operator::function(1, |args| args[0].sqrt()));
    registry.register("sin", Operator::function(1, |args| args[0].sin()));
    registry.register("cos", Operator::function(1, |args| args[0].cos()));
    registry.register("tan", Operator::function(1, |args| args[0].tan()));
}

pub fn register_constants(bindings: &mut Bindings) {
    bindings.define_constant("pi", consts::PI);
    bindings.define_constant("PI", consts::PI);
    bindings.define_constant("e", consts::E);
    bindings.define_constant("E", consts::E);
}

/// `name = value`: writes the variable and yields the assigned value.
fn assignment() -> Operator {
    Operator::new(OperatorKind::Binary, 0, false, 2, |args, bindings| {
        let Token::Variable(name) = &args[0] else {
            return Err(SemanticError::AssignmentTarget.into());
        };
        let value = bindings.value_of(&args[1])?;
        bindings.assign(name, value);
        Ok(Token::Number(value))
    })
}
