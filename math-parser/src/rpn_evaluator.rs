use crate::bindings::Bindings;
use crate::error::{Result, RuntimeError};
use crate::operator::{OperatorKind, OperatorRegistry};
use crate::rpn_converter::RPNExpr;
use crate::tokenizer::Token;

pub struct RpnEvaluator {}

impl RpnEvaluator {
    /// Runs a postfix program on an evaluation stack.
    ///
    /// Constants are resolved as they are pushed. Variables stay symbolic until
    /// an operator consumes them, which lets assignment see its target name.
    pub fn evaluate(
        tokens: &RPNExpr,
        registry: &OperatorRegistry,
        bindings: &mut Bindings,
    ) -> Result<f64> {
        let mut eval_stack: Vec<Token> = vec![];

        for token in tokens.iter() {
            match token {
                Token::Operator(symbol) => {
                    let op = registry.lookup(symbol)?;
                    if op.kind == OperatorKind::Comma {
                        continue;
                    }

                    if eval_stack.len() < op.operand_count {
                        return Err(RuntimeError::StackUnderflow {
                            symbol: symbol.clone(),
                            expected: op.operand_count,
                            found: eval_stack.len(),
                        }
                        .into());
                    }

                    let operands = eval_stack.split_off(eval_stack.len() - op.operand_count);
                    let result = op.apply(&operands, bindings)?;
                    log::trace!("{} {:?} -> {}", symbol, operands, result);
                    eval_stack.push(result);
                }
                Token::Constant(name) => {
                    eval_stack.push(Token::Number(bindings.constant(name)?));
                }
                Token::Number(_) | Token::Variable(_) => {
                    eval_stack.push(token.clone());
                }
            }
        }

        if eval_stack.len() != 1 {
            return Err(RuntimeError::MalformedProgram(eval_stack.len()).into());
        }

        bindings.value_of(&eval_stack[0])
    }
}
