use crate::bindings::Bindings;
use crate::error::Result;
use crate::operator::{OperatorKind, OperatorRegistry};
use crate::rpn_converter::RPNExpr;
use crate::tokenizer::Token;

/// Constant-folding pass over postfix programs.
///
/// Every operator whose operands are all literal numbers is applied ahead of
/// time and replaced by its result. Anything that depends on a variable is
/// left in place, so the folded program can be run again after the
/// variables change.
#[derive(Default)]
pub struct Compiler {
    /// Number of operator applications performed while folding.
    folded: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Self { folded: 0 }
    }

    pub fn folded(&self) -> usize {
        self.folded
    }

    /// Fold an RPN expression.
    ///
    /// # Arguments
    ///
    /// * `rpn` - A postfix program, usually straight from the converter.
    /// * `registry` - Operators referenced by the program.
    /// * `bindings` - Constant values; variables are never read.
    ///
    /// # Returns
    ///
    /// The reduced program.
    ///
    pub fn compile(
        &mut self,
        rpn: &RPNExpr,
        registry: &OperatorRegistry,
        bindings: &mut Bindings,
    ) -> Result<RPNExpr> {
        let mut output: Vec<Token> = Vec::with_capacity(rpn.len());

        for token in rpn.iter() {
            match token {
                Token::Operator(symbol) => {
                    let op = registry.lookup(symbol)?;
                    if op.kind == OperatorKind::Comma {
                        continue;
                    }

                    let count = op.operand_count;
                    let foldable = output.len() >= count
                        && output[output.len() - count..].iter().all(Token::is_number);

                    if foldable {
                        let operands = output.split_off(output.len() - count);
                        let result = op.apply(&operands, bindings)?;
                        log::trace!("folded {} {:?} -> {}", symbol, operands, result);
                        output.push(result);
                        self.folded += 1;
                    } else {
                        output.push(token.clone());
                    }
                }
                Token::Constant(name) => output.push(Token::Number(bindings.constant(name)?)),
                Token::Number(_) | Token::Variable(_) => output.push(token.clone()),
            }
        }

        let compiled = RPNExpr(output);
        log::debug!("compiled form: {} ({} folds)", compiled, self.folded);
        Ok(compiled)
    }
}
