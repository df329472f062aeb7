use crate::bindings::Bindings;
use crate::builtins::UNARY_MINUS;
use crate::error::{Result, SyntaxError};
use crate::operator::{Operator, OperatorKind, OperatorRegistry};
use crate::tokenizer::{Lexeme, Token, TokenizedInput};

/// A program in postfix order.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct RPNExpr(pub Vec<Token>);

impl std::ops::Deref for RPNExpr {
    type Target = Vec<Token>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for RPNExpr {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl std::fmt::Display for RPNExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, token) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Entry of the pending-operator stack.
enum Pending<'a> {
    Paren,
    Op(&'a Operator),
}

pub struct RpnConverter;

impl RpnConverter {
    /// Pops every operator that binds at least as tightly as `op`, then pushes `op`.
    ///
    /// Prefix operators have no left operand, so they never pop.
    fn push_operator<'a>(op: &'a Operator, stack: &mut Vec<Pending<'a>>, output: &mut Vec<Token>) {
        let prefix = op.kind == OperatorKind::Unary && !op.postfix;
        while let Some(Pending::Op(top)) = stack.last() {
            if prefix || top.is_barrier() {
                break;
            }
            if top.precedence < op.precedence {
                break;
            }
            if top.precedence == op.precedence && op.right_associative {
                break;
            }
            output.push(Token::Operator(top.symbol.clone()));
            stack.pop();
        }

        stack.push(Pending::Op(op));
    }

    /// Rejects an operand that directly follows another operand.
    fn check_operand(expect_operand: bool, text: &str) -> Result<()> {
        if !expect_operand {
            return Err(SyntaxError::UnexpectedOperand(text.to_string()).into());
        }
        Ok(())
    }

    /// Prefix operators and functions belong where an operand is expected;
    /// binary and postfix operators belong after one.
    fn check_operator(op: &Operator, expect_operand: bool) -> Result<()> {
        let prefix = op.kind == OperatorKind::Function
            || (op.kind == OperatorKind::Unary && !op.postfix);
        match (prefix, expect_operand) {
            (true, false) if op.kind == OperatorKind::Function => {
                Err(SyntaxError::UnexpectedOperand(op.symbol.clone()).into())
            }
            (true, false) | (false, true) => {
                Err(SyntaxError::UnexpectedOperator(op.symbol.clone()).into())
            }
            _ => Ok(()),
        }
    }

    /// Checks that every operator finds its operands and exactly one value remains.
    fn verify_rpn(tokens: &[Token], registry: &OperatorRegistry) -> Result<()> {
        let mut n_operands = 0usize;
        for token in tokens {
            match token {
                Token::Operator(symbol) => {
                    let op = registry.lookup(symbol)?;
                    if op.kind == OperatorKind::Comma {
                        continue;
                    }
                    if n_operands < op.operand_count {
                        return Err(SyntaxError::NotEnoughOperands(symbol.clone()).into());
                    }
                    n_operands = n_operands - op.operand_count + 1;
                }
                _ => n_operands += 1,
            }
        }

        match n_operands {
            0 => Err(SyntaxError::EmptyExpression.into()),
            1 => Ok(()),
            _ => Err(SyntaxError::TooManyOperands.into()),
        }
    }

    /// Converts infix lexemes to Reverse Polish Notation
    /// using the Shunting Yard algorithm.
    ///
    /// Identifiers become function/operator references when registered,
    /// constants when bound as constants, and variables otherwise. A `-` in
    /// operand position is rewritten to unary negation.
    pub fn convert(
        tokens: &TokenizedInput,
        registry: &OperatorRegistry,
        bindings: &Bindings,
    ) -> Result<RPNExpr> {
        let mut output = Vec::new();
        let mut stack: Vec<Pending> = Vec::new();
        let mut expect_operand = true;

        for lexeme in tokens.iter() {
            match lexeme {
                Lexeme::Number(n) => {
                    Self::check_operand(expect_operand, &n.to_string())?;
                    output.push(Token::Number(*n));
                    expect_operand = false;
                }
                Lexeme::LParen => {
                    Self::check_operand(expect_operand, "(")?;
                    stack.push(Pending::Paren);
                    expect_operand = true;
                }
                Lexeme::RParen => {
                    loop {
                        match stack.pop() {
                            Some(Pending::Paren) => break,
                            Some(Pending::Op(op)) => output.push(Token::Operator(op.symbol.clone())),
                            None => return Err(SyntaxError::MismatchedClosingParen.into()),
                        }
                    }

                    if let Some(Pending::Op(top)) = stack.last() {
                        if top.kind == OperatorKind::Function {
                            output.push(Token::Operator(top.symbol.clone()));
                            stack.pop();
                        }
                    }
                    expect_operand = false;
                }
                Lexeme::Identifier(name) if registry.is_operator(name) => {
                    let op = registry.lookup(name)?;
                    Self::check_operator(op, expect_operand)?;
                    if op.kind == OperatorKind::Function {
                        stack.push(Pending::Op(op));
                    } else {
                        Self::push_operator(op, &mut stack, &mut output);
                    }
                    expect_operand = !op.postfix;
                }
                Lexeme::Identifier(name) if bindings.is_constant(name) => {
                    Self::check_operand(expect_operand, name)?;
                    output.push(Token::Constant(name.clone()));
                    expect_operand = false;
                }
                Lexeme::Identifier(name) => {
                    Self::check_operand(expect_operand, name)?;
                    output.push(Token::Variable(name.clone()));
                    expect_operand = false;
                }
                Lexeme::Symbol(symbol) => {
                    let symbol = if symbol == "-" && expect_operand {
                        if !registry.is_operator(UNARY_MINUS) {
                            return Err(SyntaxError::UnexpectedOperator(symbol.clone()).into());
                        }
                        UNARY_MINUS
                    } else {
                        symbol.as_str()
                    };
                    let op = registry.lookup(symbol)?;
                    Self::check_operator(op, expect_operand)?;
                    Self::push_operator(op, &mut stack, &mut output);
                    expect_operand = !op.postfix;
                }
            }
        }

        while let Some(pending) = stack.pop() {
            match pending {
                Pending::Op(op) => output.push(Token::Operator(op.symbol.clone())),
                Pending::Paren => return Err(SyntaxError::MismatchedOpeningParen.into()),
            }
        }

        Self::verify_rpn(&output, registry)?;

        let rpn = RPNExpr(output);
        log::debug!("postfix form: {}", rpn);
        Ok(rpn)
    }
}
