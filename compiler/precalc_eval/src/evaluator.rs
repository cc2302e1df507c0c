use precalc_env::ValueEnv;
use precalc_lexer::{Operand, Token, TokenClass};

use crate::error::{EvalError, EvalResult};

/// Apply a binary operator class to two values.
///
/// Returns `None` when `class` is not one of the four operators.
pub fn apply(class: TokenClass, left: f64, right: f64) -> Option<f64> {
    match class {
        TokenClass::Add => Some(left + right),
        TokenClass::Sub => Some(left - right),
        TokenClass::Mul => Some(left * right),
        TokenClass::Div => Some(left / right),
        _ => None,
    }
}

/// Stack evaluator for postfix token sequences.
///
/// Identifiers are resolved against the borrowed environment; the evaluator
/// holds no other state, so one instance can evaluate any number of inputs.
pub struct Evaluator<'a> {
    env: &'a ValueEnv,
}

impl<'a> Evaluator<'a> {
    pub fn new(env: &'a ValueEnv) -> Self {
        Self { env }
    }

    /// Evaluate a postfix sequence to a single value.
    pub fn evaluate(&self, tokens: &[Token]) -> EvalResult<f64> {
        let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let class = token.class();
            match token.operand() {
                Some(operand) => stack.push(self.operand_value(operand)?),
                None => {
                    let underflow = EvalError::StackUnderflow { operator: class };
                    if !class.is_operator() {
                        return Err(EvalError::UnexpectedToken { class });
                    }
                    let right = stack.pop().ok_or_else(|| underflow.clone())?;
                    let left = stack.pop().ok_or(underflow)?;
                    let value =
                        apply(class, left, right).ok_or(EvalError::UnexpectedToken { class })?;
                    log::trace!("{left} {} {right} = {value}", class.symbol());
                    stack.push(value);
                }
            }
        }

        match stack.len() {
            0 => Err(EvalError::NoResult),
            1 => {
                let value = stack[0];
                log::debug!("evaluated {} tokens to {value}", tokens.len());
                Ok(value)
            }
            count => Err(EvalError::LeftoverValues { count }),
        }
    }

    fn operand_value(&self, operand: &Operand) -> EvalResult<f64> {
        match operand {
            Operand::Number(lexeme) => {
                lexeme
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber {
                        lexeme: lexeme.clone(),
                    })
            }
            Operand::Identifier(name) => {
                self.env
                    .get(name)
                    .ok_or_else(|| EvalError::UnboundIdentifier { name: name.clone() })
            }
        }
    }
}
