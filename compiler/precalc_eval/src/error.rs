use precalc_lexer::TokenClass;
use thiserror::Error;

/// Errors raised while evaluating a postfix sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An operator found fewer than two values on the stack
    #[error("operator {operator} is missing an operand")]
    StackUnderflow { operator: TokenClass },

    /// The postfix sequence was empty
    #[error("nothing to evaluate")]
    NoResult,

    /// More than one value remained once the input was consumed
    #[error("{count} values left on the stack, expected exactly one")]
    LeftoverValues { count: usize },

    #[error("'{lexeme}' is not a valid number")]
    InvalidNumber { lexeme: String },

    #[error("unbound identifier '{name}'")]
    UnboundIdentifier { name: String },

    /// A parenthesis or the end sentinel appeared in postfix input
    #[error("unexpected {class} in postfix input")]
    UnexpectedToken { class: TokenClass },
}

pub type EvalResult<T> = Result<T, EvalError>;
