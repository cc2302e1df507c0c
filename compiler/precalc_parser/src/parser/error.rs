use precalc_lexer::{Location, TokenClass};
use thiserror::Error;

/// Errors raised by the shift/reduce driver.
///
/// Parsing stops at the first error and no partial output is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The precedence table has no relation for the stack top and the lookahead
    #[error("unexpected {lookahead} after {top}")]
    Relation {
        top: TokenClass,
        lookahead: TokenClass,
        location: Location,
    },

    /// An operator appeared where an operand was expected (unary use)
    #[error("unary operator {operator} is not supported")]
    UnaryOperator {
        operator: TokenClass,
        location: Location,
    },

    /// A closing parenthesis or the end of input came where an operand was expected
    #[error("expected an operand before {found}")]
    MissingOperand { found: TokenClass, location: Location },

    /// The input holds no tokens besides the sentinel
    #[error("empty expression")]
    EmptyExpression,

    /// A reduce popped the bottom-of-stack sentinel
    #[error("parse stack exhausted")]
    StackExhausted,
}

impl SyntaxError {
    /// Source location of the offending token, when there is one
    pub fn location(&self) -> Option<Location> {
        match self {
            SyntaxError::Relation { location, .. }
            | SyntaxError::UnaryOperator { location, .. }
            | SyntaxError::MissingOperand { location, .. } => Some(*location),
            SyntaxError::EmptyExpression | SyntaxError::StackExhausted => None,
        }
    }

    /// The two classes the table could not relate, for `Relation` errors
    pub fn offending_pair(&self) -> Option<(TokenClass, TokenClass)> {
        match self {
            SyntaxError::Relation { top, lookahead, .. } => Some((*top, *lookahead)),
            _ => None,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, SyntaxError>;
