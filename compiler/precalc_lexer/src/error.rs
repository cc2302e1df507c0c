//! Errors raised while tokenizing

use thiserror::Error;

use crate::token::Location;

/// Raised when the lexer meets a character that starts no token.
///
/// Scanning stops at the first such character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected symbol '{character}' at line {line}, column {column}")]
pub struct LexError {
    /// The offending character
    pub character: char,
    /// 1-based line of the character
    pub line: usize,
    /// 1-based column of the character
    pub column: usize,
    /// 0-based byte offset of the character
    pub offset: usize,
}

impl LexError {
    /// Source location of the offending character
    pub fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }
}
