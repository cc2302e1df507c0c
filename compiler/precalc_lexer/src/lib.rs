//! Lexical analysis for precedence-parsed arithmetic expressions
//!
//! Converts expression text into the token stream consumed by the
//! shift/reduce parser: single-character operators and parentheses,
//! numeric literals and identifiers, terminated by an end-of-input sentinel.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod lexer;
#[allow(missing_docs)]
pub mod logos_token;
#[allow(missing_docs)]
pub mod token;

// Re-export the main types for convenience
pub use error::LexError;
pub use lexer::{tokenize, Lexer};
pub use logos_token::LogosToken;
pub use token::{Location, Operand, Token, TokenClass, TokenType};
