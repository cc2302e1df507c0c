//! Lexer implementation for arithmetic expressions
//! Converts expression text into a stream of tokens for the parser

use logos::Logos;
use std::ops::Range;

use crate::error::LexError;
use crate::token::{Location, Operand, Token, TokenType};
use crate::LogosToken;

/// The main lexer struct that holds the state of the lexing process
pub struct Lexer<'a> {
    /// The source text being lexed
    source: &'a str,
    /// The current line number (1-based)
    line: usize,
    /// The current column number (1-based)
    column: usize,
    /// The current byte offset in the source
    offset: usize,
    /// Set once an error has been reported; the lexer yields nothing after that
    failed: bool,
    /// The inner Logos lexer
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            line: 1,
            column: 1,
            offset: 0,
            failed: false,
            inner: LogosToken::lexer(source),
        }
    }

    /// Advance the position tracking up to `target`, counting characters rather than bytes
    fn sync_position_to(&mut self, target: usize) {
        let text = &self.source[self.offset..target];
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = target;
    }

    fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    /// Location just past the last character of the source
    pub fn end_location(&mut self) -> Location {
        self.sync_position_to(self.source.len());
        self.location()
    }

    fn error_at(&mut self, span: &Range<usize>) -> LexError {
        self.sync_position_to(span.start);
        let character = self.source[span.start..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        LexError {
            character,
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    /// Get the next token from the source text
    pub fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        if self.failed {
            return None;
        }

        let result = self.inner.next()?;
        let span = self.inner.span();

        let logos_token = match result {
            Ok(token) => token,
            Err(()) => {
                self.failed = true;
                let err = self.error_at(&span);
                log::debug!("lexer stopped: {err}");
                return Some(Err(err));
            }
        };

        self.sync_position_to(span.start);
        let lexeme = &self.source[span.clone()];
        let token = Token::new(convert_token(logos_token, lexeme), self.location());
        log::trace!("token {token} (span: {span:?})");
        Some(Ok(token))
    }
}

/// Convert a LogosToken to our semantic TokenType
fn convert_token(logos_token: LogosToken, lexeme: &str) -> TokenType {
    match logos_token {
        LogosToken::Plus => TokenType::Plus,
        LogosToken::Minus => TokenType::Minus,
        LogosToken::Star => TokenType::Star,
        LogosToken::Slash => TokenType::Slash,
        LogosToken::LeftParen => TokenType::LeftParen,
        LogosToken::RightParen => TokenType::RightParen,
        LogosToken::Number => TokenType::Operand(Operand::Number(lexeme.to_string())),
        LogosToken::Identifier => TokenType::Operand(Operand::Identifier(lexeme.to_string())),
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize a whole expression and append the end-of-input sentinel.
///
/// The returned stream always ends in exactly one [`TokenType::End`] token,
/// located just past the last character of the source.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token?);
    }
    tokens.push(Token::end(lexer.end_location()));
    log::debug!("tokenized {} tokens from {} bytes", tokens.len(), source.len());
    Ok(tokens)
}
