//! Token builders shared by the parser's unit tests

use precalc_lexer::token::{Location, Token, TokenType};

/// Creates a token with default location for testing
pub fn create_token(token_type: TokenType) -> Token {
    Token::new(token_type, Location::default())
}

/// Creates a numeric literal token for testing
pub fn create_number(text: &str) -> Token {
    Token::number(text, Location::default())
}

/// Creates an identifier token for testing
pub fn create_identifier(name: &str) -> Token {
    Token::identifier(name, Location::default())
}

/// Creates an operator or parenthesis token for testing
pub fn create_operator(op: &str) -> Token {
    let token_type = match op {
        "+" => TokenType::Plus,
        "-" => TokenType::Minus,
        "*" => TokenType::Star,
        "/" => TokenType::Slash,
        "(" => TokenType::LeftParen,
        ")" => TokenType::RightParen,
        _ => panic!("Unknown operator: {}", op),
    };
    create_token(token_type)
}

/// Creates the end-of-input sentinel for testing
pub fn create_end() -> Token {
    Token::end(Location::default())
}

/// Builds a sentinel-terminated token stream from whitespace-separated
/// words, without going through the lexer. Words that are not operators
/// become numbers when they start with a digit, identifiers otherwise.
pub fn tokens_from_words(words: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = words
        .split_whitespace()
        .map(|word| match word {
            "+" | "-" | "*" | "/" | "(" | ")" => create_operator(word),
            w if w.starts_with(|c: char| c.is_ascii_digit()) => create_number(w),
            w => create_identifier(w),
        })
        .collect();
    tokens.push(create_end());
    tokens
}

/// Tokenizes source text with the real lexer, panicking on lexical errors
pub fn tokenize(source: &str) -> Vec<Token> {
    precalc_lexer::tokenize(source).expect("test input should tokenize")
}
