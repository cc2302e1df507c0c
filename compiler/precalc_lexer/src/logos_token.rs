use logos::Logos;

// Only space, tab and newline are blanks
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\n]+")]
pub enum LogosToken {
    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    // Digits, optionally followed by a single '.' and more digits ("1." is accepted)
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
}
