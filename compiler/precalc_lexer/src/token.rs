use std::fmt;

/// Represents a token's location in the source expression.
///
/// Line and column numbers are 1-based and count characters, the byte offset
/// is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// The 1-based line number in the source text
    pub line: usize,
    /// The 1-based column number in the source text
    pub column: usize,
    /// The 0-based byte offset from the start of the source
    pub offset: usize,
}

/// The text carried by an operand token.
///
/// Numbers and identifiers are both operands to the parser; only the
/// evaluator cares which one it is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Numeric literal text: digits, optionally one `.` and more digits
    Number(String),
    /// A name resolved against the evaluator's bindings
    Identifier(String),
}

impl Operand {
    /// The source text of the operand
    pub fn lexeme(&self) -> &str {
        match self {
            Operand::Number(text) | Operand::Identifier(text) => text,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}

/// The kind of a token. Operators and delimiters carry no payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    Plus,
    Minus,
    Star,
    Slash,
    Operand(Operand),
    LeftParen,
    RightParen,
    /// End-of-input sentinel, appended once per token stream
    End,
}

/// The terminal class of a token, as seen by the precedence table.
///
/// The declaration order is the row/column order of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenClass {
    Add,
    Sub,
    Mul,
    Div,
    Operand,
    LeftParen,
    RightParen,
    End,
}

impl TokenClass {
    /// Number of terminal classes.
    pub const COUNT: usize = 8;

    /// Every class, in table order.
    pub const ALL: [TokenClass; TokenClass::COUNT] = [
        TokenClass::Add,
        TokenClass::Sub,
        TokenClass::Mul,
        TokenClass::Div,
        TokenClass::Operand,
        TokenClass::LeftParen,
        TokenClass::RightParen,
        TokenClass::End,
    ];

    /// Row/column index of this class in the precedence table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true for the four binary operators
    pub const fn is_operator(self) -> bool {
        matches!(
            self,
            TokenClass::Add | TokenClass::Sub | TokenClass::Mul | TokenClass::Div
        )
    }

    /// Returns true for `(` and `)`
    pub const fn is_paren(self) -> bool {
        matches!(self, TokenClass::LeftParen | TokenClass::RightParen)
    }

    /// Short symbol used when rendering tables and traces
    pub const fn symbol(self) -> &'static str {
        match self {
            TokenClass::Add => "+",
            TokenClass::Sub => "-",
            TokenClass::Mul => "*",
            TokenClass::Div => "/",
            TokenClass::Operand => "n",
            TokenClass::LeftParen => "(",
            TokenClass::RightParen => ")",
            TokenClass::End => "$",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenClass::Add => "'+'",
            TokenClass::Sub => "'-'",
            TokenClass::Mul => "'*'",
            TokenClass::Div => "'/'",
            TokenClass::Operand => "operand",
            TokenClass::LeftParen => "'('",
            TokenClass::RightParen => "')'",
            TokenClass::End => "end of input",
        };
        f.write_str(name)
    }
}

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The kind of token
    pub token_type: TokenType,
    /// The location of the token in the source text
    pub location: Location,
}

impl Token {
    pub fn new(token_type: TokenType, location: Location) -> Self {
        Self {
            token_type,
            location,
        }
    }

    /// The end-of-input sentinel at the given location.
    pub fn end(location: Location) -> Self {
        Self::new(TokenType::End, location)
    }

    /// A numeric literal token
    pub fn number<S: Into<String>>(text: S, location: Location) -> Self {
        Self::new(TokenType::Operand(Operand::Number(text.into())), location)
    }

    /// An identifier token
    pub fn identifier<S: Into<String>>(name: S, location: Location) -> Self {
        Self::new(TokenType::Operand(Operand::Identifier(name.into())), location)
    }

    /// The terminal class of this token
    pub fn class(&self) -> TokenClass {
        match self.token_type {
            TokenType::Plus => TokenClass::Add,
            TokenType::Minus => TokenClass::Sub,
            TokenType::Star => TokenClass::Mul,
            TokenType::Slash => TokenClass::Div,
            TokenType::Operand(_) => TokenClass::Operand,
            TokenType::LeftParen => TokenClass::LeftParen,
            TokenType::RightParen => TokenClass::RightParen,
            TokenType::End => TokenClass::End,
        }
    }

    /// The operand payload, if this is an operand token
    pub fn operand(&self) -> Option<&Operand> {
        match &self.token_type {
            TokenType::Operand(operand) => Some(operand),
            _ => None,
        }
    }

    /// Returns true if this is the end-of-input sentinel
    pub fn is_end(&self) -> bool {
        self.token_type == TokenType::End
    }

    /// Source text of the token. Empty for the sentinel.
    pub fn lexeme(&self) -> &str {
        match &self.token_type {
            TokenType::Operand(operand) => operand.lexeme(),
            TokenType::End => "",
            _ => self.class().symbol(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token_type {
            TokenType::End => write!(f, "$@{}", self.location),
            _ => write!(f, "{}@{}", self.lexeme(), self.location),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let location = Location {
            line: 1,
            column: 3,
            offset: 2,
        };
        let token = Token::number("4.5", location);
        assert_eq!(
            token.token_type,
            TokenType::Operand(Operand::Number("4.5".to_string()))
        );
        assert_eq!(token.lexeme(), "4.5");
        assert_eq!(token.location, location);
        assert_eq!(token.class(), TokenClass::Operand);
    }

    #[test]
    fn test_operators_have_no_payload() {
        let token = Token::new(TokenType::Star, Location::default());
        assert_eq!(token.operand(), None);
        assert_eq!(token.lexeme(), "*");
        assert!(token.class().is_operator());
    }

    #[test]
    fn test_identifiers_share_the_operand_class() {
        let token = Token::identifier("rate", Location::default());
        assert_eq!(token.class(), TokenClass::Operand);
        assert_eq!(
            token.operand(),
            Some(&Operand::Identifier("rate".to_string()))
        );
    }

    #[test]
    fn test_class_indices_follow_declaration_order() {
        for (i, class) in TokenClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
    }

    #[test]
    fn test_sentinel() {
        let end = Token::end(Location::default());
        assert!(end.is_end());
        assert_eq!(end.class(), TokenClass::End);
        assert_eq!(end.lexeme(), "");
    }
}
