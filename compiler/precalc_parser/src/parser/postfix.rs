use std::fmt;
use std::slice;

use precalc_lexer::Token;

/// The driver's output: operand and operator tokens in postfix order.
///
/// Never contains parentheses or the end-of-input sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, token: Token) {
        debug_assert!(!token.class().is_paren() && !token.is_end());
        self.tokens.push(token);
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl AsRef<[Token]> for Postfix {
    fn as_ref(&self) -> &[Token] {
        &self.tokens
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Postfix {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Space-separated lexemes, e.g. `1 2 3 * +`
impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token.lexeme())?;
        }
        Ok(())
    }
}

/// One action taken by the driver, recorded by [`parse_traced`](super::parse_traced).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The lookahead was pushed onto the stack
    Shift(Token),
    /// These tokens were popped, in pop order; parentheses included
    Reduce(Vec<Token>),
    /// Stack top and lookahead were both the sentinel
    Accept,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Shift(token) => write!(f, "shift  {}", token.lexeme()),
            Step::Reduce(popped) => {
                f.write_str("reduce")?;
                for token in popped {
                    write!(f, " {}", token.lexeme())?;
                }
                Ok(())
            }
            Step::Accept => f.write_str("accept"),
        }
    }
}
