use precalc_lexer::{Location, Token, TokenClass};

use super::error::{ParseResult, SyntaxError};

/// The driver's view of its input: one token at a time, with the
/// end-of-input sentinel supplied once the underlying tokens run out.
///
/// Each token is checked against the class of the token before it, so that
/// an operator in operand position (a unary minus, `1 + * 2`) or an empty
/// group is reported instead of producing postfix the evaluator cannot use.
pub struct TokenStream<I> {
    /// The tokens being parsed
    tokens: I,
    /// Class of the last token handed out; `End` before the first one
    previous: TokenClass,
    /// Where a synthesized sentinel is placed
    last_location: Location,
}

impl<I> TokenStream<I>
where
    I: Iterator<Item = Token>,
{
    /// Create a new token stream over the given tokens
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        TokenStream {
            tokens: tokens.into_iter(),
            previous: TokenClass::End,
            last_location: Location::default(),
        }
    }

    /// Returns true when the next token must start an operand
    fn expects_operand(&self) -> bool {
        self.previous.is_operator()
            || matches!(self.previous, TokenClass::LeftParen | TokenClass::End)
    }

    fn check_placement(&self, token: &Token) -> ParseResult<()> {
        if !self.expects_operand() {
            return Ok(());
        }
        let location = token.location;
        let class = token.class();
        if class.is_operator() {
            return Err(SyntaxError::UnaryOperator {
                operator: class,
                location,
            });
        }
        // Unmatched parentheses (`(` then END, `)` at the start) are left to
        // the precedence table so they surface as relation errors.
        match (self.previous, class) {
            (TokenClass::End, TokenClass::End) => Err(SyntaxError::EmptyExpression),
            (TokenClass::LeftParen, TokenClass::RightParen) => Err(SyntaxError::MissingOperand {
                found: class,
                location,
            }),
            (previous, TokenClass::RightParen | TokenClass::End) if previous.is_operator() => {
                Err(SyntaxError::MissingOperand {
                    found: class,
                    location,
                })
            }
            _ => Ok(()),
        }
    }

    /// Get the next token and advance; the sentinel once the input is exhausted
    pub fn next_token(&mut self) -> ParseResult<Token> {
        let token = match self.tokens.next() {
            Some(token) => token,
            None => Token::end(self.last_location),
        };
        self.check_placement(&token)?;
        self.previous = token.class();
        self.last_location = token.location;
        Ok(token)
    }
}
