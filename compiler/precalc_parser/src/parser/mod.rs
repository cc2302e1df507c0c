//! Operator-precedence shift/reduce driver
//!
//! The driver keeps a stack of terminals whose bottom is the end-of-input
//! sentinel and a single lookahead token. At each step it looks up the
//! relation between the stack top and the lookahead:
//!
//! - `<` or `=`: shift the lookahead onto the stack;
//! - `>`: reduce, popping tokens into the postfix output until the token now
//!   on top yields precedence (`<`) to the one just popped;
//! - no relation: the input is rejected.
//!
//! The parse accepts when both the stack top and the lookahead are the
//! sentinel. All parse state lives in locals of a single call, so the entry
//! points are plain functions that can be called from any thread.

pub mod diagnostics;
pub mod error;
pub mod postfix;
pub mod precedence;
pub mod token_stream;

#[cfg(test)]
mod test_utils;

use precalc_lexer::{Location, Token, TokenClass};

pub use diagnostics::{render_snippet, Diagnostic};
pub use error::{ParseResult, SyntaxError};
pub use postfix::{Postfix, Step};
pub use precedence::{relation, render_table, Relation};
pub use token_stream::TokenStream;

/// Parse a sentinel-terminated token stream into postfix order.
///
/// If the iterator ends without a sentinel, one is supplied. Nothing is
/// returned on failure; the error names the offending pair of classes.
pub fn parse_postfix<T>(tokens: T) -> ParseResult<Postfix>
where
    T: IntoIterator<Item = Token>,
{
    let (postfix, _) = ShiftReduce::new(tokens.into_iter(), false)?.run()?;
    Ok(postfix)
}

/// Like [`parse_postfix`], also returning every shift, reduce and the final
/// accept in the order they happened.
pub fn parse_traced<T>(tokens: T) -> ParseResult<(Postfix, Vec<Step>)>
where
    T: IntoIterator<Item = Token>,
{
    let (postfix, steps) = ShiftReduce::new(tokens.into_iter(), true)?.run()?;
    Ok((postfix, steps.unwrap_or_default()))
}

/// Per-call parse state. Built and consumed inside one parse call.
struct ShiftReduce<I> {
    input: TokenStream<I>,
    stack: Vec<Token>,
    lookahead: Token,
    output: Postfix,
    trace: Option<Vec<Step>>,
}

impl<I> ShiftReduce<I>
where
    I: Iterator<Item = Token>,
{
    fn new(tokens: I, traced: bool) -> ParseResult<Self> {
        let mut input = TokenStream::new(tokens);
        let lookahead = input.next_token()?;
        Ok(Self {
            input,
            stack: vec![Token::end(Location::default())],
            lookahead,
            output: Postfix::new(),
            trace: traced.then(Vec::new),
        })
    }

    fn top(&self) -> ParseResult<TokenClass> {
        self.stack
            .last()
            .map(Token::class)
            .ok_or(SyntaxError::StackExhausted)
    }

    fn record(&mut self, step: impl FnOnce() -> Step) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(step());
        }
    }

    fn run(mut self) -> ParseResult<(Postfix, Option<Vec<Step>>)> {
        loop {
            let top = self.top()?;
            let lookahead = self.lookahead.class();
            if top == TokenClass::End && lookahead == TokenClass::End {
                self.record(|| Step::Accept);
                log::debug!("accepted: {}", self.output);
                return Ok((self.output, self.trace));
            }

            match relation(top, lookahead) {
                Relation::Less | Relation::Equal => self.shift()?,
                Relation::Greater => self.reduce()?,
                Relation::Error => {
                    log::debug!("no relation between {top} and {lookahead}");
                    return Err(SyntaxError::Relation {
                        top,
                        lookahead,
                        location: self.lookahead.location,
                    });
                }
            }
        }
    }

    fn shift(&mut self) -> ParseResult<()> {
        let next = self.input.next_token()?;
        let token = std::mem::replace(&mut self.lookahead, next);
        log::trace!("shift {token}");
        self.record(|| Step::Shift(token.clone()));
        self.stack.push(token);
        Ok(())
    }

    /// Pop the handle on top of the stack into the output. Stops once the
    /// exposed stack top yields precedence to the token just popped.
    fn reduce(&mut self) -> ParseResult<()> {
        let mut popped = Vec::new();
        loop {
            let token = self.stack.pop().ok_or(SyntaxError::StackExhausted)?;
            let class = token.class();
            if self.trace.is_some() {
                popped.push(token.clone());
            }
            if !class.is_paren() {
                self.output.push(token);
            }
            if relation(self.top()?, class) == Relation::Less {
                break;
            }
        }
        log::trace!("reduce, output is now: {}", self.output);
        self.record(|| Step::Reduce(popped));
        Ok(())
    }
}

#[cfg(test)]
mod tests;
