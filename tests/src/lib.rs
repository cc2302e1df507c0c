//! Shared helpers for the end-to-end tests.
//!
//! [`reference_eval`] is a recursive-descent evaluator that works directly
//! on characters. It shares no code with the precalc crates, so agreeing
//! with it is evidence that the precedence table encodes the usual
//! arithmetic grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := number | '(' expr ')'
//! ```

use std::iter::Peekable;
use std::str::Chars;

/// Evaluate `source` with the textbook grammar. Returns `None` on any
/// syntax problem, including trailing input.
pub fn reference_eval(source: &str) -> Option<f64> {
    let mut parser = Descent {
        chars: source.chars().peekable(),
    };
    let value = parser.expr()?;
    parser.skip_blanks();
    match parser.chars.peek() {
        None => Some(value),
        Some(_) => None,
    }
}

/// Equality that treats two NaNs as equal and compares other values with a
/// small relative tolerance.
pub fn same_value(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= scale * 1e-12
}

struct Descent<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Descent<'_> {
    fn skip_blanks(&mut self) {
        while matches!(self.chars.peek(), Some(' ' | '\t' | '\n')) {
            self.chars.next();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_blanks();
        if self.chars.peek() == Some(&expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Some(value);
            }
        }
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') {
                value *= self.factor()?;
            } else if self.eat('/') {
                value /= self.factor()?;
            } else {
                return Some(value);
            }
        }
    }

    fn factor(&mut self) -> Option<f64> {
        if self.eat('(') {
            let value = self.expr()?;
            return self.eat(')').then_some(value);
        }
        self.number()
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_blanks();
        let mut text = String::new();
        while let Some(c) = self.chars.peek().copied() {
            if c.is_ascii_digit() || (c == '.' && !text.contains('.') && !text.is_empty()) {
                text.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        text.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_follows_usual_precedence() {
        assert_eq!(reference_eval("1 + 2 * 3"), Some(7.0));
        assert_eq!(reference_eval("(1 + 2) * 3"), Some(9.0));
        assert_eq!(reference_eval("8 - 2 - 1"), Some(5.0));
        assert_eq!(reference_eval("8 / 2 / 2"), Some(2.0));
        assert_eq!(reference_eval("1 2"), None);
        assert_eq!(reference_eval("(1"), None);
        assert_eq!(reference_eval(""), None);
    }

    #[test]
    fn same_value_handles_non_finite() {
        assert!(same_value(f64::NAN, f64::NAN));
        assert!(same_value(f64::INFINITY, f64::INFINITY));
        assert!(!same_value(f64::INFINITY, f64::NEG_INFINITY));
        assert!(!same_value(1.0, f64::NAN));
        assert!(same_value(0.1 + 0.2, 0.3));
    }
}
