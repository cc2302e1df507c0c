use precalc_lexer::{Location, TokenClass};

use super::error::SyntaxError;

/// A user-facing error report for a rejected expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub location: Option<Location>,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic at a specific location with a custom message
    pub fn at_location<S: Into<String>>(location: Location, message: S) -> Self {
        Self {
            message: message.into(),
            location: Some(location),
            help: None,
        }
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(err: &SyntaxError) -> Self {
        let help = match err {
            SyntaxError::Relation { top, lookahead, .. } => help_for_pair(*top, *lookahead),
            SyntaxError::UnaryOperator { operator, .. } => Some(format!(
                "unary operators are not supported; write (0 {} x) instead",
                operator.symbol()
            )),
            SyntaxError::MissingOperand { found, .. } => help_for_class(*found),
            SyntaxError::EmptyExpression => Some("Enter an expression such as 1 + 2".to_string()),
            SyntaxError::StackExhausted => None,
        };
        Self {
            message: err.to_string(),
            location: err.location(),
            help,
        }
    }
}

/// Provide a help message for a pair the precedence table rejects
fn help_for_pair(top: TokenClass, lookahead: TokenClass) -> Option<String> {
    use TokenClass::*;
    match (top, lookahead) {
        (Operand | RightParen, Operand | LeftParen) => {
            Some("Two operands need an operator between them".to_string())
        }
        (End, RightParen) => Some("Did you forget a matching '(' earlier?".to_string()),
        (LeftParen, End) => Some("Did you forget a closing ')'?".to_string()),
        _ => None,
    }
}

/// Provide a default help message for a token class
fn help_for_class(class: TokenClass) -> Option<String> {
    match class {
        TokenClass::RightParen => Some("Parentheses must enclose an expression".to_string()),
        TokenClass::End => Some("The expression ends with an operator".to_string()),
        _ => None,
    }
}

/// Render a diagnostic with the offending source line and a caret under the column.
///
/// ```text
/// error: unexpected operand after operand
///  --> 1:3
///   |
/// 1 | 3 4
///   |   ^
///   = help: Two operands need an operator between them
/// ```
pub fn render_snippet(diag: &Diagnostic, source: &str) -> String {
    let mut out = format!("error: {}", diag.message);

    if let Some(location) = diag.location {
        let line_text = source
            .lines()
            .nth(location.line.saturating_sub(1))
            .unwrap_or("");
        let gutter = location.line.to_string();
        let pad = " ".repeat(gutter.len());
        out.push_str(&format!("\n{pad}--> {location}"));
        out.push_str(&format!("\n{pad} |"));
        out.push_str(&format!("\n{gutter} | {line_text}"));
        out.push_str(&format!(
            "\n{pad} | {}^",
            " ".repeat(location.column.saturating_sub(1))
        ));
    }

    if let Some(help) = &diag.help {
        let pad = match diag.location {
            Some(location) => " ".repeat(location.line.to_string().len()),
            None => String::new(),
        };
        out.push_str(&format!("\n{pad} = help: {help}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_relation_error() {
        let err = SyntaxError::Relation {
            top: TokenClass::Operand,
            lookahead: TokenClass::Operand,
            location: Location {
                line: 1,
                column: 3,
                offset: 2,
            },
        };
        let rendered = render_snippet(&Diagnostic::from(&err), "3 4");
        assert_eq!(
            rendered,
            "error: unexpected operand after operand\n --> 1:3\n  |\n1 | 3 4\n  |   ^\n  = help: Two operands need an operator between them"
        );
    }

    #[test]
    fn test_render_without_location() {
        let rendered = render_snippet(&Diagnostic::from(&SyntaxError::EmptyExpression), "");
        assert_eq!(
            rendered,
            "error: empty expression\n = help: Enter an expression such as 1 + 2"
        );
    }

    #[test]
    fn test_unmatched_close_paren_help() {
        let err = SyntaxError::Relation {
            top: TokenClass::End,
            lookahead: TokenClass::RightParen,
            location: Location::default(),
        };
        assert_eq!(
            Diagnostic::from(&err).help.as_deref(),
            Some("Did you forget a matching '(' earlier?")
        );
    }
}
