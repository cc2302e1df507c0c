use precalc_env::ValueEnv;
use precalc_eval::{EvalError, Evaluator};
use precalc_lexer::{tokenize, LexError};
use precalc_parser::parser::{parse_postfix, parse_traced, Diagnostic, Postfix, Step, SyntaxError};
use serde::Serialize;
use thiserror::Error;

/// Any failure along the tokenize, parse, evaluate pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl Error {
    /// Render the error with a source snippet when it carries a location.
    pub fn render(&self, source: &str) -> String {
        let diag = match self {
            Error::Syntax(err) => Diagnostic::from(err),
            Error::Lex(err) => Diagnostic::at_location(err.location(), err.to_string()),
            Error::Eval(_) => return format!("error: {self}"),
        };
        precalc_parser::parser::render_snippet(&diag, source)
    }
}

/// Tokenize and parse `source` into postfix order
pub fn to_postfix(source: &str) -> Result<Postfix, Error> {
    let tokens = tokenize(source)?;
    Ok(parse_postfix(tokens)?)
}

/// Like [`to_postfix`], also returning the driver's shift/reduce steps
pub fn trace_source(source: &str) -> Result<(Postfix, Vec<Step>), Error> {
    let tokens = tokenize(source)?;
    Ok(parse_traced(tokens)?)
}

/// Run the whole pipeline on one expression.
pub fn evaluate_source(source: &str, env: &ValueEnv) -> Result<f64, Error> {
    let postfix = to_postfix(source)?;
    let value = Evaluator::new(env).evaluate(postfix.as_slice())?;
    log::debug!("{source:?} = {value}");
    Ok(value)
}

/// Format a value the way the calculator prints it.
///
/// Non-finite results print as `NaN`, `Infinity` and `-Infinity`; finite
/// values use the shortest text that reads back as the same `f64`.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        format!("{value}")
    }
}

/// Machine-readable result of analyzing one expression.
///
/// `value` is `null` in JSON for non-finite results; `display` always holds
/// the printed form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub expression: String,
    pub postfix: Option<String>,
    pub value: Option<f64>,
    pub display: Option<String>,
    pub error: Option<String>,
}

impl Report {
    pub fn analyze(source: &str, env: &ValueEnv) -> Self {
        let mut report = Report {
            expression: source.trim().to_string(),
            postfix: None,
            value: None,
            display: None,
            error: None,
        };

        let postfix = match to_postfix(source) {
            Ok(postfix) => postfix,
            Err(err) => {
                report.error = Some(err.to_string());
                return report;
            }
        };
        report.postfix = Some(postfix.to_string());

        match Evaluator::new(env).evaluate(postfix.as_slice()) {
            Ok(value) => {
                report.value = Some(value);
                report.display = Some(format_value(value));
            }
            Err(err) => report.error = Some(Error::from(err).to_string()),
        }
        report
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
