use precalc::{evaluate_source, format_value, to_postfix, Error, Report};
use precalc_env::ValueEnv;
use precalc_eval::EvalError;
use precalc_lexer::TokenClass;
use precalc_parser::parser::SyntaxError;
use pretty_assertions::assert_eq;

fn eval(source: &str) -> Result<f64, Error> {
    evaluate_source(source, &ValueEnv::new())
}

#[test]
fn sample_expression_matches_direct_arithmetic() {
    let source = "(10 + 2.0 * 30) / 42.8 * 5 / 2 + 4 - 10 + 0";
    assert_eq!(
        to_postfix(source).unwrap().to_string(),
        "10 2.0 30 * + 42.8 / 5 * 2 / 4 + 10 - 0 +"
    );
    let value = eval(source).unwrap();
    assert_eq!(value, (10.0 + 2.0 * 30.0) / 42.8 * 5.0 / 2.0 + 4.0 - 10.0 + 0.0);
    assert!(format_value(value).starts_with("-1.9112"));
}

#[test]
fn zero_over_zero_is_nan() {
    let value = eval("0 / 0").unwrap();
    assert!(value.is_nan());
    assert_eq!(format_value(value), "NaN");
}

#[test]
fn one_over_zero_is_infinite() {
    let value = eval("1 / 0").unwrap();
    assert_eq!(value, f64::INFINITY);
    assert_eq!(format_value(value), "Infinity");
}

#[test]
fn leading_minus_is_a_syntax_error() {
    match eval("-1 / 0") {
        Err(Error::Syntax(SyntaxError::UnaryOperator { operator, location })) => {
            assert_eq!(operator, TokenClass::Sub);
            assert_eq!(location.column, 1);
        }
        other => panic!("expected a unary operator error, got {other:?}"),
    }
}

#[test]
fn empty_input_fails() {
    assert_eq!(eval(""), Err(Error::Syntax(SyntaxError::EmptyExpression)));
    assert_eq!(eval("  \n\t "), Err(Error::Syntax(SyntaxError::EmptyExpression)));
}

#[test]
fn unbalanced_parentheses_name_the_offending_pair() {
    let err = eval("(1 + 2").unwrap_err();
    assert!(matches!(
        err,
        Error::Syntax(SyntaxError::Relation {
            top: TokenClass::LeftParen,
            lookahead: TokenClass::End,
            ..
        })
    ));

    let err = eval("1 + 2)").unwrap_err();
    assert!(matches!(
        err,
        Error::Syntax(SyntaxError::Relation {
            top: TokenClass::End,
            lookahead: TokenClass::RightParen,
            ..
        })
    ));
}

#[test]
fn adjacent_operands_are_rejected() {
    for source in ["1 2", "1 (2)", "(1) 2", "(1)(2)", "a b"] {
        match eval(source) {
            Err(Error::Syntax(err)) => assert!(err.offending_pair().is_some(), "{source}"),
            other => panic!("{source}: expected a relation error, got {other:?}"),
        }
    }
}

#[test]
fn unknown_character_is_a_lex_error() {
    match eval("2 ^ 3") {
        Err(Error::Lex(err)) => {
            assert_eq!(err.character, '^');
            assert_eq!(err.column, 3);
        }
        other => panic!("expected a lex error, got {other:?}"),
    }
}

#[test]
fn identifiers_use_bindings() {
    let mut env = ValueEnv::with_prelude();
    env.insert("width".to_string(), 4.0);
    env.insert("height".to_string(), 2.5);
    assert_eq!(evaluate_source("width * height", &env), Ok(10.0));
    assert_eq!(
        evaluate_source("depth", &env),
        Err(Error::Eval(EvalError::UnboundIdentifier {
            name: "depth".to_string()
        }))
    );
}

#[test]
fn multi_line_expression_reports_line_of_error() {
    let source = "(1 +\n 2) *\n 3 4";
    let err = eval(source).unwrap_err();
    let rendered = err.render(source);
    assert!(rendered.contains(" --> 3:4"), "{rendered}");
    assert!(rendered.contains("3 |  3 4"), "{rendered}");
}

#[test]
fn report_serializes_to_json() {
    let report = Report::analyze("2 * (3 + 4)", &ValueEnv::new());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "expression": "2 * (3 + 4)",
            "postfix": "2 3 4 + *",
            "value": 14.0,
            "display": "14",
            "error": null
        })
    );
}
