use super::*;
use pretty_assertions::assert_eq;

#[test]
fn display_includes_lexeme_and_context() {
    let err = ParseError::new(
        ParseErrorKind::UnmatchedKeyword {
            keyword: "endif",
            expected: "if",
        },
        4,
    )
    .with_lexeme("endif")
    .with_context(Some("pause 10"));
    assert_eq!(
        err.to_string(),
        "syntax error on line 4: `endif` without matching `if` (at `endif`); last statement: `pause 10`"
    );
}

#[test]
fn display_without_optional_parts() {
    let err = ParseError::new(ParseErrorKind::MissingOperand, 2);
    assert_eq!(
        err.to_string(),
        "syntax error on line 2: expression is missing an operand"
    );
}

#[test]
fn lex_errors_convert_to_unterminated_quote() {
    let lex = LexError::new(9, 3, LexErrorKind::UnterminatedQuote { quote: '\'' });
    let err = ParseError::from(lex);
    assert_eq!(err.line, 9);
    assert_eq!(err.kind, ParseErrorKind::UnterminatedQuote { quote: '\'' });
}

#[test]
fn error_list_joins_lines() {
    let errors = ParseErrors::new(vec![
        ParseError::new(ParseErrorKind::InvalidForLoop, 1),
        ParseError::new(ParseErrorKind::UnclosedBlock { keyword: "while" }, 3),
    ]);
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.to_string(),
        "syntax error on line 1: invalid for loop, expected `for n`, `for a to b`, `for a to list` or `for a to b in list`\n\
         syntax error on line 3: `while` block is never closed"
    );
}
