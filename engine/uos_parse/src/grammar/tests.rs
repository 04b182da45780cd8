use super::*;
use crate::parse;
use pretty_assertions::assert_eq;

fn dump(source: &str) -> String {
    parse(source, &LexerConfig::default()).unwrap().dump()
}

fn errors(source: &str) -> Vec<ParseError> {
    parse(source, &LexerConfig::default())
        .unwrap_err()
        .into_iter()
        .collect()
}

fn single_error(source: &str) -> ParseError {
    let mut errs = errors(source);
    assert_eq!(errs.len(), 1, "{errs:?}");
    errs.remove(0)
}

#[test]
fn command_with_values() {
    assert_eq!(
        dump("pause 500"),
        "SCRIPT\n  STATEMENT @1\n    COMMAND \"pause\"\n      INTEGER \"500\"\n"
    );
}

#[test]
fn command_modifiers_precede_command() {
    assert_eq!(
        dump("@setalias! \"pet\" 0x1A 1.5 word"),
        "SCRIPT
  STATEMENT @1
    QUIET \"@\"
    FORCE \"!\"
    COMMAND \"setalias\"
      STRING \"pet\"
      SERIAL \"0x1A\"
      DOUBLE \"1.5\"
      STRING \"word\"
"
    );
}

#[test]
fn separator_makes_sibling_statements() {
    assert_eq!(
        dump("pause 1; stop"),
        "SCRIPT\n  STATEMENT @1\n    COMMAND \"pause\"\n      INTEGER \"1\"\n  STATEMENT @1\n    STOP \"stop\"\n"
    );
}

#[test]
fn quoted_keyword_is_a_command_name() {
    assert_eq!(
        dump("\"if\" x"),
        "SCRIPT\n  STATEMENT @1\n    COMMAND \"if\"\n      STRING \"x\"\n"
    );
}

#[test]
fn logical_expression_shape() {
    assert_eq!(
        dump("if not findalias 'x' and count >= 2.5 or y != -3\nendif"),
        "SCRIPT
  STATEMENT @1
    IF \"if\"
      LOGICAL_EXPRESSION
        UNARY_EXPRESSION
          NOT \"not\"
          COMMAND \"findalias\"
            STRING \"x\"
        AND \"and\"
        BINARY_EXPRESSION
          OPERAND \"count\"
          GREATER_THAN_OR_EQUAL \">=\"
          DOUBLE \"2.5\"
        OR \"or\"
        BINARY_EXPRESSION
          OPERAND \"y\"
          NOT_EQUAL \"!=\"
          INTEGER \"-3\"
  STATEMENT @2
    ENDIF \"endif\"
"
    );
}

#[test]
fn binary_side_with_arguments() {
    assert_eq!(
        dump("while list 'l' > 2\nendwhile"),
        "SCRIPT
  STATEMENT @1
    WHILE \"while\"
      LOGICAL_EXPRESSION
        BINARY_EXPRESSION
          OPERAND \"list\"
            STRING \"l\"
          GREATER_THAN \">\"
          INTEGER \"2\"
  STATEMENT @2
    ENDWHILE \"endwhile\"
"
    );
}

#[test]
fn for_loop_forms() {
    let source = "for 3\nendfor\nfor (2) to (5)\nendfor\nfor 0 to (\"l\")\nendfor\nfor 0 to 1 in ('l')\nendfor\nfor n\nendfor";
    assert_eq!(
        dump(source),
        "SCRIPT
  STATEMENT @1
    FOR \"for\"
      INTEGER \"3\"
  STATEMENT @2
    ENDFOR \"endfor\"
  STATEMENT @3
    FOR \"for\"
      INTEGER \"3\"
  STATEMENT @4
    ENDFOR \"endfor\"
  STATEMENT @5
    FOREACH \"for\"
      INTEGER \"0\"
      LIST \"l\"
  STATEMENT @6
    ENDFOR \"endfor\"
  STATEMENT @7
    FOREACH \"for\"
      INTEGER \"0\"
      INTEGER \"2\"
      LIST \"l\"
  STATEMENT @8
    ENDFOR \"endfor\"
  STATEMENT @9
    FOR \"for\"
      OPERAND \"n\"
  STATEMENT @10
    ENDFOR \"endfor\"
"
    );
}

#[test]
fn quoted_list_name_with_spaces() {
    let tree = parse("for 0 to 'my list'\nendfor", &LexerConfig::default()).unwrap();
    let foreach = tree.first_child(tree.statements()[0]).unwrap();
    assert_eq!(tree.kind(foreach), NodeKind::ForEach);
    let list = tree.last_child(foreach).unwrap();
    assert_eq!(tree.lexeme(list), Some("my list"));
}

#[test]
fn for_range_errors() {
    assert_eq!(
        single_error("for 5 to 2\nendfor").kind,
        ParseErrorKind::NegativeTripCount { start: 5, end: 2 }
    );
    assert_eq!(
        single_error("for 0 to x in l\nendfor").kind,
        ParseErrorKind::RangeEndNotInteger
    );
    assert_eq!(
        single_error("for 3 to 1 in l\nendfor").kind,
        ParseErrorKind::InvertedRange { start: 3, end: 1 }
    );
    assert_eq!(
        single_error("for a b\nendfor").kind,
        ParseErrorKind::InvalidForLoop
    );
}

#[test]
fn empty_foreach_range_is_allowed() {
    assert!(parse("for 2 to 1 in l\nendfor", &LexerConfig::default()).is_ok());
}

#[test]
fn expression_errors() {
    assert_eq!(
        single_error("if a == b == c\nendif").kind,
        ParseErrorKind::MultipleOperators
    );
    assert_eq!(
        single_error("if a = b\nendif").kind,
        ParseErrorKind::InvalidOperator {
            operator: "=".to_string()
        }
    );
    assert_eq!(
        single_error("if a ==\nendif").kind,
        ParseErrorKind::MissingOperand
    );
    assert_eq!(
        single_error("if x and\nendif").kind,
        ParseErrorKind::MissingOperand
    );
    assert_eq!(
        single_error("if not\nendif").kind,
        ParseErrorKind::MissingOperand
    );
}

#[test]
fn keyword_arguments_are_rejected() {
    let err = single_error("stop now");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedArguments { keyword: "stop" });
    assert_eq!(err.lexeme.as_deref(), Some("now"));
}

#[test]
fn lone_modifier_is_rejected() {
    assert_eq!(single_error("@").kind, ParseErrorKind::MissingCommand);
    assert_eq!(single_error("@!").kind, ParseErrorKind::MissingCommand);
}

#[test]
fn recovery_collects_every_error_with_context() {
    let errs = errors("pause 1\nif\nsysmsg \"ok\"\nendif\nendwhile");
    let summary: Vec<(u32, ParseErrorKind, Option<String>)> = errs
        .into_iter()
        .map(|e| (e.line, e.kind, e.context))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                2,
                ParseErrorKind::EmptyExpression { keyword: "if" },
                Some("pause 1".to_string())
            ),
            (
                5,
                ParseErrorKind::UnmatchedKeyword {
                    keyword: "endwhile",
                    expected: "while"
                },
                Some("endif".to_string())
            ),
        ]
    );
}

#[test]
fn unterminated_quote_fails_the_load() {
    let err = single_error("pause 1\nsysmsg \"oops");
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, ParseErrorKind::UnterminatedQuote { quote: '"' });
    assert_eq!(err.context.as_deref(), Some("pause 1"));
}

#[test]
fn unclosed_block_points_at_opener() {
    let err = single_error("pause 1\nwhile x\npause 2");
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, ParseErrorKind::UnclosedBlock { keyword: "while" });
}

#[test]
fn blank_and_comment_lines_make_no_statements() {
    let tree = parse("\n// header\n   # note\n\n", &LexerConfig::default()).unwrap();
    assert!(tree.is_empty());
}

#[test]
fn value_classification() {
    use uos_lexer::LexemeKind::{Quoted, Word};
    assert_eq!(classify_value("0x40000001", Word, NodeKind::String), NodeKind::Serial);
    assert_eq!(classify_value("0xZZ", Word, NodeKind::String), NodeKind::String);
    assert_eq!(classify_value("-12", Word, NodeKind::String), NodeKind::Integer);
    assert_eq!(classify_value("3000000000", Word, NodeKind::String), NodeKind::Double);
    assert_eq!(classify_value(".5", Word, NodeKind::Operand), NodeKind::Double);
    assert_eq!(classify_value("inf", Word, NodeKind::Operand), NodeKind::Operand);
    assert_eq!(classify_value("12", Quoted, NodeKind::Operand), NodeKind::String);
}

#[test]
fn modifiers_only_on_words() {
    assert_eq!(split_modifiers(&Lexeme::word("@cmd!")), ("cmd", true, true));
    assert_eq!(split_modifiers(&Lexeme::word("cmd")), ("cmd", false, false));
    assert_eq!(split_modifiers(&Lexeme::quoted("@x!")), ("@x!", false, false));
}
