use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn words(texts: &[&str]) -> Vec<Lexeme> {
    texts.iter().map(|t| Lexeme::word(*t)).collect()
}

fn tokenize(text: &str) -> Vec<Lexeme> {
    let config = LexerConfig::default();
    Lexer::new(&config).tokenize(1, text).unwrap()
}

#[test]
fn splits_on_delimiters() {
    assert_eq!(tokenize("pause   500"), words(&["pause", "500"]));
    assert_eq!(tokenize("\tif\tx  ==\t1 "), words(&["if", "x", "==", "1"]));
}

#[test]
fn quoted_lexeme_drops_quotes() {
    assert_eq!(
        tokenize(r#"sysmsg "hello world""#),
        vec![Lexeme::word("sysmsg"), Lexeme::quoted("hello world")]
    );
    assert_eq!(
        tokenize("setalias 'my pet' 0x10"),
        vec![
            Lexeme::word("setalias"),
            Lexeme::quoted("my pet"),
            Lexeme::word("0x10"),
        ]
    );
}

#[test]
fn empty_quotes_produce_empty_lexeme() {
    assert_eq!(
        tokenize(r#"sysmsg """#),
        vec![Lexeme::word("sysmsg"), Lexeme::quoted("")]
    );
}

#[test]
fn doubled_quote_is_literal() {
    assert_eq!(
        tokenize(r#"sysmsg "say ""hi""""#),
        vec![Lexeme::word("sysmsg"), Lexeme::quoted(r#"say "hi""#)]
    );
}

#[test]
fn quote_inside_word_is_kept() {
    assert_eq!(tokenize(r#"for 0 to ("l")"#), words(&["for", "0", "to", r#"("l")"#]));
}

#[test]
fn comment_truncates_outside_quotes() {
    assert_eq!(tokenize("pause 10 // wait"), words(&["pause", "10"]));
    assert_eq!(tokenize("pause 10# wait"), words(&["pause", "10"]));
    assert_eq!(
        tokenize(r#"sysmsg "a // b""#),
        vec![Lexeme::word("sysmsg"), Lexeme::quoted("a // b")]
    );
    assert!(tokenize("// only a comment").is_empty());
}

#[test]
fn keyword_quoted_is_not_a_word() {
    let lexemes = tokenize(r#"if "and" == 1"#);
    assert!(lexemes[0].is_word("if"));
    assert!(!lexemes[1].is_word("and"));
    assert_eq!(lexemes[1].kind, LexemeKind::Quoted);
}

#[test]
fn unterminated_quote_reports_column() {
    let config = LexerConfig::default();
    let err = Lexer::new(&config)
        .tokenize(7, r#"sysmsg "oops"#)
        .unwrap_err();
    assert_eq!(err.line, 7);
    assert_eq!(err.column, 8);
    assert_eq!(err.kind, LexErrorKind::UnterminatedQuote { quote: '"' });
    assert_eq!(
        err.to_string(),
        "line 7:8: unterminated quote, expected closing `\"`"
    );
}

#[test]
fn separator_splits_statements_outside_quotes() {
    let config = LexerConfig::default();
    let lexer = Lexer::new(&config);
    assert_eq!(lexer.split_statements("a; b ;c"), vec!["a", " b ", "c"]);
    assert_eq!(
        lexer.split_statements(r#"sysmsg "a;b"; pause 1"#),
        vec![r#"sysmsg "a;b""#, " pause 1"]
    );
}

#[test]
fn separator_inside_comment_does_not_split() {
    let config = LexerConfig::default();
    let lexer = Lexer::new(&config);
    assert_eq!(lexer.split_statements("sysmsg hi // note; more"), vec!["sysmsg hi "]);
    assert_eq!(lexer.split_statements("a; b # tail; x"), vec!["a", " b "]);
    assert_eq!(
        lexer.split_statements(r#"sysmsg "x;y" // c; d"#),
        vec![r#"sysmsg "x;y" "#]
    );
    assert_eq!(
        lexer.split_statements(r#"sysmsg "//;#"; pause 1"#),
        vec![r#"sysmsg "//;#""#, " pause 1"]
    );

    let lines = lexer
        .lex("sysmsg hi // note; more text\n# only; comment\nsysmsg after # tail; x")
        .unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].lexemes, words(&["sysmsg", "hi"]));
    assert_eq!(lines[1].line, 3);
    assert_eq!(lines[1].lexemes, words(&["sysmsg", "after"]));
}

#[test]
fn lex_assigns_physical_lines_and_skips_blanks() {
    let config = LexerConfig::default();
    let source = "pause 1\n\n   \n// note\nsysmsg 'x'; pause 2;\r\nstop";
    let lines = Lexer::new(&config).lex(source).unwrap();
    let summary: Vec<(u32, Vec<&str>)> = lines
        .iter()
        .map(|l| (l.line, l.lexemes.iter().map(|x| x.text.as_str()).collect()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, vec!["pause", "1"]),
            (5, vec!["sysmsg", "x"]),
            (5, vec!["pause", "2"]),
            (6, vec!["stop"]),
        ]
    );
}

#[test]
fn custom_config_is_honored() {
    let config = LexerConfig {
        separator: '|',
        delimiters: vec![','],
        comment_prefixes: vec!["--".to_string()],
        quotes: vec![('[', ']')],
    };
    let lines = Lexer::new(&config)
        .lex("say,[a b],c|stop -- end")
        .unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0].lexemes,
        vec![Lexeme::word("say"), Lexeme::quoted("a b"), Lexeme::word("c")]
    );
    assert_eq!(lines[1].lexemes, words(&["stop"]));
}

proptest! {
    #[test]
    fn plain_words_round_trip(parts in prop::collection::vec("[a-z0-9]{1,8}", 0..8)) {
        let text = parts.join(" ");
        let lexemes = tokenize(&text);
        let got: Vec<String> = lexemes.into_iter().map(|l| l.text).collect();
        prop_assert_eq!(got, parts);
    }

    #[test]
    fn quoted_text_survives_intact(body in "[a-z ;#/]{0,16}") {
        let text = format!("sysmsg \"{body}\"");
        let lexemes = tokenize(&text);
        prop_assert_eq!(lexemes.len(), 2);
        prop_assert_eq!(&lexemes[1], &Lexeme::quoted(body));
    }

    #[test]
    fn lexemes_never_contain_delimiters(text in "[a-z \t]{0,32}") {
        for lexeme in tokenize(&text) {
            prop_assert!(!lexeme.text.contains(' '));
            prop_assert!(!lexeme.text.contains('\t'));
            prop_assert!(!lexeme.text.is_empty());
        }
    }
}
