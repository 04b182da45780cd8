use super::*;

#[test]
fn default_config_matches_dialect() {
    let config = LexerConfig::default();
    assert_eq!(config.separator, ';');
    assert!(config.is_delimiter(' '));
    assert!(config.is_delimiter('\t'));
    assert!(!config.is_delimiter(','));
    assert_eq!(config.closing_quote('"'), Some('"'));
    assert_eq!(config.closing_quote('\''), Some('\''));
    assert_eq!(config.closing_quote('('), None);
}

#[test]
fn comment_prefixes_match_at_start_only() {
    let config = LexerConfig::default();
    assert!(config.starts_comment("// note"));
    assert!(config.starts_comment("#note"));
    assert!(!config.starts_comment("/ not a comment"));
    assert!(!config.starts_comment("x # later"));
}

#[test]
fn empty_prefix_never_matches() {
    let config = LexerConfig {
        comment_prefixes: vec![String::new()],
        ..LexerConfig::default()
    };
    assert!(!config.starts_comment("anything"));
}
