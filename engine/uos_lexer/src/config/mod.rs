//! Lexer configuration.

/// Characters and markers that shape how a line is split into lexemes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexerConfig {
    /// Splits one physical line into several statements.
    pub separator: char,
    /// Characters that separate lexemes within a statement.
    pub delimiters: Vec<char>,
    /// Outside quotes, the rest of the line after any of these is ignored.
    pub comment_prefixes: Vec<String>,
    /// `(open, close)` quote pairs.
    pub quotes: Vec<(char, char)>,
}

impl LexerConfig {
    /// Whether `c` separates lexemes.
    #[inline]
    pub fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }

    /// The closing quote for `c`, if `c` opens a quoted run.
    #[inline]
    pub fn closing_quote(&self, c: char) -> Option<char> {
        self.quotes
            .iter()
            .find_map(|&(open, close)| (open == c).then_some(close))
    }

    /// Whether `rest` starts with a comment prefix.
    #[inline]
    pub fn starts_comment(&self, rest: &str) -> bool {
        self.comment_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && rest.starts_with(prefix.as_str()))
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            separator: ';',
            delimiters: vec![' ', '\t'],
            comment_prefixes: vec!["//".to_string(), "#".to_string()],
            quotes: vec![('"', '"'), ('\'', '\'')],
        }
    }
}

#[cfg(test)]
mod tests;
