//! Statement splitting and lexeme scanning.

use tracing::trace;

use crate::{LexError, LexErrorKind, LexerConfig};

/// How a lexeme was written in the source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexemeKind {
    /// Bare text. Keywords and operators are only recognized in words.
    Word,
    /// A fully quoted run; the quotes are not part of the text.
    Quoted,
}

/// A single lexeme of one statement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Lexeme {
    pub text: String,
    pub kind: LexemeKind,
}

impl Lexeme {
    pub fn word(text: impl Into<String>) -> Self {
        Lexeme {
            text: text.into(),
            kind: LexemeKind::Word,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Lexeme {
            text: text.into(),
            kind: LexemeKind::Quoted,
        }
    }

    /// Whether this is the bare word `text`.
    #[inline]
    pub fn is_word(&self, text: &str) -> bool {
        self.kind == LexemeKind::Word && self.text == text
    }
}

/// The lexemes of one statement, tagged with its physical line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogicalLine {
    pub line: u32,
    pub lexemes: Vec<Lexeme>,
}

/// Tokenizer over script text, driven by a [`LexerConfig`].
#[derive(Clone, Copy, Debug)]
pub struct Lexer<'c> {
    config: &'c LexerConfig,
}

impl<'c> Lexer<'c> {
    pub fn new(config: &'c LexerConfig) -> Self {
        Lexer { config }
    }

    /// Lex a whole script. Blank and comment-only statements are dropped.
    pub fn lex(&self, source: &str) -> Result<Vec<LogicalLine>, LexError> {
        let mut out = Vec::new();
        for (index, physical) in source.lines().enumerate() {
            let line = u32::try_from(index + 1).unwrap_or(u32::MAX);
            out.extend(self.lex_line(line, physical)?);
        }
        Ok(out)
    }

    /// Lex one physical line into its non-empty logical lines.
    pub fn lex_line(&self, line: u32, physical: &str) -> Result<Vec<LogicalLine>, LexError> {
        let mut out = Vec::new();
        for statement in self.split_statements(physical) {
            let lexemes = self.tokenize(line, statement)?;
            if !lexemes.is_empty() {
                trace!(line, count = lexemes.len(), "lexed statement");
                out.push(LogicalLine { line, lexemes });
            }
        }
        Ok(out)
    }

    /// Split a physical line on the statement separator.
    ///
    /// Separators inside a quoted run do not split. A comment outside
    /// quotes ends the line, separators in it included.
    pub fn split_statements<'s>(&self, physical: &'s str) -> Vec<&'s str> {
        let separator = self.config.separator;
        if separator.is_ascii() && self.config.quotes.iter().all(|&(open, _)| open.is_ascii()) {
            let bytes = physical.as_bytes();
            let has_quote = self
                .config
                .quotes
                .iter()
                .any(|&(open, _)| memchr::memchr(ascii_byte(open), bytes).is_some());
            if !has_quote {
                let code = match self.comment_start(physical) {
                    Some(at) => &physical[..at],
                    None => physical,
                };
                return code.split(separator).collect();
            }
        }

        let mut parts = Vec::new();
        let mut start = 0;
        let mut end = physical.len();
        let mut closing: Option<char> = None;
        for (i, c) in physical.char_indices() {
            match closing {
                Some(close) if c == close => closing = None,
                Some(_) => {}
                None if c == separator => {
                    parts.push(&physical[start..i]);
                    start = i + c.len_utf8();
                }
                None if self.config.starts_comment(&physical[i..]) => {
                    end = i;
                    break;
                }
                None => closing = self.config.closing_quote(c),
            }
        }
        parts.push(&physical[start..end]);
        parts
    }

    /// Byte offset of the earliest comment prefix in quote-free text.
    fn comment_start(&self, text: &str) -> Option<usize> {
        self.config
            .comment_prefixes
            .iter()
            .filter(|prefix| !prefix.is_empty())
            .filter_map(|prefix| text.find(prefix.as_str()))
            .min()
    }

    /// Split one logical line into lexemes.
    ///
    /// A quoted run that makes up a whole lexeme yields a [`LexemeKind::Quoted`]
    /// lexeme without its quotes. A quoted run inside a word keeps its quotes.
    /// A doubled closing quote inside a run is a literal quote character.
    pub fn tokenize(&self, line: u32, text: &str) -> Result<Vec<Lexeme>, LexError> {
        let mut lexemes = Vec::new();
        let mut current = String::new();
        let mut in_token = false;
        let mut kind = LexemeKind::Word;
        let mut chars = text.char_indices().peekable();
        let mut column: u32 = 0;

        while let Some((i, c)) = chars.next() {
            column = column.saturating_add(1);
            if let Some(close) = self.config.closing_quote(c) {
                let open_column = column;
                let mut body = String::new();
                let mut closed = false;
                while let Some((_, d)) = chars.next() {
                    column = column.saturating_add(1);
                    if d == close {
                        if chars.peek().map(|&(_, next)| next) == Some(close) {
                            chars.next();
                            column = column.saturating_add(1);
                            body.push(close);
                            continue;
                        }
                        closed = true;
                        break;
                    }
                    body.push(d);
                }
                if !closed {
                    return Err(LexError::new(
                        line,
                        open_column,
                        LexErrorKind::UnterminatedQuote { quote: close },
                    ));
                }
                if in_token {
                    current.push(c);
                    current.push_str(&body);
                    current.push(close);
                    kind = LexemeKind::Word;
                } else {
                    current = body;
                    kind = LexemeKind::Quoted;
                    in_token = true;
                }
                continue;
            }

            if self.config.is_delimiter(c) {
                flush(&mut lexemes, &mut current, &mut in_token, &mut kind);
                continue;
            }

            if self.config.starts_comment(&text[i..]) {
                break;
            }

            if kind == LexemeKind::Quoted {
                // Text glued to the end of a quoted run demotes it to a word.
                kind = LexemeKind::Word;
            }
            current.push(c);
            in_token = true;
        }

        flush(&mut lexemes, &mut current, &mut in_token, &mut kind);
        Ok(lexemes)
    }
}

fn flush(lexemes: &mut Vec<Lexeme>, current: &mut String, in_token: &mut bool, kind: &mut LexemeKind) {
    if *in_token {
        lexemes.push(Lexeme {
            text: std::mem::take(current),
            kind: *kind,
        });
    }
    *in_token = false;
    *kind = LexemeKind::Word;
}

#[inline]
fn ascii_byte(c: char) -> u8 {
    u8::try_from(u32::from(c)).unwrap_or(0)
}

#[cfg(test)]
mod tests;
