//! Lexer error types.

use std::fmt;

/// A lexer error with its location.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// 1-based physical line.
    pub line: u32,
    /// 1-based character column within the logical line.
    pub column: u32,
    /// What went wrong.
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A quoted run was never closed.
    UnterminatedQuote { quote: char },
}

impl LexError {
    pub fn new(line: u32, column: u32, kind: LexErrorKind) -> Self {
        LexError { line, column, kind }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote { quote } => {
                write!(f, "unterminated quote, expected closing `{quote}`")
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}:{}: {}", self.line, self.column, self.kind)
    }
}

impl std::error::Error for LexError {}
