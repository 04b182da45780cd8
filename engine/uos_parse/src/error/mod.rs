//! Parse error types.
//!
//! Every error is a syntax error of the script being loaded. Errors carry:
//! - the 1-based line and the offending lexeme, when there is one
//! - the text of the last statement that parsed successfully, which is
//!   usually the quickest way to find the spot in a long script
//!
//! The parser collects all errors of a load into [`ParseErrors`].

use std::fmt;

use uos_lexer::{LexError, LexErrorKind};

/// What went wrong while parsing a statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A quoted run was never closed.
    UnterminatedQuote { quote: char },
    /// A keyword that takes no arguments was given some.
    UnexpectedArguments { keyword: &'static str },
    /// A modifier with nothing to modify (`@`, `!`, `@!`).
    MissingCommand,
    /// `if`, `elseif` or `while` without a condition.
    EmptyExpression { keyword: &'static str },
    /// A side of a comparison or of `and`/`or` is missing.
    MissingOperand,
    /// More than one relational operator in one comparison.
    MultipleOperators,
    /// Something that looks like an operator but is not one.
    InvalidOperator { operator: String },
    /// A `for` line that matches none of the loop forms.
    InvalidForLoop,
    /// `for a to b` with `b < a`.
    NegativeTripCount { start: i64, end: i64 },
    /// `for a to b in list` where `b` is not an integer.
    RangeEndNotInteger,
    /// `for a to b in list` with `a > b + 1`.
    InvertedRange { start: i64, end: i64 },
    /// A closer or continuation without its opener.
    UnmatchedKeyword {
        keyword: &'static str,
        expected: &'static str,
    },
    /// `elseif` following the `else` of the same block.
    ElseIfAfterElse,
    /// Two `else` branches in one block.
    DuplicateElse,
    /// `break` or `continue` outside any loop.
    OutsideLoop { keyword: &'static str },
    /// A block still open at the end of the script.
    UnclosedBlock { keyword: &'static str },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote { quote } => {
                write!(f, "unterminated quote, expected closing `{quote}`")
            }
            Self::UnexpectedArguments { keyword } => {
                write!(f, "`{keyword}` does not take arguments")
            }
            Self::MissingCommand => write!(f, "modifier without a command"),
            Self::EmptyExpression { keyword } => write!(f, "`{keyword}` requires a condition"),
            Self::MissingOperand => write!(f, "expression is missing an operand"),
            Self::MultipleOperators => {
                write!(f, "only one comparison operator is allowed per expression")
            }
            Self::InvalidOperator { operator } => {
                write!(f, "invalid comparison operator `{operator}`")
            }
            Self::InvalidForLoop => write!(
                f,
                "invalid for loop, expected `for n`, `for a to b`, `for a to list` or `for a to b in list`"
            ),
            Self::NegativeTripCount { start, end } => {
                write!(f, "for loop end {end} is less than its start {start}")
            }
            Self::RangeEndNotInteger => write!(f, "for loop range end must be an integer"),
            Self::InvertedRange { start, end } => {
                write!(f, "for loop range start {start} is past its end {end}")
            }
            Self::UnmatchedKeyword { keyword, expected } => {
                write!(f, "`{keyword}` without matching `{expected}`")
            }
            Self::ElseIfAfterElse => write!(f, "`elseif` cannot follow `else`"),
            Self::DuplicateElse => write!(f, "`if` block already has an `else`"),
            Self::OutsideLoop { keyword } => write!(f, "`{keyword}` outside of a loop"),
            Self::UnclosedBlock { keyword } => write!(f, "`{keyword}` block is never closed"),
        }
    }
}

/// A syntax error found while loading a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 1-based physical line.
    pub line: u32,
    /// The lexeme the error points at.
    pub lexeme: Option<String>,
    /// Source text of the last statement that parsed successfully.
    pub context: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: u32) -> Self {
        ParseError {
            kind,
            line,
            lexeme: None,
            context: None,
        }
    }

    #[must_use]
    pub fn with_lexeme(mut self, lexeme: impl Into<String>) -> Self {
        self.lexeme = Some(lexeme.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: Option<&str>) -> Self {
        self.context = context.map(str::to_string);
        self
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let kind = match err.kind {
            LexErrorKind::UnterminatedQuote { quote } => ParseErrorKind::UnterminatedQuote { quote },
        };
        ParseError::new(kind, err.line)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error on line {}: {}", self.line, self.kind)?;
        if let Some(lexeme) = &self.lexeme {
            write!(f, " (at `{lexeme}`)")?;
        }
        if let Some(context) = &self.context {
            write!(f, "; last statement: `{context}`")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Every syntax error of one failed load, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseErrors(Vec<ParseError>);

impl ParseErrors {
    pub fn new(errors: Vec<ParseError>) -> Self {
        ParseErrors(errors)
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }

    /// The first error, which is usually the root cause.
    pub fn first(&self) -> Option<&ParseError> {
        self.0.first()
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

#[cfg(test)]
mod tests;
