//! Line tokenizer for UOS scripts.
//!
//! Scripts are line oriented: every physical line holds one or more
//! statements separated by the statement separator, and every statement is a
//! flat list of lexemes. There is no token-kind vocabulary at this level;
//! the parser decides what a lexeme means from its position.
//!
//! # Pipeline
//!
//! ```text
//! physical line ──split_statements──▶ logical lines ──tokenize──▶ lexemes
//! ```
//!
//! Both stages honor quoting, and tokenizing also truncates at comment
//! prefixes. All separators, delimiters, comment prefixes and quote pairs
//! come from [`LexerConfig`].

mod config;
mod lex_error;
mod scanner;

pub use config::LexerConfig;
pub use lex_error::{LexError, LexErrorKind};
pub use scanner::{Lexeme, LexemeKind, Lexer, LogicalLine};
