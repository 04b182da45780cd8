//! Parser for UOS scripts.
//!
//! Turns script text into a [`SyntaxTree`]. There is no further compilation:
//! the interpreter walks the tree directly, scanning sibling statements to
//! find the other end of a block.
//!
//! Syntax is checked eagerly. Block structure (matching `if`/`endif`,
//! `while`/`endwhile`, `for`/`endfor`, `break` and `continue` inside loops)
//! is validated while parsing, so a script that loads will never hit an
//! unmatched keyword at run time.

mod error;
mod grammar;
mod structure;

pub use error::{ParseError, ParseErrorKind, ParseErrors};
pub use grammar::{classify_value, split_modifiers, Parser, FORCE_MARKER, QUIET_MARKER};
pub use structure::BlockStack;

use uos_ir::SyntaxTree;
use uos_lexer::LexerConfig;

/// Parse a script with the given lexer configuration.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse(source: &str, config: &LexerConfig) -> Result<SyntaxTree, ParseErrors> {
    Parser::new(config).parse(source)
}
