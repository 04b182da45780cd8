//! The `check` command: parse a script without running it.

use uos_lexer::LexerConfig;

use super::read_file;
use crate::CliError;

/// Parse `path` and report every syntax error.
///
/// Returns the number of statements on success.
pub fn check_file(path: &str) -> Result<usize, CliError> {
    let source = read_file(path)?;
    let tree = uos_parse::parse(&source, &LexerConfig::default()).map_err(|errors| {
        CliError::Syntax {
            path: path.to_string(),
            errors,
        }
    })?;
    Ok(tree.statements().len())
}
