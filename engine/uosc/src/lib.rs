//! UOS command-line driver.
//!
//! The `uos` binary is a thin shell over the engine crates. Commands live in
//! [`commands`]; this crate root holds the error type they share and the
//! logging setup.

pub mod commands;
mod logging;

use std::time::Duration;

use uos_eval::EvalError;
use uos_lexer::LexError;
use uos_parse::ParseErrors;

pub use logging::init_tracing;

/// Everything a CLI command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },

    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },

    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },

    #[error("error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Lex {
        path: String,
        #[source]
        source: LexError,
    },

    #[error("{path}: {} syntax error(s)\n{errors}", .errors.len())]
    Syntax { path: String, errors: ParseErrors },

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for --{flag}")]
    InvalidOption { flag: &'static str, value: String },

    #[error("no script given")]
    NoScript,

    #[error("gave up after {ticks} ticks")]
    TickLimit { ticks: u64 },

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("{failed} of {total} script(s) failed")]
    ScriptsFailed { failed: usize, total: usize },
}

impl CliError {
    pub(crate) fn read(path: &str, err: std::io::Error) -> Self {
        let path = path.to_string();
        match err.kind() {
            std::io::ErrorKind::NotFound => CliError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            std::io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Io { path, source: err },
        }
    }
}

/// Parse a millisecond count option.
pub(crate) fn parse_millis(flag: &'static str, value: &str) -> Result<Duration, CliError> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| CliError::InvalidOption {
            flag,
            value: value.to_string(),
        })
}
