//! Command handlers for the `uos` CLI.
//!
//! Each submodule implements one command. Commands return `Result` and leave
//! printing the error and choosing the exit code to `main`.

mod check;
mod debug;
mod run;

pub use check::check_file;
pub use debug::{lex_file, parse_file, render_lexemes};
pub use run::{parse_run_options, run_files, run_scripts, RunOptions};

use crate::CliError;

/// Read a script from disk.
pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|err| CliError::read(path, err))
}
