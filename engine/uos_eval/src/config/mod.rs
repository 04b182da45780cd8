//! Engine configuration.

use std::path::Path;
use std::time::Duration;

use uos_lexer::LexerConfig;

/// Minimum time one loop iteration takes unless configured otherwise.
pub const DEFAULT_MIN_LOOP_ITERATION: Duration = Duration::from_millis(25);

/// Settings of one interpreter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub lexer: LexerConfig,
    /// A loop iteration faster than this pauses for the remainder at its
    /// closer. Zero disables the floor.
    pub min_loop_iteration: Duration,
    /// Start in the script's own namespace instead of the global one.
    pub isolation: bool,
    /// Script name, usually a file name. Its stem names the isolated
    /// namespace.
    pub script_name: Option<String>,
}

impl EngineConfig {
    /// Name of the isolated namespace: the file stem of the script name.
    pub fn isolated_namespace(&self) -> Option<String> {
        let name = self.script_name.as_deref()?;
        let stem = Path::new(name)
            .file_stem()
            .map_or_else(|| name.to_string(), |s| s.to_string_lossy().into_owned());
        (!stem.is_empty()).then_some(stem)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            lexer: LexerConfig::default(),
            min_loop_iteration: DEFAULT_MIN_LOOP_ITERATION,
            isolation: false,
            script_name: None,
        }
    }
}

#[cfg(test)]
mod tests;
