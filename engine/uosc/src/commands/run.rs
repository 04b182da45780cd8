//! The `run` command: load scripts into one host and tick them to the end.

use std::time::Duration;

use tracing::{debug, info};
use uos_eval::{EngineConfig, Interpreter, ScriptHost, DEFAULT_MIN_LOOP_ITERATION};

use super::read_file;
use crate::{parse_millis, CliError};

/// How the host loop is driven.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Sleep between host ticks. Zero spins.
    pub tick: Duration,
    pub min_loop: Duration,
    pub isolate: bool,
    /// Give up after this many ticks.
    pub max_ticks: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            tick: Duration::from_millis(10),
            min_loop: DEFAULT_MIN_LOOP_ITERATION,
            isolate: false,
            max_ticks: None,
        }
    }
}

impl RunOptions {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            min_loop_iteration: self.min_loop,
            isolation: self.isolate,
            ..EngineConfig::default()
        }
    }
}

/// Split `run` arguments into options and script paths.
///
/// ```text
/// --tick-ms=<ms>       sleep between ticks (default 10)
/// --min-loop-ms=<ms>   minimum loop iteration time (default 25)
/// --max-ticks=<n>      stop with an error after n ticks
/// --isolate            start every script in its own namespace
/// ```
pub fn parse_run_options(args: &[String]) -> Result<(RunOptions, Vec<String>), CliError> {
    let mut options = RunOptions::default();
    let mut paths = Vec::new();
    for arg in args {
        if let Some(value) = arg.strip_prefix("--tick-ms=") {
            options.tick = parse_millis("tick-ms", value)?;
        } else if let Some(value) = arg.strip_prefix("--min-loop-ms=") {
            options.min_loop = parse_millis("min-loop-ms", value)?;
        } else if let Some(value) = arg.strip_prefix("--max-ticks=") {
            let ticks = value.parse::<u64>().map_err(|_| CliError::InvalidOption {
                flag: "max-ticks",
                value: value.to_string(),
            })?;
            options.max_ticks = Some(ticks);
        } else if arg == "--isolate" {
            options.isolate = true;
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownOption(arg.clone()));
        } else {
            paths.push(arg.clone());
        }
    }
    Ok((options, paths))
}

/// Run script files side by side, printing their output to stdout.
pub fn run_files(paths: &[String], options: &RunOptions) -> Result<(), CliError> {
    let sources = paths
        .iter()
        .map(|path| Ok((path.clone(), read_file(path)?)))
        .collect::<Result<Vec<_>, CliError>>()?;
    run_scripts(&mut ScriptHost::new(), &sources, options)
}

/// Load `(name, source)` pairs into `host`, start all of them and tick
/// until every script has stopped.
///
/// Fails if any script ended with a runtime error. Its message has already
/// gone to the host's output channel by then.
pub fn run_scripts(
    host: &mut ScriptHost,
    sources: &[(String, String)],
    options: &RunOptions,
) -> Result<(), CliError> {
    if sources.is_empty() {
        return Err(CliError::NoScript);
    }
    host.set_config(options.engine_config());
    for (name, source) in sources {
        host.load(name, source).map_err(|errors| CliError::Syntax {
            path: name.clone(),
            errors,
        })?;
    }
    for (name, _) in sources {
        host.run(name)?;
    }

    let mut ticks = 0u64;
    while host.tick() {
        ticks += 1;
        if options.max_ticks.is_some_and(|max| ticks >= max) {
            return Err(CliError::TickLimit { ticks });
        }
        if !options.tick.is_zero() {
            std::thread::sleep(options.tick);
        }
    }
    debug!(ticks, "all scripts stopped");

    let failed = sources
        .iter()
        .filter(|(name, _)| {
            host.interpreter(name)
                .and_then(Interpreter::last_error)
                .is_some()
        })
        .count();
    if failed > 0 {
        return Err(CliError::ScriptsFailed {
            failed,
            total: sources.len(),
        });
    }
    info!(scripts = sources.len(), ticks, "run finished");
    Ok(())
}
