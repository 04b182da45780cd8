//! Running several named scripts side by side.
//!
//! Each script gets its own [`Interpreter`]. They share one namespace
//! registry, one output channel and one [`ScriptTable`], through which the
//! `script` command of one script asks the host to start or stop another.
//! Requests are applied between ticks, never in the middle of a statement.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};
use uos_parse::ParseErrors;

use crate::errors::{script_not_found, EvalResult};
use crate::namespace::{shared_namespaces, SharedNamespaces};
use crate::{
    stdout_handler, EngineConfig, HandlerRegistry, Interpreter, SharedMutableRegistry,
    SharedPrintHandler,
};

/// Where a script is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScriptStatus {
    Stopped,
    Running,
    Suspended,
}

impl ScriptStatus {
    pub fn name(self) -> &'static str {
        match self {
            ScriptStatus::Stopped => "stopped",
            ScriptStatus::Running => "running",
            ScriptStatus::Suspended => "suspended",
        }
    }
}

/// A lifecycle change one script asked for another.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScriptRequest {
    Run,
    Stop,
    Suspend,
    Resume,
}

impl ScriptRequest {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "run" => Some(ScriptRequest::Run),
            "stop" => Some(ScriptRequest::Stop),
            "suspend" => Some(ScriptRequest::Suspend),
            "resume" => Some(ScriptRequest::Resume),
            _ => None,
        }
    }
}

/// Status of every loaded script, plus requests waiting for the next tick.
#[derive(Debug, Default)]
pub struct ScriptTable {
    statuses: FxHashMap<String, ScriptStatus>,
    requests: Vec<(String, ScriptRequest)>,
}

impl ScriptTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn status(&self, name: &str) -> Option<ScriptStatus> {
        self.statuses.get(name).copied()
    }

    pub fn set_status(&mut self, name: impl Into<String>, status: ScriptStatus) {
        self.statuses.insert(name.into(), status);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.statuses.contains_key(name)
    }

    /// Queue a request for the host.
    pub fn request(&mut self, name: impl Into<String>, request: ScriptRequest) {
        self.requests.push((name.into(), request));
    }

    /// Queued requests, oldest first, leaving the queue empty.
    pub fn take_requests(&mut self) -> Vec<(String, ScriptRequest)> {
        std::mem::take(&mut self.requests)
    }
}

/// Script table shared by a host and its interpreters.
pub type SharedScriptTable = SharedMutableRegistry<ScriptTable>;

struct Slot {
    name: String,
    interpreter: Interpreter,
}

/// Owns named scripts and ticks them together.
pub struct ScriptHost {
    slots: Vec<Slot>,
    config: EngineConfig,
    handlers: HandlerRegistry,
    namespaces: SharedNamespaces,
    output: SharedPrintHandler,
    table: SharedScriptTable,
}

impl ScriptHost {
    /// A host printing to stdout with a fresh namespace registry.
    pub fn new() -> Self {
        Self::with_output(stdout_handler())
    }

    pub fn with_output(output: SharedPrintHandler) -> Self {
        ScriptHost {
            slots: Vec::new(),
            config: EngineConfig::default(),
            handlers: HandlerRegistry::new(),
            namespaces: shared_namespaces(),
            output,
            table: SharedScriptTable::default(),
        }
    }

    /// Settings for scripts loaded from now on. The script name is set per
    /// script.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Use `namespaces` for scripts loaded from now on.
    pub fn set_namespaces(&mut self, namespaces: SharedNamespaces) {
        self.namespaces = namespaces;
    }

    /// Handlers given to every script loaded from now on.
    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    #[inline]
    pub fn namespaces(&self) -> &SharedNamespaces {
        &self.namespaces
    }

    #[inline]
    pub fn output(&self) -> &SharedPrintHandler {
        &self.output
    }

    #[inline]
    pub fn table(&self) -> &SharedScriptTable {
        &self.table
    }

    /// Load a script under `name`, replacing one of the same name.
    ///
    /// The script is stopped until [`run`](Self::run).
    pub fn load(&mut self, name: &str, source: &str) -> Result<(), ParseErrors> {
        let mut config = self.config.clone();
        config.script_name = Some(name.to_string());
        let mut interpreter = Interpreter::builder()
            .config(config)
            .handlers(&self.handlers)
            .namespaces(self.namespaces.clone())
            .print_handler(self.output.clone())
            .script_table(self.table.clone())
            .build();
        interpreter.load_script(source)?;

        debug!(name, "load script");
        match self.slots.iter_mut().find(|slot| slot.name == name) {
            Some(slot) => slot.interpreter = interpreter,
            None => self.slots.push(Slot {
                name: name.to_string(),
                interpreter,
            }),
        }
        self.table
            .with_write(|table| table.set_status(name, ScriptStatus::Stopped));
        Ok(())
    }

    /// Names of the loaded scripts, in load order.
    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.name.as_str()).collect()
    }

    pub fn interpreter(&self, name: &str) -> Option<&Interpreter> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .map(|slot| &slot.interpreter)
    }

    fn slot_mut(&mut self, name: &str) -> EvalResult<&mut Interpreter> {
        self.slots
            .iter_mut()
            .find(|slot| slot.name == name)
            .map(|slot| &mut slot.interpreter)
            .ok_or_else(|| script_not_found(name))
    }

    /// Start a script from the top, restarting it if it runs.
    pub fn run(&mut self, name: &str) -> EvalResult<()> {
        self.apply(name, ScriptRequest::Run)
    }

    pub fn stop(&mut self, name: &str) -> EvalResult<()> {
        self.apply(name, ScriptRequest::Stop)
    }

    pub fn suspend(&mut self, name: &str) -> EvalResult<()> {
        self.apply(name, ScriptRequest::Suspend)
    }

    pub fn resume(&mut self, name: &str) -> EvalResult<()> {
        self.apply(name, ScriptRequest::Resume)
    }

    pub fn status(&self, name: &str) -> Option<ScriptStatus> {
        self.interpreter(name).map(status_of)
    }

    fn apply(&mut self, name: &str, request: ScriptRequest) -> EvalResult<()> {
        let interpreter = self.slot_mut(name)?;
        debug!(name, ?request, "script request");
        match request {
            ScriptRequest::Run => {
                interpreter.start_script();
            }
            ScriptRequest::Stop => interpreter.stop_script(),
            ScriptRequest::Suspend => {
                if interpreter.is_running() {
                    interpreter.suspend();
                }
            }
            ScriptRequest::Resume => interpreter.resume(),
        }
        let status = status_of(interpreter);
        self.table.with_write(|table| table.set_status(name, status));
        Ok(())
    }

    /// Tick every running script once, then apply queued requests.
    ///
    /// Returns whether any script is still running or suspended.
    pub fn tick(&mut self) -> bool {
        for slot in &mut self.slots {
            if slot.interpreter.is_running() {
                slot.interpreter.execute_script();
            }
        }

        let requests = self.table.with_write(ScriptTable::take_requests);
        for (name, request) in requests {
            if let Err(err) = self.apply(&name, request) {
                warn!(%err, "dropped script request");
            }
        }

        let mut active = false;
        self.table.with_write(|table| {
            for slot in &self.slots {
                let status = status_of(&slot.interpreter);
                active |= status != ScriptStatus::Stopped;
                table.set_status(slot.name.as_str(), status);
            }
        });
        active
    }
}

impl Default for ScriptHost {
    fn default() -> Self {
        Self::new()
    }
}

fn status_of(interpreter: &Interpreter) -> ScriptStatus {
    if !interpreter.is_running() {
        ScriptStatus::Stopped
    } else if interpreter.is_suspended() {
        ScriptStatus::Suspended
    } else {
        ScriptStatus::Running
    }
}
