//! Cooperative tree-walking interpreter.
//!
//! # Driving a script
//!
//! ```text
//! load_script(source)      parse, keep the tree
//! start_script()           cursor at the first statement, RUNNING
//! execute_script()         one statement per call; false once done
//! ```
//!
//! Between ticks the host may `suspend()` and `resume()`. Nothing in here
//! sleeps: `pause`, timeouts and the loop floor only decide whether the next
//! tick does anything.
//!
//! # Submodules
//!
//! - `builder`: `InterpreterBuilder`
//! - `compiled_script`: tree, scope stack and cursor of a loaded script
//! - `control`: statement execution and block scans
//! - `expr`: conditions and handler calls

mod builder;
mod compiled_script;
mod control;
mod expr;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};
use uos_ir::SyntaxTree;
use uos_parse::ParseErrors;

pub use builder::InterpreterBuilder;
pub use compiled_script::CompiledScript;

use crate::errors::{ControlAction, EvalResult};
use crate::state::{ExecutionState, Gate};
use crate::{EngineContext, EvalError, Invocation, SharedPrintHandler, Value};
use control::Machine;

/// Runs one script at a time, one statement per tick.
pub struct Interpreter {
    ctx: EngineContext,
    loaded: Option<Arc<SyntaxTree>>,
    script: Option<CompiledScript>,
    last_error: Option<EvalError>,
}

impl Interpreter {
    /// An interpreter with default settings and the built-in commands.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub(crate) fn from_context(ctx: EngineContext) -> Self {
        Interpreter {
            ctx,
            loaded: None,
            script: None,
            last_error: None,
        }
    }

    #[inline]
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    #[inline]
    pub fn output(&self) -> &SharedPrintHandler {
        self.ctx.output()
    }

    pub fn register_command<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut EngineContext, &Invocation<'_>) -> EvalResult<bool> + Send + Sync + 'static,
    {
        self.ctx.handlers_mut().register_command(name, handler);
    }

    pub fn register_expression<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut EngineContext, &Invocation<'_>) -> EvalResult<Value> + Send + Sync + 'static,
    {
        self.ctx.handlers_mut().register_expression(name, handler);
    }

    pub fn register_alias<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&EngineContext, &str) -> Option<u32> + Send + Sync + 'static,
    {
        self.ctx.handlers_mut().register_alias(name, handler);
    }

    /// Parse `source` and keep it as the script to run.
    ///
    /// Replaces any previously loaded script; a running one is stopped.
    /// On a syntax error nothing is loaded.
    pub fn load_script(&mut self, source: &str) -> Result<(), ParseErrors> {
        let tree = uos_parse::parse(source, &self.ctx.config().lexer)?;
        self.load_tree(tree);
        Ok(())
    }

    /// Keep an already parsed tree as the script to run.
    pub fn load_tree(&mut self, tree: SyntaxTree) {
        self.stop_script();
        self.loaded = Some(Arc::new(tree));
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Start the loaded script from its first statement.
    ///
    /// Returns `false` if nothing is loaded.
    pub fn start_script(&mut self) -> bool {
        let Some(tree) = &self.loaded else {
            return false;
        };
        debug!(script = ?self.ctx.script_name(), "start script");
        self.script = Some(CompiledScript::new(Arc::clone(tree)));
        self.last_error = None;
        self.reset_state();
        true
    }

    /// Stop the running script, dropping any pause, timeout or suspension.
    pub fn stop_script(&mut self) {
        if self.script.take().is_some() {
            debug!(script = ?self.ctx.script_name(), "stop script");
        }
        self.reset_state();
    }

    fn reset_state(&mut self) {
        *self.ctx.state_mut() = ExecutionState::Running;
        self.ctx.take_pending();
    }

    /// Run one tick.
    ///
    /// Returns `true` while the script is still going, including ticks that
    /// did nothing because it is paused, timing out or suspended. Returns
    /// `false` once it finished, stopped or failed; a failure is printed to
    /// the output channel and kept in [`last_error`](Self::last_error).
    #[tracing::instrument(level = "debug", skip_all, fields(script = ?self.ctx.script_name()))]
    pub fn execute_script(&mut self) -> bool {
        let Some(mut script) = self.script.take() else {
            return false;
        };

        match self.ctx.state_mut().poll(Instant::now()) {
            Gate::Wait => {
                self.script = Some(script);
                return true;
            }
            Gate::Expired(callback) => {
                let skip = callback.is_some_and(|callback| callback(&mut self.ctx));
                debug!(skip, "timeout expired");
                if skip {
                    if let Some(statement) = script.cursor() {
                        script.advance_from(statement);
                    }
                }
                self.script = Some(script);
                return true;
            }
            Gate::Run => {}
        }

        let Some(statement) = script.cursor() else {
            debug!("script finished");
            self.reset_state();
            return false;
        };

        match Machine::new(&mut self.ctx, &mut script).execute(statement) {
            Ok(()) => {}
            Err(ControlAction::Stop) => {
                debug!("script stopped");
                self.reset_state();
                return false;
            }
            Err(ControlAction::Error(err)) => {
                warn!(%err, "script failed");
                self.ctx.println(&err.to_string());
                self.last_error = Some(*err);
                self.reset_state();
                return false;
            }
        }

        let pending = self.ctx.take_pending();
        if pending.stop {
            debug!("script stopped itself");
            self.reset_state();
            return false;
        }
        if pending.suspend {
            self.ctx.suspend();
        }
        if script.cursor().is_none() {
            debug!("script finished");
            self.reset_state();
            return false;
        }
        self.script = Some(script);
        true
    }

    /// Hold the script until [`resume`](Self::resume).
    pub fn suspend(&mut self) {
        self.ctx.suspend();
    }

    pub fn resume(&mut self) {
        self.ctx.resume();
    }

    /// Whether a script is attached.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.script.is_some()
    }

    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.script.is_some() && self.ctx.state().is_suspended()
    }

    #[inline]
    pub fn state(&self) -> &ExecutionState {
        self.ctx.state()
    }

    /// The error that ended the last run, if it failed.
    #[inline]
    pub fn last_error(&self) -> Option<&EvalError> {
        self.last_error.as_ref()
    }

    /// The running script.
    #[inline]
    pub fn script(&self) -> Option<&CompiledScript> {
        self.script.as_ref()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("ctx", &self.ctx)
            .field("loaded", &self.loaded.is_some())
            .field("running", &self.script.is_some())
            .field("last_error", &self.last_error)
            .finish()
    }
}

#[cfg(test)]
mod tests;
