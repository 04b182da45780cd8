//! Everything a handler can reach while a script runs.

use std::time::Duration;

use tracing::debug;

use crate::host::SharedScriptTable;
use crate::namespace::{Namespace, SharedNamespaces, GLOBAL_NAMESPACE};
use crate::state::{ExecutionState, TimeoutCallback};
use crate::{EngineConfig, HandlerRegistry, SharedPrintHandler};

/// Self-directed requests a handler made during the current statement.
///
/// The interpreter applies them once the statement is done.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Pending {
    pub stop: bool,
    pub suspend: bool,
}

/// Engine state shared by the interpreter and every handler it calls.
pub struct EngineContext {
    config: EngineConfig,
    handlers: HandlerRegistry,
    namespaces: SharedNamespaces,
    active_namespace: String,
    isolation: bool,
    output: SharedPrintHandler,
    state: ExecutionState,
    pending: Pending,
    scripts: Option<SharedScriptTable>,
}

impl EngineContext {
    pub fn new(
        config: EngineConfig,
        handlers: HandlerRegistry,
        namespaces: SharedNamespaces,
        output: SharedPrintHandler,
        scripts: Option<SharedScriptTable>,
    ) -> Self {
        let mut ctx = EngineContext {
            isolation: false,
            config,
            handlers,
            namespaces,
            active_namespace: GLOBAL_NAMESPACE.to_string(),
            output,
            state: ExecutionState::Running,
            pending: Pending::default(),
            scripts,
        };
        let isolation = ctx.config.isolation;
        ctx.set_isolation(isolation);
        ctx
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the running script, if the host gave one.
    #[inline]
    pub fn script_name(&self) -> Option<&str> {
        self.config.script_name.as_deref()
    }

    #[inline]
    pub fn min_loop_iteration(&self) -> Duration {
        self.config.min_loop_iteration
    }

    // Handlers

    #[inline]
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    #[inline]
    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    // Namespaces

    #[inline]
    pub fn namespaces(&self) -> &SharedNamespaces {
        &self.namespaces
    }

    #[inline]
    pub fn active_namespace(&self) -> &str {
        &self.active_namespace
    }

    /// Make `name` the active namespace, creating it if needed.
    pub fn activate_namespace(&mut self, name: &str) {
        self.namespaces.with_write(|registry| {
            registry.get(name);
        });
        debug!(namespace = name, "activate namespace");
        self.active_namespace = name.to_string();
    }

    /// Run `f` on the active namespace under the read lock.
    ///
    /// A namespace deleted behind the script's back reads as empty.
    pub fn with_namespace<R>(&self, f: impl FnOnce(&Namespace) -> R) -> R {
        let registry = self.namespaces.read();
        match registry.find(&self.active_namespace) {
            Some(ns) => f(ns),
            None => f(&Namespace::default()),
        }
    }

    /// Run `f` on the active namespace under the write lock.
    pub fn with_namespace_mut<R>(&self, f: impl FnOnce(&mut Namespace) -> R) -> R {
        let mut registry = self.namespaces.write();
        f(registry.get(&self.active_namespace))
    }

    #[inline]
    pub fn isolation(&self) -> bool {
        self.isolation
    }

    /// Name of this script's own namespace.
    pub fn isolated_namespace(&self) -> Option<String> {
        self.config.isolated_namespace()
    }

    /// Switch between the global namespace and the script's own one.
    ///
    /// Only swaps while one of those two is active; an explicitly
    /// activated namespace stays active and just the flag is recorded.
    pub fn set_isolation(&mut self, isolation: bool) {
        self.isolation = isolation;
        let Some(own) = self.isolated_namespace() else {
            return;
        };
        if self.active_namespace != GLOBAL_NAMESPACE && self.active_namespace != own {
            return;
        }
        if isolation {
            self.activate_namespace(&own);
        } else {
            self.activate_namespace(GLOBAL_NAMESPACE);
        }
    }

    // Aliases

    /// Resolve an alias: registered alias handlers first, then the active
    /// namespace.
    pub fn alias(&self, name: &str) -> Option<u32> {
        if let Some(handler) = self.handlers.alias(name) {
            if let Some(serial) = handler(self, name) {
                return Some(serial);
            }
        }
        self.with_namespace(|ns| ns.alias(name))
    }

    pub fn set_alias(&self, name: &str, serial: u32) {
        self.with_namespace_mut(|ns| ns.set_alias(name, serial));
    }

    pub fn remove_alias(&self, name: &str) -> bool {
        self.with_namespace_mut(|ns| ns.remove_alias(name))
    }

    // Output

    #[inline]
    pub fn output(&self) -> &SharedPrintHandler {
        &self.output
    }

    #[inline]
    pub fn println(&self, msg: &str) {
        self.output.println(msg);
    }

    // Execution state

    #[inline]
    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    #[inline]
    pub(crate) fn state_mut(&mut self) -> &mut ExecutionState {
        &mut self.state
    }

    /// Pause for `duration`. Ignored unless running.
    pub fn pause(&mut self, duration: Duration) -> bool {
        self.state.pause(duration)
    }

    /// Wait up to `duration`, then run `on_expire`. Ignored unless running.
    pub fn timeout(
        &mut self,
        duration: Duration,
        on_expire: impl FnOnce(&mut EngineContext) -> bool + Send + 'static,
    ) -> bool {
        let callback: TimeoutCallback = Box::new(on_expire);
        self.state.timeout(duration, callback)
    }

    pub fn clear_timeout(&mut self) {
        self.state.clear_timeout();
    }

    pub fn suspend(&mut self) {
        self.state.suspend();
    }

    pub fn resume(&mut self) {
        self.state.resume();
    }

    // Self-directed script control

    /// Ask for the running script to stop once the current statement is done.
    pub fn request_stop(&mut self) {
        self.pending.stop = true;
    }

    /// Ask for the running script to suspend once the current statement is
    /// done.
    pub fn request_suspend(&mut self) {
        self.pending.suspend = true;
    }

    pub(crate) fn take_pending(&mut self) -> Pending {
        std::mem::take(&mut self.pending)
    }

    /// Table of all scripts of the host, when run under one.
    #[inline]
    pub fn scripts(&self) -> Option<&SharedScriptTable> {
        self.scripts.as_ref()
    }
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("script", &self.config.script_name)
            .field("active_namespace", &self.active_namespace)
            .field("isolation", &self.isolation)
            .field("state", &self.state)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}
