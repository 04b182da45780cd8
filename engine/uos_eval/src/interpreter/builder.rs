//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::time::Duration;

use super::Interpreter;
use crate::host::SharedScriptTable;
use crate::namespace::{shared_namespaces, SharedNamespaces};
use crate::{builtins, stdout_handler, EngineConfig, EngineContext, HandlerRegistry, SharedPrintHandler};

/// Builder for creating Interpreter instances with various configurations.
///
/// Interpreters that should see each other's global aliases must be given
/// the same namespace registry.
pub struct InterpreterBuilder {
    config: EngineConfig,
    handlers: HandlerRegistry,
    namespaces: Option<SharedNamespaces>,
    print_handler: Option<SharedPrintHandler>,
    scripts: Option<SharedScriptTable>,
    builtins: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            handlers: HandlerRegistry::new(),
            namespaces: None,
            print_handler: None,
            scripts: None,
            builtins: true,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the minimum duration of one loop iteration.
    #[must_use]
    pub fn min_loop_iteration(mut self, floor: Duration) -> Self {
        self.config.min_loop_iteration = floor;
        self
    }

    /// Start in the script's own namespace.
    #[must_use]
    pub fn isolation(mut self, isolation: bool) -> Self {
        self.config.isolation = isolation;
        self
    }

    /// Set the script name. Its file stem names the isolated namespace.
    #[must_use]
    pub fn script_name(mut self, name: impl Into<String>) -> Self {
        self.config.script_name = Some(name.into());
        self
    }

    /// Share a namespace registry. Default is a fresh one.
    #[must_use]
    pub fn namespaces(mut self, namespaces: SharedNamespaces) -> Self {
        self.namespaces = Some(namespaces);
        self
    }

    /// Set the output channel. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Attach the script table of a host, for the `script` command.
    #[must_use]
    pub fn script_table(mut self, scripts: SharedScriptTable) -> Self {
        self.scripts = Some(scripts);
        self
    }

    /// Add host handlers. They win over built-ins of the same name.
    #[must_use]
    pub fn handlers(mut self, handlers: &HandlerRegistry) -> Self {
        self.handlers.extend(handlers);
        self
    }

    /// Leave out the built-in commands and expressions.
    #[must_use]
    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let mut handlers = HandlerRegistry::new();
        if self.builtins {
            builtins::register(&mut handlers);
        }
        handlers.extend(&self.handlers);

        let ctx = EngineContext::new(
            self.config,
            handlers,
            self.namespaces.unwrap_or_else(shared_namespaces),
            self.print_handler.unwrap_or_else(stdout_handler),
            self.scripts,
        );
        Interpreter::from_context(ctx)
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
