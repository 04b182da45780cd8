//! Dispatch tables for commands, expressions and alias resolvers.
//!
//! Everything a script can call by name is registered here. The core only
//! ships a handful of built-ins; a host adds the rest.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use uos_ir::NodeId;

use crate::errors::{invalid_argument, wrong_arg_count, EvalResult};
use crate::{Argument, EngineContext, Value};

/// A command. `Ok(true)` advances to the next statement; `Ok(false)` runs the
/// same statement again on the next tick.
pub type CommandHandler =
    Arc<dyn Fn(&mut EngineContext, &Invocation<'_>) -> EvalResult<bool> + Send + Sync>;

/// An expression usable in `if`/`while` conditions.
pub type ExpressionHandler =
    Arc<dyn Fn(&mut EngineContext, &Invocation<'_>) -> EvalResult<Value> + Send + Sync>;

/// Resolves an alias name to an object handle outside of any namespace.
pub type AliasHandler = Arc<dyn Fn(&EngineContext, &str) -> Option<u32> + Send + Sync>;

/// Handlers by name.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    commands: FxHashMap<String, CommandHandler>,
    expressions: FxHashMap<String, ExpressionHandler>,
    aliases: FxHashMap<String, AliasHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_command<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut EngineContext, &Invocation<'_>) -> EvalResult<bool> + Send + Sync + 'static,
    {
        self.commands.insert(name.into(), Arc::new(handler));
    }

    /// Register an expression, and a command of the same name that evaluates
    /// it and drops the result.
    pub fn register_expression<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut EngineContext, &Invocation<'_>) -> EvalResult<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let handler: ExpressionHandler = Arc::new(handler);
        let discard = Arc::clone(&handler);
        self.commands.insert(
            name.clone(),
            Arc::new(move |ctx: &mut EngineContext, inv: &Invocation<'_>| {
                discard(ctx, inv)?;
                Ok(true)
            }),
        );
        self.expressions.insert(name, handler);
    }

    pub fn register_alias<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&EngineContext, &str) -> Option<u32> + Send + Sync + 'static,
    {
        self.aliases.insert(name.into(), Arc::new(handler));
    }

    #[inline]
    pub fn command(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).cloned()
    }

    #[inline]
    pub fn expression(&self, name: &str) -> Option<ExpressionHandler> {
        self.expressions.get(name).cloned()
    }

    #[inline]
    pub fn alias(&self, name: &str) -> Option<AliasHandler> {
        self.aliases.get(name).cloned()
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn has_expression(&self, name: &str) -> bool {
        self.expressions.contains_key(name)
    }

    /// Copy every handler of `other` in, replacing same-named ones.
    pub fn extend(&mut self, other: &HandlerRegistry) {
        self.commands.extend(
            other
                .commands
                .iter()
                .map(|(k, v)| (k.clone(), Arc::clone(v))),
        );
        self.expressions.extend(
            other
                .expressions
                .iter()
                .map(|(k, v)| (k.clone(), Arc::clone(v))),
        );
        self.aliases.extend(
            other
                .aliases
                .iter()
                .map(|(k, v)| (k.clone(), Arc::clone(v))),
        );
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("commands", &self.commands.len())
            .field("expressions", &self.expressions.len())
            .field("aliases", &self.aliases.len())
            .finish()
    }
}

/// One call of a command or expression.
///
/// Tracks how many arguments the handler looked at. A handler that
/// finishes without reading all of them is an error.
pub struct Invocation<'a> {
    name: &'a str,
    node: NodeId,
    line: u32,
    args: Vec<Argument<'a>>,
    quiet: bool,
    force: bool,
    consumed: Cell<usize>,
}

impl<'a> Invocation<'a> {
    pub fn new(
        name: &'a str,
        node: NodeId,
        line: u32,
        args: Vec<Argument<'a>>,
        quiet: bool,
        force: bool,
    ) -> Self {
        Invocation {
            name,
            node,
            line,
            args,
            quiet,
            force,
            consumed: Cell::new(0),
        }
    }

    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The `COMMAND` or `OPERAND` node being invoked.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// `@` prefix: suppress informational output.
    #[inline]
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// `!` suffix: alternate behavior.
    #[inline]
    pub fn force(&self) -> bool {
        self.force
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The argument at `index`, if given.
    pub fn arg(&self, index: usize) -> Option<Argument<'a>> {
        let arg = self.args.get(index).copied()?;
        self.mark(index + 1);
        Some(arg)
    }

    /// The argument at `index`; missing is an argument error.
    pub fn require(&self, index: usize) -> EvalResult<Argument<'a>> {
        self.arg(index).ok_or_else(|| {
            invalid_argument(self.name, format!("missing argument {}", index + 1))
        })
    }

    /// All arguments from `from` on.
    pub fn rest(&self, from: usize) -> &[Argument<'a>] {
        self.mark(self.args.len());
        self.args.get(from..).unwrap_or_default()
    }

    /// Fail unless `min..=max` arguments were given. `expected` describes
    /// the range for the message, like `"1"` or `"2 to 3"`.
    pub fn expect_count(&self, min: usize, max: usize, expected: &'static str) -> EvalResult<()> {
        let got = self.args.len();
        if got < min || got > max {
            return Err(wrong_arg_count(self.name, expected, got));
        }
        Ok(())
    }

    /// Arguments the handler never read.
    pub fn unconsumed(&self) -> usize {
        self.args.len().saturating_sub(self.consumed.get())
    }

    fn mark(&self, upto: usize) {
        if upto > self.consumed.get() {
            self.consumed.set(upto);
        }
    }
}

impl fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("name", &self.name)
            .field("line", &self.line)
            .field("args", &self.args.len())
            .field("quiet", &self.quiet)
            .field("force", &self.force)
            .finish_non_exhaustive()
    }
}
