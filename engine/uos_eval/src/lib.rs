//! UOS Eval - cooperative interpreter for UOS scripts.
//!
//! Walks the syntax tree produced by `uos_parse` one statement per tick.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Interpreter`: owns an `EngineContext` and the loaded `CompiledScript`
//! - `EngineContext`: dispatch tables, namespace registry handle, output
//!   channel and `ExecutionState`, passed to every handler
//! - `Environment`: variable scoping with a scope stack
//! - `Argument`: lazy resolution of handler arguments
//! - `NamespaceRegistry`: aliases, lists and timers by namespace
//! - `ScriptHost`: several named interpreters ticked together
//!
//! Handlers are plain closures registered by name. The built-in set covers
//! engine state only; everything else comes from the host.

mod argument;
pub mod builtins;
mod config;
mod context;
mod environment;
pub mod errors;
mod handlers;
pub mod host;
pub mod interpreter;
pub mod namespace;
mod print_handler;
mod shared;
pub mod state;
mod value;

// Re-export error constructors for convenience (canonical path is uos_eval::errors::*)
pub use errors::{
    // Dispatch errors
    unknown_command, unknown_expression,
    // Argument errors
    cannot_convert, invalid_argument, type_mismatch, unconsumed_arguments, wrong_arg_count,
    // State errors
    item_not_found, list_index_out_of_range, list_not_found, loop_beyond_list, namespace_exists,
    namespace_not_found, script_not_found, timer_not_found,
};
pub use errors::{ControlAction, EvalError, EvalErrorKind, EvalResult};

pub use argument::Argument;
pub use config::{EngineConfig, DEFAULT_MIN_LOOP_ITERATION};
pub use context::EngineContext;
pub use environment::{Environment, Scope};
pub use handlers::{AliasHandler, CommandHandler, ExpressionHandler, HandlerRegistry, Invocation};
pub use host::{ScriptHost, ScriptRequest, ScriptStatus, ScriptTable, SharedScriptTable};
pub use interpreter::{CompiledScript, Interpreter, InterpreterBuilder};
pub use namespace::{
    shared_namespaces, Category, MoveMode, Namespace, NamespaceRegistry, SharedNamespaces, Timer,
    GLOBAL_NAMESPACE,
};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use shared::SharedMutableRegistry;
pub use state::{ExecutionState, TimeoutCallback};
pub use value::{compare, loosely_equal, relational, Value};
