//! Lazy argument resolution.
//!
//! An [`Argument`] is just a leaf node of the running script. Nothing is
//! converted until a handler asks for a type, and nothing is cached.
//!
//! Resolution order:
//! 1. a scope variable of that name
//! 2. an alias, for numeric conversions only
//! 3. list element syntax, `name[index]`
//! 4. the literal itself

use tracing::trace;
use uos_ir::{NodeId, NodeKind};

use crate::errors::{cannot_convert, list_index_out_of_range, EvalResult};
use crate::{CompiledScript, EngineContext, Value};

/// An unresolved reference to a value node of a running script.
#[derive(Copy, Clone)]
pub struct Argument<'a> {
    script: &'a CompiledScript,
    node: NodeId,
}

impl<'a> Argument<'a> {
    pub fn new(script: &'a CompiledScript, node: NodeId) -> Self {
        Argument { script, node }
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The tag the parser guessed for this lexeme.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.script.tree().kind(self.node)
    }

    /// The raw lexeme, quotes removed.
    #[inline]
    pub fn lexeme(&self) -> &'a str {
        self.script.tree().lexeme(self.node).unwrap_or_default()
    }

    /// Resolve without alias lookup.
    pub fn resolve(&self, ctx: &EngineContext) -> EvalResult<Value> {
        self.lookup(ctx, false)
    }

    /// Resolve, trying aliases after scope variables.
    pub fn resolve_numeric(&self, ctx: &EngineContext) -> EvalResult<Value> {
        self.lookup(ctx, true)
    }

    pub fn as_int(&self, ctx: &EngineContext) -> EvalResult<i32> {
        self.resolve_numeric(ctx)?.to_int()
    }

    pub fn as_uint(&self, ctx: &EngineContext) -> EvalResult<u32> {
        self.resolve_numeric(ctx)?.to_uint()
    }

    pub fn as_ushort(&self, ctx: &EngineContext) -> EvalResult<u16> {
        self.resolve_numeric(ctx)?.to_ushort()
    }

    pub fn as_double(&self, ctx: &EngineContext) -> EvalResult<f64> {
        self.resolve_numeric(ctx)?.to_double()
    }

    /// An object handle. Text held in a variable may itself be an alias name.
    pub fn as_serial(&self, ctx: &EngineContext) -> EvalResult<u32> {
        let value = self.resolve_numeric(ctx)?;
        match value.to_serial() {
            Ok(serial) => Ok(serial),
            Err(err) => match &value {
                Value::Str(text) => ctx.alias(text).ok_or(err),
                _ => Err(err),
            },
        }
    }

    /// Text form. Literals come back exactly as written.
    pub fn as_string(&self, ctx: &EngineContext) -> EvalResult<String> {
        if let Some(value) = self.variable(ctx)? {
            return Ok(value.to_string());
        }
        Ok(self.lexeme().to_string())
    }

    pub fn as_bool(&self, ctx: &EngineContext) -> EvalResult<bool> {
        self.resolve(ctx)?.to_bool()
    }

    fn lookup(&self, ctx: &EngineContext, aliases: bool) -> EvalResult<Value> {
        let lexeme = self.lexeme();
        if let Some(value) = self.script.env().lookup(lexeme) {
            trace!(lexeme, %value, "argument from scope");
            return Ok(value.clone());
        }
        if aliases {
            if let Some(serial) = ctx.alias(lexeme) {
                trace!(lexeme, serial, "argument from alias");
                return Ok(Value::Serial(serial));
            }
        }
        if let Some(value) = self.list_element(ctx)? {
            return Ok(value);
        }
        Ok(Value::from_literal(self.kind(), lexeme))
    }

    /// Scope variable or list element, skipping aliases and literals.
    fn variable(&self, ctx: &EngineContext) -> EvalResult<Option<Value>> {
        if let Some(value) = self.script.env().lookup(self.lexeme()) {
            return Ok(Some(value.clone()));
        }
        self.list_element(ctx)
    }

    /// `name[index]` where `name` is a list of the active namespace.
    ///
    /// The index is an integer or a scope variable. Anything not shaped like
    /// that, or naming no list, is not a list element.
    fn list_element(&self, ctx: &EngineContext) -> EvalResult<Option<Value>> {
        let Some((name, index)) = split_index(self.lexeme()) else {
            return Ok(None);
        };
        let index = match index.parse::<i64>() {
            Ok(i) => i,
            Err(_) => match self.script.env().lookup(index) {
                Some(value) => i64::from(value.to_int()?),
                None => return Ok(None),
            },
        };
        ctx.with_namespace(|ns| {
            let Some(list) = ns.list(name) else {
                return Ok(None);
            };
            let at = usize::try_from(index)
                .map_err(|_| cannot_convert(&index.to_string(), "list index"))?;
            match list.get(at) {
                Some(value) => {
                    trace!(name, at, %value, "argument from list");
                    Ok(Some(value.clone()))
                }
                None => Err(list_index_out_of_range(name, at, list.len())),
            }
        })
    }
}

impl std::fmt::Debug for Argument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Argument({} {:?})", self.kind(), self.lexeme())
    }
}

/// Split `name[index]` into its parts. Both must be non-empty.
fn split_index(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_suffix(']')?;
    let open = inner.find('[')?;
    let (name, index) = (&inner[..open], &inner[open + 1..]);
    (!name.is_empty() && !index.is_empty()).then_some((name, index))
}
