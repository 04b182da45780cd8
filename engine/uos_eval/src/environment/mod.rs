//! Variable scoping for a running script.
//!
//! Uses a scope stack: `if`, `while`, `for` and `foreach` push a frame when
//! entered and pop it when left. A loop re-entering its own opener reuses its
//! frame, which is how the frame keeps the loop cursor between iterations.

use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::debug;
use uos_ir::NodeId;

use crate::Value;

/// A single scope frame.
#[derive(Clone, Debug)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    /// The statement that opened this frame, `INVALID` for the root frame.
    start_node: NodeId,
    /// Iteration cursor of the loop that owns this frame.
    pub loop_index: usize,
    /// When the current loop iteration began.
    pub iteration_started: Instant,
}

impl Scope {
    fn new(start_node: NodeId) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            start_node,
            loop_index: 0,
            iteration_started: Instant::now(),
        }
    }

    /// The statement that opened this frame.
    #[inline]
    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }
}

/// Scope stack of one running script.
///
/// The root frame is never popped.
#[derive(Clone, Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new(NodeId::INVALID)],
        }
    }

    /// Push a frame opened by `start_node`.
    pub fn push_scope(&mut self, start_node: NodeId) {
        debug!(?start_node, depth = self.scopes.len(), "push scope");
        self.scopes.push(Scope::new(start_node));
    }

    /// Pop the innermost frame. The root frame stays.
    pub fn pop_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() <= 1 {
            return None;
        }
        let scope = self.scopes.pop();
        debug!(depth = self.scopes.len(), "pop scope");
        scope
    }

    /// Number of frames, the root included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// The innermost frame.
    #[inline]
    pub fn current(&self) -> &Scope {
        // The root frame is never removed.
        &self.scopes[self.scopes.len() - 1]
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Whether the innermost frame was opened by `node`.
    #[inline]
    pub fn is_current_start(&self, node: NodeId) -> bool {
        self.current().start_node == node
    }

    /// Define a variable in the innermost frame.
    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.current_mut().define(name, value);
    }

    /// Look a variable up, innermost frame first.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Drop every frame but a fresh root.
    pub fn reset(&mut self) {
        self.scopes.clear();
        self.scopes.push(Scope::new(NodeId::INVALID));
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
