//! A loaded script ready to step.

use std::sync::Arc;

use uos_ir::{NodeId, SyntaxTree};

use crate::Environment;

/// A parsed script with its scope stack and statement cursor.
///
/// The tree is shared so a script can be restarted without parsing again.
#[derive(Clone, Debug)]
pub struct CompiledScript {
    tree: Arc<SyntaxTree>,
    env: Environment,
    cursor: Option<NodeId>,
}

impl CompiledScript {
    /// A script positioned at its first statement.
    pub fn new(tree: Arc<SyntaxTree>) -> Self {
        let cursor = tree.statements().first().copied();
        CompiledScript {
            tree,
            env: Environment::new(),
            cursor,
        }
    }

    #[inline]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// The next statement to run, `None` once the script is done.
    #[inline]
    pub fn cursor(&self) -> Option<NodeId> {
        self.cursor
    }

    #[inline]
    pub(crate) fn jump(&mut self, statement: NodeId) {
        self.cursor = Some(statement);
    }

    /// Move to the statement after `statement`.
    #[inline]
    pub(crate) fn advance_from(&mut self, statement: NodeId) {
        self.cursor = self.tree.next_sibling(statement);
    }

    /// Run off the end of the script.
    #[inline]
    pub(crate) fn finish(&mut self) {
        self.cursor = None;
    }

    /// Back to the first statement with a fresh scope stack.
    pub fn rewind(&mut self) {
        self.cursor = self.tree.statements().first().copied();
        self.env.reset();
    }

    /// Payload of a statement: its first child.
    #[inline]
    pub(crate) fn payload(&self, statement: NodeId) -> Option<NodeId> {
        self.tree.first_child(statement)
    }
}
