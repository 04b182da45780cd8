//! Arena-backed syntax tree.
//!
//! Every node of a parsed script lives in one contiguous `Vec<Node>` owned by
//! [`SyntaxTree`]. Links between nodes are [`NodeId`] handles:
//! - `children` is the only ownership edge (parent → child)
//! - `parent` and the node's `position` inside its parent are back-references
//!   used for navigation, which makes next/previous sibling lookups O(1)
//!
//! Detaching a child keeps the node in the arena (ids stay stable) but unlinks
//! it from its parent, so it is no longer reachable by traversal.

use std::fmt::Write;

use smallvec::SmallVec;

use crate::{NodeId, NodeKind};

/// Ordered child list of a node.
///
/// Most nodes have at most a handful of children (a command and its
/// arguments), so they are stored inline.
pub type Children = SmallVec<[NodeId; 4]>;

/// A single syntax tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    lexeme: Option<Box<str>>,
    line: u32,
    parent: NodeId,
    position: u32,
    children: Children,
}

impl Node {
    /// The node's tag.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The source lexeme, if the node carries one.
    #[inline]
    pub fn lexeme(&self) -> Option<&str> {
        self.lexeme.as_deref()
    }

    /// 1-based source line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Child handles in source order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena that owns every node of one parsed script.
///
/// The root is always a [`NodeKind::Script`] node created by [`SyntaxTree::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    /// Create a tree containing only the `Script` root.
    pub fn new() -> Self {
        SyntaxTree {
            nodes: vec![Node {
                kind: NodeKind::Script,
                lexeme: None,
                line: 0,
                parent: NodeId::INVALID,
                position: 0,
                children: Children::new(),
            }],
        }
    }

    /// The `Script` root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Number of nodes in the arena, detached nodes included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// Append a new node as the last child of `parent`.
    pub fn push(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        lexeme: Option<&str>,
        line: u32,
    ) -> NodeId {
        let id = NodeId::new(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX - 1));
        let position =
            u32::try_from(self.nodes[parent.index()].children.len()).unwrap_or(u32::MAX);
        self.nodes.push(Node {
            kind,
            lexeme: lexeme.map(Box::from),
            line,
            parent,
            position,
            children: Children::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Unlink the child at `position` from `parent`.
    ///
    /// Later siblings shift down by one. Returns the detached node, which
    /// stays in the arena but is no longer reachable by traversal.
    pub fn detach_child(&mut self, parent: NodeId, position: usize) -> Option<NodeId> {
        let children = &mut self.nodes[parent.index()].children;
        if position >= children.len() {
            return None;
        }
        let removed = children.remove(position);
        let shifted: Vec<NodeId> = children[position..].to_vec();
        for sibling in shifted {
            self.nodes[sibling.index()].position -= 1;
        }
        let node = &mut self.nodes[removed.index()];
        node.parent = NodeId::INVALID;
        node.position = 0;
        Some(removed)
    }

    /// Unlink the last child of `parent`, if any.
    pub fn detach_last_child(&mut self, parent: NodeId) -> Option<NodeId> {
        let len = self.nodes[parent.index()].children.len();
        len.checked_sub(1)
            .and_then(|last| self.detach_child(parent, last))
    }

    /// Borrow a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// The node's tag.
    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.index()].kind
    }

    /// The node's lexeme, if any.
    #[inline]
    pub fn lexeme(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.index()].lexeme()
    }

    /// The node's source line.
    #[inline]
    pub fn line(&self, id: NodeId) -> u32 {
        self.nodes[id.index()].line
    }

    /// The node's children in order.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Parent handle, `None` for the root and for detached nodes.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id.index()].parent;
        parent.is_valid().then_some(parent)
    }

    /// First child, if any.
    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].children.first().copied()
    }

    /// Last child, if any.
    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].children.last().copied()
    }

    /// Sibling after `id` within its parent.
    #[inline]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id.index()];
        let parent = self.parent(id)?;
        self.nodes[parent.index()]
            .children
            .get(node.position as usize + 1)
            .copied()
    }

    /// Sibling before `id` within its parent.
    #[inline]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id.index()];
        let parent = self.parent(id)?;
        let position = (node.position as usize).checked_sub(1)?;
        self.nodes[parent.index()].children.get(position).copied()
    }

    /// Top-level statements of the script.
    #[inline]
    pub fn statements(&self) -> &[NodeId] {
        self.children(self.root())
    }

    /// Render the tree as an indented outline, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root(), 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        let _ = write!(out, "{:indent$}{}", "", node.kind, indent = depth * 2);
        if let Some(lexeme) = node.lexeme() {
            let _ = write!(out, " {lexeme:?}");
        }
        if node.kind == NodeKind::Statement {
            let _ = write!(out, " @{}", node.line);
        }
        out.push('\n');
        for &child in &node.children {
            self.dump_node(child, depth + 1, out);
        }
    }
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}
