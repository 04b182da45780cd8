//! UOS IR - syntax tree types for the UOS script engine.
//!
//! This crate contains the data structures shared by the parser and the
//! interpreter:
//! - `NodeId` handles into the node arena
//! - `NodeKind`, the closed set of node tags
//! - `SyntaxTree`, the arena that owns every node of a parsed script
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Node>`, nodes refer to each other through
//!   `NodeId(u32)` indices.
//! - **No Ownership Cycles**: parent and sibling links are handles used purely
//!   for navigation; the arena is the only owner.
//! - **No Compile Step**: the interpreter walks this tree directly, so sibling
//!   navigation in both directions must be O(1).

mod node_id;
mod node_kind;
mod tree;

pub use node_id::NodeId;
pub use node_kind::NodeKind;
pub use tree::{Children, Node, SyntaxTree};
