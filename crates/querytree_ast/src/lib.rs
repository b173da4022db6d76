//! # querytree_ast
//!
//! Query AST definitions and the copy-on-write rewrite engine.
//!
//! This crate provides the tree types for hierarchical queries (a root
//! operation, fragments and fields) together with two ways of walking them:
//!
//! - [`Visitor`] - read-only traversal dispatched by node kind
//! - [`Rewriter`] - produces a new tree from an existing one without
//!   mutating it, sharing every subtree that did not change
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for Arena allocation
//! - Nodes are immutable and referenced as `&'a QueryNode<'a>`
//! - Node identity is pointer identity; a rewrite compares children with
//!   `std::ptr::eq` to find untouched subtrees
//!
//! ## Example
//!
//! ```rust
//! use querytree_ast::{QueryArena, QueryNode, OperationKind};
//!
//! let arena = QueryArena::new();
//!
//! let id = arena.alloc_node(QueryNode::scalar_field("id"));
//! let name = arena.alloc_node(QueryNode::scalar_field("name"));
//! let viewer = arena.alloc_node(QueryNode::object_field(
//!     "viewer",
//!     arena.alloc_slice_copy(&[id, name]),
//! ));
//! let root = arena.alloc_node(QueryNode::root(
//!     OperationKind::Query,
//!     arena.alloc_slice_copy(&[viewer]),
//! ));
//!
//! assert_eq!(root.to_string(), "Query[viewer[id, name]]");
//! ```

mod arena;
mod node;
mod node_kind;
pub mod rewrite;
mod span;
pub mod visitor;

pub use arena::QueryArena;
pub use node::{Argument, Directive, NodeData, QueryNode, Value};
pub use node_kind::{NodeKind, OperationKind};
pub use span::Span;

// Re-export commonly used traversal items for convenience
pub use rewrite::{RewriteResult, Rewriter, rewrite, traverse};
pub use visitor::{VisitResult, Visitor, visit_children};
