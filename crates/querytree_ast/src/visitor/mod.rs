//! Read-only traversal of query trees.
//!
//! # Overview
//!
//! - [`Visitor`] - traversal trait with one method per node kind
//! - [`walk_node`] - dispatch function for kind-specific visitor methods
//! - [`walk_children`] - walk all children of a node
//! - [`visit_children`] - call a closure for each direct child, without recursing
//!
//! Rewriting lives in [`crate::rewrite`], which is built on
//! [`visit_children`].
//!
//! # Examples
//!
//! ## Collecting field names
//!
//! ```rust
//! use querytree_ast::{QueryArena, QueryNode, OperationKind};
//! use querytree_ast::visitor::{Visitor, VisitResult, walk_node, walk_children};
//!
//! struct FieldNames<'a> {
//!     names: Vec<&'a str>,
//! }
//!
//! impl<'a> Visitor<'a> for FieldNames<'a> {
//!     fn visit_field(&mut self, node: &'a QueryNode<'a>) -> VisitResult {
//!         self.names.extend(node.name());
//!         walk_children(self, node)
//!     }
//! }
//!
//! let arena = QueryArena::new();
//! let id = arena.alloc_node(QueryNode::scalar_field("id"));
//! let viewer = arena.alloc_node(QueryNode::object_field("viewer", arena.alloc_slice_copy(&[id])));
//! let root = arena.alloc_node(QueryNode::root(OperationKind::Query, arena.alloc_slice_copy(&[viewer])));
//!
//! let mut collector = FieldNames { names: Vec::new() };
//! let _ = walk_node(&mut collector, root);
//! assert_eq!(collector.names, vec!["viewer", "id"]);
//! ```
//!
//! ## Early Termination
//!
//! ```rust
//! use querytree_ast::QueryNode;
//! use querytree_ast::visitor::{Visitor, VisitResult};
//! use std::ops::ControlFlow;
//!
//! struct FirstDeferred<'a> {
//!     found: Option<&'a QueryNode<'a>>,
//! }
//!
//! impl<'a> Visitor<'a> for FirstDeferred<'a> {
//!     fn visit_fragment(&mut self, node: &'a QueryNode<'a>) -> VisitResult {
//!         if node.is_deferred() {
//!             self.found = Some(node);
//!             return ControlFlow::Break(()); // Stop traversal
//!         }
//!         querytree_ast::visitor::walk_children(self, node)
//!     }
//! }
//! ```

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{visit_children, walk_children, walk_node};
