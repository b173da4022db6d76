//! # querytree_transform
//!
//! Passes over query trees, built on the rewrite engine in `querytree_ast`.
//!
//! This crate provides:
//! - Defer splitting: separate a query into the part fetched up front and
//!   the part inside `@defer` fragments
//! - Conditional inclusion: evaluate `@skip` and `@include` against
//!   variables
//! - Field removal by response key
//!
//! Every pass leaves its input untouched and shares unchanged subtrees with
//! it, so the input tree stays usable after a pass has run.
//!
//! ## Example
//!
//! ```rust
//! use querytree_ast::{Directive, OperationKind, QueryArena, QueryNode};
//! use querytree_transform::split_deferred;
//!
//! let arena = QueryArena::new();
//! let defer = arena.alloc_slice_copy(&[Directive::new("defer", &[])]);
//! let id = arena.alloc_node(QueryNode::scalar_field("id"));
//! let bio = arena.alloc_node(QueryNode::scalar_field("bio"));
//! let details = arena.alloc_node(
//!     QueryNode::fragment("User", arena.alloc_slice_copy(&[bio])).with_directives(defer),
//! );
//! let root = arena.alloc_node(QueryNode::root(
//!     OperationKind::Query,
//!     arena.alloc_slice_copy(&[id, details]),
//! ));
//!
//! let split = split_deferred(&arena, root);
//! assert_eq!(split.required.unwrap().to_string(), "Query[id]");
//! assert_eq!(split.deferred.unwrap().to_string(), "Query[...on User @defer[bio]]");
//! ```

mod conditions;
mod defer;
mod error;
mod prune;
mod variables;

pub use conditions::apply_conditions;
pub use defer::{SplitQuery, split_deferred};
pub use error::TransformError;
pub use prune::remove_fields;
pub use variables::Variables;
