//! Copy-on-write rewriting of query trees.
//!
//! A [`Rewriter`] turns an input tree into an output tree without mutating
//! it. Every handler returns the node that should take the visited node's
//! place, or `None` to remove it:
//!
//! - returning the input node itself keeps that subtree as-is, shared by
//!   reference with the input
//! - returning any other node replaces it, and every ancestor up to the
//!   root is cloned with the new child list
//! - returning `None` removes the node, and a parent left without any
//!   children by the removal is removed as well
//!
//! Change detection is by pointer identity. A handler that builds a fresh
//! node equal in content to its input still counts as a change and forces
//! its ancestors to be cloned.
//!
//! # Example
//!
//! ```rust
//! use querytree_ast::{QueryArena, QueryNode, OperationKind, RewriteResult, Rewriter, rewrite};
//!
//! /// Removes every `__typename` field.
//! struct StripTypename<'a> {
//!     arena: &'a QueryArena,
//! }
//!
//! impl<'a> Rewriter<'a> for StripTypename<'a> {
//!     type State = ();
//!
//!     fn arena(&self) -> &'a QueryArena {
//!         self.arena
//!     }
//!
//!     fn rewrite_field(&self, node: &'a QueryNode<'a>, state: &()) -> RewriteResult<'a> {
//!         if node.name() == Some("__typename") {
//!             return None;
//!         }
//!         self.traverse(node, state)
//!     }
//! }
//!
//! let arena = QueryArena::new();
//! let typename = arena.alloc_node(QueryNode::scalar_field("__typename"));
//! let id = arena.alloc_node(QueryNode::scalar_field("id"));
//! let root = arena.alloc_node(QueryNode::root(
//!     OperationKind::Query,
//!     arena.alloc_slice_copy(&[typename, id]),
//! ));
//!
//! let out = rewrite(&StripTypename { arena: &arena }, root, &()).unwrap();
//! assert_eq!(out.to_string(), "Query[id]");
//! assert_eq!(root.to_string(), "Query[__typename, id]");
//! ```

use std::ptr;

use tracing::{debug, debug_span, trace};

use crate::visitor::visit_children;
use crate::{NodeKind, QueryArena, QueryNode};

/// Result type for rewrite handlers.
///
/// - `Some(node)` - the node to use in place of the visited one, which may
///   be the visited node itself
/// - `None` - remove the visited node from the output
pub type RewriteResult<'a> = Option<&'a QueryNode<'a>>;

/// Handler set for rewriting query trees.
///
/// Each `rewrite_*` method defaults to [`Rewriter::traverse`], so the
/// default rewriter is the identity transform and returns the input tree
/// itself. Override the kinds you care about. A handler may:
///
/// - return `None` without traversing, dropping the whole subtree unvisited
/// - call `self.traverse(node, state)` and use, wrap or discard the result
/// - return `Some(node)` unchanged to keep the subtree intact
///
/// # Purity
///
/// Handlers take `&self` and must behave as functions of `(node, state)`.
/// Nodes are immutable, so one input tree can be rewritten by several
/// rewriters at once, each with its own arena.
///
/// # State
///
/// `State` is threaded through the recursion untouched by the engine.
/// A handler that needs a different state below a node passes its own
/// value to `traverse`.
pub trait Rewriter<'a>: Sized {
    /// Caller-defined value passed down the recursion.
    type State;

    /// Returns the arena new nodes are allocated in.
    fn arena(&self) -> &'a QueryArena;

    /// Rewrites any node by dispatching to the kind-specific method.
    #[inline]
    fn visit(&self, node: &'a QueryNode<'a>, state: &Self::State) -> RewriteResult<'a> {
        match node.kind() {
            NodeKind::Root => self.rewrite_root(node, state),
            NodeKind::Fragment => self.rewrite_fragment(node, state),
            NodeKind::Field => self.rewrite_field(node, state),
        }
    }

    /// Rewrites the children of `node`. See [`traverse`].
    #[inline]
    fn traverse(&self, node: &'a QueryNode<'a>, state: &Self::State) -> RewriteResult<'a> {
        traverse(self, node, state)
    }

    /// Rewrite a Root node.
    fn rewrite_root(&self, node: &'a QueryNode<'a>, state: &Self::State) -> RewriteResult<'a> {
        self.traverse(node, state)
    }

    /// Rewrite a Fragment node.
    fn rewrite_fragment(&self, node: &'a QueryNode<'a>, state: &Self::State) -> RewriteResult<'a> {
        self.traverse(node, state)
    }

    /// Rewrite a Field node.
    fn rewrite_field(&self, node: &'a QueryNode<'a>, state: &Self::State) -> RewriteResult<'a> {
        self.traverse(node, state)
    }
}

/// Rewrites the children of `node` and rebuilds it only if one changed.
///
/// Each child is passed to [`Rewriter::visit`] in order. The result is:
///
/// - `node` itself if it cannot have children, or if every child came back
///   as the same reference. Nothing is allocated.
/// - `None` if the children that came back leave the node with none at
///   all. The removal then propagates to the caller.
/// - otherwise a clone of `node`, allocated in the rewriter's arena, whose
///   children are the surviving results in their original order.
pub fn traverse<'a, R>(rewriter: &R, node: &'a QueryNode<'a>, state: &R::State) -> RewriteResult<'a>
where
    R: Rewriter<'a>,
{
    if !node.has_subselections() {
        return Some(node);
    }

    // Started at the first child that differs, seeded with the unchanged
    // children before it.
    let mut next_children: Option<Vec<&'a QueryNode<'a>>> = None;

    visit_children(node, |child, index, children| {
        let next = rewriter.visit(child, state);
        let changed = match next {
            Some(next) => !ptr::eq(next, child),
            None => true,
        };

        if changed && next_children.is_none() {
            let mut seeded = Vec::with_capacity(children.len());
            seeded.extend_from_slice(&children[..index]);
            next_children = Some(seeded);
        }

        match (next_children.as_mut(), next) {
            (Some(acc), Some(next)) => acc.push(next),
            (Some(_), None) => trace!(parent = %node.kind(), index, "child removed"),
            (None, _) => {}
        }
    });

    match next_children {
        None => Some(node),
        Some(children) if children.is_empty() => {
            trace!(kind = %node.kind(), name = ?node.name(), "removing node left without selections");
            None
        }
        Some(children) => {
            let arena = rewriter.arena();
            let clone = arena.alloc_node(node.with_selections(arena.alloc_slice_copy(&children)));
            trace!(kind = %node.kind(), name = ?node.name(), children = children.len(), "cloned node");
            Some(clone)
        }
    }
}

/// Rewrites a whole tree starting at `root`.
///
/// Same as `rewriter.visit(root, state)`, inside a tracing span and with
/// a debug summary of what happened to the tree.
pub fn rewrite<'a, R>(rewriter: &R, root: &'a QueryNode<'a>, state: &R::State) -> RewriteResult<'a>
where
    R: Rewriter<'a>,
{
    let _span = debug_span!("rewrite", kind = %root.kind(), name = ?root.name()).entered();
    let before = rewriter.arena().allocated_nodes();

    let result = rewriter.visit(root, state);

    let allocated = rewriter.arena().allocated_nodes().saturating_sub(before);
    match result {
        Some(out) if ptr::eq(out, root) => debug!("tree unchanged"),
        Some(_) => debug!(allocated, "tree rewritten"),
        None => debug!(allocated, "tree removed"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperationKind;
    use std::cell::Cell;

    /// Identity rewriter that counts how often each entry point runs.
    struct Counting<'a> {
        arena: &'a QueryArena,
        visits: Cell<usize>,
    }

    impl<'a> Rewriter<'a> for Counting<'a> {
        type State = ();

        fn arena(&self) -> &'a QueryArena {
            self.arena
        }

        fn visit(&self, node: &'a QueryNode<'a>, state: &()) -> RewriteResult<'a> {
            self.visits.set(self.visits.get() + 1);
            match node.kind() {
                NodeKind::Root => self.rewrite_root(node, state),
                NodeKind::Fragment => self.rewrite_fragment(node, state),
                NodeKind::Field => self.rewrite_field(node, state),
            }
        }
    }

    #[test]
    fn traverse_returns_leaf_unchanged_without_visiting() {
        let arena = QueryArena::new();
        let leaf = arena.alloc_node(QueryNode::scalar_field("id"));
        let rewriter = Counting {
            arena: &arena,
            visits: Cell::new(0),
        };

        let out = traverse(&rewriter, leaf, &());

        assert!(out.is_some_and(|out| ptr::eq(out, leaf)));
        assert_eq!(rewriter.visits.get(), 0);
    }

    #[test]
    fn traverse_keeps_empty_selection_set() {
        let arena = QueryArena::new();
        let empty = arena.alloc_node(QueryNode::object_field("friends", &[]));
        let rewriter = Counting {
            arena: &arena,
            visits: Cell::new(0),
        };

        let out = traverse(&rewriter, empty, &());

        assert!(out.is_some_and(|out| ptr::eq(out, empty)));
        assert_eq!(arena.allocated_nodes(), 1);
    }

    #[test]
    fn traverse_visits_each_child_once() {
        let arena = QueryArena::new();
        let a = arena.alloc_node(QueryNode::scalar_field("a"));
        let b = arena.alloc_node(QueryNode::scalar_field("b"));
        let c = arena.alloc_node(QueryNode::scalar_field("c"));
        let fragment = arena.alloc_node(QueryNode::fragment("T", arena.alloc_slice_copy(&[b, c])));
        let root = arena.alloc_node(QueryNode::root(
            OperationKind::Query,
            arena.alloc_slice_copy(&[a, fragment]),
        ));
        let rewriter = Counting {
            arena: &arena,
            visits: Cell::new(0),
        };

        let out = rewrite(&rewriter, root, &());

        assert!(out.is_some_and(|out| ptr::eq(out, root)));
        // root + a + fragment + b + c
        assert_eq!(rewriter.visits.get(), 5);
    }

    /// Replaces the `target` field with a renamed copy.
    struct Rename<'a> {
        arena: &'a QueryArena,
        target: &'a str,
    }

    impl<'a> Rewriter<'a> for Rename<'a> {
        type State = ();

        fn arena(&self) -> &'a QueryArena {
            self.arena
        }

        fn rewrite_field(&self, node: &'a QueryNode<'a>, state: &()) -> RewriteResult<'a> {
            if node.name() == Some(self.target) {
                return Some(self.arena.alloc_node(node.with_name("renamed")));
            }
            self.traverse(node, state)
        }
    }

    #[test]
    fn traverse_seeds_clone_with_unchanged_prefix() {
        let arena = QueryArena::new();
        let a = arena.alloc_node(QueryNode::scalar_field("a"));
        let b = arena.alloc_node(QueryNode::scalar_field("b"));
        let c = arena.alloc_node(QueryNode::scalar_field("c"));
        let d = arena.alloc_node(QueryNode::scalar_field("d"));
        let root = arena.alloc_node(QueryNode::root(
            OperationKind::Query,
            arena.alloc_slice_copy(&[a, b, c, d]),
        ));

        let out = rewrite(&Rename { arena: &arena, target: "c" }, root, &()).unwrap();

        let children = out.children();
        assert_eq!(children.len(), 4);
        assert!(ptr::eq(children[0], a));
        assert!(ptr::eq(children[1], b));
        assert_eq!(children[2].name(), Some("renamed"));
        assert!(ptr::eq(children[3], d));
        assert!(!ptr::eq(out, root));
        assert!(!ptr::eq(out.children(), root.children()));
    }
}
