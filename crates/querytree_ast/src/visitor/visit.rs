//! Visitor trait for traversing query trees.

use std::ops::ControlFlow;

use crate::QueryNode;

use super::walk::{walk_children, walk_node};

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - continue visiting
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Visitor trait for traversing query trees without modification.
///
/// Each `visit_*` method has a default implementation that calls
/// [`walk_children`], so an implementation only overrides the kinds it
/// cares about. Leaf fields have no children, so the default for them
/// does nothing.
///
/// # Lifetime
///
/// Nodes are handed out as `&'a QueryNode<'a>`, so a visitor may keep
/// references to the nodes it sees.
pub trait Visitor<'a>: Sized {
    /// Called before visiting any node.
    #[inline]
    fn enter_node(&mut self, _node: &'a QueryNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after visiting a node and all its children.
    #[inline]
    fn exit_node(&mut self, _node: &'a QueryNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Visits any node by dispatching to the kind-specific method.
    #[inline]
    fn visit_node(&mut self, node: &'a QueryNode<'a>) -> VisitResult {
        walk_node(self, node)
    }

    /// Visit a Root node.
    fn visit_root(&mut self, node: &'a QueryNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    /// Visit a Fragment node.
    fn visit_fragment(&mut self, node: &'a QueryNode<'a>) -> VisitResult {
        walk_children(self, node)
    }

    /// Visit a Field node.
    fn visit_field(&mut self, node: &'a QueryNode<'a>) -> VisitResult {
        walk_children(self, node)
    }
}
