//! Walk functions for tree traversal.
//!
//! These provide the traversal logic behind the default methods of
//! [`Visitor`], and the child iteration the rewrite engine is built on.

use std::ops::ControlFlow;

use crate::{NodeKind, QueryNode};

use super::visit::{VisitResult, Visitor};

/// Walks a node by dispatching to the kind-specific visitor method.
///
/// This function:
/// 1. Calls `enter_node` on the visitor
/// 2. Dispatches to `visit_root`, `visit_fragment` or `visit_field`
/// 3. Calls `exit_node` on the visitor
pub fn walk_node<'a, V>(visitor: &mut V, node: &'a QueryNode<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    visitor.enter_node(node)?;

    match node.kind() {
        NodeKind::Root => visitor.visit_root(node),
        NodeKind::Fragment => visitor.visit_fragment(node),
        NodeKind::Field => visitor.visit_field(node),
    }?;

    visitor.exit_node(node)
}

/// Walks all children of a node in order, stopping at the first `Break`.
#[inline]
pub fn walk_children<'a, V>(visitor: &mut V, node: &'a QueryNode<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    for &child in node.children() {
        visitor.visit_node(child)?;
    }
    ControlFlow::Continue(())
}

/// Calls `callback(child, index, children)` once for every direct child of
/// `node`, in order.
///
/// Children are never skipped, reordered or deduplicated, and the callback
/// always receives the node's original children. Recursion is up to the
/// callback. Leaf nodes produce no calls.
#[inline]
pub fn visit_children<'a, F>(node: &QueryNode<'a>, mut callback: F)
where
    F: FnMut(&'a QueryNode<'a>, usize, &'a [&'a QueryNode<'a>]),
{
    let children = node.children();
    for (index, &child) in children.iter().enumerate() {
        callback(child, index, children);
    }
}
