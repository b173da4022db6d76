//! Arena allocator for query nodes.
//!
//! Uses `bumpalo` for bump allocation. Input trees and rewritten trees
//! live in arenas; a rewrite allocates only the nodes it had to clone.

use std::cell::Cell;

use bumpalo::Bump;

use crate::QueryNode;

/// Arena allocator for query trees.
///
/// Wraps `bumpalo::Bump` and keeps a count of the nodes allocated through
/// [`QueryArena::alloc_node`], which makes the allocation behavior of a
/// rewrite observable.
///
/// # Example
///
/// ```rust
/// use querytree_ast::{QueryArena, QueryNode};
///
/// let arena = QueryArena::new();
/// let field = arena.alloc_node(QueryNode::scalar_field("id"));
///
/// assert_eq!(field.name(), Some("id"));
/// assert_eq!(arena.allocated_nodes(), 1);
/// ```
pub struct QueryArena {
    bump: Bump,
    nodes: Cell<usize>,
}

impl QueryArena {
    /// Creates a new arena allocator.
    #[inline]
    pub fn new() -> Self {
        Self {
            bump: Bump::new(),
            nodes: Cell::new(0),
        }
    }

    /// Creates a new arena with the specified initial capacity in bytes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
            nodes: Cell::new(0),
        }
    }

    /// Allocates a value in the arena and returns a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocates a query node and counts it.
    #[inline]
    pub fn alloc_node<'a>(&'a self, node: QueryNode<'a>) -> &'a QueryNode<'a> {
        self.nodes.set(self.nodes.get() + 1);
        self.bump.alloc(node)
    }

    /// Allocates a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Allocates a slice in the arena by copying from the input slice.
    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, slice: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(slice)
    }

    /// Returns how many nodes were allocated through [`QueryArena::alloc_node`].
    #[inline]
    pub fn allocated_nodes(&self) -> usize {
        self.nodes.get()
    }

    /// Returns the total bytes allocated in this arena.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for QueryArena {
    fn default() -> Self {
        Self::new()
    }
}
