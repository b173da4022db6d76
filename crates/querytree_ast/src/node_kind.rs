//! Node kind definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of query nodes.
///
/// Dispatch in both [`Visitor`](crate::Visitor) and
/// [`Rewriter`](crate::Rewriter) matches on this enum, so adding a kind is
/// a compile error everywhere a handler is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Top-level operation.
    Root,
    /// Inline or named fragment spread into a selection set.
    Fragment,
    /// Field selection, with or without a selection set of its own.
    Field,
}

impl NodeKind {
    /// Returns the kind name as it appears in serialized output.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Fragment => "Fragment",
            NodeKind::Field => "Field",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation type of a root node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    #[default]
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// Returns the operation keyword.
    #[inline]
    pub const fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
        })
    }
}
