//! Splitting a query around `@defer` fragments.

use querytree_ast::{QueryArena, QueryNode, RewriteResult, Rewriter, rewrite};
use tracing::debug;

/// The two halves of a query split by [`split_deferred`].
///
/// Either half is `None` when it has no selections left. Both share every
/// unchanged subtree with the input tree.
#[derive(Debug, Clone, Copy)]
pub struct SplitQuery<'a> {
    /// Everything outside deferred fragments.
    pub required: Option<&'a QueryNode<'a>>,
    /// The fields inside deferred fragments, with the path leading to them.
    pub deferred: Option<&'a QueryNode<'a>>,
}

impl SplitQuery<'_> {
    /// Returns true if the query had anything deferred.
    pub fn is_split(&self) -> bool {
        self.deferred.is_some()
    }
}

/// Splits `root` into the part that is fetched up front and the part that
/// sits inside active `@defer` fragments.
///
/// A query without deferred fragments comes back with `required` pointing
/// at `root` itself and `deferred` empty.
pub fn split_deferred<'a>(arena: &'a QueryArena, root: &'a QueryNode<'a>) -> SplitQuery<'a> {
    let required = rewrite(&RequiredPart { arena }, root, &());
    let deferred = rewrite(&DeferredPart { arena }, root, &false);

    debug!(
        required = required.is_some(),
        deferred = deferred.is_some(),
        "split deferred fragments"
    );

    SplitQuery { required, deferred }
}

/// Drops deferred fragments without visiting their contents.
struct RequiredPart<'a> {
    arena: &'a QueryArena,
}

impl<'a> Rewriter<'a> for RequiredPart<'a> {
    type State = ();

    fn arena(&self) -> &'a QueryArena {
        self.arena
    }

    fn rewrite_fragment(&self, node: &'a QueryNode<'a>, state: &()) -> RewriteResult<'a> {
        if node.is_deferred() {
            return None;
        }
        self.traverse(node, state)
    }
}

/// Keeps only leaf fields below a deferred fragment.
///
/// The state records whether the current node is inside one. Nodes without
/// children count as leaves, so an empty selection set outside a deferred
/// fragment is dropped like a scalar field.
struct DeferredPart<'a> {
    arena: &'a QueryArena,
}

impl<'a> DeferredPart<'a> {
    fn descend(&self, node: &'a QueryNode<'a>, inside: bool) -> RewriteResult<'a> {
        if node.children().is_empty() {
            return inside.then_some(node);
        }
        self.traverse(node, &inside)
    }
}

impl<'a> Rewriter<'a> for DeferredPart<'a> {
    type State = bool;

    fn arena(&self) -> &'a QueryArena {
        self.arena
    }

    fn rewrite_root(&self, node: &'a QueryNode<'a>, inside: &bool) -> RewriteResult<'a> {
        self.descend(node, *inside)
    }

    fn rewrite_fragment(&self, node: &'a QueryNode<'a>, inside: &bool) -> RewriteResult<'a> {
        self.descend(node, *inside || node.is_deferred())
    }

    fn rewrite_field(&self, node: &'a QueryNode<'a>, inside: &bool) -> RewriteResult<'a> {
        self.descend(node, *inside)
    }
}
