//! Field removal.

use querytree_ast::{QueryArena, QueryNode, RewriteResult, Rewriter, rewrite};

/// Removes every field whose response key (alias, or name when there is no
/// alias) is listed in `keys`, together with its selections.
///
/// Parents emptied by the removal are removed too; `None` means nothing
/// was left of the query.
pub fn remove_fields<'a>(
    arena: &'a QueryArena,
    root: &'a QueryNode<'a>,
    keys: &[&str],
) -> Option<&'a QueryNode<'a>> {
    rewrite(&FieldRemover { arena, keys }, root, &())
}

struct FieldRemover<'a, 'k> {
    arena: &'a QueryArena,
    keys: &'k [&'k str],
}

impl<'a> Rewriter<'a> for FieldRemover<'a, '_> {
    type State = ();

    fn arena(&self) -> &'a QueryArena {
        self.arena
    }

    fn rewrite_field(&self, node: &'a QueryNode<'a>, state: &()) -> RewriteResult<'a> {
        if node
            .response_key()
            .is_some_and(|key| self.keys.contains(&key))
        {
            return None;
        }
        self.traverse(node, state)
    }
}
