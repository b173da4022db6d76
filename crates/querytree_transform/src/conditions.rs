//! `@skip` / `@include` evaluation.

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::ptr;

use querytree_ast::visitor::{VisitResult, Visitor, walk_node};
use querytree_ast::{Directive, QueryArena, QueryNode, RewriteResult, Rewriter, Value};
use tracing::debug;

use crate::{TransformError, Variables};

/// Removes every field and fragment excluded by `@skip(if:)` or
/// `@include(if:)`.
///
/// All conditions in the tree are checked before anything is rewritten, so
/// an error means no output was produced at all. Surviving nodes keep
/// their directives. Returns `Ok(None)` when every selection was excluded.
pub fn apply_conditions<'a>(
    arena: &'a QueryArena,
    root: &'a QueryNode<'a>,
    variables: &Variables,
) -> Result<Option<&'a QueryNode<'a>>, TransformError> {
    let mut check = ConditionCheck {
        variables,
        conditions: 0,
        excluded: HashSet::new(),
        error: None,
    };
    let _ = walk_node(&mut check, root);
    if let Some(err) = check.error {
        return Err(err);
    }
    debug!(
        conditions = check.conditions,
        excluded = check.excluded.len(),
        "conditions evaluated"
    );

    let rewriter = ConditionRewriter {
        arena,
        excluded: check.excluded,
    };
    Ok(querytree_ast::rewrite(&rewriter, root, &()))
}

/// Read-only pass that evaluates the conditions of every node once,
/// recording the excluded ones, and stops at the first invalid condition.
///
/// Subtrees below an excluded node are still checked.
struct ConditionCheck<'a, 'v> {
    variables: &'v Variables,
    conditions: usize,
    excluded: HashSet<*const QueryNode<'a>>,
    error: Option<TransformError>,
}

impl<'a> Visitor<'a> for ConditionCheck<'a, '_> {
    fn enter_node(&mut self, node: &'a QueryNode<'a>) -> VisitResult {
        self.conditions += node.directives().iter().filter(|d| is_condition(d)).count();
        match is_excluded(node, self.variables) {
            Ok(true) => {
                self.excluded.insert(ptr::from_ref(node));
            }
            Ok(false) => {}
            Err(err) => {
                self.error = Some(err);
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}

/// Drops the nodes a [`ConditionCheck`] pass marked as excluded.
struct ConditionRewriter<'a> {
    arena: &'a QueryArena,
    excluded: HashSet<*const QueryNode<'a>>,
}

impl<'a> ConditionRewriter<'a> {
    fn rewrite_conditional(&self, node: &'a QueryNode<'a>) -> RewriteResult<'a> {
        if self.excluded.contains(&ptr::from_ref(node)) {
            debug!(kind = %node.kind(), name = ?node.name(), "excluded by condition");
            return None;
        }
        self.traverse(node, &())
    }
}

impl<'a> Rewriter<'a> for ConditionRewriter<'a> {
    type State = ();

    fn arena(&self) -> &'a QueryArena {
        self.arena
    }

    fn rewrite_fragment(&self, node: &'a QueryNode<'a>, _state: &()) -> RewriteResult<'a> {
        self.rewrite_conditional(node)
    }

    fn rewrite_field(&self, node: &'a QueryNode<'a>, _state: &()) -> RewriteResult<'a> {
        self.rewrite_conditional(node)
    }
}

fn is_condition(directive: &Directive<'_>) -> bool {
    matches!(directive.name, "skip" | "include")
}

/// Returns true if any `@skip` on the node is true or any `@include` is false.
///
/// Every condition is evaluated, so an invalid one is reported even when an
/// earlier one already excludes the node.
fn is_excluded(node: &QueryNode<'_>, variables: &Variables) -> Result<bool, TransformError> {
    let mut excluded = false;
    for directive in node.directives() {
        excluded |= match directive.name {
            "skip" => evaluate(directive, variables)?,
            "include" => !evaluate(directive, variables)?,
            _ => continue,
        };
    }
    Ok(excluded)
}

/// Resolves the `if` argument of a condition directive to a boolean.
fn evaluate(directive: &Directive<'_>, variables: &Variables) -> Result<bool, TransformError> {
    match directive.argument("if") {
        Some(Value::Boolean(value)) => Ok(*value),
        Some(Value::Variable(name)) => match variables.get(name) {
            Some(serde_json::Value::Bool(value)) => Ok(*value),
            Some(other) => Err(TransformError::invalid_condition(
                directive.name,
                format!("${name} is {other}, expected a boolean"),
            )),
            None => Err(TransformError::unknown_variable(*name)),
        },
        Some(other) => Err(TransformError::invalid_condition(
            directive.name,
            format!("expected a boolean, found {other:?}"),
        )),
        None => Err(TransformError::invalid_condition(
            directive.name,
            "missing `if` argument",
        )),
    }
}
