//! QueryNode definition.
//!
//! The core tree type shared by the visitor and the rewrite engine.

use std::fmt;

use serde::Serialize;

use crate::{NodeKind, OperationKind, Span};

/// A node in a query tree.
///
/// Nodes are allocated in a [`QueryArena`](crate::QueryArena) and only ever
/// handed out as shared references, so a tree is never mutated once built.
/// Changing a node means building a new one with
/// [`QueryNode::with_selections`] and allocating it.
///
/// # Lifetime
///
/// The `'a` lifetime ties this node to its arena allocator, ensuring that
/// all child references remain valid.
///
/// # Example
///
/// ```rust
/// use querytree_ast::{QueryArena, QueryNode, NodeKind};
///
/// let arena = QueryArena::new();
///
/// let name = arena.alloc_node(QueryNode::scalar_field("name"));
/// let user = arena.alloc_node(QueryNode::fragment(
///     "User",
///     arena.alloc_slice_copy(&[name]),
/// ));
///
/// assert_eq!(user.kind(), NodeKind::Fragment);
/// assert!(user.has_subselections());
/// assert!(!name.has_subselections());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryNode<'a> {
    /// Byte span in the source text.
    pub span: Span,

    /// Kind-specific metadata.
    pub data: NodeData<'a>,

    /// Child selections, or `None` for node kinds that cannot have any.
    pub selections: Option<&'a [&'a QueryNode<'a>]>,
}

/// Kind-specific metadata of a [`QueryNode`].
#[derive(Debug, Clone, Copy)]
pub enum NodeData<'a> {
    Root {
        operation: OperationKind,
        name: Option<&'a str>,
    },
    Fragment {
        type_condition: &'a str,
        name: Option<&'a str>,
        directives: &'a [Directive<'a>],
    },
    Field {
        alias: Option<&'a str>,
        name: &'a str,
        arguments: &'a [Argument<'a>],
        directives: &'a [Directive<'a>],
    },
}

/// A literal or variable reference used as an argument value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Value<'a> {
    Variable(&'a str),
    Boolean(bool),
    Int(i64),
    String(&'a str),
    Enum(&'a str),
    Null,
}

/// A named argument of a field or directive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Argument<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

impl<'a> Argument<'a> {
    /// Creates a new argument.
    #[inline]
    pub const fn new(name: &'a str, value: Value<'a>) -> Self {
        Self { name, value }
    }
}

/// A directive such as `@defer` or `@skip(if: $flag)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Directive<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub arguments: &'a [Argument<'a>],
}

impl<'a> Directive<'a> {
    /// Creates a new directive.
    #[inline]
    pub const fn new(name: &'a str, arguments: &'a [Argument<'a>]) -> Self {
        Self { name, arguments }
    }

    /// Returns the value of the named argument.
    pub fn argument(&self, name: &str) -> Option<&'a Value<'a>> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }
}

impl<'a> QueryNode<'a> {
    /// Creates a root node for an operation.
    #[inline]
    pub const fn root(operation: OperationKind, selections: &'a [&'a QueryNode<'a>]) -> Self {
        Self {
            span: Span::DUMMY,
            data: NodeData::Root {
                operation,
                name: None,
            },
            selections: Some(selections),
        }
    }

    /// Creates a fragment node with the given type condition.
    #[inline]
    pub const fn fragment(type_condition: &'a str, selections: &'a [&'a QueryNode<'a>]) -> Self {
        Self {
            span: Span::DUMMY,
            data: NodeData::Fragment {
                type_condition,
                name: None,
                directives: &[],
            },
            selections: Some(selections),
        }
    }

    /// Creates a field that cannot have subselections (a scalar or enum field).
    #[inline]
    pub const fn scalar_field(name: &'a str) -> Self {
        Self {
            span: Span::DUMMY,
            data: NodeData::Field {
                alias: None,
                name,
                arguments: &[],
                directives: &[],
            },
            selections: None,
        }
    }

    /// Creates a field with a selection set of its own.
    #[inline]
    pub const fn object_field(name: &'a str, selections: &'a [&'a QueryNode<'a>]) -> Self {
        Self {
            span: Span::DUMMY,
            data: NodeData::Field {
                alias: None,
                name,
                arguments: &[],
                directives: &[],
            },
            selections: Some(selections),
        }
    }

    /// Sets the source span.
    #[inline]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Sets the operation name of a root, the fragment name of a fragment,
    /// or the field name of a field.
    pub fn with_name(mut self, new_name: &'a str) -> Self {
        match &mut self.data {
            NodeData::Root { name, .. } | NodeData::Fragment { name, .. } => *name = Some(new_name),
            NodeData::Field { name, .. } => *name = new_name,
        }
        self
    }

    /// Sets the alias of a field. Other kinds are returned unchanged.
    pub fn with_alias(mut self, new_alias: &'a str) -> Self {
        if let NodeData::Field { alias, .. } = &mut self.data {
            *alias = Some(new_alias);
        }
        self
    }

    /// Sets the arguments of a field. Other kinds are returned unchanged.
    pub fn with_arguments(mut self, new_arguments: &'a [Argument<'a>]) -> Self {
        if let NodeData::Field { arguments, .. } = &mut self.data {
            *arguments = new_arguments;
        }
        self
    }

    /// Sets the directives of a field or fragment. Roots are returned unchanged.
    pub fn with_directives(mut self, new_directives: &'a [Directive<'a>]) -> Self {
        match &mut self.data {
            NodeData::Fragment { directives, .. } | NodeData::Field { directives, .. } => {
                *directives = new_directives
            }
            NodeData::Root { .. } => {}
        }
        self
    }

    /// Returns a copy of this node with its children replaced.
    ///
    /// Kind, metadata and span are preserved. The result must be allocated
    /// before it can be placed in a tree.
    #[inline]
    pub const fn with_selections(&self, selections: &'a [&'a QueryNode<'a>]) -> Self {
        Self {
            span: self.span,
            data: self.data,
            selections: Some(selections),
        }
    }

    /// Returns the kind of this node.
    #[inline]
    pub const fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Root { .. } => NodeKind::Root,
            NodeData::Fragment { .. } => NodeKind::Fragment,
            NodeData::Field { .. } => NodeKind::Field,
        }
    }

    /// Returns true if this node can have child selections.
    ///
    /// A node may be able to have children and still have none.
    #[inline]
    pub const fn has_subselections(&self) -> bool {
        self.selections.is_some()
    }

    /// Returns the child selections in order. Empty for leaf nodes.
    #[inline]
    pub fn children(&self) -> &'a [&'a QueryNode<'a>] {
        self.selections.unwrap_or(&[])
    }

    /// Returns the operation, fragment or field name.
    #[inline]
    pub const fn name(&self) -> Option<&'a str> {
        match self.data {
            NodeData::Root { name, .. } | NodeData::Fragment { name, .. } => name,
            NodeData::Field { name, .. } => Some(name),
        }
    }

    /// Returns the alias of a field.
    #[inline]
    pub const fn alias(&self) -> Option<&'a str> {
        match self.data {
            NodeData::Field { alias, .. } => alias,
            _ => None,
        }
    }

    /// Returns the key a field's value is stored under in a response:
    /// its alias if it has one, its name otherwise.
    #[inline]
    pub const fn response_key(&self) -> Option<&'a str> {
        match self.data {
            NodeData::Field {
                alias: Some(alias), ..
            } => Some(alias),
            NodeData::Field { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the type condition of a fragment.
    #[inline]
    pub const fn type_condition(&self) -> Option<&'a str> {
        match self.data {
            NodeData::Fragment { type_condition, .. } => Some(type_condition),
            _ => None,
        }
    }

    /// Returns the arguments of a field. Empty for other kinds.
    #[inline]
    pub const fn arguments(&self) -> &'a [Argument<'a>] {
        match self.data {
            NodeData::Field { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// Returns the directives of a field or fragment. Empty for roots.
    #[inline]
    pub const fn directives(&self) -> &'a [Directive<'a>] {
        match self.data {
            NodeData::Fragment { directives, .. } | NodeData::Field { directives, .. } => {
                directives
            }
            NodeData::Root { .. } => &[],
        }
    }

    /// Returns the first directive with the given name.
    pub fn directive(&self, name: &str) -> Option<&'a Directive<'a>> {
        self.directives().iter().find(|d| d.name == name)
    }

    /// Returns true if this node carries an active `@defer` directive.
    ///
    /// `@defer(if: false)` is not active. A variable condition counts as
    /// deferred since it cannot be resolved here.
    pub fn is_deferred(&self) -> bool {
        self.directive("defer")
            .is_some_and(|d| d.argument("if") != Some(&Value::Boolean(false)))
    }
}

impl Serialize for QueryNode<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut len = 2; // type, range
        if self.selections.is_some() {
            len += 1;
        }
        len += self.data.present_field_count();

        let mut state = serializer.serialize_struct("QueryNode", len)?;

        state.serialize_field("type", &self.kind())?;
        state.serialize_field("range", &[self.span.start, self.span.end])?;

        self.data.serialize_fields(&mut state)?;

        if let Some(selections) = self.selections {
            state.serialize_field("selections", selections)?;
        }

        state.end()
    }
}

impl NodeData<'_> {
    /// Returns the number of present fields for serialization.
    fn present_field_count(&self) -> usize {
        match self {
            NodeData::Root { name, .. } => 1 + usize::from(name.is_some()),
            NodeData::Fragment {
                name, directives, ..
            } => 1 + usize::from(name.is_some()) + usize::from(!directives.is_empty()),
            NodeData::Field {
                alias,
                arguments,
                directives,
                ..
            } => {
                1 + usize::from(alias.is_some())
                    + usize::from(!arguments.is_empty())
                    + usize::from(!directives.is_empty())
            }
        }
    }

    /// Serializes present fields into the given struct serializer state.
    fn serialize_fields<S: serde::ser::SerializeStruct>(
        &self,
        state: &mut S,
    ) -> Result<(), S::Error> {
        match self {
            NodeData::Root { operation, name } => {
                state.serialize_field("operation", operation)?;
                if let Some(name) = name {
                    state.serialize_field("name", name)?;
                }
            }
            NodeData::Fragment {
                type_condition,
                name,
                directives,
            } => {
                state.serialize_field("typeCondition", type_condition)?;
                if let Some(name) = name {
                    state.serialize_field("name", name)?;
                }
                if !directives.is_empty() {
                    state.serialize_field("directives", directives)?;
                }
            }
            NodeData::Field {
                alias,
                name,
                arguments,
                directives,
            } => {
                if let Some(alias) = alias {
                    state.serialize_field("alias", alias)?;
                }
                state.serialize_field("name", name)?;
                if !arguments.is_empty() {
                    state.serialize_field("arguments", arguments)?;
                }
                if !directives.is_empty() {
                    state.serialize_field("directives", directives)?;
                }
            }
        }
        Ok(())
    }
}

/// Compact outline of a subtree, e.g. `Query[viewer[id, ...on User @defer[name]]]`.
///
/// Meant for logs and test assertions; arguments are not shown.
impl fmt::Display for QueryNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data {
            NodeData::Root { operation, name } => {
                write!(f, "{operation}")?;
                if let Some(name) = name {
                    write!(f, " {name}")?;
                }
            }
            NodeData::Fragment {
                type_condition,
                name,
                ..
            } => match name {
                Some(name) => write!(f, "...{name} on {type_condition}")?,
                None => write!(f, "...on {type_condition}")?,
            },
            NodeData::Field { alias, name, .. } => match alias {
                Some(alias) => write!(f, "{alias}: {name}")?,
                None => f.write_str(name)?,
            },
        }

        for directive in self.directives() {
            write!(f, " @{}", directive.name)?;
        }

        if let Some(selections) = self.selections {
            f.write_str("[")?;
            for (i, child) in selections.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{child}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}
