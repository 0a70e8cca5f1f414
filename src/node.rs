use std::fmt;
use std::rc::Rc;

use crate::path::TreePath;

/// Callback behind the edit affordance of a [`Value`] cell.
///
/// Invoked with no arguments, at most once per activation.
/// What it does is entirely the caller's concern.
pub type EditCallback = Rc<dyn Fn()>;

/// Scalar shown in a single value cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Absence of a value. Renders as an empty cell.
    None,
}

impl fmt::Display for Scalar {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => fmt.write_str(text),
            Self::Number(number) => write!(fmt, "{number}"),
            Self::Bool(bool) => write!(fmt, "{bool}"),
            Self::None => Ok(()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Scalar {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for Scalar {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<bool> for Scalar {
    fn from(bool: bool) -> Self {
        Self::Bool(bool)
    }
}

/// One entry of a node's `leaf` sequence: a scalar plus an optional edit affordance.
#[derive(Clone)]
pub struct Value {
    pub val: Scalar,
    pub edit: Option<EditCallback>,
}

impl Value {
    #[must_use]
    pub fn new<V>(val: V) -> Self
    where
        V: Into<Scalar>,
    {
        Self {
            val: val.into(),
            edit: None,
        }
    }

    /// Create a value carrying an edit affordance.
    #[must_use]
    pub fn editable<V>(val: V, edit: EditCallback) -> Self
    where
        V: Into<Scalar>,
    {
        Self {
            val: val.into(),
            edit: Some(edit),
        }
    }

    #[must_use]
    pub const fn has_edit(&self) -> bool {
        self.edit.is_some()
    }

    /// Invoke the edit callback, if any. Returns whether it ran.
    pub fn activate_edit(&self) -> bool {
        if let Some(edit) = &self.edit {
            edit();
            true
        } else {
            false
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Value")
            .field("val", &self.val)
            .field("edit", &self.edit.is_some())
            .finish()
    }
}

/// Presentation hint in front of a node name. Opaque to the tree logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// Short string drawn directly in front of the name.
    Glyph(String),
    /// Identifier into an icon set of the host application.
    /// Carried through but not drawn by [`TreeTable`](crate::TreeTable).
    Named(String),
}

/// A node of the tree supplied to [`TreeTable`](crate::TreeTable).
///
/// Whether `leaf` and `children` are declared matters independent of their length:
/// a node with `children: Some(vec![])` shows a fold toggle without having any
/// descendant rows, and unfolding it asks the caller to populate it
/// (see [`TreeTableEvent`](crate::TreeTableEvent)).
///
/// The tree is owned by the caller and supplied wholesale on every call.
/// Nothing in this crate ever mutates it.
///
/// # Example
///
/// ```
/// # use tui_tree_table::{TreeNode, Value};
/// let tree = TreeNode::branch(
///     "Device",
///     vec![
///         TreeNode::values("Beh", vec![Value::new(1)]),
///         TreeNode::branch("Measurements", vec![]),
///     ],
/// );
/// assert_eq!(tree.node_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeNode {
    pub name: String,
    pub icon: Option<Icon>,
    pub info: Option<String>,
    /// `Some` (even when empty) marks a value-bearing node.
    pub leaf: Option<Vec<Value>>,
    /// `Some` (even when empty) marks a foldable node.
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Create a node declaring neither `children` nor `leaf`.
    #[must_use]
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            icon: None,
            info: None,
            leaf: None,
            children: None,
        }
    }

    /// Create a foldable node. An empty `children` vector still declares the node foldable.
    #[must_use]
    pub fn branch<N>(name: N, children: Vec<Self>) -> Self
    where
        N: Into<String>,
    {
        Self {
            children: Some(children),
            ..Self::new(name)
        }
    }

    /// Create a value-bearing node.
    #[must_use]
    pub fn values<N>(name: N, leaf: Vec<Value>) -> Self
    where
        N: Into<String>,
    {
        Self {
            leaf: Some(leaf),
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn info<I>(mut self, info: I) -> Self
    where
        I: Into<String>,
    {
        self.info = Some(info.into());
        self
    }

    /// Append a child, declaring `children` when not yet declared.
    pub fn add_child(&mut self, child: Self) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Resolve the node at the given position.
    ///
    /// `None` when the path leads outside the tree, e.g. after a data update
    /// changed the tree shape under a stale path.
    #[must_use]
    pub fn node_at(&self, path: TreePath) -> Option<&Self> {
        let mut current = self;
        for index in path {
            current = current.children.as_ref()?.get(*index)?;
        }
        Some(current)
    }

    /// Resolve the node at the given position mutably.
    ///
    /// Useful to populate a subtree in place after an
    /// [`UnfoldRequested`](crate::TreeTableEvent::UnfoldRequested) event
    /// without resetting the fold state.
    #[must_use]
    pub fn node_at_mut(&mut self, path: TreePath) -> Option<&mut Self> {
        let mut current = self;
        for index in path {
            current = current.children.as_mut()?.get_mut(*index)?;
        }
        Some(current)
    }

    /// Total number of nodes in this subtree, itself included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let below = self
            .children
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(Self::node_count)
            .sum::<usize>();
        1 + below
    }
}

impl TreeNode {
    #[cfg(test)]
    pub(crate) fn example() -> Self {
        Self::branch(
            "IED1",
            vec![
                Self::branch(
                    "LD1",
                    vec![
                        Self::branch(
                            "LLN0",
                            vec![Self::values(
                                "Beh",
                                vec![
                                    Value::new(0),
                                    Value::editable(1, Rc::new(|| {})),
                                    Value::new(4),
                                ],
                            )],
                        ),
                        Self::branch(
                            "MMXU1",
                            vec![Self::branch(
                                "A",
                                vec![
                                    Self::values(
                                        "phsA",
                                        vec![
                                            Value::new(33.44),
                                            Value::new(55.44),
                                            Value::new(66.44),
                                        ],
                                    ),
                                    Self::values(
                                        "phsB",
                                        vec![
                                            Value::new(22.44),
                                            Value::new(66.44),
                                            Value::new(77.44),
                                        ],
                                    ),
                                ],
                            )],
                        )
                        .info("This is a logical node for measurement"),
                    ],
                ),
                Self::branch(
                    "LD2",
                    vec![Self::branch(
                        "LLN0",
                        vec![
                            Self::values("Beh", vec![Value::new(0)]),
                            Self::branch("EmptyNode", vec![]),
                        ],
                    )],
                ),
                Self::branch("LD3", vec![]),
            ],
        )
    }
}

#[test]
fn node_at_resolves_positions() {
    let tree = TreeNode::example();
    assert_eq!(tree.node_at(&[]).unwrap().name, "IED1");
    assert_eq!(tree.node_at(&[0, 0, 0]).unwrap().name, "Beh");
    assert_eq!(tree.node_at(&[2]).unwrap().name, "LD3");
    assert!(tree.node_at(&[5]).is_none());
    assert!(tree.node_at(&[0, 0, 0, 0]).is_none());
}

#[test]
fn node_at_mut_populates_in_place() {
    let mut tree = TreeNode::example();
    let empty = tree.node_at_mut(&[2]).unwrap();
    assert!(empty.children.as_ref().is_some_and(Vec::is_empty));
    empty.add_child(TreeNode::new("LLN0"));
    assert_eq!(tree.node_at(&[2, 0]).unwrap().name, "LLN0");
}

#[test]
fn node_count_counts_every_node() {
    assert_eq!(TreeNode::new("only").node_count(), 1);
    assert_eq!(TreeNode::example().node_count(), 13);
}

#[test]
fn add_child_declares_children() {
    let mut node = TreeNode::new("n");
    assert!(node.children.is_none());
    node.add_child(TreeNode::new("c"));
    assert_eq!(node.children.as_ref().map(Vec::len), Some(1));
}

#[test]
fn scalar_display() {
    assert_eq!(Scalar::from("text").to_string(), "text");
    assert_eq!(Scalar::from(33.44).to_string(), "33.44");
    assert_eq!(Scalar::from(4).to_string(), "4");
    assert_eq!(Scalar::from(true).to_string(), "true");
    assert_eq!(Scalar::None.to_string(), "");
}

#[test]
fn activate_edit_runs_the_callback_once() {
    use std::cell::Cell;

    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let value = Value::editable(1, Rc::new(move || seen.set(seen.get() + 1)));
    assert!(value.activate_edit());
    assert_eq!(calls.get(), 1);

    assert!(!Value::new(1).activate_edit());
}
