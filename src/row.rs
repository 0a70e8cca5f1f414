use crate::node::{TreeNode, Value};
use crate::path::{path_key, TreePathBuf};

/// One row of the projected tree table.
///
/// Every node of the tree gets exactly one row, in depth-first pre-order.
/// Folding never removes rows, it only marks descendants [`hidden`](Self::hidden),
/// so a consuming layer can animate expand/collapse instead of inserting
/// and removing rows.
#[must_use]
#[derive(Debug, Clone)]
pub struct Row<'tree> {
    pub node: &'tree TreeNode,

    pub path: TreePathBuf,

    /// Zero based depth. Depth 0 means the root with 0 indentation.
    pub depth: usize,

    /// Some strict ancestor of this row is folded.
    pub hidden: bool,

    /// This row itself is folded.
    pub folded: bool,
}

impl<'tree> Row<'tree> {
    /// Stable identity of this row, also the fold-set membership token.
    #[must_use]
    pub fn key(&self) -> String {
        path_key(&self.path)
    }

    /// Whether a fold toggle is shown. Declared children suffice, even when empty.
    #[must_use]
    pub const fn has_toggle(&self) -> bool {
        self.node.children.is_some()
    }

    /// Whether descendant rows exist.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.node.children.as_ref().is_some_and(|children| !children.is_empty())
    }

    /// Exactly `max` value cells for this row.
    ///
    /// Cells beyond the node's own `leaf` are `None`; leaf entries beyond
    /// `max` are never exposed.
    #[must_use]
    pub fn cells(&self, max: usize) -> impl Iterator<Item = Option<&'tree Value>> {
        let leaf: &'tree [Value] = self.node.leaf.as_deref().unwrap_or(&[]);
        (0..max).map(move |index| leaf.get(index))
    }

    /// Invoke the edit callback of the cell at `column`, if any.
    /// Returns whether it ran.
    pub fn activate_edit(&self, column: usize) -> bool {
        self.node
            .leaf
            .as_deref()
            .unwrap_or(&[])
            .get(column)
            .is_some_and(Value::activate_edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Scalar;

    fn row(node: &TreeNode) -> Row {
        Row {
            node,
            path: vec![0],
            depth: 1,
            hidden: false,
            folded: false,
        }
    }

    #[test]
    fn key_is_the_path_key() {
        let node = TreeNode::new("n");
        assert_eq!(row(&node).key(), "children.0");
    }

    #[test]
    fn toggle_requires_declared_children() {
        let plain = TreeNode::new("n");
        assert!(!row(&plain).has_toggle());

        let empty = TreeNode::branch("n", vec![]);
        assert!(row(&empty).has_toggle());
        assert!(!row(&empty).has_children());

        let parent = TreeNode::branch("n", vec![TreeNode::new("c")]);
        assert!(row(&parent).has_toggle());
        assert!(row(&parent).has_children());
    }

    #[test]
    fn cells_pad_with_empty() {
        let node = TreeNode::values("n", vec![Value::new(1)]);
        let cells = row(&node).cells(3).collect::<Vec<_>>();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].map(|cell| &cell.val), Some(&Scalar::Number(1.0)));
        assert!(cells[1].is_none());
        assert!(cells[2].is_none());
    }

    #[test]
    fn cells_truncate_excess_leaf_entries() {
        let node = TreeNode::values("n", vec![Value::new(1), Value::new(2), Value::new(3)]);
        let cells = row(&node).cells(2).collect::<Vec<_>>();
        assert_eq!(cells.len(), 2);
        assert!(cells.iter().all(Option::is_some));
    }

    #[test]
    fn cells_of_leafless_node_are_all_empty() {
        let node = TreeNode::new("n");
        assert!(row(&node).cells(3).all(|cell| cell.is_none()));
    }

    #[test]
    fn activate_edit_out_of_range_is_a_no_op() {
        let node = TreeNode::values("n", vec![Value::new(1)]);
        assert!(!row(&node).activate_edit(0));
        assert!(!row(&node).activate_edit(7));
    }
}
