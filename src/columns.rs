use crate::node::TreeNode;

/// Greatest number of leaf values declared by any node of the tree.
///
/// Every row of the rendered table exposes exactly this many value cells,
/// padded with empty cells where a node declares fewer (or no) values.
/// Recomputed once per data update by
/// [`TreeTableState::set_data`](crate::TreeTableState::set_data).
#[must_use]
pub fn max_leaf_columns(root: Option<&TreeNode>) -> usize {
    fn walk(node: &TreeNode) -> usize {
        let own = node.leaf.as_ref().map_or(0, Vec::len);
        node.children
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(walk)
            .fold(own, usize::max)
    }
    root.map_or(0, walk)
}

#[cfg(test)]
use crate::node::Value;

#[test]
fn absent_tree_has_no_columns() {
    assert_eq!(max_leaf_columns(None), 0);
}

#[test]
fn tree_without_leaf_has_no_columns() {
    let tree = TreeNode::branch("A", vec![TreeNode::branch("B", vec![])]);
    assert_eq!(max_leaf_columns(Some(&tree)), 0);
}

#[test]
fn empty_leaf_counts_as_zero() {
    let tree = TreeNode::values("A", vec![]);
    assert_eq!(max_leaf_columns(Some(&tree)), 0);
}

#[test]
fn maximum_over_the_whole_tree() {
    let tree = TreeNode::example();
    assert_eq!(max_leaf_columns(Some(&tree)), 3);
}

#[test]
fn deeply_nested_leaf_is_found() {
    let tree = TreeNode::branch(
        "a",
        vec![TreeNode::branch(
            "b",
            vec![TreeNode::branch(
                "c",
                vec![TreeNode::values(
                    "d",
                    vec![Value::new(1), Value::new(2), Value::new(3), Value::new(4)],
                )],
            )],
        )],
    );
    assert_eq!(max_leaf_columns(Some(&tree)), 4);
}
