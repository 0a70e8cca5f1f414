use std::collections::HashSet;

use crate::node::TreeNode;
use crate::path::path_key;
use crate::row::Row;

/// Project the tree into its flat ordered row sequence.
///
/// Depth-first pre-order. Emits exactly one [`Row`] per node no matter the
/// fold state; rows below a folded ancestor come out flagged
/// [`hidden`](Row::hidden) instead of being dropped.
///
/// An absent root projects to an empty sequence; the presentation layer is
/// expected to show an explicit "no data" state for that case.
#[must_use]
pub fn flatten<'tree>(folded: &HashSet<String>, root: Option<&'tree TreeNode>) -> Vec<Row<'tree>> {
    let mut result = Vec::new();
    if let Some(root) = root {
        walk(folded, root, &[], false, &mut result);
    }
    result
}

fn walk<'tree>(
    folded: &HashSet<String>,
    node: &'tree TreeNode,
    current: &[usize],
    parent_hidden: bool,
    result: &mut Vec<Row<'tree>>,
) {
    let is_folded = folded.contains(&path_key(current));
    result.push(Row {
        node,
        path: current.to_vec(),
        depth: current.len(),
        hidden: parent_hidden,
        folded: is_folded,
    });

    let hidden_below = parent_hidden || is_folded;
    for (index, child) in node.children.as_deref().unwrap_or(&[]).iter().enumerate() {
        let mut child_path = current.to_vec();
        child_path.push(index);
        walk(folded, child, &child_path, hidden_below, result);
    }
}

#[cfg(test)]
fn visible_names(folded: &HashSet<String>, root: &TreeNode) -> Vec<String> {
    flatten(folded, Some(root))
        .into_iter()
        .filter(|row| !row.hidden)
        .map(|row| row.node.name.clone())
        .collect()
}

#[test]
fn absent_root_projects_nothing() {
    assert!(flatten(&HashSet::new(), None).is_empty());
}

#[test]
fn every_node_gets_a_row_regardless_of_folding() {
    let tree = TreeNode::example();
    let all = flatten(&HashSet::new(), Some(&tree));
    assert_eq!(all.len(), tree.node_count());

    let everything_folded = all.iter().map(Row::key).collect::<HashSet<_>>();
    let rows = flatten(&everything_folded, Some(&tree));
    assert_eq!(rows.len(), tree.node_count());
}

#[test]
fn depth_works() {
    let tree = TreeNode::example();
    let depths = flatten(&HashSet::new(), Some(&tree))
        .into_iter()
        .map(|row| row.depth)
        .collect::<Vec<_>>();
    assert_eq!(depths, [0, 1, 2, 3, 2, 3, 4, 4, 1, 2, 3, 3, 1]);
}

#[test]
fn pre_order_is_stable() {
    let tree = TreeNode::example();
    let names = flatten(&HashSet::new(), Some(&tree))
        .into_iter()
        .map(|row| row.node.name.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        [
            "IED1", "LD1", "LLN0", "Beh", "MMXU1", "A", "phsA", "phsB", "LD2", "LLN0", "Beh",
            "EmptyNode", "LD3",
        ]
    );
}

#[test]
fn nothing_folded_shows_everything() {
    let tree = TreeNode::example();
    assert_eq!(
        visible_names(&HashSet::new(), &tree).len(),
        tree.node_count()
    );
}

#[test]
fn folding_hides_the_whole_subtree() {
    let tree = TreeNode::example();
    let mut folded = HashSet::new();
    folded.insert(path_key(&[0]));
    assert_eq!(
        visible_names(&folded, &tree),
        ["IED1", "LD1", "LD2", "LLN0", "Beh", "EmptyNode", "LD3"]
    );
}

#[test]
fn hidden_iff_some_strict_ancestor_is_folded() {
    let tree = TreeNode::example();
    let mut folded = HashSet::new();
    folded.insert(path_key(&[0]));
    folded.insert(path_key(&[0, 1, 0]));

    for row in flatten(&folded, Some(&tree)) {
        let ancestor_folded = (0..row.path.len())
            .any(|length| folded.contains(&path_key(&row.path[..length])));
        assert_eq!(row.hidden, ancestor_folded, "row {}", row.key());
    }
}

#[test]
fn folded_row_itself_stays_visible() {
    let tree = TreeNode::example();
    let mut folded = HashSet::new();
    folded.insert(path_key(&[0]));

    let rows = flatten(&folded, Some(&tree));
    let ld1 = rows.iter().find(|row| row.path == [0]).unwrap();
    assert!(ld1.folded);
    assert!(!ld1.hidden);
}

#[test]
fn folded_root_hides_all_other_rows() {
    let tree = TreeNode::example();
    let mut folded = HashSet::new();
    folded.insert(path_key(&[]));
    assert_eq!(visible_names(&folded, &tree), ["IED1"]);
}

#[test]
fn two_node_scenario() {
    let tree = TreeNode::branch("A", vec![TreeNode::branch("B", vec![])]);
    let rows = flatten(&HashSet::new(), Some(&tree));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].key(), "root");
    assert_eq!(rows[1].key(), "children.0");
    assert!(rows[1].has_toggle());
    assert!(!rows[1].has_children());
}
