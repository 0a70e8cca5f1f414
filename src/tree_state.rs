use std::collections::HashSet;
use std::sync::Arc;

use crate::columns::max_leaf_columns;
use crate::flatten::flatten;
use crate::node::TreeNode;
use crate::path::{path_key, TreePath, TreePathBuf};
use crate::row::Row;

/// Interface event pushed by [`TreeTableState`] and drained by the caller.
#[derive(Debug, Clone)]
pub enum TreeTableEvent {
    /// A node with no `leaf` and declared but empty `children` was unfolded.
    ///
    /// The caller is expected to populate the node's subtree, typically by
    /// resolving `path` against its own tree with
    /// [`TreeNode::node_at_mut`] and appending children in place.
    UnfoldRequested {
        path: TreePathBuf,
        /// Snapshot of the node as it was at toggle time.
        node: TreeNode,
    },
}

/// Fold set derived from tree shape: every node declaring `children` starts
/// folded, the root excepted.
#[must_use]
pub fn default_folded(root: Option<&TreeNode>) -> HashSet<String> {
    fn walk(node: &TreeNode, current: &[usize], result: &mut HashSet<String>) {
        if !current.is_empty() && node.children.is_some() {
            result.insert(path_key(current));
        }
        for (index, child) in node.children.as_deref().unwrap_or(&[]).iter().enumerate() {
            let mut child_path = current.to_vec();
            child_path.push(index);
            walk(child, &child_path, result);
        }
    }

    let mut result = HashSet::new();
    if let Some(root) = root {
        walk(root, &[], &mut result);
    }
    result
}

/// Keeps which rows are folded and how many value columns the current tree needs.
///
/// The tree itself stays with the caller and is passed into each operation;
/// call [`set_data`](Self::set_data) whenever a new tree is supplied so the
/// default fold set and the column count are derived from it. Mutating the
/// caller-owned tree in place (e.g. populating a lazily loaded subtree)
/// deliberately keeps the fold state.
///
/// # Example
///
/// ```
/// # use tui_tree_table::{TreeNode, TreeTableState};
/// let tree = TreeNode::branch("A", vec![TreeNode::branch("B", vec![])]);
///
/// let mut state = TreeTableState::default();
/// state.set_data(Some(&tree));
/// assert!(state.is_folded(&[0]));
/// ```
#[derive(Debug, Default, Clone)]
pub struct TreeTableState {
    folded: Arc<HashSet<String>>,
    max_leaf_cols: usize,
    events: Vec<TreeTableEvent>,
}

impl TreeTableState {
    /// Take over a new tree snapshot.
    ///
    /// Recomputes the default fold set and the value column count in one
    /// step. Previous fold state is discarded, not merged.
    pub fn set_data(&mut self, root: Option<&TreeNode>) {
        self.folded = Arc::new(default_folded(root));
        self.max_leaf_cols = max_leaf_columns(root);
        log::debug!(
            "tree data replaced: {} rows folded, {} value columns",
            self.folded.len(),
            self.max_leaf_cols
        );
    }

    #[must_use]
    pub fn is_folded(&self, path: TreePath) -> bool {
        self.folded.contains(&path_key(path))
    }

    /// The current fold set.
    ///
    /// Every mutation swaps in a new set, so a clone of this `Arc` compared
    /// with [`Arc::ptr_eq`] detects any fold-state change.
    #[must_use]
    pub const fn folded(&self) -> &Arc<HashSet<String>> {
        &self.folded
    }

    /// Value column count of the current tree, cached by [`set_data`](Self::set_data).
    #[must_use]
    pub const fn max_leaf_columns(&self) -> usize {
        self.max_leaf_cols
    }

    /// Fold or unfold the row at `path`. Returns whether it is now folded.
    ///
    /// Unfolding a node that has no `leaf` and declares `children` without
    /// having any pushes [`TreeTableEvent::UnfoldRequested`]: the caller
    /// should populate that subtree. Folding never pushes an event, and
    /// neither does a path that no longer resolves to a node (the key still
    /// flips, which is all a stale path can mean).
    pub fn toggle(&mut self, root: Option<&TreeNode>, path: TreePath) -> bool {
        let key = path_key(path);
        let mut folded = HashSet::clone(&self.folded);
        let unfolding = folded.contains(&key);
        log::trace!("toggle {key}: folded={}", !unfolding);
        if unfolding {
            folded.remove(&key);
        } else {
            folded.insert(key);
        }
        self.folded = Arc::new(folded);

        if unfolding {
            let node = root.and_then(|root| root.node_at(path));
            if let Some(node) = node {
                let wants_content =
                    node.leaf.is_none() && node.children.as_ref().is_some_and(Vec::is_empty);
                if wants_content {
                    self.events.push(TreeTableEvent::UnfoldRequested {
                        path: path.to_vec(),
                        node: node.clone(),
                    });
                }
            }
        }
        !unfolding
    }

    /// Toggle the row at `visible_index` of the currently visible projection.
    /// Returns whether a row existed at that index.
    ///
    /// This can be useful for mouse clicks.
    pub fn toggle_visible(&mut self, root: Option<&TreeNode>, visible_index: usize) -> bool {
        let path = self
            .visible_rows(root)
            .into_iter()
            .nth(visible_index)
            .map(|row| row.path);
        if let Some(path) = path {
            self.toggle(root, &path);
            true
        } else {
            false
        }
    }

    /// All rows of the projection, hidden ones included.
    #[must_use]
    pub fn rows<'tree>(&self, root: Option<&'tree TreeNode>) -> Vec<Row<'tree>> {
        flatten(&self.folded, root)
    }

    /// Only the rows without a folded ancestor.
    #[must_use]
    pub fn visible_rows<'tree>(&self, root: Option<&'tree TreeNode>) -> Vec<Row<'tree>> {
        self.rows(root)
            .into_iter()
            .filter(|row| !row.hidden)
            .collect()
    }

    /// Remove and return the pending interface events.
    pub fn drain_events(&mut self) -> Vec<TreeTableEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfold_requests(state: &mut TreeTableState) -> Vec<String> {
        state
            .drain_events()
            .into_iter()
            .map(|event| match event {
                TreeTableEvent::UnfoldRequested { node, .. } => node.name,
            })
            .collect()
    }

    #[test]
    fn default_fold_covers_exactly_the_foldable_non_root_nodes() {
        let tree = TreeNode::example();
        let folded = default_folded(Some(&tree));

        assert!(!folded.contains("root"));
        for row in flatten(&HashSet::new(), Some(&tree)) {
            let expected = !row.path.is_empty() && row.node.children.is_some();
            assert_eq!(folded.contains(&row.key()), expected, "row {}", row.key());
        }
    }

    #[test]
    fn default_fold_of_two_node_scenario() {
        let tree = TreeNode::branch("A", vec![TreeNode::branch("B", vec![])]);
        let folded = default_folded(Some(&tree));
        assert_eq!(folded.len(), 1);
        assert!(folded.contains("children.0"));
    }

    #[test]
    fn default_fold_of_absent_tree_is_empty() {
        assert!(default_folded(None).is_empty());
    }

    #[test]
    fn set_data_discards_previous_fold_state() {
        let tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        let defaults = Arc::clone(state.folded());
        state.toggle(Some(&tree), &[0]);
        state.toggle(Some(&tree), &[2]);
        assert_ne!(**state.folded(), *defaults);

        state.set_data(Some(&tree));
        assert_eq!(**state.folded(), *defaults);
        assert_eq!(state.max_leaf_columns(), 3);
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        let before = HashSet::clone(state.folded());
        assert!(!state.toggle(Some(&tree), &[0]));
        assert!(state.toggle(Some(&tree), &[0]));
        assert_eq!(**state.folded(), before);
    }

    #[test]
    fn toggle_swaps_the_set_copy_on_write() {
        let tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        let before = Arc::clone(state.folded());
        state.toggle(Some(&tree), &[0]);
        assert!(!Arc::ptr_eq(&before, state.folded()));
    }

    #[test]
    fn unfolding_empty_leafless_node_requests_content() {
        let tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        // LD3 declares children but has none and no leaf
        assert!(!state.toggle(Some(&tree), &[2]));
        let events = state.drain_events();
        assert_eq!(events.len(), 1);
        let TreeTableEvent::UnfoldRequested { path, node } = &events[0];
        assert_eq!(path, &[2]);
        assert_eq!(node.name, "LD3");
        assert!(node.leaf.is_none());
        assert!(node.children.as_ref().is_some_and(Vec::is_empty));
    }

    #[test]
    fn folding_back_requests_nothing() {
        let tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        state.toggle(Some(&tree), &[2]);
        state.drain_events();
        state.toggle(Some(&tree), &[2]);
        assert!(unfold_requests(&mut state).is_empty());
    }

    #[test]
    fn unfolding_node_with_children_requests_nothing() {
        let tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        state.toggle(Some(&tree), &[0]);
        assert!(unfold_requests(&mut state).is_empty());
    }

    #[test]
    fn unfolding_node_with_leaf_requests_nothing() {
        let tree = TreeNode::branch(
            "A",
            vec![TreeNode {
                leaf: Some(Vec::new()),
                ..TreeNode::branch("B", vec![])
            }],
        );
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        state.toggle(Some(&tree), &[0]);
        assert!(unfold_requests(&mut state).is_empty());
    }

    #[test]
    fn stale_path_flips_the_key_but_requests_nothing() {
        let tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        assert!(state.toggle(Some(&tree), &[9, 9]));
        assert!(state.is_folded(&[9, 9]));
        assert!(!state.toggle(Some(&tree), &[9, 9]));
        assert!(!state.is_folded(&[9, 9]));
        assert!(unfold_requests(&mut state).is_empty());
    }

    #[test]
    fn repeated_toggles_reevaluate_against_the_current_tree() {
        let mut tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        state.toggle(Some(&tree), &[2]);
        assert_eq!(unfold_requests(&mut state), ["LD3"]);

        // the caller populates LD3 in place before toggling again
        tree.node_at_mut(&[2])
            .unwrap()
            .add_child(TreeNode::new("LLN0"));
        state.toggle(Some(&tree), &[2]);
        state.toggle(Some(&tree), &[2]);
        assert!(unfold_requests(&mut state).is_empty());
    }

    #[test]
    fn unfold_signal_fires_once_per_qualifying_toggle() {
        let tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        // EmptyNode sits below two folded ancestors; unfold them first
        state.toggle(Some(&tree), &[1]);
        state.toggle(Some(&tree), &[1, 0]);
        assert!(unfold_requests(&mut state).is_empty());

        state.toggle(Some(&tree), &[1, 0, 1]);
        assert_eq!(unfold_requests(&mut state), ["EmptyNode"]);

        state.toggle(Some(&tree), &[1, 0, 1]);
        state.toggle(Some(&tree), &[1, 0, 1]);
        assert_eq!(unfold_requests(&mut state), ["EmptyNode"]);
    }

    #[test]
    fn toggle_visible_addresses_the_visible_projection() {
        let tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));

        // defaults: IED1, LD1, LD2, LD3 visible
        assert!(state.toggle_visible(Some(&tree), 3));
        assert!(!state.is_folded(&[2]));
        assert_eq!(unfold_requests(&mut state), ["LD3"]);

        assert!(!state.toggle_visible(Some(&tree), 99));
    }

    #[test]
    fn toggling_the_root_folds_everything_below() {
        let tree = TreeNode::example();
        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));
        assert!(!state.is_folded(&[]));

        state.toggle(Some(&tree), &[]);
        assert!(state.is_folded(&[]));
        assert_eq!(state.visible_rows(Some(&tree)).len(), 1);
        assert!(unfold_requests(&mut state).is_empty());
    }
}
