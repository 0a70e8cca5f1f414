#![allow(clippy::module_name_repetitions)]

/// Position of a node in a tree, as child indices walked from the root.
pub type TreePath<'a> = &'a [usize];
/// Owned variant of [`TreePath`].
pub type TreePathBuf = Vec<usize>;

/// Key of a node position, used for fold-state membership and as a stable row identity.
///
/// The empty path is the root and always normalizes to `"root"`.
/// Keys are positional: when children are inserted, removed or reordered
/// between data updates, an existing key can end up naming a different node.
///
/// # Examples
///
/// ```
/// # use tui_tree_table::path_key;
/// assert_eq!(path_key(&[]), "root");
/// assert_eq!(path_key(&[0]), "children.0");
/// assert_eq!(path_key(&[0, 2]), "children.0.children.2");
/// ```
#[must_use]
pub fn path_key(path: TreePath) -> String {
    if path.is_empty() {
        return "root".to_owned();
    }
    let mut key = String::new();
    for index in path {
        if !key.is_empty() {
            key.push('.');
        }
        key.push_str("children.");
        key.push_str(&index.to_string());
    }
    key
}

#[test]
fn empty_path_is_root() {
    assert_eq!(path_key(&[]), "root");
    assert_eq!(path_key(&Vec::new()), "root");
}

#[test]
fn nested_path_key() {
    assert_eq!(path_key(&[1, 0, 4]), "children.1.children.0.children.4");
}
