//! Build [`TreeNode`] trees from JSON documents.
//!
//! Objects become branch nodes with one child per key in document order,
//! arrays of scalars become value rows, other arrays become branch nodes
//! with index-named children, and scalars become single-value rows.

use serde_json::Value as JsonValue;

use crate::node::{Scalar, TreeNode, Value};

/// Build a tree showing the given JSON document.
///
/// # Example
///
/// ```
/// # use tui_tree_table::json::from_json;
/// let json = serde_json::json!({"Beh": [0, 1, 4], "vendor": "ACME"});
/// let tree = from_json("device", &json);
/// assert_eq!(tree.name, "device");
/// assert_eq!(tree.children.as_ref().map(Vec::len), Some(2));
/// ```
#[must_use]
pub fn from_json<N>(name: N, json: &JsonValue) -> TreeNode
where
    N: Into<String>,
{
    match json {
        JsonValue::Object(object) => TreeNode::branch(
            name,
            object
                .iter()
                .map(|(key, value)| from_json(key.as_str(), value))
                .collect(),
        ),
        JsonValue::Array(array) if array.iter().all(is_scalar) => {
            TreeNode::values(name, array.iter().map(scalar_value).collect())
        }
        JsonValue::Array(array) => TreeNode::branch(
            name,
            array
                .iter()
                .enumerate()
                .map(|(index, value)| from_json(index.to_string(), value))
                .collect(),
        ),
        scalar => TreeNode::values(name, vec![scalar_value(scalar)]),
    }
}

fn is_scalar(json: &JsonValue) -> bool {
    !matches!(json, JsonValue::Array(_) | JsonValue::Object(_))
}

fn scalar_value(json: &JsonValue) -> Value {
    let val = match json {
        JsonValue::Null => Scalar::None,
        JsonValue::Bool(bool) => Scalar::Bool(*bool),
        JsonValue::Number(number) => number.as_f64().map_or(Scalar::None, Scalar::Number),
        JsonValue::String(string) => Scalar::Text(string.clone()),
        JsonValue::Array(_) | JsonValue::Object(_) => Scalar::None,
    };
    Value::new(val)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::max_leaf_columns;

    #[test]
    fn object_keys_become_children_in_order() {
        let json = serde_json::json!({"b": 1, "a": 2});
        let tree = from_json("root", &json);
        let names = tree
            .children
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|child| child.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn scalar_array_becomes_a_value_row() {
        let json = serde_json::json!([0, true, "x", null]);
        let tree = from_json("row", &json);
        assert!(tree.children.is_none());
        let leaf = tree.leaf.as_deref().unwrap();
        assert_eq!(leaf.len(), 4);
        assert_eq!(leaf[0].val, Scalar::Number(0.0));
        assert_eq!(leaf[1].val, Scalar::Bool(true));
        assert_eq!(leaf[2].val, Scalar::Text("x".to_owned()));
        assert_eq!(leaf[3].val, Scalar::None);
    }

    #[test]
    fn mixed_array_becomes_indexed_children() {
        let json = serde_json::json!([{"a": 1}, 2]);
        let tree = from_json("root", &json);
        let children = tree.children.as_deref().unwrap();
        assert_eq!(children[0].name, "0");
        assert_eq!(children[1].name, "1");
    }

    #[test]
    fn scalar_becomes_a_single_value_row() {
        let json = serde_json::json!(42);
        let tree = from_json("answer", &json);
        assert_eq!(tree.leaf.as_ref().map(Vec::len), Some(1));
        assert_eq!(max_leaf_columns(Some(&tree)), 1);
    }

    #[test]
    fn empty_object_still_declares_children() {
        let json = serde_json::json!({});
        let tree = from_json("root", &json);
        assert!(tree.children.as_ref().is_some_and(Vec::is_empty));
    }
}
