use serde_json::{Map, Value};

/// Split a dot path into segments. Empty paths and empty segments are malformed.
fn segments(path: &str) -> Option<Vec<&str>> {
    if path.is_empty() {
        return None;
    }
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|segment| segment.is_empty()) {
        None
    } else {
        Some(parts)
    }
}

fn array_index(items: &[Value], key: &str) -> Option<usize> {
    key.parse::<usize>().ok().filter(|i| *i < items.len())
}

fn child<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(key),
        Value::Array(items) => array_index(items, key).map(|i| &items[i]),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(key),
        Value::Array(items) => match array_index(items, key) {
            Some(i) => items.get_mut(i),
            None => None,
        },
        _ => None,
    }
}

/// Join a parent path and a relative path.
pub fn join(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{}.{}", parent, child),
    }
}

/// Get the value at `path`.
pub fn get<'a>(obj: &'a Value, path: &str) -> Option<&'a Value> {
    let parts = segments(path)?;
    parts.iter().try_fold(obj, |node, key| child(node, key))
}

/// Check whether `path` addresses an existing entry (a `null` leaf counts).
pub fn has(obj: &Value, path: &str) -> bool {
    get(obj, path).is_some()
}

/// Return a copy of `obj` with `value` stored at `path`.
///
/// Missing ancestors are created as objects. A malformed path returns an
/// unchanged copy.
pub fn set(obj: &Value, path: &str, value: Value) -> Value {
    let mut out = obj.clone();
    set_mut(&mut out, path, value);
    out
}

/// Store `value` at `path` in place. Returns `false` for malformed paths.
pub fn set_mut(obj: &mut Value, path: &str, value: Value) -> bool {
    match segments(path) {
        Some(parts) => {
            set_in(obj, &parts, value);
            true
        }
        None => false,
    }
}

fn set_in(node: &mut Value, parts: &[&str], value: Value) {
    let Some((key, rest)) = parts.split_first() else {
        *node = value;
        return;
    };

    if let Value::Array(items) = node
        && let Some(i) = array_index(items, key)
    {
        set_in(&mut items[i], rest, value);
        return;
    }

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let slot = map.entry(key.to_string()).or_insert(Value::Null);
        set_in(slot, rest, value);
    }
}

/// Return a copy of `obj` without the entry at `path`.
///
/// Removing a path that does not exist returns an equal copy.
pub fn remove(obj: &Value, path: &str) -> Value {
    let mut out = obj.clone();
    remove_mut(&mut out, path);
    out
}

/// Remove the entry at `path` in place, returning it.
///
/// Array elements are replaced by `null` so sibling indices stay stable.
pub fn remove_mut(obj: &mut Value, path: &str) -> Option<Value> {
    let parts = segments(path)?;
    let (last, ancestors) = parts.split_last()?;
    let parent = ancestors
        .iter()
        .try_fold(obj, |node, key| child_mut(node, key))?;

    match parent {
        Value::Object(map) => map.shift_remove(*last),
        Value::Array(items) => {
            array_index(items, last).map(|i| std::mem::replace(&mut items[i], Value::Null))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_segments_rejects_empty_parts() {
        assert!(segments("").is_none());
        assert!(segments("a..b").is_none());
        assert!(segments("a.").is_none());
        assert!(segments(".a").is_none());
        assert_eq!(segments("a.b"), Some(vec!["a", "b"]));
    }

    #[test]
    fn test_set_replaces_scalar_ancestor() {
        let mut obj = json!({ "a": "text" });
        assert!(set_mut(&mut obj, "a.b", json!(1)));
        assert_eq!(obj, json!({ "a": { "b": 1 } }));
    }

    #[test]
    fn test_set_indexes_existing_arrays() {
        let mut obj = json!({ "list": [{ "x": 1 }, { "x": 2 }] });
        set_mut(&mut obj, "list.1.x", json!(5));
        assert_eq!(obj, json!({ "list": [{ "x": 1 }, { "x": 5 }] }));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "a"), "a");
        assert_eq!(join("a", ""), "a");
        assert_eq!(join("a", "b.c"), "a.b.c");
    }
}
