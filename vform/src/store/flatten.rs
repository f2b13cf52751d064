use serde_json::{Map, Value};

use super::path::{get, join, set_mut};
use super::value::is_date_leaf;

/// Flatten a nested tree into dot-path keyed leaves.
///
/// Objects and arrays are recursed into, except structured date leaves which
/// are kept as one atomic entry. `null` leaves are treated as absent.
pub fn flatten(obj: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(obj, "", &mut out);
    out
}

fn flatten_into(node: &Value, prefix: &str, out: &mut Map<String, Value>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                visit(child, join(prefix, key), out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                visit(child, join(prefix, &i.to_string()), out);
            }
        }
        _ => {}
    }
}

fn visit(child: &Value, path: String, out: &mut Map<String, Value>) {
    match child {
        Value::Null => {}
        Value::Object(_) | Value::Array(_) if !is_date_leaf(child) => {
            flatten_into(child, &path, out)
        }
        _ => {
            out.insert(path, child.clone());
        }
    }
}

/// Rebuild a nested tree from dot-path keyed leaves.
pub fn unflatten(flat: &Map<String, Value>) -> Value {
    let mut out = Value::Object(Map::new());
    for (path, value) in flat {
        set_mut(&mut out, path, value.clone());
    }
    out
}

/// Every non-empty string leaf under `node`, keyed by its path under `prefix`.
///
/// Unlike [`flatten`] this never treats date-shaped objects as leaves, since
/// a message map may hold one message per date part.
pub fn flatten_messages(node: &Value, prefix: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    collect_messages(node, prefix, &mut out);
    out
}

fn collect_messages(node: &Value, path: &str, out: &mut Vec<(String, String)>) {
    match node {
        Value::String(message) if !message.is_empty() => {
            out.push((path.to_string(), message.clone()))
        }
        Value::Object(map) => {
            for (key, child) in map {
                collect_messages(child, &join(path, key), out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                collect_messages(child, &join(path, &i.to_string()), out);
            }
        }
        _ => {}
    }
}

/// The first message stored at or below a message-map node.
pub fn first_message(node: &Value) -> Option<&str> {
    match node {
        Value::String(message) if !message.is_empty() => Some(message.as_str()),
        Value::Object(map) => map.values().find_map(first_message),
        Value::Array(items) => items.iter().find_map(first_message),
        _ => None,
    }
}

/// Errors on fields that have been touched, in touched order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchedErrors {
    /// Number of listed messages.
    pub count: usize,
    /// `(path, message)` pairs.
    pub messages: Vec<(String, String)>,
}

impl TouchedErrors {
    /// Check if no touched field is erroring.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Get the message for a path.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.messages
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, m)| m.as_str())
    }
}

/// Collect the errors of every touched field.
///
/// A touched date leaf whose error is split per part contributes one entry
/// per erroring part.
pub fn touched_errors(touched: &Value, errors: &Value) -> TouchedErrors {
    let mut messages = Vec::new();

    for (path, flag) in flatten(touched) {
        if flag != Value::Bool(true) {
            continue;
        }
        if let Some(node) = get(errors, &path) {
            messages.extend(flatten_messages(node, &path));
        }
    }

    TouchedErrors {
        count: messages.len(),
        messages,
    }
}
