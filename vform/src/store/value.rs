use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A structured date leaf split into day, month and year parts.
///
/// Stored in the value tree as `{ "dd": .., "mm": .., "yyyy": .. }` and always
/// treated as one atomic leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    pub dd: String,
    pub mm: String,
    pub yyyy: String,
}

/// One part of a [`DateValue`], in entry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Day,
    Month,
    Year,
}

impl DatePart {
    /// Position of the part's control within a date widget.
    pub fn index(self) -> usize {
        match self {
            Self::Day => 0,
            Self::Month => 1,
            Self::Year => 2,
        }
    }
}

impl DateValue {
    /// Create a date value from its parts.
    pub fn new(dd: impl Into<String>, mm: impl Into<String>, yyyy: impl Into<String>) -> Self {
        Self {
            dd: dd.into(),
            mm: mm.into(),
            yyyy: yyyy.into(),
        }
    }

    /// Read a date leaf out of a value tree node.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !is_date_leaf(value) {
            return None;
        }
        let part = |key: &str| value.get(key).map(display_string).unwrap_or_default();
        Some(Self::new(part("dd"), part("mm"), part("yyyy")))
    }

    /// The first part (day, month, year order) that has not been filled in.
    pub fn first_empty_part(&self) -> Option<DatePart> {
        if self.dd.is_empty() {
            Some(DatePart::Day)
        } else if self.mm.is_empty() {
            Some(DatePart::Month)
        } else if self.yyyy.is_empty() {
            Some(DatePart::Year)
        } else {
            None
        }
    }
}

impl From<DateValue> for Value {
    fn from(date: DateValue) -> Self {
        json!({ "dd": date.dd, "mm": date.mm, "yyyy": date.yyyy })
    }
}

/// Whether `value` is a structured date leaf: an object whose keys are
/// exactly `dd`, `mm` and `yyyy`.
pub fn is_date_leaf(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            map.len() == 3
                && ["dd", "mm", "yyyy"]
                    .iter()
                    .all(|key| map.get(*key).is_some_and(|v| !v.is_object() && !v.is_array()))
        }
        _ => false,
    }
}

/// Truthiness of a leaf, as a widget toolkit sees it.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a leaf. Strings are returned unquoted, `null` is empty.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
