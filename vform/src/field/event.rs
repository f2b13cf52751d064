use serde_json::Value;

use crate::store::DateValue;

/// Which control event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEventKind {
    Change,
    Blur,
}

impl FieldEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Blur => "blur",
        }
    }
}

/// Payload of a change or blur event.
///
/// Checkable controls report `checked`; every other control reports `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEvent {
    pub value: Value,
    pub checked: Option<bool>,
}

impl FieldEvent {
    /// Event carrying an arbitrary value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            checked: None,
        }
    }

    /// Event from a text control.
    pub fn text(text: impl Into<String>) -> Self {
        Self::value(Value::String(text.into()))
    }

    /// Event from a checkbox or switch.
    pub fn checked(checked: bool) -> Self {
        Self {
            value: Value::String(checked.to_string()),
            checked: Some(checked),
        }
    }

    /// Event from a numeral date control.
    pub fn date(date: DateValue) -> Self {
        Self::value(date)
    }

    /// The value to store: the checked state if present, else the value.
    pub fn target_value(&self) -> Value {
        match self.checked {
            Some(checked) => Value::Bool(checked),
            None => self.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_checked_wins_over_value() {
        let event = FieldEvent::checked(true);
        assert_eq!(event.target_value(), json!(true));
        assert_eq!(event.value, json!("true"));
    }

    #[test]
    fn test_date_event_value() {
        let event = FieldEvent::date(DateValue::new("01", "", ""));
        assert_eq!(
            event.target_value(),
            json!({ "dd": "01", "mm": "", "yyyy": "" })
        );
    }
}
