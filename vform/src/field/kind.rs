use std::sync::Arc;

use serde_json::Value;

use crate::focus::FocusHandle;
use crate::store::{self, DateValue};

/// The input controls a field can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Textbox,
    Textarea,
    Password,
    Number,
    Decimal,
    Select,
    DateInput,
    Checkbox,
    Switch,
    RadioGroup,
    NumeralDate,
}

/// How a kind stores its value and where its focus handle lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Single control, scalar value.
    Plain,
    /// Boolean value rendered as `checked`.
    Checkable,
    /// Several controls; focus goes to the first one.
    Grouped,
    /// Day, month and year controls over a date leaf.
    DateParts,
}

impl FieldKind {
    pub const ALL: [FieldKind; 11] = [
        Self::Textbox,
        Self::Textarea,
        Self::Password,
        Self::Number,
        Self::Decimal,
        Self::Select,
        Self::DateInput,
        Self::Checkbox,
        Self::Switch,
        Self::RadioGroup,
        Self::NumeralDate,
    ];

    pub fn capability(self) -> Capability {
        match self {
            Self::Checkbox | Self::Switch => Capability::Checkable,
            Self::RadioGroup => Capability::Grouped,
            Self::NumeralDate => Capability::DateParts,
            _ => Capability::Plain,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Textbox => "textbox",
            Self::Textarea => "textarea",
            Self::Password => "password",
            Self::Number => "number",
            Self::Decimal => "decimal",
            Self::Select => "select",
            Self::DateInput => "date",
            Self::Checkbox => "checkbox",
            Self::Switch => "switch",
            Self::RadioGroup => "radio-group",
            Self::NumeralDate => "numeral-date",
        }
    }

    /// Value seeded into the store when a field mounts without one.
    pub fn empty_value(self) -> Value {
        match self.capability() {
            Capability::Checkable => Value::Bool(false),
            Capability::DateParts => DateValue::default().into(),
            Capability::Plain | Capability::Grouped => Value::String(String::new()),
        }
    }

    /// Derive the `(value, checked)` pair a control renders from a stored value.
    ///
    /// Checkable controls render `checked` from the boolean and its string
    /// form as `value`; other kinds render the value as stored.
    pub fn widget_value(self, stored: Option<&Value>) -> (Value, Option<bool>) {
        match self.capability() {
            Capability::Checkable => {
                let checked = stored.is_some_and(store::is_truthy);
                (Value::String(checked.to_string()), Some(checked))
            }
            _ => (
                stored.cloned().unwrap_or_else(|| self.empty_value()),
                None,
            ),
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Focus handles of a field's rendered controls.
///
/// Single-control kinds use `root`. Group kinds list their option controls in
/// `children`; a numeral date lists its day, month and year controls.
#[derive(Clone, Default)]
pub struct Controls {
    pub root: Option<Arc<dyn FocusHandle>>,
    pub children: Vec<Arc<dyn FocusHandle>>,
}

impl Controls {
    /// A single control.
    pub fn single(handle: Arc<dyn FocusHandle>) -> Self {
        Self {
            root: Some(handle),
            children: Vec::new(),
        }
    }

    /// A group of controls without a root handle.
    pub fn group(children: Vec<Arc<dyn FocusHandle>>) -> Self {
        Self {
            root: None,
            children,
        }
    }

    pub fn with_children(mut self, children: Vec<Arc<dyn FocusHandle>>) -> Self {
        self.children = children;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.children.is_empty()
    }

    /// The handle the summary focuses for a field of `kind` holding `value`.
    pub fn focus_target(
        &self,
        kind: FieldKind,
        value: Option<&Value>,
    ) -> Option<Arc<dyn FocusHandle>> {
        match kind.capability() {
            Capability::Plain | Capability::Checkable => {
                self.root.clone().or_else(|| self.children.first().cloned())
            }
            Capability::Grouped => self.children.first().cloned().or_else(|| self.root.clone()),
            Capability::DateParts => {
                let index = value
                    .and_then(DateValue::from_value)
                    .unwrap_or_default()
                    .first_empty_part()
                    .map(|part| part.index())
                    .unwrap_or(0);
                self.children
                    .get(index)
                    .or_else(|| self.children.first())
                    .cloned()
                    .or_else(|| self.root.clone())
            }
        }
    }
}

impl std::fmt::Debug for Controls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controls")
            .field("root", &self.root.is_some())
            .field("children", &self.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capabilities() {
        assert_eq!(FieldKind::Switch.capability(), Capability::Checkable);
        assert_eq!(FieldKind::RadioGroup.capability(), Capability::Grouped);
        assert_eq!(FieldKind::NumeralDate.capability(), Capability::DateParts);
        assert_eq!(FieldKind::Decimal.capability(), Capability::Plain);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(FieldKind::Textbox.empty_value(), json!(""));
        assert_eq!(FieldKind::Checkbox.empty_value(), json!(false));
        assert_eq!(
            FieldKind::NumeralDate.empty_value(),
            json!({ "dd": "", "mm": "", "yyyy": "" })
        );
    }

    #[test]
    fn test_checkable_widget_value() {
        let (value, checked) = FieldKind::Checkbox.widget_value(Some(&json!(true)));
        assert_eq!(value, json!("true"));
        assert_eq!(checked, Some(true));

        let (value, checked) = FieldKind::Switch.widget_value(None);
        assert_eq!(value, json!("false"));
        assert_eq!(checked, Some(false));
    }
}
