use serde_json::Value;

use super::kind::FieldKind;
use crate::controller::FormContainer;
use crate::store;
use crate::validation::Severity;

/// A message a control displays under itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    pub severity: Severity,
    pub text: String,
}

/// Everything a control needs to render one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRenderProps {
    pub name: String,
    pub kind: FieldKind,
    pub label: Option<String>,
    pub required: bool,
    pub value: Value,
    pub checked: Option<bool>,
    pub touched: bool,
    /// Shown only once the field is touched; error masks warning masks info.
    pub message: Option<DisplayMessage>,
}

impl FieldRenderProps {
    /// Read a field's render state out of a form-state container.
    pub fn from_container<C: FormContainer + ?Sized>(
        name: &str,
        kind: FieldKind,
        label: Option<&str>,
        required: bool,
        container: &C,
    ) -> Self {
        let (value, checked) = kind.widget_value(store::get(container.values(), name));
        let touched = store::get(container.touched(), name).is_some_and(store::is_truthy);

        let message = if touched {
            let trees = [container.errors(), container.warnings(), container.infos()];
            Severity::ALL.into_iter().zip(trees).find_map(|(severity, tree)| {
                store::get(tree, name)
                    .and_then(store::first_message)
                    .map(|text| DisplayMessage {
                        severity,
                        text: text.to_string(),
                    })
            })
        } else {
            None
        };

        Self {
            name: name.to_string(),
            kind,
            label: label.map(str::to_string),
            required,
            value,
            checked,
            touched,
            message,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|message| message.severity == Severity::Error)
            .map(|message| message.text.as_str())
    }
}

/// Remembers the last rendered props so unchanged fields skip a re-render.
#[derive(Debug, Clone, Default)]
pub struct RenderMemo {
    last: Option<FieldRenderProps>,
}

impl RenderMemo {
    /// Store `next`, returning whether it differs from the last props.
    pub fn update(&mut self, next: &FieldRenderProps) -> bool {
        if self.last.as_ref() == Some(next) {
            return false;
        }
        self.last = Some(next.clone());
        true
    }

    pub fn last(&self) -> Option<&FieldRenderProps> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
