//! Validation timing configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::field::FieldEventKind;

/// When a form validates.
///
/// Defaults: validate on change and on blur, not on mount, and not in
/// submit-only mode. Deserializes from camelCase JSON with every key optional:
///
/// ```ignore
/// let timing = TimingConfig::from_json(r#"{ "validateOnSubmit": true }"#)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimingConfig {
    /// Validate when a field's value changes.
    pub validate_on_change: bool,
    /// Validate when a field loses focus.
    pub validate_on_blur: bool,
    /// Validate once when the form mounts.
    pub validate_on_mount: bool,
    /// Submit-only mode: suppress live validation until a failed submit.
    pub validate_on_submit: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            validate_on_change: true,
            validate_on_blur: true,
            validate_on_mount: false,
            validate_on_submit: false,
        }
    }
}

impl TimingConfig {
    /// Parse a timing config from JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set validate-on-change.
    pub fn validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    /// Set validate-on-blur.
    pub fn validate_on_blur(mut self, enabled: bool) -> Self {
        self.validate_on_blur = enabled;
        self
    }

    /// Set validate-on-mount.
    pub fn validate_on_mount(mut self, enabled: bool) -> Self {
        self.validate_on_mount = enabled;
        self
    }

    /// Set submit-only mode.
    pub fn validate_on_submit(mut self, enabled: bool) -> Self {
        self.validate_on_submit = enabled;
        self
    }

    /// Flags a form-state container applies to its own automatic validation.
    ///
    /// Submit-only mode forces change, blur and mount validation off.
    pub fn effective(self) -> Self {
        if self.validate_on_submit {
            Self {
                validate_on_change: false,
                validate_on_blur: false,
                validate_on_mount: false,
                validate_on_submit: true,
            }
        } else {
            self
        }
    }

    /// Whether the form is live-validating rather than submit-only.
    pub fn is_live(self) -> bool {
        let effective = self.effective();
        effective.validate_on_change || effective.validate_on_blur || effective.validate_on_mount
    }

    /// Whether a field event may (re)validate that field.
    ///
    /// The event's flag must be set, and either the form is not in
    /// submit-only mode or the field already has an error. A field that
    /// failed a submit keeps revalidating live until it passes.
    pub fn may_validate(self, event: FieldEventKind, field_has_error: bool) -> bool {
        let enabled = match event {
            FieldEventKind::Change => self.validate_on_change,
            FieldEventKind::Blur => self.validate_on_blur,
        };
        enabled && (!self.validate_on_submit || field_has_error)
    }
}
