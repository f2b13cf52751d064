//! Schema rules: synchronous validators that fail with a message.

use std::sync::Arc;

use email_address::EmailAddress;
use regex::Regex;
use serde_json::Value;

use crate::error::{Issue, SchemaError};
use crate::store;

/// A validator object that either accepts a value or fails with a message.
pub trait Schema: Send + Sync {
    /// Validate `value`, stopping at the first failure.
    fn validate(&self, value: &Value) -> Result<(), SchemaError>;

    /// Every failure for `value`, with paths relative to it.
    fn issues(&self, value: &Value) -> Vec<Issue> {
        match self.validate(value) {
            Ok(()) => Vec::new(),
            Err(err) => err.into_issues(),
        }
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        (**self).validate(value)
    }

    fn issues(&self, value: &Value) -> Vec<Issue> {
        (**self).issues(value)
    }
}

// -----------------------------------------------------------------------------
// String
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum StringCheck {
    Required(String),
    MinLength(usize, String),
    MaxLength(usize, String),
    Matches(Regex, String),
    Email(String),
}

impl StringCheck {
    fn message(&self) -> &str {
        match self {
            Self::Required(msg)
            | Self::MinLength(_, msg)
            | Self::MaxLength(_, msg)
            | Self::Matches(_, msg)
            | Self::Email(msg) => msg,
        }
    }

    fn fails(&self, text: Option<&str>) -> bool {
        match (self, text) {
            (Self::Required(_), text) => text.is_none_or(|t| t.trim().is_empty()),
            (_, None) => false,
            (Self::MinLength(min, _), Some(t)) => t.chars().count() < *min,
            (Self::MaxLength(max, _), Some(t)) => t.chars().count() > *max,
            (Self::Matches(re, _), Some(t)) => !re.is_match(t),
            // Empty is valid; use required() for non-empty
            (Self::Email(_), Some(t)) => !t.is_empty() && !EmailAddress::is_valid(t),
        }
    }
}

/// Rules for text values. Numbers and booleans are checked in string form.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    checks: Vec<StringCheck>,
}

/// Start a string schema.
pub fn string() -> StringSchema {
    StringSchema::default()
}

impl StringSchema {
    /// Require the value to be non-blank.
    pub fn required(mut self, msg: impl Into<String>) -> Self {
        self.checks.push(StringCheck::Required(msg.into()));
        self
    }

    /// Require minimum length (in characters).
    pub fn min_length(mut self, min: usize, msg: impl Into<String>) -> Self {
        self.checks.push(StringCheck::MinLength(min, msg.into()));
        self
    }

    /// Require maximum length (in characters).
    pub fn max_length(mut self, max: usize, msg: impl Into<String>) -> Self {
        self.checks.push(StringCheck::MaxLength(max, msg.into()));
        self
    }

    /// Require the value to match a regex.
    pub fn matches(mut self, pattern: Regex, msg: impl Into<String>) -> Self {
        self.checks.push(StringCheck::Matches(pattern, msg.into()));
        self
    }

    /// Require a valid email address.
    pub fn email(mut self, msg: impl Into<String>) -> Self {
        self.checks.push(StringCheck::Email(msg.into()));
        self
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        _ => None,
    }
}

impl Schema for StringSchema {
    fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        let text = as_text(value);
        match self.checks.iter().find(|check| check.fails(text.as_deref())) {
            Some(check) => Err(SchemaError::invalid(check.message())),
            None => Ok(()),
        }
    }
}

// -----------------------------------------------------------------------------
// Number
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum NumberCheck {
    Required(String),
    Min(f64, String),
    Max(f64, String),
}

impl NumberCheck {
    fn message(&self) -> &str {
        match self {
            Self::Required(msg) | Self::Min(_, msg) | Self::Max(_, msg) => msg,
        }
    }
}

/// Rules for numeric values. Numeric strings are accepted, blank counts as absent.
#[derive(Debug, Clone)]
pub struct NumberSchema {
    checks: Vec<NumberCheck>,
    type_message: String,
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self {
            checks: Vec::new(),
            type_message: "Must be a number".to_string(),
        }
    }
}

/// Start a number schema.
pub fn number() -> NumberSchema {
    NumberSchema::default()
}

impl NumberSchema {
    /// Require a value.
    pub fn required(mut self, msg: impl Into<String>) -> Self {
        self.checks.push(NumberCheck::Required(msg.into()));
        self
    }

    /// Require the value to be at least `min`.
    pub fn min(mut self, min: f64, msg: impl Into<String>) -> Self {
        self.checks.push(NumberCheck::Min(min, msg.into()));
        self
    }

    /// Require the value to be at most `max`.
    pub fn max(mut self, max: f64, msg: impl Into<String>) -> Self {
        self.checks.push(NumberCheck::Max(max, msg.into()));
        self
    }

    /// Message used when the value is not numeric.
    pub fn type_error(mut self, msg: impl Into<String>) -> Self {
        self.type_message = msg.into();
        self
    }
}

/// `Ok(None)` for absent values, `Err(())` for values that are not numbers.
fn as_number(value: &Value) -> Result<Option<f64>, ()> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or(()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s.trim().parse::<f64>().map(Some).map_err(|_| ()),
        _ => Err(()),
    }
}

impl Schema for NumberSchema {
    fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        let Ok(parsed) = as_number(value) else {
            return Err(SchemaError::invalid(&self.type_message));
        };

        for check in &self.checks {
            let failed = match (check, parsed) {
                (NumberCheck::Required(_), n) => n.is_none(),
                (_, None) => false,
                (NumberCheck::Min(min, _), Some(n)) => n < *min,
                (NumberCheck::Max(max, _), Some(n)) => n > *max,
            };
            if failed {
                return Err(SchemaError::invalid(check.message()));
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Boolean
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum BoolCheck {
    Required(String),
    IsTrue(String),
}

/// Rules for checkbox-like values. `"true"`/`"false"` strings are accepted.
#[derive(Debug, Clone, Default)]
pub struct BoolSchema {
    checks: Vec<BoolCheck>,
}

/// Start a boolean schema.
pub fn boolean() -> BoolSchema {
    BoolSchema::default()
}

impl BoolSchema {
    /// Require a value to be present.
    pub fn required(mut self, msg: impl Into<String>) -> Self {
        self.checks.push(BoolCheck::Required(msg.into()));
        self
    }

    /// Require the value to be `true` (a ticked checkbox).
    pub fn is_true(mut self, msg: impl Into<String>) -> Self {
        self.checks.push(BoolCheck::IsTrue(msg.into()));
        self
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

impl Schema for BoolSchema {
    fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        let parsed = as_bool(value);
        for check in &self.checks {
            match check {
                BoolCheck::Required(msg) if parsed.is_none() => {
                    return Err(SchemaError::invalid(msg));
                }
                BoolCheck::IsTrue(msg) if parsed != Some(true) => {
                    return Err(SchemaError::invalid(msg));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Object
// -----------------------------------------------------------------------------

/// Rules for a group of nested values, one schema per key.
///
/// By default validation stops at the first failing key and reports a single
/// message. [`ObjectSchema::all_errors`] switches to multi-field mode, used by
/// date-range style validators, which reports every failing key.
#[derive(Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, Arc<dyn Schema>)>,
    all_errors: bool,
}

/// Start an object schema.
pub fn object() -> ObjectSchema {
    ObjectSchema::default()
}

impl ObjectSchema {
    /// Add a rule for the value at `key` (a dot path relative to the object).
    pub fn field(mut self, key: impl Into<String>, schema: impl Schema + 'static) -> Self {
        self.fields.push((key.into(), Arc::new(schema)));
        self
    }

    /// Report every failing key instead of the first one.
    pub fn all_errors(mut self) -> Self {
        self.all_errors = true;
        self
    }

    /// Whether this schema reports per-key failures.
    pub fn is_multi_field(&self) -> bool {
        self.all_errors
    }
}

impl std::fmt::Debug for ObjectSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectSchema")
            .field("keys", &self.fields.iter().map(|(key, _)| key).collect::<Vec<_>>())
            .field("all_errors", &self.all_errors)
            .finish()
    }
}

impl Schema for ObjectSchema {
    fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        let mut collected = Vec::new();

        for (key, schema) in &self.fields {
            let child = store::get(value, key).unwrap_or(&Value::Null);
            let Err(err) = schema.validate(child) else {
                continue;
            };
            let mut issues = err.into_issues().into_iter().map(|issue| issue.under(key));

            if self.all_errors {
                collected.extend(issues);
            } else if let Some(first) = issues.next() {
                return Err(SchemaError::Field {
                    path: first.path,
                    message: first.message,
                });
            }
        }

        if collected.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Fields(collected))
        }
    }

    fn issues(&self, value: &Value) -> Vec<Issue> {
        self.fields
            .iter()
            .flat_map(|(key, schema)| {
                let child = store::get(value, key).unwrap_or(&Value::Null);
                schema
                    .issues(child)
                    .into_iter()
                    .map(move |issue| issue.under(key))
            })
            .collect()
    }
}

// -----------------------------------------------------------------------------
// Custom
// -----------------------------------------------------------------------------

type CheckFn = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// A schema backed by a closure.
#[derive(Clone)]
pub struct CustomSchema {
    check: CheckFn,
}

/// Build a schema from a closure returning `Err(message)` on failure.
pub fn custom<F>(check: F) -> CustomSchema
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
{
    CustomSchema {
        check: Arc::new(check),
    }
}

impl std::fmt::Debug for CustomSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomSchema").finish_non_exhaustive()
    }
}

impl Schema for CustomSchema {
    fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        (self.check)(value).map_err(SchemaError::invalid)
    }
}
