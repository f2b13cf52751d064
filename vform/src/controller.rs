//! Form-state container: values, touched flags, message maps and the
//! validation passes that fill them.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, error};
use serde_json::{Map, Value};

use crate::config::TimingConfig;
use crate::store;
use crate::validation::{FieldMessages, FieldValidator, Schema, Severity, ValidationReport};

/// Form-level validate function: returns a nested error map.
pub type FormValidateFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Imperative operations handed to custom field event handlers.
pub trait FormActions {
    /// Current values.
    fn values(&self) -> &Value;

    /// Validate one field and return its error.
    fn validate_field(&mut self, path: &str) -> Option<String>;

    /// Validate the whole form and return the error map.
    fn validate_form(&mut self) -> Value;

    /// Store a value.
    fn set_field_value(&mut self, path: &str, value: Value);

    /// Set or clear a touched flag.
    fn set_field_touched(&mut self, path: &str, touched: bool);
}

/// Everything a field binding needs from the form-state container.
pub trait FormContainer: FormActions {
    fn touched(&self) -> &Value;

    fn errors(&self) -> &Value;

    fn warnings(&self) -> &Value;

    fn infos(&self) -> &Value;

    /// Replace all values with the result of `updater`.
    fn set_values<F>(&mut self, updater: F)
    where
        F: FnOnce(&Value) -> Value,
        Self: Sized;

    /// Register the validator the container runs for `path`.
    fn register_field_validator(&mut self, path: &str, validator: FieldValidator);

    /// Forget the validator for `path`.
    fn unregister_field_validator(&mut self, path: &str);

    /// Drop `path` from values, touched flags and every message map.
    fn remove_field(&mut self, path: &str);
}

fn empty_tree() -> Value {
    Value::Object(Map::new())
}

/// Concrete form-state container.
///
/// Automatic validation follows the effective timing flags: storing a value
/// validates the form when change validation is on, touching a field when
/// blur validation is on. Submit-only mode turns both off.
pub struct FormController {
    initial_values: Value,
    values: Value,
    touched: Value,
    errors: Value,
    warnings: Value,
    infos: Value,
    submit_count: usize,
    validators: BTreeMap<String, FieldValidator>,
    schema: Option<Arc<dyn Schema>>,
    validate: Option<FormValidateFn>,
    timing: TimingConfig,
}

impl FormController {
    /// Create a controller with the given initial values and timing.
    pub fn new(initial_values: Value, timing: TimingConfig) -> Self {
        let initial_values = if initial_values.is_object() {
            initial_values
        } else {
            debug!("Initial values are not an object, starting empty");
            empty_tree()
        };
        Self {
            values: initial_values.clone(),
            initial_values,
            touched: empty_tree(),
            errors: empty_tree(),
            warnings: empty_tree(),
            infos: empty_tree(),
            submit_count: 0,
            validators: BTreeMap::new(),
            schema: None,
            validate: None,
            timing: timing.effective(),
        }
    }

    /// Set the form-level schema.
    pub fn with_schema(mut self, schema: Arc<dyn Schema>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the form-level validate function.
    pub fn with_validate(mut self, validate: FormValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn initial_values(&self) -> &Value {
        &self.initial_values
    }

    pub fn values(&self) -> &Value {
        &self.values
    }

    pub fn touched(&self) -> &Value {
        &self.touched
    }

    pub fn errors(&self) -> &Value {
        &self.errors
    }

    pub fn warnings(&self) -> &Value {
        &self.warnings
    }

    pub fn infos(&self) -> &Value {
        &self.infos
    }

    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Effective timing flags used for automatic validation.
    pub fn timing(&self) -> TimingConfig {
        self.timing
    }

    pub fn has_schema(&self) -> bool {
        self.schema.is_some()
    }

    pub fn has_validate(&self) -> bool {
        self.validate.is_some()
    }

    /// Check if a field path has a registered validator.
    pub fn has_field_validator(&self, path: &str) -> bool {
        self.validators.contains_key(path)
    }

    /// Get a value by path.
    pub fn value(&self, path: &str) -> Option<&Value> {
        store::get(&self.values, path)
    }

    /// Whether a field has been touched.
    pub fn is_touched(&self, path: &str) -> bool {
        store::get(&self.touched, path).is_some_and(store::is_truthy)
    }

    /// The first error message at or below a field path.
    pub fn field_error(&self, path: &str) -> Option<&str> {
        store::get(&self.errors, path).and_then(store::first_message)
    }

    /// Error, warning and info messages for a field path.
    pub fn field_messages(&self, path: &str) -> FieldMessages {
        let read = |tree: &Value| {
            store::get(tree, path)
                .and_then(store::first_message)
                .map(str::to_string)
        };
        FieldMessages {
            error: read(&self.errors),
            warning: read(&self.warnings),
            info: read(&self.infos),
        }
    }

    /// Check if the error map is empty.
    pub fn is_valid(&self) -> bool {
        store::flatten_messages(&self.errors, "").is_empty()
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Store a value, validating the form if change validation is on.
    pub fn set_field_value(&mut self, path: &str, value: Value) {
        if !store::set_mut(&mut self.values, path, value) {
            debug!("Ignoring value for malformed path '{}'", path);
            return;
        }
        if self.timing.validate_on_change {
            self.validate_form();
        }
    }

    /// Set a touched flag, validating the form if blur validation is on.
    pub fn set_field_touched(&mut self, path: &str, touched: bool) {
        if !store::set_mut(&mut self.touched, path, Value::Bool(touched)) {
            return;
        }
        if self.timing.validate_on_blur {
            self.validate_form();
        }
    }

    /// Replace all values, validating if change validation is on.
    pub fn set_values<F>(&mut self, updater: F)
    where
        F: FnOnce(&Value) -> Value,
    {
        self.values = updater(&self.values);
        if self.timing.validate_on_change {
            self.validate_form();
        }
    }

    /// Mark every field touched.
    ///
    /// Covers every value leaf including `null` ones (date leaves as a whole).
    /// Validator paths and erroring paths are then touched unless a touched
    /// entry already sits at, above or below them.
    pub fn touch_all(&mut self) {
        let mut leaves = Vec::new();
        leaf_paths(&self.values, "", &mut leaves);
        for path in leaves {
            store::set_mut(&mut self.touched, &path, Value::Bool(true));
        }

        let mut extra: Vec<String> = self.validators.keys().cloned().collect();
        extra.extend(
            store::flatten_messages(&self.errors, "")
                .into_iter()
                .map(|(path, _)| path),
        );
        for path in extra {
            if store::get(&self.touched, &path).is_none() && !self.is_covered(&path) {
                store::set_mut(&mut self.touched, &path, Value::Bool(true));
            }
        }
    }

    /// Whether `path` or one of its ancestors is touched.
    fn is_covered(&self, path: &str) -> bool {
        let mut prefix = String::new();
        path.split('.').any(|segment| {
            prefix = store::join(&prefix, segment);
            self.is_touched(&prefix)
        })
    }

    pub fn increment_submit_count(&mut self) {
        self.submit_count += 1;
    }

    pub fn register_field_validator(&mut self, path: &str, validator: FieldValidator) {
        self.validators.insert(path.to_string(), validator);
    }

    pub fn unregister_field_validator(&mut self, path: &str) {
        self.validators.remove(path);
    }

    pub fn remove_field(&mut self, path: &str) {
        store::remove_mut(&mut self.values, path);
        store::remove_mut(&mut self.touched, path);
        store::remove_mut(&mut self.errors, path);
        store::remove_mut(&mut self.warnings, path);
        store::remove_mut(&mut self.infos, path);
        self.validators.remove(path);
    }

    /// Return to a pristine state with new initial values.
    ///
    /// Registered field validators are kept.
    pub fn reset(&mut self, initial_values: Value) {
        self.initial_values = initial_values;
        self.values = self.initial_values.clone();
        self.touched = empty_tree();
        self.errors = empty_tree();
        self.warnings = empty_tree();
        self.infos = empty_tree();
        self.submit_count = 0;
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Validate one field.
    ///
    /// Uses the field's own validator if registered, otherwise the form-level
    /// schema's failures under that path.
    pub fn validate_field(&mut self, path: &str) -> Option<String> {
        if let Some(validator) = self.validators.get(path).cloned() {
            let value = store::get(&self.values, path).cloned().unwrap_or(Value::Null);
            let report = validator.run(&value);
            self.clear_messages(path);
            write_report(
                [&mut self.errors, &mut self.warnings, &mut self.infos],
                path,
                &report,
            );
            return report.error().map(str::to_string);
        }

        let schema = self.schema.clone()?;
        let prefix = format!("{}.", path);
        store::remove_mut(&mut self.errors, path);
        for issue in schema.issues(&self.values) {
            if issue.path == path || issue.path.starts_with(&prefix) {
                store::set_mut(&mut self.errors, &issue.path, Value::String(issue.message));
            }
        }
        self.field_error(path).map(str::to_string)
    }

    /// Validate every field and form-level rule, replacing all message maps.
    ///
    /// Sources are merged in order: field validators, the form schema, then
    /// the form validate function. A later source wins at the same path.
    pub fn validate_form(&mut self) -> Value {
        let mut errors = empty_tree();
        let mut warnings = empty_tree();
        let mut infos = empty_tree();

        for (path, validator) in &self.validators {
            let value = store::get(&self.values, path).cloned().unwrap_or(Value::Null);
            let report = validator.run(&value);
            write_report([&mut errors, &mut warnings, &mut infos], path, &report);
        }

        if let Some(schema) = &self.schema {
            for issue in schema.issues(&self.values) {
                store::set_mut(&mut errors, &issue.path, Value::String(issue.message));
            }
        }

        if let Some(validate) = &self.validate {
            match panic::catch_unwind(AssertUnwindSafe(|| validate(&self.values))) {
                Ok(form_errors) => {
                    for (path, message) in store::flatten_messages(&form_errors, "") {
                        store::set_mut(&mut errors, &path, Value::String(message));
                    }
                }
                Err(_) => error!("Form validate function panicked, ignoring its result"),
            }
        }

        self.errors = errors;
        self.warnings = warnings;
        self.infos = infos;
        self.errors.clone()
    }

    fn clear_messages(&mut self, path: &str) {
        store::remove_mut(&mut self.errors, path);
        store::remove_mut(&mut self.warnings, path);
        store::remove_mut(&mut self.infos, path);
    }
}

/// Collect the path of every leaf under `node`, `null` leaves included.
fn leaf_paths(node: &Value, prefix: &str, out: &mut Vec<String>) {
    match node {
        Value::Object(map) if prefix.is_empty() || !store::is_date_leaf(node) => {
            for (key, child) in map {
                leaf_paths(child, &store::join(prefix, key), out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                leaf_paths(child, &store::join(prefix, &i.to_string()), out);
            }
        }
        _ if !prefix.is_empty() => out.push(prefix.to_string()),
        _ => {}
    }
}

/// Write a report's messages into the error, warning and info maps.
fn write_report(maps: [&mut Value; 3], path: &str, report: &ValidationReport) {
    for (severity, map) in Severity::ALL.into_iter().zip(maps) {
        for (sub_path, messages) in report.iter() {
            if let Some(message) = messages.get(severity) {
                store::set_mut(
                    map,
                    &store::join(path, sub_path),
                    Value::String(message.to_string()),
                );
            }
        }
    }
}

impl FormActions for FormController {
    fn values(&self) -> &Value {
        FormController::values(self)
    }

    fn validate_field(&mut self, path: &str) -> Option<String> {
        FormController::validate_field(self, path)
    }

    fn validate_form(&mut self) -> Value {
        FormController::validate_form(self)
    }

    fn set_field_value(&mut self, path: &str, value: Value) {
        FormController::set_field_value(self, path, value)
    }

    fn set_field_touched(&mut self, path: &str, touched: bool) {
        FormController::set_field_touched(self, path, touched)
    }
}

impl FormContainer for FormController {
    fn touched(&self) -> &Value {
        FormController::touched(self)
    }

    fn errors(&self) -> &Value {
        FormController::errors(self)
    }

    fn warnings(&self) -> &Value {
        FormController::warnings(self)
    }

    fn infos(&self) -> &Value {
        FormController::infos(self)
    }

    fn set_values<F>(&mut self, updater: F)
    where
        F: FnOnce(&Value) -> Value,
    {
        FormController::set_values(self, updater)
    }

    fn register_field_validator(&mut self, path: &str, validator: FieldValidator) {
        FormController::register_field_validator(self, path, validator)
    }

    fn unregister_field_validator(&mut self, path: &str) {
        FormController::unregister_field_validator(self, path)
    }

    fn remove_field(&mut self, path: &str) {
        FormController::remove_field(self, path)
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("values", &self.values)
            .field("touched", &self.touched)
            .field("errors", &self.errors)
            .field("submit_count", &self.submit_count)
            .finish_non_exhaustive()
    }
}
