//! The validated form: a form-state container, its shared validation context
//! and the fields bound to them.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use crate::config::TimingConfig;
use crate::context::{FormContext, ValidationFlags};
use crate::controller::{FormController, FormValidateFn};
use crate::field::{FieldBinding, FieldEvent, FieldEventKind, FieldRenderProps};
use crate::store::{self, TouchedErrors};
use crate::summary::ValidationSummary;
use crate::validation::Schema;

type SubmitFn = Box<dyn FnMut(&Value)>;

/// Options for a [`ValidatedForm`].
pub struct FormOptions {
    initial_values: Value,
    on_submit: SubmitFn,
    validation_schema: Option<Arc<dyn Schema>>,
    validate: Option<FormValidateFn>,
    timing: TimingConfig,
    with_summary: bool,
    summary_title: Option<String>,
    enable_reinitialize: bool,
}

impl FormOptions {
    /// Create options from the initial values and the submit callback.
    pub fn new<F>(initial_values: Value, on_submit: F) -> Self
    where
        F: FnMut(&Value) + 'static,
    {
        Self {
            initial_values,
            on_submit: Box::new(on_submit),
            validation_schema: None,
            validate: None,
            timing: TimingConfig::default(),
            with_summary: false,
            summary_title: None,
            enable_reinitialize: false,
        }
    }

    /// Validate the whole value tree against a schema.
    pub fn validation_schema(mut self, schema: impl Schema + 'static) -> Self {
        self.validation_schema = Some(Arc::new(schema));
        self
    }

    /// Validate the whole value tree with a function returning an error map.
    pub fn validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validate));
        self
    }

    pub fn timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Show a summary of touched errors after the first submit attempt.
    pub fn with_summary(mut self, enabled: bool) -> Self {
        self.with_summary = enabled;
        self
    }

    pub fn summary_title(mut self, title: impl Into<String>) -> Self {
        self.summary_title = Some(title.into());
        self
    }

    /// Allow [`ValidatedForm::reinitialize`].
    pub fn enable_reinitialize(mut self, enabled: bool) -> Self {
        self.enable_reinitialize = enabled;
        self
    }
}

/// Where a form is in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// No submit attempt yet.
    #[default]
    Pristine,
    /// The last submit attempt was blocked by errors.
    SubmittedInvalid,
    /// The last submit attempt passed and the submit callback ran.
    SubmittedValid,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Blocked { error_count: usize },
}

impl SubmitOutcome {
    pub fn is_submitted(self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// A form whose fields validate themselves.
///
/// Fields are attached and detached as they mount and unmount. Change and blur
/// events are dispatched by field name; the form decides whether each one
/// validates from its timing flags.
pub struct ValidatedForm {
    controller: FormController,
    context: FormContext,
    fields: Vec<FieldBinding>,
    on_submit: SubmitFn,
    with_summary: bool,
    summary_title: Option<String>,
    enable_reinitialize: bool,
    phase: FormPhase,
}

impl ValidatedForm {
    pub fn new(options: FormOptions) -> Self {
        let flags = ValidationFlags {
            timing: options.timing,
            has_validation_schema: options.validation_schema.is_some(),
            has_validate: options.validate.is_some(),
        };

        let mut controller = FormController::new(options.initial_values, options.timing);
        if let Some(schema) = options.validation_schema {
            controller = controller.with_schema(schema);
        }
        if let Some(validate) = options.validate {
            controller = controller.with_validate(validate);
        }

        Self {
            controller,
            context: FormContext::new(flags),
            fields: Vec::new(),
            on_submit: options.on_submit,
            with_summary: options.with_summary,
            summary_title: options.summary_title,
            enable_reinitialize: options.enable_reinitialize,
            phase: FormPhase::Pristine,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn context(&self) -> &FormContext {
        &self.context
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn values(&self) -> &Value {
        self.controller.values()
    }

    pub fn submit_count(&self) -> usize {
        self.controller.submit_count()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Check if a field with this name is attached.
    pub fn is_mounted(&self, name: &str) -> bool {
        self.field(name).is_some_and(FieldBinding::is_mounted)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Run the mount validation if the form validates on mount.
    pub fn mounted(&mut self) {
        if self.controller.timing().validate_on_mount {
            debug!("Validating form on mount");
            self.controller.validate_form();
        }
    }

    /// Mount a field. A field already attached under the same name is
    /// detached first.
    pub fn attach(&mut self, mut field: FieldBinding) {
        self.detach(field.name());
        field.attach(&mut self.controller, &self.context);
        self.fields.push(field);
    }

    /// Unmount a field. Returns whether it was attached.
    pub fn detach(&mut self, name: &str) -> bool {
        let Some(index) = self.fields.iter().position(|field| field.name() == name) else {
            return false;
        };
        let mut field = self.fields.remove(index);
        field.detach(&mut self.controller, &self.context);
        true
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn change(&mut self, name: &str, event: FieldEvent) -> bool {
        self.dispatch(name, FieldEventKind::Change, event)
    }

    pub fn blur(&mut self, name: &str, event: FieldEvent) -> bool {
        self.dispatch(name, FieldEventKind::Blur, event)
    }

    /// Route an event to the named field. Returns whether it validated.
    pub fn dispatch(&mut self, name: &str, kind: FieldEventKind, event: FieldEvent) -> bool {
        let Some(field) = self.fields.iter_mut().find(|field| field.name() == name) else {
            debug!("Ignoring {} for unknown field '{}'", kind.as_str(), name);
            return false;
        };
        field.handle_event(kind, &event, &mut self.controller, &self.context)
    }

    /// Attempt a submit.
    ///
    /// Touches every value, validates the whole form once and calls the submit
    /// callback only if no error remains.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.controller.increment_submit_count();
        let errors = self.controller.validate_form();
        self.controller.touch_all();

        let error_count = store::flatten_messages(&errors, "").len();
        if error_count > 0 {
            debug!("Submit blocked by {} error(s)", error_count);
            self.phase = FormPhase::SubmittedInvalid;
            return SubmitOutcome::Blocked { error_count };
        }

        self.phase = FormPhase::SubmittedValid;
        (self.on_submit)(self.controller.values());
        SubmitOutcome::Submitted
    }

    /// Replace the initial values and return to a pristine state.
    ///
    /// A no-op unless re-initialisation is enabled and the values differ.
    pub fn reinitialize(&mut self, initial_values: Value) -> bool {
        if !self.enable_reinitialize {
            warn!("Ignoring reinitialize on a form without enable_reinitialize");
            return false;
        }
        if &initial_values == self.controller.initial_values() {
            return false;
        }
        self.controller.reset(initial_values);
        for field in &self.fields {
            field.remount(&mut self.controller, &self.context);
        }
        self.phase = FormPhase::Pristine;
        true
    }

    // -------------------------------------------------------------------------
    // Derived state
    // -------------------------------------------------------------------------

    /// Errors of fields that are touched.
    pub fn touched_errors(&self) -> TouchedErrors {
        store::touched_errors(self.controller.touched(), self.controller.errors())
    }

    /// Number of touched and erroring fields.
    pub fn error_count(&self) -> usize {
        self.touched_errors().count
    }

    pub fn field_props(&self, name: &str) -> Option<FieldRenderProps> {
        self.field(name).map(|field| field.props(&self.controller))
    }

    /// Render props of every mounted field whose props changed since the
    /// last call.
    pub fn changed_fields(&mut self) -> Vec<FieldRenderProps> {
        self.fields
            .iter_mut()
            .filter(|field| field.is_mounted())
            .filter_map(|field| field.render(&self.controller))
            .collect()
    }

    pub fn can_show_summary(&self) -> bool {
        self.with_summary && self.controller.submit_count() > 0
    }

    /// The summary, if enabled, after a submit attempt, with errors to list.
    pub fn summary(&self) -> Option<ValidationSummary> {
        if !self.can_show_summary() {
            return None;
        }
        let touched = self.touched_errors();
        let summary = ValidationSummary::new(
            touched.count,
            &touched.messages,
            self.summary_title.as_deref(),
        )?;
        Some(summary.with_labels(|path| self.label_for(path)))
    }

    /// Activate the summary entry for `path`.
    pub fn focus_error(&self, path: &str) -> bool {
        self.summary()
            .is_some_and(|summary| summary.activate(path, &self.context))
    }

    fn label_for(&self, path: &str) -> Option<String> {
        self.fields
            .iter()
            .filter(|field| {
                path == field.name()
                    || path
                        .strip_prefix(field.name())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
            .max_by_key(|field| field.name().len())
            .and_then(|field| field.label_text().map(str::to_string))
    }
}

impl std::fmt::Debug for ValidatedForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedForm")
            .field("controller", &self.controller)
            .field("fields", &self.fields)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
