use log::{debug, trace, warn};

use super::event::{FieldEvent, FieldEventKind};
use super::kind::{Capability, Controls, FieldKind};
use super::render::{FieldRenderProps, RenderMemo};
use crate::context::FormContext;
use crate::controller::{FormActions, FormContainer};
use crate::store;
use crate::validation::{FieldValidator, Rule};

/// Custom change or blur handler, invoked after the binding's own handling.
pub type FieldHandler = Box<dyn FnMut(&FieldEvent, &mut dyn FormActions)>;

/// One field bound to a form.
///
/// Validated bindings (the default) register a focus handle with the form
/// context, seed their value on mount, validate on change and blur according
/// to the form's timing, and remove their value, touched flag and messages on
/// unmount. Unvalidated bindings only store values and touched flags.
pub struct FieldBinding {
    name: String,
    kind: FieldKind,
    validator: Option<FieldValidator>,
    label: Option<String>,
    required: bool,
    controls: Controls,
    on_change: Option<FieldHandler>,
    on_blur: Option<FieldHandler>,
    memo: RenderMemo,
    mounted: bool,
}

impl FieldBinding {
    /// Create a validated binding for the field at `name`.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            validator: Some(FieldValidator::default()),
            label: None,
            required: false,
            controls: Controls::default(),
            on_change: None,
            on_blur: None,
            memo: RenderMemo::default(),
            mounted: false,
        }
    }

    /// Opt out of validation, focus registration and unmount cleanup.
    pub fn unvalidated(mut self) -> Self {
        self.validator = None;
        self
    }

    /// Set the field's error rule.
    pub fn validate(mut self, rule: Rule) -> Self {
        self.validator
            .get_or_insert_with(FieldValidator::default)
            .set_rule(Some(rule));
        self
    }

    /// Set the field's warning rule.
    pub fn warn(mut self, rule: Rule) -> Self {
        let validator = self.validator.take().unwrap_or_default();
        self.validator = Some(validator.with_warning(rule));
        self
    }

    /// Set the field's info rule.
    pub fn info(mut self, rule: Rule) -> Self {
        let validator = self.validator.take().unwrap_or_default();
        self.validator = Some(validator.with_info(rule));
        self
    }

    /// Use a prepared validator.
    pub fn validator(mut self, validator: FieldValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Focus handles of the rendered controls.
    pub fn controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&FieldEvent, &mut dyn FormActions) + 'static,
    {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn on_blur<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&FieldEvent, &mut dyn FormActions) + 'static,
    {
        self.on_blur = Some(Box::new(handler));
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_validated(&self) -> bool {
        self.validator.is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn field_validator(&self) -> Option<&FieldValidator> {
        self.validator.as_ref()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Mount the field.
    ///
    /// Registers the validator and focus handle, then seeds the value if the
    /// store has none at this path.
    pub fn attach<C: FormContainer>(&mut self, container: &mut C, context: &FormContext) {
        if self.name.is_empty() {
            warn!("Ignoring field binding without a name");
            return;
        }
        self.mounted = true;

        let Some(validator) = &self.validator else {
            trace!("Attached unvalidated field '{}'", self.name);
            return;
        };
        if validator.has_rules() {
            container.register_field_validator(&self.name, validator.clone());
        }
        self.remount(container, context);
        debug!("Attached field '{}' ({})", self.name, self.kind);
    }

    /// Re-register the focus target and re-seed the value after the store
    /// was replaced underneath a mounted field.
    pub(crate) fn remount<C: FormContainer>(&self, container: &mut C, context: &FormContext) {
        if !self.mounted || self.validator.is_none() {
            return;
        }
        self.register_focus_target(container, context);
        if !store::has(container.values(), &self.name) {
            container.set_field_value(&self.name, self.kind.empty_value());
        }
    }

    /// Unmount the field, removing everything it put into the form.
    pub fn detach<C: FormContainer>(&mut self, container: &mut C, context: &FormContext) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.memo.clear();

        if self.validator.is_none() {
            return;
        }
        context.deregister_input_ref(&self.name);
        container.unregister_field_validator(&self.name);
        container.remove_field(&self.name);
        debug!("Detached field '{}'", self.name);
    }

    /// Handle a change or blur from the control.
    ///
    /// Stores the event's value, marks the field touched on blur, validates
    /// when the form's timing allows, then invokes the custom handler.
    /// Returns whether validation ran.
    pub fn handle_event<C: FormContainer>(
        &mut self,
        kind: FieldEventKind,
        event: &FieldEvent,
        container: &mut C,
        context: &FormContext,
    ) -> bool {
        let had_error = store::get(container.errors(), &self.name)
            .and_then(store::first_message)
            .is_some();

        container.set_field_value(&self.name, event.target_value());
        if kind == FieldEventKind::Blur {
            container.set_field_touched(&self.name, true);
        }
        if self.validator.is_some() && self.kind.capability() == Capability::DateParts {
            self.register_focus_target(container, context);
        }

        let can_validate = self.validator.is_some() && context.may_validate(kind, had_error);
        if can_validate {
            trace!("Validating '{}' on {}", self.name, kind.as_str());
            if context.has_form_level_rule() {
                container.validate_form();
            } else {
                container.validate_field(&self.name);
            }
        }

        let handler = match kind {
            FieldEventKind::Change => self.on_change.as_mut(),
            FieldEventKind::Blur => self.on_blur.as_mut(),
        };
        if let Some(handler) = handler {
            handler(event, container);
        }
        can_validate
    }

    /// Current render state.
    pub fn props<C: FormContainer>(&self, container: &C) -> FieldRenderProps {
        FieldRenderProps::from_container(
            &self.name,
            self.kind,
            self.label.as_deref(),
            self.required,
            container,
        )
    }

    /// Render state if it changed since the last call.
    pub fn render<C: FormContainer>(&mut self, container: &C) -> Option<FieldRenderProps> {
        let props = self.props(container);
        self.memo.update(&props).then_some(props)
    }

    fn register_focus_target<C: FormContainer>(&self, container: &C, context: &FormContext) {
        let value = store::get(container.values(), &self.name);
        if let Some(target) = self.controls.focus_target(self.kind, value) {
            context.register_input_ref(&self.name, target);
        }
    }
}

impl std::fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("validated", &self.validator.is_some())
            .field("label", &self.label)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
