//! Per-form shared validation context.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::trace;

use crate::config::TimingConfig;
use crate::field::FieldEventKind;
use crate::focus::{FocusHandle, ScrollOptions};

/// Form-level validation flags shared by every field of one form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationFlags {
    /// Consumer timing, as configured (not forced by submit-only mode).
    pub timing: TimingConfig,
    /// The form has a form-level schema.
    pub has_validation_schema: bool,
    /// The form has a form-level validate function.
    pub has_validate: bool,
}

#[derive(Default)]
struct Registry {
    input_refs: HashMap<String, Arc<dyn FocusHandle>>,
    revision: u64,
}

/// Shared state for one form instance: timing flags plus the registry of
/// focus handles used by the validation summary.
///
/// Cloning is cheap and every clone sees the same registry. The flags never
/// change after construction, and the registry revision only moves when a
/// registration actually changes, so consumers can use [`revision`] to skip
/// work on unrelated updates.
///
/// [`revision`]: FormContext::revision
#[derive(Clone)]
pub struct FormContext {
    flags: ValidationFlags,
    registry: Arc<RwLock<Registry>>,
}

impl FormContext {
    /// Create a context with an empty registry.
    pub fn new(flags: ValidationFlags) -> Self {
        Self {
            flags,
            registry: Arc::new(RwLock::new(Registry::default())),
        }
    }

    pub fn flags(&self) -> ValidationFlags {
        self.flags
    }

    pub fn timing(&self) -> TimingConfig {
        self.flags.timing
    }

    pub fn validate_on_mount(&self) -> bool {
        self.flags.timing.validate_on_mount
    }

    pub fn validate_on_blur(&self) -> bool {
        self.flags.timing.validate_on_blur
    }

    pub fn validate_on_change(&self) -> bool {
        self.flags.timing.validate_on_change
    }

    pub fn validate_on_submit(&self) -> bool {
        self.flags.timing.validate_on_submit
    }

    pub fn has_validation_schema(&self) -> bool {
        self.flags.has_validation_schema
    }

    pub fn has_validate(&self) -> bool {
        self.flags.has_validate
    }

    /// Whether a form-level schema or validate function is present.
    pub fn has_form_level_rule(&self) -> bool {
        self.flags.has_validation_schema || self.flags.has_validate
    }

    /// Whether a field event may (re)validate, see [`TimingConfig::may_validate`].
    pub fn may_validate(&self, event: FieldEventKind, field_has_error: bool) -> bool {
        self.flags.timing.may_validate(event, field_has_error)
    }

    // -------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------

    /// Register the focus handle for a field path, replacing any previous one.
    pub fn register_input_ref(&self, path: &str, handle: Arc<dyn FocusHandle>) {
        if let Ok(mut guard) = self.registry.write() {
            let unchanged = guard
                .input_refs
                .get(path)
                .is_some_and(|existing| Arc::ptr_eq(existing, &handle));
            if !unchanged {
                guard.input_refs.insert(path.to_string(), handle);
                guard.revision += 1;
                trace!("Registered input ref for '{}'", path);
            }
        }
    }

    /// Remove the focus handle for a field path. Unknown paths are ignored.
    pub fn deregister_input_ref(&self, path: &str) {
        if let Ok(mut guard) = self.registry.write()
            && guard.input_refs.remove(path).is_some()
        {
            guard.revision += 1;
            trace!("Deregistered input ref for '{}'", path);
        }
    }

    /// Get the focus handle registered for a field path.
    pub fn input_ref(&self, path: &str) -> Option<Arc<dyn FocusHandle>> {
        self.registry
            .read()
            .ok()
            .and_then(|guard| guard.input_refs.get(path).cloned())
    }

    /// Check if a field path has a registered handle.
    pub fn is_registered(&self, path: &str) -> bool {
        self.input_ref(path).is_some()
    }

    /// Number of registered handles.
    pub fn registered_count(&self) -> usize {
        self.registry
            .read()
            .map(|guard| guard.input_refs.len())
            .unwrap_or(0)
    }

    /// Registered field paths, sorted.
    pub fn registered_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .registry
            .read()
            .map(|guard| guard.input_refs.keys().cloned().collect())
            .unwrap_or_default();
        paths.sort();
        paths
    }

    /// Counter bumped on every registry change.
    pub fn revision(&self) -> u64 {
        self.registry.read().map(|guard| guard.revision).unwrap_or(0)
    }

    /// Focus and scroll to the control registered for `path`.
    ///
    /// Returns `false` (and does nothing) if no handle is registered.
    pub fn focus_field(&self, path: &str) -> bool {
        // Clone out of the lock so the handle may touch the registry.
        let Some(handle) = self.input_ref(path) else {
            return false;
        };
        handle.focus();
        handle.scroll_into_view(ScrollOptions::default());
        true
    }

    /// Check if two contexts share the same registry.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.registry, &other.registry)
    }
}

impl std::fmt::Debug for FormContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormContext")
            .field("flags", &self.flags)
            .field("registered", &self.registered_paths())
            .finish()
    }
}
