use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::error;
use serde_json::Value;

use super::schema::Schema;
use crate::error::{Issue, SchemaError};

/// Plain validation function: returns a message when the value is invalid.
pub type ValidateFn = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// A single validation rule for one field.
#[derive(Clone)]
pub enum Rule {
    /// Schema rule; its failures are always reported.
    Schema(Arc<dyn Schema>),
    /// Plain function rule; a panic inside it is logged and treated as a pass.
    Function(ValidateFn),
}

/// Result of evaluating a rule against a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass,
    /// The value itself failed.
    Fail(String),
    /// Nested values failed; every failure is listed with its sub-path.
    FailFields(Vec<Issue>),
}

impl Rule {
    /// Wrap a schema.
    pub fn schema(schema: impl Schema + 'static) -> Self {
        Self::Schema(Arc::new(schema))
    }

    /// Wrap a plain validation function.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Evaluate the rule.
    pub fn evaluate(&self, value: &Value) -> RuleOutcome {
        match self {
            Self::Schema(schema) => match schema.validate(value) {
                Ok(()) => RuleOutcome::Pass,
                Err(SchemaError::Fields(issues)) if !issues.is_empty() => {
                    RuleOutcome::FailFields(issues)
                }
                Err(err) => RuleOutcome::Fail(err.message().to_string()),
            },
            Self::Function(f) => match panic::catch_unwind(AssertUnwindSafe(|| f(value))) {
                // An empty message is not an error
                Ok(Some(message)) if !message.is_empty() => RuleOutcome::Fail(message),
                Ok(_) => RuleOutcome::Pass,
                Err(panic) => {
                    error!(
                        "Validation function panicked, treating value as valid: {}",
                        extract_panic_message(&panic)
                    );
                    RuleOutcome::Pass
                }
            },
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema(_) => f.write_str("Rule::Schema"),
            Self::Function(_) => f.write_str("Rule::Function"),
        }
    }
}

/// Extract a human-readable message from a panic payload.
pub(crate) fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
