use std::sync::{Arc, RwLock};

use serde_json::Value;

use super::rule::{Rule, RuleOutcome};
use super::severity::{Severity, ValidationReport};

/// Uniform validate-and-report callable for one field.
///
/// Holds optional error, warning and info rules and remembers the report of
/// the last validated value. Clones share that record, so a clone handed to
/// a form container reports through the original.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    error: Option<Rule>,
    warning: Option<Rule>,
    info: Option<Rule>,
    last: Arc<RwLock<ValidationReport>>,
}

impl FieldValidator {
    /// Create a validator from an optional error rule. `None` always passes.
    pub fn new(rule: impl Into<Option<Rule>>) -> Self {
        Self {
            error: rule.into(),
            ..Default::default()
        }
    }

    /// Add a warning rule.
    pub fn with_warning(mut self, rule: Rule) -> Self {
        self.warning = Some(rule);
        self
    }

    /// Add an info rule.
    pub fn with_info(mut self, rule: Rule) -> Self {
        self.info = Some(rule);
        self
    }

    /// Replace the error rule.
    pub fn set_rule(&mut self, rule: Option<Rule>) {
        self.error = rule;
    }

    /// Check if any severity has a rule.
    pub fn has_rules(&self) -> bool {
        self.error.is_some() || self.warning.is_some() || self.info.is_some()
    }

    /// Validate and return the error message, if any.
    pub fn validate(&self, value: &Value) -> Option<String> {
        self.run(value).error().map(str::to_string)
    }

    /// Validate every severity and record the report.
    ///
    /// Single-field rules short-circuit: once the field has a message, lower
    /// tiers are not evaluated. Multi-field rules spread their failures over
    /// sub-paths; every tier is evaluated and each sub-path keeps only its
    /// highest severity.
    pub fn run(&self, value: &Value) -> ValidationReport {
        let mut report = ValidationReport::new();
        let tiers = [
            (Severity::Error, &self.error),
            (Severity::Warning, &self.warning),
            (Severity::Info, &self.info),
        ];

        for (severity, rule) in tiers {
            if report.has_own_message() {
                break;
            }
            let Some(rule) = rule else {
                continue;
            };
            match rule.evaluate(value) {
                RuleOutcome::Pass => {}
                RuleOutcome::Fail(message) => report.insert("", severity, message),
                RuleOutcome::FailFields(issues) => {
                    for issue in issues {
                        report.insert(&issue.path, severity, issue.message);
                    }
                }
            }
        }
        report.mask();

        if let Ok(mut guard) = self.last.write() {
            *guard = report.clone();
        }
        report
    }

    /// Report of the last validated value.
    pub fn last_report(&self) -> ValidationReport {
        self.last
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Check if two validators share the same report record.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.last, &other.last)
    }
}

impl From<Rule> for FieldValidator {
    fn from(rule: Rule) -> Self {
        Self::new(rule)
    }
}
