//! Field validation rules and the per-field validator.
//!
//! A field rule is either a [`Schema`] (fails closed: every failure is
//! reported) or a plain function returning an optional message (fails open:
//! a panicking function is logged and treated as a pass).
//!
//! # Example
//!
//! ```ignore
//! use vform::validation::{FieldValidator, Rule, string};
//!
//! let validator = FieldValidator::new(Rule::schema(
//!     string().required("Email is required").email("Enter a valid email"),
//! ))
//! .with_warning(Rule::function(|v| {
//!     v.as_str()
//!         .filter(|s| s.ends_with("@example.com"))
//!         .map(|_| "Example addresses are not monitored".to_string())
//! }));
//!
//! assert_eq!(validator.validate(&"".into()), Some("Email is required".into()));
//! ```

mod rule;
mod schema;
mod severity;
mod validator;

pub use rule::{Rule, RuleOutcome, ValidateFn};
pub use schema::{
    BoolSchema, CustomSchema, NumberSchema, ObjectSchema, Schema, StringSchema, boolean, custom,
    number, object, string,
};
pub use severity::{FieldMessages, Severity, ValidationReport};
pub use validator::FieldValidator;
