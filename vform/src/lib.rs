//! Field and form validation for controlled input widgets.
//!
//! `vform` attaches field-level and form-level validation to existing input
//! widgets. It decides when validation runs (change, blur, mount or submit),
//! keeps error/warning/info messages per field path, follows fields as they
//! mount and unmount, and aggregates the touched errors into a summary whose
//! entries move focus to the offending control.
//!
//! # Example
//!
//! ```ignore
//! use vform::prelude::*;
//! use serde_json::json;
//!
//! let mut form = ValidatedForm::new(
//!     FormOptions::new(json!({ "username": "" }), |values| println!("{values}"))
//!         .timing(TimingConfig::default().validate_on_submit(true))
//!         .with_summary(true),
//! );
//! form.attach(
//!     FieldBinding::new("username", FieldKind::Textbox)
//!         .validate(Rule::schema(string().required("Username is required")))
//!         .label("Username"),
//! );
//!
//! if let SubmitOutcome::Blocked { error_count } = form.submit() {
//!     let summary = form.summary();
//! }
//! ```

pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod field;
pub mod focus;
pub mod form;
pub mod prelude;
pub mod store;
pub mod summary;
pub mod validation;

pub use serde_json::Value;
