//! Prelude module for convenient imports.
//!
//! ```ignore
//! use vform::prelude::*;
//! ```

pub use crate::config::TimingConfig;
pub use crate::context::{FormContext, ValidationFlags};
pub use crate::controller::{FormActions, FormContainer, FormController, FormValidateFn};
pub use crate::error::{ConfigError, Issue, SchemaError};
pub use crate::field::{
    Capability, Controls, FieldBinding, FieldEvent, FieldEventKind, FieldKind, FieldRenderProps,
};
pub use crate::focus::{FocusHandle, FocusId, FocusScope, InputHandle, ScrollOptions};
pub use crate::form::{FormOptions, FormPhase, SubmitOutcome, ValidatedForm};
pub use crate::store::{DateValue, TouchedErrors};
pub use crate::summary::{SummaryEntry, SummaryTitle, ValidationSummary};
pub use crate::validation::{
    FieldMessages, FieldValidator, Rule, Schema, Severity, ValidationReport, boolean, custom,
    number, object, string,
};
