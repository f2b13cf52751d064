//! Error types

/// A single failed check, addressed by a dot path relative to the value
/// that was validated (`""` is the value itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Relative path of the failing value.
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl Issue {
    /// Creates a new issue.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the issue re-addressed under `prefix`.
    pub fn under(self, prefix: &str) -> Self {
        let path = match (prefix.is_empty(), self.path.is_empty()) {
            (true, _) => self.path,
            (false, true) => prefix.to_string(),
            (false, false) => format!("{}.{}", prefix, self.path),
        };
        Self { path, ..self }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Failure reported by a [`Schema`](crate::validation::Schema).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The value itself is invalid.
    #[error("{message}")]
    Invalid { message: String },

    /// A nested value is invalid; validation stopped at the first failure.
    #[error("{message}")]
    Field { path: String, message: String },

    /// Several nested values are invalid; every failure was collected.
    #[error("{} fields failed validation", .0.len())]
    Fields(Vec<Issue>),
}

impl SchemaError {
    /// Creates an error for the value itself.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// The first message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            Self::Invalid { message } | Self::Field { message, .. } => message,
            Self::Fields(issues) => issues.first().map(|i| i.message.as_str()).unwrap_or(""),
        }
    }

    /// Every failure as issues relative to the validated value.
    pub fn into_issues(self) -> Vec<Issue> {
        match self {
            Self::Invalid { message } => vec![Issue::new("", message)],
            Self::Field { path, message } => vec![Issue::new(path, message)],
            Self::Fields(issues) => issues,
        }
    }
}

/// Error type for loading validation timing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for a timing config.
    #[error("invalid timing configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
