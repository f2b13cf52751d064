use std::collections::BTreeMap;

/// Message severity, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// All severities, highest precedence first.
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three independent messages a field can carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMessages {
    pub error: Option<String>,
    pub warning: Option<String>,
    pub info: Option<String>,
}

impl FieldMessages {
    /// Get the message of one severity.
    pub fn get(&self, severity: Severity) -> Option<&str> {
        match severity {
            Severity::Error => self.error.as_deref(),
            Severity::Warning => self.warning.as_deref(),
            Severity::Info => self.info.as_deref(),
        }
    }

    /// Set the message of one severity.
    pub fn set(&mut self, severity: Severity, message: Option<String>) {
        let slot = match severity {
            Severity::Error => &mut self.error,
            Severity::Warning => &mut self.warning,
            Severity::Info => &mut self.info,
        };
        *slot = message;
    }

    /// Check if no severity has a message.
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.warning.is_none() && self.info.is_none()
    }

    /// The message shown for this field: error masks warning masks info.
    pub fn active(&self) -> Option<(Severity, &str)> {
        Severity::ALL
            .into_iter()
            .find_map(|severity| self.get(severity).map(|message| (severity, message)))
    }

    /// Drop every message below the active one.
    pub fn mask(&mut self) {
        if let Some((active, _)) = self.active() {
            for severity in Severity::ALL {
                if severity > active {
                    self.set(severity, None);
                }
            }
        }
    }
}

/// Messages produced by one validation run, keyed by sub-path.
///
/// The empty sub-path is the field itself; multi-field rules add one entry
/// per failing sub-field (`"start"`, `"end"`, `"dd"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    entries: BTreeMap<String, FieldMessages>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the run produced no message at all.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(FieldMessages::is_empty)
    }

    /// Messages for the field itself.
    pub fn field(&self) -> Option<&FieldMessages> {
        self.entries.get("")
    }

    /// Messages for a sub-path.
    pub fn get(&self, sub_path: &str) -> Option<&FieldMessages> {
        self.entries.get(sub_path)
    }

    /// Iterate `(sub_path, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldMessages)> {
        self.entries.iter().map(|(path, messages)| (path.as_str(), messages))
    }

    /// The first error, the field's own before any sub-path's.
    pub fn error(&self) -> Option<&str> {
        self.entries.values().find_map(|messages| messages.error.as_deref())
    }

    /// The first message of a severity.
    pub fn first(&self, severity: Severity) -> Option<&str> {
        self.entries.values().find_map(|messages| messages.get(severity))
    }

    /// Whether the field itself (not a sub-path) already carries a message.
    pub(crate) fn has_own_message(&self) -> bool {
        self.field().is_some_and(|messages| !messages.is_empty())
    }

    pub(crate) fn insert(&mut self, sub_path: &str, severity: Severity, message: String) {
        let entry = self.entries.entry(sub_path.to_string()).or_default();
        if entry.get(severity).is_none() {
            entry.set(severity, Some(message));
        }
    }

    pub(crate) fn mask(&mut self) {
        for messages in self.entries.values_mut() {
            messages.mask();
        }
    }
}
