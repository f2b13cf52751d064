//! Aggregated list of touched errors with click-to-focus entries.

use log::debug;

use crate::context::FormContext;

/// Pluralised summary title with a `%{count}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTitle {
    pub one: String,
    pub other: String,
}

impl Default for SummaryTitle {
    fn default() -> Self {
        Self {
            one: "There is %{count} error".to_string(),
            other: "There are %{count} errors".to_string(),
        }
    }
}

impl SummaryTitle {
    pub fn new(one: impl Into<String>, other: impl Into<String>) -> Self {
        Self {
            one: one.into(),
            other: other.into(),
        }
    }

    /// Pick the form for `count` and interpolate it.
    pub fn format(&self, count: usize) -> String {
        let template = if count == 1 { &self.one } else { &self.other };
        template.replace("%{count}", &count.to_string())
    }
}

/// One listed error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub path: String,
    pub label: Option<String>,
    pub message: String,
}

/// The summary panel shown after a failed submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    title: String,
    error_count: usize,
    entries: Vec<SummaryEntry>,
}

impl ValidationSummary {
    /// Build a summary from `(path, message)` pairs.
    ///
    /// Returns `None` when there is nothing to list. `title` replaces the
    /// pluralised default verbatim.
    pub fn new(
        error_count: usize,
        messages: &[(String, String)],
        title: Option<&str>,
    ) -> Option<Self> {
        Self::with_title(error_count, messages, title, &SummaryTitle::default())
    }

    /// Like [`ValidationSummary::new`] with custom pluralised title forms.
    pub fn with_title(
        error_count: usize,
        messages: &[(String, String)],
        title: Option<&str>,
        forms: &SummaryTitle,
    ) -> Option<Self> {
        if messages.is_empty() {
            return None;
        }
        let title = match title {
            Some(title) => title.to_string(),
            None => forms.format(error_count),
        };
        let entries = messages
            .iter()
            .map(|(path, message)| SummaryEntry {
                path: path.clone(),
                label: None,
                message: message.clone(),
            })
            .collect();
        Some(Self {
            title,
            error_count,
            entries,
        })
    }

    /// Attach field labels, looked up by entry path.
    pub fn with_labels<F>(mut self, label_for: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for entry in &mut self.entries {
            entry.label = label_for(&entry.path);
        }
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn entry(&self, path: &str) -> Option<&SummaryEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Focus and scroll to the field of a listed entry.
    ///
    /// A nested path with no handle of its own resolves to its closest
    /// registered ancestor (`dob.dd` focuses `dob`). Returns `false` if the
    /// path is not listed or nothing is registered for it.
    pub fn activate(&self, path: &str, context: &FormContext) -> bool {
        if self.entry(path).is_none() {
            return false;
        }
        let mut candidate = path;
        loop {
            if context.focus_field(candidate) {
                debug!("Summary focused '{}' for entry '{}'", candidate, path);
                return true;
            }
            match candidate.rsplit_once('.') {
                Some((parent, _)) => candidate = parent,
                None => return false,
            }
        }
    }
}

impl std::fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        for entry in &self.entries {
            match &entry.label {
                Some(label) => writeln!(f, "  - {}: {}", label, entry.message)?,
                None => writeln!(f, "  - {}", entry.message)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(path, message)| (path.to_string(), message.to_string()))
            .collect()
    }

    #[test]
    fn test_title_plural_forms() {
        let title = SummaryTitle::default();
        assert_eq!(title.format(1), "There is 1 error");
        assert_eq!(title.format(2), "There are 2 errors");
        assert_eq!(title.format(0), "There are 0 errors");
    }

    #[test]
    fn test_custom_title_forms() {
        let forms = SummaryTitle::new("%{count} problem", "%{count} problems");
        let summary = ValidationSummary::with_title(1, &messages(&[("a", "A")]), None, &forms);
        assert_eq!(summary.map(|s| s.title().to_string()), Some("1 problem".to_string()));
    }

    #[test]
    fn test_empty_summary_is_none() {
        assert!(ValidationSummary::new(0, &[], None).is_none());
    }

    #[test]
    fn test_title_override_is_verbatim() {
        let summary =
            ValidationSummary::new(2, &messages(&[("a", "A"), ("b", "B")]), Some("Fix these"))
                .unwrap();
        assert_eq!(summary.title(), "Fix these");
    }

    #[test]
    fn test_display_lists_entries() {
        let summary = ValidationSummary::new(1, &messages(&[("email", "Email is required")]), None)
            .unwrap()
            .with_labels(|path| (path == "email").then(|| "Email".to_string()));
        assert_eq!(
            summary.to_string(),
            "There is 1 error\n  - Email: Email is required\n"
        );
    }
}
