//! Per-case record of recoverable anomalies.
//!
//! Nothing collected here changes a report artifact. Missing input files,
//! voltages that no candidate base could normalize, and solver-B links that
//! found no solver-A counterpart all still flow through the comparison the
//! same way; the collection only makes them countable and serializable.
//!
//! ```
//! use pfc_core::diagnostics::{Category, Diagnostics};
//!
//! let mut diag = Diagnostics::new();
//! diag.note(Category::Input, "file not found: test/ieee13_t.csv");
//! diag.warn(Category::Reconcile, "no solver-A conductor", "XF_T1_A");
//! assert_eq!(diag.warning_count(), 1);
//! assert_eq!(diag.entities(Category::Reconcile).collect::<Vec<_>>(), ["XF_T1_A"]);
//! ```

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Expected in some runs, e.g. a solver that writes no tap table.
    Note,
    /// The comparison is less complete, or a value is anomalous.
    Warning,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
        }
    }
}

/// Stage of the comparison that raised the issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Input file absent.
    Input,
    /// Voltage no candidate base could convert to per-unit.
    Normalize,
    /// Solver-B link phase left out of the cross-solver comparison.
    Reconcile,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Input => "input",
            Category::Normalize => "normalize",
            Category::Reconcile => "reconcile",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticIssue {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    /// Rendered key of the entity concerned, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] {}",
            self.severity.label(),
            self.category.label(),
            self.message
        )?;
        match &self.entity {
            Some(entity) => write!(f, " ({entity})"),
            None => Ok(()),
        }
    }
}

/// Issues of one case, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&mut self, category: Category, message: impl Into<String>) {
        self.issues.push(DiagnosticIssue {
            severity: Severity::Note,
            category,
            message: message.into(),
            entity: None,
        });
    }

    /// Record a warning about one entity.
    pub fn warn(&mut self, category: Category, message: impl Into<String>, entity: impl Into<String>) {
        self.issues.push(DiagnosticIssue {
            severity: Severity::Warning,
            category,
            message: message.into(),
            entity: Some(entity.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn count(&self, category: Category) -> usize {
        self.issues.iter().filter(|i| i.category == category).count()
    }

    /// Entities named by the issues of `category`.
    pub fn entities(&self, category: Category) -> impl Iterator<Item = &str> {
        self.issues
            .iter()
            .filter(move |i| i.category == category)
            .filter_map(|i| i.entity.as_deref())
    }

    /// One-line tally, e.g. `3 warnings, 1 note`.
    pub fn summary(&self) -> String {
        let warnings = self.warning_count();
        let notes = self.issues.len() - warnings;
        let tally = |n: usize, noun: &str| format!("{n} {noun}{}", if n == 1 { "" } else { "s" });
        match (warnings, notes) {
            (0, 0) => "no issues".to_string(),
            (w, 0) => tally(w, "warning"),
            (0, n) => tally(n, "note"),
            (w, n) => format!("{}, {}", tally(w, "warning"), tally(n, "note")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tallies_by_severity() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.summary(), "no issues");
        diag.warn(Category::Normalize, "no base fits", "650_A");
        assert_eq!(diag.summary(), "1 warning");
        diag.note(Category::Input, "missing");
        diag.note(Category::Input, "missing");
        assert_eq!(diag.summary(), "1 warning, 2 notes");
        assert_eq!(diag.count(Category::Input), 2);
    }

    #[test]
    fn display_includes_entity() {
        let mut diag = Diagnostics::new();
        diag.warn(Category::Reconcile, "dropped", "REG_RG60_B");
        diag.note(Category::Input, "file not found");
        assert_eq!(diag.issues[0].to_string(), "[warning:reconcile] dropped (REG_RG60_B)");
        assert_eq!(diag.issues[1].to_string(), "[note:input] file not found");
    }

    #[test]
    fn entities_filter_by_category() {
        let mut diag = Diagnostics::new();
        diag.warn(Category::Reconcile, "dropped", "XF_T1_A");
        diag.warn(Category::Normalize, "unresolved", "650_B");
        diag.warn(Category::Reconcile, "dropped", "XF_T1_B");
        let dropped: Vec<&str> = diag.entities(Category::Reconcile).collect();
        assert_eq!(dropped, ["XF_T1_A", "XF_T1_B"]);
    }

    #[test]
    fn serializes_lowercase_tags() {
        let mut diag = Diagnostics::new();
        diag.warn(Category::Normalize, "unresolved", "650_A");
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"severity\":\"warning\""));
        assert!(json.contains("\"category\":\"normalize\""));
        assert!(json.contains("\"entity\":\"650_A\""));
    }
}
