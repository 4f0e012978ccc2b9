//! Parse diagnostics for kindred
//!
//! The parser never fails on malformed input; it records what it skipped or
//! resolved instead. This module provides the diagnostic records collected
//! alongside a parse, exposed separately from the family graph so that the
//! result shape stays a plain [`FamilyData`](kindred_model::FamilyData).

use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Expected, recorded for traceability only
    Info,

    /// Something in the source was dropped or left dangling
    Warning,
}

/// What kind of parse event a diagnostic records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A line matched no known record shape and contributed nothing
    SkippedLine,

    /// A split record resolved to an already-known identity
    MergedRecord,

    /// A slot collision was resolved by probing a numbered suffix
    CollisionSuffix,

    /// A child had a parent with no recorded spouse to attach it to
    UnattachedChild,
}

impl DiagnosticKind {
    /// The severity this kind of event is reported at
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::SkippedLine | DiagnosticKind::MergedRecord => Severity::Info,
            DiagnosticKind::CollisionSuffix | DiagnosticKind::UnattachedChild => Severity::Warning,
        }
    }

    fn label(self) -> &'static str {
        match self {
            DiagnosticKind::SkippedLine => "skipped_line",
            DiagnosticKind::MergedRecord => "merged_record",
            DiagnosticKind::CollisionSuffix => "collision_suffix",
            DiagnosticKind::UnattachedChild => "unattached_child",
        }
    }
}

/// One recorded parse event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,

    /// Event kind
    pub kind: DiagnosticKind,

    /// Human-readable description
    pub message: String,

    /// 1-indexed source line the event was observed at
    pub line: usize,
}

impl Diagnostic {
    /// Create a diagnostic; severity follows from the kind
    pub fn new(kind: DiagnosticKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            message: message.into(),
            line,
        }
    }

    /// Check if this is a warning-level diagnostic
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: line N: severity[kind]: message
        write!(
            f,
            "line {}: {}[{}]: {}",
            self.line,
            self.severity,
            self.kind.label(),
            self.message
        )
    }
}

/// All diagnostics collected during one parse
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    diagnostics: Vec<Diagnostic>,
}

impl ParseReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Record a line that contributed nothing
    pub fn skipped(&mut self, line: usize, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticKind::SkippedLine, line, message));
    }

    /// Record a split record merged into an existing identity
    pub fn merged(&mut self, line: usize, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticKind::MergedRecord, line, message));
    }

    /// Record a slot collision resolved by suffix probing
    pub fn collision(&mut self, line: usize, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticKind::CollisionSuffix, line, message));
    }

    /// Record a child left unattached at the spouse level
    pub fn unattached(&mut self, line: usize, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticKind::UnattachedChild, line, message));
    }

    /// All diagnostics, in the order they were recorded
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterate over all diagnostics
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Count diagnostics of one kind
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// Check if there are any warning-level diagnostics
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_warning())
    }

    /// Get the number of warnings
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get the count
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl IntoIterator for ParseReport {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_kind() {
        assert_eq!(DiagnosticKind::SkippedLine.severity(), Severity::Info);
        assert_eq!(DiagnosticKind::MergedRecord.severity(), Severity::Info);
        assert_eq!(DiagnosticKind::CollisionSuffix.severity(), Severity::Warning);
        assert_eq!(DiagnosticKind::UnattachedChild.severity(), Severity::Warning);
    }

    #[test]
    fn test_report_counts() {
        let mut report = ParseReport::new();
        report.skipped(3, "unrecognized line shape");
        report.unattached(7, "parent has no spouse");
        report.merged(9, "merged into r-1-1");

        assert_eq!(report.len(), 3);
        assert!(report.has_warnings());
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.count_of(DiagnosticKind::MergedRecord), 1);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(DiagnosticKind::UnattachedChild, 12, "Bob has no spouse slot");
        let display = format!("{}", diag);
        assert!(display.contains("line 12"));
        assert!(display.contains("warning[unattached_child]"));
        assert!(display.contains("Bob has no spouse slot"));
    }

    #[test]
    fn test_diagnostic_serialize() {
        let diag = Diagnostic::new(DiagnosticKind::SkippedLine, 4, "noise");

        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"severity\":\"info\""));
        assert!(json.contains("\"kind\":\"skipped_line\""));

        let restored: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, diag);
    }
}
