//! Classified findings attached to a parse report.

use serde::{Deserialize, Serialize};

/// Scope of invalidation, per the CWR message-level convention.
///
/// Ordered from least to most severe so that `severity >= Severity::Record`
/// selects exactly the levels that invalidate something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Informational; nothing is invalidated.
    Warning,
    /// A single field is unusable; the record stands.
    Field,
    /// The record is invalid.
    Record,
    /// The whole transaction is invalid.
    Transaction,
    /// The whole group is invalid; other groups remain usable.
    Group,
    /// The file is invalid.
    Fatal,
}

impl Severity {
    /// True when a finding at this level invalidates a record or wider scope.
    pub fn invalidates(self) -> bool {
        self >= Severity::Record
    }
}

/// Stable machine-readable classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCode {
    MalformedRecord,
    UnknownRecordType,
    Truncated,
    FormatError,
    MissingMandatoryField,
    UnknownCode,
    MissingLookupTable,
    UnknownLookupCategory,
    ShareSumInvalid,
    OrphanReference,
    BadSequence,
    BadStructure,
    CountMismatch,
    GroupIdMismatch,
    VersionMismatch,
    UnsupportedVersion,
    EmptyLine,
}

/// A single parse or validation finding.
///
/// Diagnostics are ordered by input line, tie-broken by the pass that raised
/// them (decode, then mandatory-field, lookup, cross-record, and count
/// checks).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    pub line_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<&'static str>,
    #[serde(skip)]
    pub(crate) pass: u8,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: DiagnosticCode, message: String, line_number: usize) -> Self {
        Diagnostic { severity, code, message, line_number, record_type: None, field_name: None, pass: 0 }
    }

    pub fn with_record_type(mut self, record_type: &str) -> Self {
        self.record_type = Some(record_type.to_string());
        self
    }

    pub fn with_field(mut self, field_name: &'static str) -> Self {
        self.field_name = Some(field_name);
        self
    }

    pub(crate) fn in_pass(mut self, pass: u8) -> Self {
        self.pass = pass;
        self
    }
}

/// Stable sort restoring input order with pass order inside a line.
pub(crate) fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| (d.line_number, d.pass));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ladder() {
        assert!(Severity::Fatal.invalidates());
        assert!(Severity::Group.invalidates());
        assert!(Severity::Transaction.invalidates());
        assert!(Severity::Record.invalidates());
        assert!(!Severity::Field.invalidates());
        assert!(!Severity::Warning.invalidates());
    }

    #[test]
    fn test_sort_keeps_input_order_across_lines() {
        let mut diags = vec![
            Diagnostic::new(Severity::Warning, DiagnosticCode::EmptyLine, "b".into(), 7),
            Diagnostic::new(Severity::Field, DiagnosticCode::Truncated, "a".into(), 3),
        ];
        sort_diagnostics(&mut diags);
        assert_eq!(diags[0].line_number, 3);
        assert_eq!(diags[1].line_number, 7);
    }

    #[test]
    fn test_sort_breaks_line_ties_by_pass() {
        let mut diags = vec![
            Diagnostic::new(Severity::Transaction, DiagnosticCode::ShareSumInvalid, "late".into(), 5).in_pass(3),
            Diagnostic::new(Severity::Record, DiagnosticCode::MissingMandatoryField, "early".into(), 5).in_pass(1),
        ];
        sort_diagnostics(&mut diags);
        assert_eq!(diags[0].message, "early");
        assert_eq!(diags[1].message, "late");
    }
}
