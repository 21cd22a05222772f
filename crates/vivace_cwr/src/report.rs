//! Human-readable summary of a parse report.

use crate::diagnostic::Severity;
use crate::CwrParseReport;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Formats an integer with commas as thousands separators.
pub fn format_int_with_commas(num: i64) -> String {
    let digits = num.unsigned_abs().to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if num < 0 {
        out.push('-');
    }
    let head = digits.len() % 3;
    if head > 0 {
        out.push_str(&digits[..head]);
    }
    for group in bytes[head..].chunks(3) {
        if out.ends_with(|c: char| c.is_ascii_digit()) {
            out.push(',');
        }
        out.push_str(std::str::from_utf8(group).expect("digits are ASCII"));
    }
    out
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Fatal => "fatal",
        Severity::Group => "group",
        Severity::Transaction => "transaction",
        Severity::Record => "record",
        Severity::Field => "field",
        Severity::Warning => "warning",
    }
}

/// Per-record-type and per-finding tallies, as display text.
pub fn report_summary(report: &CwrParseReport) -> String {
    let mut out = String::new();

    let mut record_counts: BTreeMap<&str, i64> = BTreeMap::new();
    if let Some(header) = &report.header {
        *record_counts.entry(header.record_type.as_str()).or_insert(0) += 1;
    }
    for group in &report.groups {
        *record_counts.entry(group.header.record_type.as_str()).or_insert(0) += 1;
        for transaction in &group.transactions {
            for record in transaction.all_records() {
                *record_counts.entry(record.record_type.as_str()).or_insert(0) += 1;
            }
        }
        if let Some(trailer) = &group.trailer {
            *record_counts.entry(trailer.record_type.as_str()).or_insert(0) += 1;
        }
    }
    if let Some(trailer) = &report.trailer {
        *record_counts.entry(trailer.record_type.as_str()).or_insert(0) += 1;
    }

    let _ = writeln!(out, "{:<5} | {:>10}", "Type", "Count");
    let _ = writeln!(out, "{:-<5}-+-{:-<10}", "", "");
    for (record_type, count) in &record_counts {
        let _ = writeln!(out, "{:<5} | {:>10}", record_type, format_int_with_commas(*count));
    }
    if record_counts.is_empty() {
        let _ = writeln!(out, "  No records parsed.");
    }

    let mut finding_counts: BTreeMap<String, i64> = BTreeMap::new();
    for diagnostic in &report.diagnostics {
        let key = format!("{:?} ({})", diagnostic.code, severity_label(diagnostic.severity));
        *finding_counts.entry(key).or_insert(0) += 1;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<40} | {:>10}", "Finding", "Count");
    let _ = writeln!(out, "{:-<40}-+-{:-<10}", "", "");
    for (finding, count) in &finding_counts {
        let _ = writeln!(out, "{:<40} | {:>10}", finding, format_int_with_commas(*count));
    }
    if finding_counts.is_empty() {
        let _ = writeln!(out, "  No findings.");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_int_with_commas() {
        assert_eq!(format_int_with_commas(0), "0");
        assert_eq!(format_int_with_commas(999), "999");
        assert_eq!(format_int_with_commas(1000), "1,000");
        assert_eq!(format_int_with_commas(1234567), "1,234,567");
        assert_eq!(format_int_with_commas(-45678), "-45,678");
    }
}
