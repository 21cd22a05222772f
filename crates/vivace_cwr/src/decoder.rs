//! Position-indexed field extraction.
//!
//! The decoder is total: any input line yields a record (or, below three
//! bytes, a lone diagnostic). Fields that fail their format keep their raw
//! content so a downstream report can show what the submitter actually sent.

use crate::diagnostic::{Diagnostic, DiagnosticCode, Severity};
use crate::schema::{self, CwrVersion, FieldFormat};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Y/N/U indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    Yes,
    No,
    Unknown,
}

/// A decoded field. Absent optional content decodes to the `None` of its
/// format; content that failed its format is preserved under `Raw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(Option<u64>),
    Date(Option<NaiveDate>),
    Time(Option<NaiveTime>),
    /// Elapsed seconds.
    Duration(Option<u32>),
    Flag(Option<Flag>),
    Boolean(Option<bool>),
    /// Percentage in integer thousandths (`50_000` is 50.000%).
    Share(Option<u32>),
    /// Lookup code, membership checked by the validator.
    Code(Option<String>),
    /// Content that failed its declared format, verbatim.
    Raw(String),
}

impl FieldValue {
    /// True when the field carries usable content.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Number(v) => v.is_some(),
            FieldValue::Date(v) => v.is_some(),
            FieldValue::Time(v) => v.is_some(),
            FieldValue::Duration(v) => v.is_some(),
            FieldValue::Flag(v) => v.is_some(),
            FieldValue::Boolean(v) => v.is_some(),
            FieldValue::Share(v) => v.is_some(),
            FieldValue::Code(v) => v.is_some(),
            FieldValue::Raw(_) => true,
        }
    }
}

/// One decoded record line. Immutable after decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub record_type: String,
    pub line_number: usize,
    pub raw: String,
    pub fields: HashMap<String, FieldValue>,
    /// False when no layout is registered for the record type; `fields` is
    /// then empty and only `raw` carries the content.
    pub known: bool,
}

impl ParsedRecord {
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<u64> {
        match self.fields.get(name) {
            Some(FieldValue::Number(v)) => *v,
            _ => None,
        }
    }

    pub fn share(&self, name: &str) -> Option<u32> {
        match self.fields.get(name) {
            Some(FieldValue::Share(v)) => *v,
            _ => None,
        }
    }

    pub fn code(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Code(v)) => v.as_deref(),
            _ => None,
        }
    }

    pub fn has_value(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(FieldValue::is_present)
    }
}

/// Decode one line against the active version's layout tables.
///
/// Returns `None` for a record only when the line is too short to carry a
/// record type; every other input produces a record.
pub fn decode_record(line_number: usize, text: &str, version: CwrVersion) -> (Option<ParsedRecord>, Vec<Diagnostic>) {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 3 {
        let diag = Diagnostic::new(
            Severity::Fatal,
            DiagnosticCode::MalformedRecord,
            format!("line is {} bytes long, too short to carry a record type", chars.len()),
            line_number,
        );
        return (None, vec![diag]);
    }

    let record_type: String = chars[0..3].iter().collect();
    let Some(record_schema) = schema::record_schema(version, &record_type) else {
        let diag = Diagnostic::new(
            Severity::Record,
            DiagnosticCode::UnknownRecordType,
            format!("unrecognized record type '{}'", record_type),
            line_number,
        )
        .with_record_type(&record_type);
        let record = ParsedRecord {
            record_type,
            line_number,
            raw: text.to_string(),
            fields: HashMap::new(),
            known: false,
        };
        return (Some(record), vec![diag]);
    };

    let mut diagnostics = Vec::new();
    let mut fields = HashMap::with_capacity(record_schema.fields.len());

    for spec in &record_schema.fields {
        let (slice, truncated) = slice_field(&chars, spec.start, spec.len);
        if truncated {
            diagnostics.push(
                Diagnostic::new(
                    Severity::Field,
                    DiagnosticCode::Truncated,
                    format!(
                        "line too short for '{}': expected {} characters at position {}, got {}",
                        spec.name,
                        spec.len,
                        spec.start,
                        chars.len().saturating_sub(spec.start - 1)
                    ),
                    line_number,
                )
                .with_record_type(&record_type)
                .with_field(spec.name),
            );
        }
        let (value, format_error) = decode_field(&slice, spec.format);
        if let Some(description) = format_error {
            diagnostics.push(
                Diagnostic::new(Severity::Field, DiagnosticCode::FormatError, description, line_number)
                    .with_record_type(&record_type)
                    .with_field(spec.name),
            );
        }
        fields.insert(spec.name.to_string(), value);
    }

    let record =
        ParsedRecord { record_type, line_number, raw: text.to_string(), fields, known: true };
    (Some(record), diagnostics)
}

/// Slice a 1-indexed fixed-width range, padding short lines with spaces.
fn slice_field(chars: &[char], start: usize, len: usize) -> (String, bool) {
    let begin = start - 1;
    let end = begin + len;
    if end <= chars.len() {
        (chars[begin..end].iter().collect(), false)
    } else if begin < chars.len() {
        let mut s: String = chars[begin..].iter().collect();
        s.extend(std::iter::repeat(' ').take(end - chars.len()));
        (s, true)
    } else {
        (" ".repeat(len), true)
    }
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ')
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Apply one format. Returns the value plus a description when the content
/// failed the format (the raw content is then preserved in the value).
fn decode_field(raw: &str, format: FieldFormat) -> (FieldValue, Option<String>) {
    match format {
        FieldFormat::Alphanumeric => (FieldValue::Text(raw.trim_end_matches(' ').to_string()), None),
        FieldFormat::Numeric => {
            if is_blank(raw) {
                (FieldValue::Number(None), None)
            } else if all_digits(raw.trim()) {
                (FieldValue::Number(raw.trim().parse::<u64>().ok()), None)
            } else {
                (FieldValue::Raw(raw.to_string()), Some(format!("'{}' is not a non-negative integer", raw.trim())))
            }
        }
        FieldFormat::Date => decode_date(raw),
        FieldFormat::Time => decode_time(raw),
        FieldFormat::Duration => decode_duration(raw),
        FieldFormat::Flag => {
            let trimmed = raw.trim();
            match trimmed {
                "" => (FieldValue::Flag(None), None),
                "Y" => (FieldValue::Flag(Some(Flag::Yes)), None),
                "N" => (FieldValue::Flag(Some(Flag::No)), None),
                "U" => (FieldValue::Flag(Some(Flag::Unknown)), None),
                _ => (FieldValue::Raw(raw.to_string()), Some(format!("'{}' is not one of Y, N, U", trimmed))),
            }
        }
        FieldFormat::Boolean => {
            let trimmed = raw.trim();
            match trimmed {
                "" => (FieldValue::Boolean(None), None),
                "Y" => (FieldValue::Boolean(Some(true)), None),
                "N" => (FieldValue::Boolean(Some(false)), None),
                _ => (FieldValue::Raw(raw.to_string()), Some(format!("'{}' is not one of Y, N", trimmed))),
            }
        }
        FieldFormat::Share => {
            if is_blank(raw) {
                (FieldValue::Share(None), None)
            } else if all_digits(raw) {
                (FieldValue::Share(raw.parse::<u32>().ok()), None)
            } else {
                (
                    FieldValue::Raw(raw.to_string()),
                    Some(format!("share '{}' is not a zero-padded number", raw)),
                )
            }
        }
        FieldFormat::Lookup(_) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                (FieldValue::Code(None), None)
            } else {
                (FieldValue::Code(Some(trimmed.to_string())), None)
            }
        }
    }
}

fn decode_date(raw: &str) -> (FieldValue, Option<String>) {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "00000000" {
        return (FieldValue::Date(None), None);
    }
    if trimmed.len() != 8 || !all_digits(trimmed) {
        return (FieldValue::Raw(raw.to_string()), Some(format!("date '{}' is not YYYYMMDD", trimmed)));
    }
    let year: i32 = trimmed[0..4].parse().unwrap_or(0);
    let month: u32 = trimmed[4..6].parse().unwrap_or(0);
    let day: u32 = trimmed[6..8].parse().unwrap_or(0);
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => (FieldValue::Date(Some(date)), None),
        None => (FieldValue::Raw(raw.to_string()), Some(format!("'{}' is not a valid calendar date", trimmed))),
    }
}

fn decode_time(raw: &str) -> (FieldValue, Option<String>) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (FieldValue::Time(None), None);
    }
    if (trimmed.len() != 6 && trimmed.len() != 8) || !all_digits(trimmed) {
        return (FieldValue::Raw(raw.to_string()), Some(format!("time '{}' is not HHMMSS or HHMMSSFF", trimmed)));
    }
    let hours: u32 = trimmed[0..2].parse().unwrap_or(99);
    let minutes: u32 = trimmed[2..4].parse().unwrap_or(99);
    let seconds: u32 = trimmed[4..6].parse().unwrap_or(99);
    let hundredths: u32 = if trimmed.len() == 8 { trimmed[6..8].parse().unwrap_or(0) } else { 0 };
    match NaiveTime::from_hms_milli_opt(hours, minutes, seconds, hundredths * 10) {
        Some(time) => (FieldValue::Time(Some(time)), None),
        None => (
            FieldValue::Raw(raw.to_string()),
            Some(format!("'{}' is out of range for a time of day", trimmed)),
        ),
    }
}

fn decode_duration(raw: &str) -> (FieldValue, Option<String>) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (FieldValue::Duration(None), None);
    }
    if trimmed.len() != 6 || !all_digits(trimmed) {
        return (FieldValue::Raw(raw.to_string()), Some(format!("duration '{}' is not HHMMSS", trimmed)));
    }
    let hours: u32 = trimmed[0..2].parse().unwrap_or(0);
    let minutes: u32 = trimmed[2..4].parse().unwrap_or(99);
    let seconds: u32 = trimmed[4..6].parse().unwrap_or(99);
    if minutes >= 60 || seconds >= 60 {
        return (
            FieldValue::Raw(raw.to_string()),
            Some(format!("duration '{}' has out-of-range minutes or seconds", trimmed)),
        );
    }
    (FieldValue::Duration(Some(hours * 3600 + minutes * 60 + seconds)), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticCode;

    fn decode(line: &str) -> (ParsedRecord, Vec<Diagnostic>) {
        let (record, diags) = decode_record(1, line, CwrVersion::V2_1);
        (record.expect("record expected"), diags)
    }

    #[test]
    fn test_too_short_line_is_fatal_and_recordless() {
        let (record, diags) = decode_record(4, "XY", CwrVersion::V2_1);
        assert!(record.is_none());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::MalformedRecord);
        assert_eq!(diags[0].severity, Severity::Fatal);
        assert_eq!(diags[0].line_number, 4);
    }

    #[test]
    fn test_unknown_record_type_keeps_raw_line() {
        let (record, diags) = decode("XYZ some unknown content");
        assert!(!record.known);
        assert_eq!(record.record_type, "XYZ");
        assert_eq!(record.raw, "XYZ some unknown content");
        assert!(record.fields.is_empty());
        assert_eq!(diags[0].code, DiagnosticCode::UnknownRecordType);
        assert_eq!(diags[0].severity, Severity::Record);
    }

    #[test]
    fn test_trl_decodes_counts() {
        let (record, diags) = decode("TRL000010000000100000005");
        assert!(diags.is_empty());
        assert_eq!(record.number("group_count"), Some(1));
        assert_eq!(record.number("transaction_count"), Some(1));
        assert_eq!(record.number("record_count"), Some(5));
    }

    #[test]
    fn test_short_line_pads_and_flags_each_missing_field() {
        let (record, diags) = decode("TRL00001");
        // transaction_count and record_count extend past the line end
        let truncated: Vec<_> = diags.iter().filter(|d| d.code == DiagnosticCode::Truncated).collect();
        assert_eq!(truncated.len(), 2);
        assert_eq!(record.number("group_count"), Some(1));
        assert_eq!(record.number("transaction_count"), None);
    }

    #[test]
    fn test_numeric_blank_is_none_and_garbage_is_raw() {
        let (record, diags) = decode("TRL     00000001000000ZZ");
        assert_eq!(record.number("group_count"), None);
        assert_eq!(record.fields.get("record_count"), Some(&FieldValue::Raw("000000ZZ".to_string())));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::FormatError);
        assert_eq!(diags[0].field_name, Some("record_count"));
    }

    #[test]
    fn test_date_validation() {
        assert_eq!(decode_date("20240229").0, FieldValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29)));
        assert!(matches!(decode_date("20230229"), (FieldValue::Raw(_), Some(_))));
        assert_eq!(decode_date("00000000").0, FieldValue::Date(None));
        assert_eq!(decode_date("        ").0, FieldValue::Date(None));
    }

    #[test]
    fn test_time_validation() {
        assert!(matches!(decode_time("235959").0, FieldValue::Time(Some(_))));
        assert!(matches!(decode_time("23595999").0, FieldValue::Time(Some(_))));
        assert!(matches!(decode_time("240000"), (FieldValue::Raw(_), Some(_))));
        assert!(matches!(decode_time("126100"), (FieldValue::Raw(_), Some(_))));
    }

    #[test]
    fn test_duration_validation() {
        assert_eq!(decode_duration("010230").0, FieldValue::Duration(Some(3750)));
        assert!(matches!(decode_duration("006100"), (FieldValue::Raw(_), Some(_))));
        assert_eq!(decode_duration("      ").0, FieldValue::Duration(None));
    }

    #[test]
    fn test_share_decodes_to_thousandths() {
        assert_eq!(decode_field("050000", FieldFormat::Share).0, FieldValue::Share(Some(50_000)));
        assert_eq!(decode_field("      ", FieldFormat::Share).0, FieldValue::Share(None));
        assert!(matches!(decode_field("05000x", FieldFormat::Share), (FieldValue::Raw(_), Some(_))));
    }

    #[test]
    fn test_alphanumeric_right_trim_only() {
        assert_eq!(decode_field("  SONG  ", FieldFormat::Alphanumeric).0, FieldValue::Text("  SONG".to_string()));
    }

    #[test]
    fn test_decoder_totality_over_arbitrary_lengths() {
        let base = "WRK0000000000000000SONG";
        for n in 0..base.len() {
            let (record, _diags) = decode_record(1, &base[..n], CwrVersion::V2_1);
            if n >= 3 {
                assert!(record.is_some());
            } else {
                assert!(record.is_none());
            }
        }
    }
}
