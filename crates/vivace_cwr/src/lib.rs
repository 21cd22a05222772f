//! CWR (Common Works Registration) file parser and validator library
//!
//! This library ingests CWR 2.1 and 2.2 transmissions and produces a
//! validated file → group → transaction → record tree plus a list of
//! classified diagnostics. Parsing and validation are total: any input
//! yields a report, and content defects never abort processing. For JSON
//! output and the command-line front end, see the `vivace_cwr_json` crate.

pub mod decoder;
pub mod diagnostic;
pub mod error;
pub mod lookup_manager;
pub mod lookups;
pub mod parser;
pub mod report;
pub mod schema;
pub mod test_utils;
pub mod tokenizer;
pub mod validator;

// Re-export commonly used items
pub use crate::decoder::{decode_record, FieldValue, Flag, ParsedRecord};
pub use crate::diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use crate::error::CwrError;
pub use crate::lookup_manager::{LookupManager, LookupTable};
pub use crate::parser::{detect_version, CwrFile, CwrGroup, CwrTransaction, StructuralParser};
pub use crate::report::{format_int_with_commas, report_summary};
pub use crate::schema::{record_schema, supported_record_types, CwrVersion};
pub use crate::validator::Validator;

use crate::diagnostic::sort_diagnostics;
use crate::tokenizer::{Token, Tokenizer};
use log::info;
use serde::Serialize;
use std::io::BufRead;

/// Knobs for the conventions that vary between feeds.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Force a revision instead of inferring it from the HDR line.
    pub version_hint: Option<CwrVersion>,
    /// Run the validation passes after structural assembly.
    pub validate: bool,
    /// Whether GRH and GRT count toward the group's declared record count.
    pub count_group_boundaries: bool,
    /// Severity for sequence-number findings; some feeds prefer `Record`.
    pub sequence_error_severity: Severity,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            version_hint: None,
            validate: true,
            count_group_boundaries: true,
            sequence_error_severity: Severity::Transaction,
        }
    }
}

/// The structured result returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct CwrParseReport {
    /// True iff no diagnostic at Record severity or above is present.
    pub is_valid: bool,
    pub version: CwrVersion,
    pub header: Option<ParsedRecord>,
    pub groups: Vec<CwrGroup>,
    pub trailer: Option<ParsedRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse (and validate) a full CWR transmission held in memory.
pub fn parse_cwr(input: &str, lookups: &LookupManager, options: &ParseOptions) -> CwrParseReport {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    // The HDR line settles which layout tables the whole file is decoded
    // against; a caller hint wins over the header.
    let version = match options.version_hint {
        Some(version) => version,
        None => {
            let first_line = Tokenizer::new(input)
                .find_map(|t| match t {
                    Token::Line { text, .. } => Some(text),
                    Token::EmptyLine { .. } => None,
                })
                .unwrap_or("");
            let (version, version_diag) = detect_version(first_line);
            diagnostics.extend(version_diag);
            version
        }
    };

    let mut parser = StructuralParser::new(version, options);
    for token in Tokenizer::new(input) {
        match token {
            Token::EmptyLine { line_number } => {
                diagnostics.push(Diagnostic::new(
                    Severity::Warning,
                    DiagnosticCode::EmptyLine,
                    "empty line skipped".to_string(),
                    line_number,
                ));
            }
            Token::Line { line_number, text } => {
                let (record, decode_diags) = decode_record(line_number, text, version);
                diagnostics.extend(decode_diags);
                if let Some(record) = record {
                    parser.push(record);
                }
            }
        }
    }
    let (file, structure_diags) = parser.finish();
    diagnostics.extend(structure_diags);

    if options.validate {
        diagnostics.extend(Validator::new(version, lookups, options).validate(&file));
    }

    sort_diagnostics(&mut diagnostics);
    let is_valid = !diagnostics.iter().any(|d| d.severity.invalidates());

    info!(
        "parsed {} group(s), {} diagnostic(s), valid={}",
        file.groups.len(),
        diagnostics.len(),
        is_valid
    );

    CwrParseReport {
        is_valid,
        version,
        header: file.header,
        groups: file.groups,
        trailer: file.trailer,
        diagnostics,
    }
}

/// Parse from any buffered byte/line source.
///
/// IO failures are host errors; everything found in the content itself is
/// reported through the returned report's diagnostics.
pub fn parse_cwr_reader<R: BufRead>(
    mut reader: R,
    lookups: &LookupManager,
    options: &ParseOptions,
) -> Result<CwrParseReport, CwrError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(parse_cwr(&input, lookups, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{grh, grt, hdr, line, trl};

    #[test]
    fn test_pipeline_on_minimal_file() {
        let input = [
            hdr("02.10"),
            grh("NWR", 1, "02.10"),
            line("WRK", &[("transaction_sequence", "0"), ("record_sequence", "0"), ("work_title", "SONG")]),
            grt(1, 1, 3),
            trl(1, 1, 5),
        ]
        .join("\n");
        let lookups = LookupManager::new();
        let report = parse_cwr(&input, &lookups, &ParseOptions::default());
        assert!(report.is_valid, "{:?}", report.diagnostics);
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.version, CwrVersion::V2_1);
    }

    #[test]
    fn test_version_hint_overrides_header() {
        let input = [hdr("02.10"), trl(0, 0, 2)].join("\n");
        let lookups = LookupManager::new();
        let options = ParseOptions { version_hint: Some(CwrVersion::V2_2), ..ParseOptions::default() };
        let report = parse_cwr(&input, &lookups, &options);
        assert_eq!(report.version, CwrVersion::V2_2);
    }

    #[test]
    fn test_no_validate_skips_rule_passes() {
        // work_title missing would be a mandatory-field finding
        let input = [
            hdr("02.10"),
            grh("NWR", 1, "02.10"),
            line("WRK", &[("transaction_sequence", "0"), ("record_sequence", "0")]),
            grt(1, 1, 3),
            trl(1, 1, 5),
        ]
        .join("\n");
        let lookups = LookupManager::new();
        let options = ParseOptions { validate: false, ..ParseOptions::default() };
        let report = parse_cwr(&input, &lookups, &options);
        assert!(!report.diagnostics.iter().any(|d| d.code == DiagnosticCode::MissingMandatoryField));
    }

    #[test]
    fn test_empty_line_warning_keeps_report_valid() {
        let input = [
            hdr("02.10"),
            grh("NWR", 1, "02.10"),
            line("WRK", &[("transaction_sequence", "0"), ("record_sequence", "0"), ("work_title", "SONG")]),
            "".to_string(),
            grt(1, 1, 3),
            trl(1, 1, 5),
        ]
        .join("\n");
        let lookups = LookupManager::new();
        let report = parse_cwr(&input, &lookups, &ParseOptions::default());
        assert!(report.is_valid, "{:?}", report.diagnostics);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].code, DiagnosticCode::EmptyLine);
        assert_eq!(report.diagnostics[0].line_number, 4);
    }

    #[test]
    fn test_diagnostics_are_in_input_order() {
        let input = [
            hdr("02.10"),
            grh("NWR", 1, "02.10"),
            "XYZ unknown".to_string(),
            line("WRK", &[("transaction_sequence", "0"), ("record_sequence", "0")]),
            grt(1, 2, 4),
            trl(1, 1, 6),
        ]
        .join("\n");
        let lookups = LookupManager::new();
        let report = parse_cwr(&input, &lookups, &ParseOptions::default());
        let lines: Vec<usize> = report.diagnostics.iter().map(|d| d.line_number).collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        assert_eq!(lines, sorted);
    }

    #[test]
    fn test_reader_entry_point() {
        let input = [hdr("02.10"), trl(0, 0, 2)].join("\r\n");
        let lookups = LookupManager::new();
        let report =
            parse_cwr_reader(input.as_bytes(), &lookups, &ParseOptions::default()).expect("reader should parse");
        assert_eq!(report.groups.len(), 0);
    }
}
