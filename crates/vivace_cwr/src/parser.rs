//! Structural assembly of the record stream.
//!
//! A two-level state machine rebuilds the file → group → transaction tree
//! from decoded records and enforces the bracketing, count, and version
//! invariants carried by HDR/GRH/GRT/TRL. Unexpected input is diagnosed and
//! skipped until a record re-establishes a known state, so a malformed file
//! still yields a complete report.

use crate::decoder::ParsedRecord;
use crate::diagnostic::{Diagnostic, DiagnosticCode, Severity};
use crate::schema::{self, CwrVersion};
use crate::ParseOptions;
use log::debug;
use serde::{Deserialize, Serialize};

/// A transaction header record plus its detail records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CwrTransaction {
    pub header: ParsedRecord,
    pub records: Vec<ParsedRecord>,
}

impl CwrTransaction {
    /// Header plus details.
    pub fn record_count(&self) -> usize {
        1 + self.records.len()
    }

    /// The header and every detail record, in input order.
    pub fn all_records(&self) -> impl Iterator<Item = &ParsedRecord> {
        std::iter::once(&self.header).chain(self.records.iter())
    }
}

/// A GRH/GRT-bounded run of same-type transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CwrGroup {
    pub header: ParsedRecord,
    pub transactions: Vec<CwrTransaction>,
    /// Absent when the file ended (or another group began) before a GRT.
    pub trailer: Option<ParsedRecord>,
}

impl CwrGroup {
    pub fn group_id(&self) -> Option<u64> {
        self.header.number("group_id")
    }

    pub fn transaction_type(&self) -> Option<&str> {
        self.header.text("transaction_type")
    }
}

/// The assembled file tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CwrFile {
    pub header: Option<ParsedRecord>,
    pub groups: Vec<CwrGroup>,
    pub trailer: Option<ParsedRecord>,
}

/// Determine the file's revision from its HDR line.
///
/// An explicit caller hint takes precedence and bypasses this. A line long
/// enough to carry the 2.2 version field is believed when the field parses;
/// a long line with an undeclarable version is diagnosed and falls back to
/// 2.1, the revision whose layout stops where the extra fields begin.
pub fn detect_version(hdr_line: &str) -> (CwrVersion, Option<Diagnostic>) {
    if !hdr_line.starts_with("HDR") {
        // A missing HDR is the structural parser's finding, not a version one.
        return (CwrVersion::V2_1, None);
    }
    let chars: Vec<char> = hdr_line.chars().collect();
    let v21_width = schema::record_schema(CwrVersion::V2_1, "HDR").map(|s| s.width).unwrap_or(101);
    if chars.len() <= v21_width {
        return (CwrVersion::V2_1, None);
    }
    let declared: String = chars[v21_width..(v21_width + 5).min(chars.len())].iter().collect();
    match CwrVersion::from_version_str(&declared) {
        Some(version) => (version, None),
        None => {
            let diag = Diagnostic::new(
                Severity::Fatal,
                DiagnosticCode::UnsupportedVersion,
                format!("HDR declares unsupported version '{}'; assuming 02.10", declared.trim()),
                1,
            )
            .with_record_type("HDR");
            (CwrVersion::V2_1, Some(diag))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Start,
    InFile,
    InGroup,
    InTransaction,
    End,
}

struct OpenGroup {
    header: ParsedRecord,
    transactions: Vec<CwrTransaction>,
    open_transaction: Option<CwrTransaction>,
}

/// The state machine. Feed decoded records with [`StructuralParser::push`],
/// then take the tree with [`StructuralParser::finish`].
pub struct StructuralParser<'a> {
    version: CwrVersion,
    options: &'a ParseOptions,
    state: State,
    header: Option<ParsedRecord>,
    trailer: Option<ParsedRecord>,
    groups: Vec<CwrGroup>,
    open_group: Option<OpenGroup>,
    diagnostics: Vec<Diagnostic>,
    total_records: usize,
    last_group_id: Option<u64>,
    last_line: usize,
    recovering: bool,
}

impl<'a> StructuralParser<'a> {
    pub fn new(version: CwrVersion, options: &'a ParseOptions) -> Self {
        StructuralParser {
            version,
            options,
            state: State::Start,
            header: None,
            trailer: None,
            groups: Vec::new(),
            open_group: None,
            diagnostics: Vec::new(),
            total_records: 0,
            last_group_id: None,
            last_line: 0,
            recovering: false,
        }
    }

    pub fn push(&mut self, record: ParsedRecord) {
        self.total_records += 1;
        self.last_line = record.line_number;

        match record.record_type.as_str() {
            "HDR" => self.on_hdr(record),
            "GRH" => self.on_grh(record),
            "GRT" => self.on_grt(record),
            "TRL" => self.on_trl(record),
            t if schema::is_transaction_header(t) => self.on_transaction_header(record),
            _ => self.on_detail(record),
        }
    }

    pub fn finish(mut self) -> (CwrFile, Vec<Diagnostic>) {
        if self.total_records == 0 {
            self.structure_error(Severity::Fatal, 0, "input contained no records".to_string());
        } else if self.state != State::End {
            if self.open_group.is_some() {
                let line = self.last_line;
                self.close_group(None, line);
            }
            self.structure_error(Severity::Fatal, self.last_line, "input ended without a TRL record".to_string());
        }
        self.check_file_counts();
        let file = CwrFile { header: self.header, groups: self.groups, trailer: self.trailer };
        (file, self.diagnostics)
    }

    fn structure_error(&mut self, severity: Severity, line: usize, message: String) {
        self.diagnostics.push(Diagnostic::new(severity, DiagnosticCode::BadStructure, message, line));
    }

    fn on_hdr(&mut self, record: ParsedRecord) {
        match self.state {
            State::Start => {
                self.header = Some(record);
                self.state = State::InFile;
                self.recovering = false;
            }
            _ => {
                self.structure_error(
                    Severity::Fatal,
                    record.line_number,
                    format!("unexpected HDR at line {}", record.line_number),
                );
            }
        }
    }

    fn on_grh(&mut self, record: ParsedRecord) {
        match self.state {
            State::Start => {
                self.structure_error(
                    Severity::Fatal,
                    record.line_number,
                    "file does not start with an HDR record".to_string(),
                );
            }
            State::InGroup | State::InTransaction => {
                let line = record.line_number;
                self.structure_error(
                    Severity::Group,
                    line,
                    "GRH encountered before the previous group was closed".to_string(),
                );
                self.close_group(None, line);
            }
            State::End => {
                self.structure_error(
                    Severity::Fatal,
                    record.line_number,
                    format!("record after TRL at line {}", record.line_number),
                );
                return;
            }
            State::InFile => {}
        }
        self.open_group(record);
    }

    fn open_group(&mut self, record: ParsedRecord) {
        if let Some(declared) = record.text("version_number") {
            match CwrVersion::from_version_str(declared) {
                Some(v) if v == self.version => {}
                _ => self.diagnostics.push(
                    Diagnostic::new(
                        Severity::Group,
                        DiagnosticCode::VersionMismatch,
                        format!(
                            "group declares version '{}' but the file is {}",
                            declared,
                            self.version.as_str()
                        ),
                        record.line_number,
                    )
                    .with_record_type("GRH"),
                ),
            }
        }
        if let Some(id) = record.number("group_id") {
            if let Some(last) = self.last_group_id {
                if id <= last {
                    self.diagnostics.push(
                        Diagnostic::new(
                            Severity::Group,
                            DiagnosticCode::BadSequence,
                            format!("group id {} does not increase over preceding group id {}", id, last),
                            record.line_number,
                        )
                        .with_record_type("GRH"),
                    );
                }
            }
            self.last_group_id = Some(id);
        }
        debug!("opening group {:?} at line {}", record.number("group_id"), record.line_number);
        self.open_group = Some(OpenGroup { header: record, transactions: Vec::new(), open_transaction: None });
        self.state = State::InGroup;
        self.recovering = false;
    }

    fn on_grt(&mut self, record: ParsedRecord) {
        match self.state {
            State::InGroup | State::InTransaction => {
                let line = record.line_number;
                self.close_group(Some(record), line);
            }
            _ => {
                self.structure_error(
                    Severity::Group,
                    record.line_number,
                    format!("GRT without an open group at line {}", record.line_number),
                );
            }
        }
    }

    /// Close the open group, with its GRT when one was seen.
    fn close_group(&mut self, trailer: Option<ParsedRecord>, line: usize) {
        let Some(mut open) = self.open_group.take() else { return };
        if let Some(transaction) = open.open_transaction.take() {
            open.transactions.push(transaction);
        }

        if let Some(grt) = &trailer {
            self.check_group_counts(&open, grt);
        } else {
            self.structure_error(Severity::Group, line, "group was not closed by a GRT record".to_string());
        }

        self.groups.push(CwrGroup { header: open.header, transactions: open.transactions, trailer });
        self.state = State::InFile;
        self.recovering = false;
    }

    fn check_group_counts(&mut self, open: &OpenGroup, grt: &ParsedRecord) {
        let line = grt.line_number;
        if let (Some(grh_id), Some(grt_id)) = (open.header.number("group_id"), grt.number("group_id")) {
            if grh_id != grt_id {
                self.diagnostics.push(
                    Diagnostic::new(
                        Severity::Group,
                        DiagnosticCode::GroupIdMismatch,
                        format!("GRT carries group id {} but the group opened as {}", grt_id, grh_id),
                        line,
                    )
                    .with_record_type("GRT")
                    .in_pass(4),
                );
            }
        }

        let observed_transactions = open.transactions.len() as u64;
        if let Some(declared) = grt.number("transaction_count") {
            if declared != observed_transactions {
                self.diagnostics.push(
                    Diagnostic::new(
                        Severity::Group,
                        DiagnosticCode::CountMismatch,
                        format!(
                            "group declares {} transactions but {} were observed",
                            declared, observed_transactions
                        ),
                        line,
                    )
                    .with_record_type("GRT")
                    .in_pass(4),
                );
            }
        }

        let mut observed_records: u64 = open.transactions.iter().map(|t| t.record_count() as u64).sum();
        if self.options.count_group_boundaries {
            observed_records += 2; // GRH and GRT themselves
        }
        if let Some(declared) = grt.number("record_count") {
            if declared != observed_records {
                self.diagnostics.push(
                    Diagnostic::new(
                        Severity::Group,
                        DiagnosticCode::CountMismatch,
                        format!("group declares {} records but {} were observed", declared, observed_records),
                        line,
                    )
                    .with_record_type("GRT")
                    .in_pass(4),
                );
            }
        }
    }

    fn on_trl(&mut self, record: ParsedRecord) {
        match self.state {
            State::InGroup | State::InTransaction => {
                let line = record.line_number;
                self.structure_error(Severity::Fatal, line, "TRL encountered before the open group was closed".to_string());
                self.close_group(None, line);
                self.trailer = Some(record);
                self.state = State::End;
            }
            State::InFile => {
                self.trailer = Some(record);
                self.state = State::End;
            }
            State::Start => {
                self.structure_error(
                    Severity::Fatal,
                    record.line_number,
                    "file does not start with an HDR record".to_string(),
                );
                self.trailer = Some(record);
                self.state = State::End;
            }
            State::End => {
                self.structure_error(
                    Severity::Fatal,
                    record.line_number,
                    format!("unexpected second TRL at line {}", record.line_number),
                );
            }
        }
    }

    fn check_file_counts(&mut self) {
        let Some(trl) = self.trailer.clone() else { return };
        let line = trl.line_number;

        if let Some(declared) = trl.number("group_count") {
            let observed = self.groups.len() as u64;
            if declared != observed {
                self.diagnostics.push(
                    Diagnostic::new(
                        Severity::Fatal,
                        DiagnosticCode::CountMismatch,
                        format!("file declares {} groups but {} were observed", declared, observed),
                        line,
                    )
                    .with_record_type("TRL")
                    .in_pass(4),
                );
            }
        }
        if let Some(declared) = trl.number("transaction_count") {
            let observed: u64 = self.groups.iter().map(|g| g.transactions.len() as u64).sum();
            if declared != observed {
                self.diagnostics.push(
                    Diagnostic::new(
                        Severity::Fatal,
                        DiagnosticCode::CountMismatch,
                        format!("file declares {} transactions but {} were observed", declared, observed),
                        line,
                    )
                    .with_record_type("TRL")
                    .in_pass(4),
                );
            }
        }
        if let Some(declared) = trl.number("record_count") {
            let observed = self.total_records as u64;
            if declared != observed {
                self.diagnostics.push(
                    Diagnostic::new(
                        Severity::Fatal,
                        DiagnosticCode::CountMismatch,
                        format!("file declares {} records but {} were observed", declared, observed),
                        line,
                    )
                    .with_record_type("TRL")
                    .in_pass(4),
                );
            }
        }
    }

    fn on_transaction_header(&mut self, record: ParsedRecord) {
        match self.state {
            State::InGroup | State::InTransaction => {
                let open = self.open_group.as_mut().expect("group must be open in this state");
                if let Some(finished) = open.open_transaction.take() {
                    open.transactions.push(finished);
                }
                self.check_transaction_type(&record);
                let open = self.open_group.as_mut().expect("group must be open in this state");
                open.open_transaction = Some(CwrTransaction { header: record, records: Vec::new() });
                self.state = State::InTransaction;
                self.recovering = false;
            }
            State::End => {
                self.structure_error(
                    Severity::Fatal,
                    record.line_number,
                    format!("record after TRL at line {}", record.line_number),
                );
            }
            State::Start | State::InFile => {
                if !self.recovering {
                    self.structure_error(
                        Severity::Fatal,
                        record.line_number,
                        format!(
                            "{} transaction header outside of a group at line {}",
                            record.record_type, record.line_number
                        ),
                    );
                    self.recovering = true;
                }
            }
        }
    }

    /// WRK is the generic work-registration header and may open a transaction
    /// in any work group; the specific codes must match the GRH declaration.
    fn check_transaction_type(&mut self, record: &ParsedRecord) {
        let Some(open) = self.open_group.as_ref() else { return };
        let Some(group_type) = open.header.text("transaction_type") else { return };
        let header_type = record.record_type.as_str();
        let matches = header_type == group_type
            || (header_type == "WRK" && schema::is_transaction_header(group_type));
        if !matches {
            self.diagnostics.push(
                Diagnostic::new(
                    Severity::Transaction,
                    DiagnosticCode::BadStructure,
                    format!("{} transaction inside a group declared as {}", header_type, group_type),
                    record.line_number,
                )
                .with_record_type(header_type),
            );
        }
    }

    fn on_detail(&mut self, record: ParsedRecord) {
        match self.state {
            State::InTransaction => {
                let open = self.open_group.as_mut().expect("group must be open in this state");
                let transaction = open.open_transaction.as_mut().expect("transaction must be open in this state");
                transaction.records.push(record);
            }
            State::End => {
                self.structure_error(
                    Severity::Fatal,
                    record.line_number,
                    format!("record after TRL at line {}", record.line_number),
                );
            }
            _ => {
                // Unknown types already carry their own diagnostic; only
                // diagnose misplaced known detail records, once per run.
                if record.known && !self.recovering {
                    let severity = if self.state == State::InGroup { Severity::Group } else { Severity::Fatal };
                    self.structure_error(
                        severity,
                        record.line_number,
                        format!(
                            "{} detail record outside of a transaction at line {}",
                            record.record_type, record.line_number
                        ),
                    );
                    self.recovering = true;
                }
            }
        }
    }
}
