//! Layered validation over the assembled tree.
//!
//! Runs after structural assembly, in rule order per record line: mandatory
//! fields, then lookup membership, then the cross-record transaction rules.
//! Count invariants are enforced during assembly and already sit on the
//! report. Validation never fails: every finding becomes a diagnostic.

use crate::decoder::ParsedRecord;
use crate::diagnostic::{Diagnostic, DiagnosticCode, Severity};
use crate::lookup_manager::{LookupManager, CODE_COLUMN};
use crate::parser::{CwrFile, CwrTransaction};
use crate::schema::{self, CwrVersion, FieldFormat};
use crate::ParseOptions;
use log::warn;
use std::collections::{HashMap, HashSet};

const MANDATORY_PASS: u8 = 1;
const LOOKUP_PASS: u8 = 2;
const CROSS_RECORD_PASS: u8 = 3;

/// Exact total for a fully assigned right, in integer thousandths.
const FULL_SHARE: i64 = 100_000;
/// Rounding slack: three thousandths of a percent.
const SHARE_TOLERANCE: i64 = 3;

/// The rights a share column can belong to.
const RIGHTS: &[(&str, &str)] = &[("PR", "pr"), ("MR", "mr"), ("SR", "sr")];

/// Record types carrying ownership shares; other-writer and other-publisher
/// chains count toward the same full-share target, since only territory
/// collection records carry an exclusion marker.
const OWNERSHIP_TYPES: &[&str] = &["SWR", "OWR", "SPU", "OPU"];
/// Record types carrying collection shares for a territory.
const COLLECTION_TYPES: &[&str] = &["SWT", "OWT", "SPT", "OPT"];

pub struct Validator<'a> {
    version: CwrVersion,
    lookups: &'a LookupManager,
    options: &'a ParseOptions,
    /// Tables already reported missing, so a configuration gap is logged once.
    missing_tables: HashSet<&'static str>,
}

/// One cross-record rule, applied per transaction.
struct TransactionRule {
    id: &'static str,
    check: fn(&ParseOptions, &CwrTransaction, &mut Vec<Diagnostic>),
}

/// The transaction-scope rule registry, in evaluation order.
static TRANSACTION_RULES: &[TransactionRule] = &[
    TransactionRule { id: "sequence-numbers", check: check_sequences },
    TransactionRule { id: "ownership-share-totals", check: check_ownership_totals },
    TransactionRule { id: "collection-share-totals", check: check_collection_totals },
    TransactionRule { id: "party-references", check: check_party_references },
];

impl<'a> Validator<'a> {
    pub fn new(version: CwrVersion, lookups: &'a LookupManager, options: &'a ParseOptions) -> Self {
        Validator { version, lookups, options, missing_tables: HashSet::new() }
    }

    pub fn validate(mut self, file: &CwrFile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let version = self.version;
        let lookups = self.lookups;
        let per_record = |record: &ParsedRecord, diagnostics: &mut Vec<Diagnostic>, missing: &mut HashSet<&'static str>| {
            check_mandatory_fields(version, record, diagnostics);
            check_lookup_membership(version, lookups, record, diagnostics, missing);
        };

        if let Some(header) = &file.header {
            per_record(header, &mut diagnostics, &mut self.missing_tables);
        }
        for group in &file.groups {
            per_record(&group.header, &mut diagnostics, &mut self.missing_tables);
            for transaction in &group.transactions {
                for record in transaction.all_records() {
                    per_record(record, &mut diagnostics, &mut self.missing_tables);
                }
            }
            if let Some(trailer) = &group.trailer {
                per_record(trailer, &mut diagnostics, &mut self.missing_tables);
            }
        }
        if let Some(trailer) = &file.trailer {
            per_record(trailer, &mut diagnostics, &mut self.missing_tables);
        }

        for group in &file.groups {
            let mut previous_sequence: Option<u64> = None;
            for transaction in &group.transactions {
                for rule in TRANSACTION_RULES {
                    let before = diagnostics.len();
                    (rule.check)(self.options, transaction, &mut diagnostics);
                    if diagnostics.len() > before {
                        log::debug!("rule '{}' raised {} finding(s)", rule.id, diagnostics.len() - before);
                    }
                }
                self.check_group_monotonicity(transaction, &mut previous_sequence, &mut diagnostics);
            }
        }

        diagnostics
    }

    /// Transaction sequences must be monotonic across a group.
    fn check_group_monotonicity(
        &self,
        transaction: &CwrTransaction,
        previous: &mut Option<u64>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(sequence) = transaction.header.number("transaction_sequence") else { return };
        if let Some(prev) = *previous {
            if sequence <= prev {
                diagnostics.push(
                    Diagnostic::new(
                        self.options.sequence_error_severity,
                        DiagnosticCode::BadSequence,
                        format!("transaction sequence {} does not increase over preceding {}", sequence, prev),
                        transaction.header.line_number,
                    )
                    .with_record_type(&transaction.header.record_type)
                    .in_pass(CROSS_RECORD_PASS),
                );
            }
        }
        *previous = Some(sequence);
    }
}

/// Record sequences start at zero on the header and strictly increase;
/// every child carries the header's transaction sequence.
fn check_sequences(options: &ParseOptions, transaction: &CwrTransaction, diagnostics: &mut Vec<Diagnostic>) {
    let header = &transaction.header;
    let header_transaction_sequence = header.number("transaction_sequence");

    if let Some(sequence) = header.number("record_sequence") {
        if sequence != 0 {
            diagnostics.push(
                Diagnostic::new(
                    options.sequence_error_severity,
                    DiagnosticCode::BadSequence,
                    format!("transaction header carries record sequence {}, expected 0", sequence),
                    header.line_number,
                )
                .with_record_type(&header.record_type)
                .in_pass(CROSS_RECORD_PASS),
            );
        }
    }

    let mut previous = header.number("record_sequence");
    for record in &transaction.records {
        if !record.known {
            continue;
        }
        if let (Some(expected), Some(found)) = (header_transaction_sequence, record.number("transaction_sequence")) {
            if found != expected {
                diagnostics.push(
                    Diagnostic::new(
                        options.sequence_error_severity,
                        DiagnosticCode::BadSequence,
                        format!("record carries transaction sequence {}, expected {}", found, expected),
                        record.line_number,
                    )
                    .with_record_type(&record.record_type)
                    .in_pass(CROSS_RECORD_PASS),
                );
            }
        }
        if let Some(sequence) = record.number("record_sequence") {
            if let Some(prev) = previous {
                if sequence <= prev {
                    diagnostics.push(
                        Diagnostic::new(
                            options.sequence_error_severity,
                            DiagnosticCode::BadSequence,
                            format!("record sequence {} does not increase over preceding {}", sequence, prev),
                            record.line_number,
                        )
                        .with_record_type(&record.record_type)
                        .in_pass(CROSS_RECORD_PASS),
                    );
                }
            }
            previous = Some(sequence);
        }
    }
}

/// Publisher plus writer ownership must assign each exercised right fully.
fn check_ownership_totals(_options: &ParseOptions, transaction: &CwrTransaction, diagnostics: &mut Vec<Diagnostic>) {
    for (right, prefix) in RIGHTS {
        let field = format!("{}_ownership_share", prefix);
        let mut total: i64 = 0;
        let mut seen = false;
        for record in &transaction.records {
            if !OWNERSHIP_TYPES.contains(&record.record_type.as_str()) {
                continue;
            }
            if let Some(share) = record.share(&field) {
                seen = true;
                total += share as i64;
            }
        }
        if seen && (total - FULL_SHARE).abs() > SHARE_TOLERANCE {
            diagnostics.push(
                Diagnostic::new(
                    Severity::Transaction,
                    DiagnosticCode::ShareSumInvalid,
                    format!("{} ownership shares total {} thousandths, expected {}", right, total, FULL_SHARE),
                    transaction.header.line_number,
                )
                .with_record_type(&transaction.header.record_type)
                .in_pass(CROSS_RECORD_PASS),
            );
        }
    }
}

/// Collection shares must assign each right fully per included territory.
fn check_collection_totals(_options: &ParseOptions, transaction: &CwrTransaction, diagnostics: &mut Vec<Diagnostic>) {
    for (right, prefix) in RIGHTS {
        let field = format!("{}_collection_share", prefix);
        let mut totals: HashMap<String, i64> = HashMap::new();
        for record in &transaction.records {
            if !COLLECTION_TYPES.contains(&record.record_type.as_str()) {
                continue;
            }
            // Excluded territories do not participate in the total.
            if record.text("inclusion_exclusion_indicator") != Some("I") {
                continue;
            }
            let Some(territory) = record.code("tis_numeric_code") else { continue };
            if let Some(share) = record.share(&field) {
                *totals.entry(territory.to_string()).or_insert(0) += share as i64;
            }
        }
        for (territory, total) in totals {
            if total != 0 && (total - FULL_SHARE).abs() > SHARE_TOLERANCE {
                diagnostics.push(
                    Diagnostic::new(
                        Severity::Transaction,
                        DiagnosticCode::ShareSumInvalid,
                        format!(
                            "{} collection shares for territory {} total {} thousandths, expected {}",
                            right, territory, total, FULL_SHARE
                        ),
                        transaction.header.line_number,
                    )
                    .with_record_type(&transaction.header.record_type)
                    .in_pass(CROSS_RECORD_PASS),
                );
            }
        }
    }
}

/// Territory and publisher-for-writer records must point at parties
/// introduced in the same transaction.
fn check_party_references(_options: &ParseOptions, transaction: &CwrTransaction, diagnostics: &mut Vec<Diagnostic>) {
    let collect_parties = |types: &[&str]| -> HashSet<&str> {
        transaction
            .records
            .iter()
            .filter(|r| types.contains(&r.record_type.as_str()))
            .filter_map(|r| r.text("interested_party_number"))
            .collect()
    };
    let writer_parties = collect_parties(&["SWR", "OWR"]);
    let publisher_parties = collect_parties(&["SPU", "OPU"]);

    let mut orphan = |record: &ParsedRecord, field: &'static str, referenced: &str, pool: &HashSet<&str>, kind: &str| {
        if !pool.contains(referenced) {
            let pool_types = if kind == "writer" { "SWR/OWR" } else { "SPU/OPU" };
            diagnostics.push(
                Diagnostic::new(
                    Severity::Transaction,
                    DiagnosticCode::OrphanReference,
                    format!(
                        "{} references {} '{}' that no {} record introduces",
                        record.record_type, kind, referenced, pool_types
                    ),
                    record.line_number,
                )
                .with_record_type(&record.record_type)
                .with_field(field)
                .in_pass(CROSS_RECORD_PASS),
            );
        }
    };

    for record in &transaction.records {
        match record.record_type.as_str() {
            "SWT" | "OWT" => {
                if let Some(party) = record.text("interested_party_number") {
                    orphan(record, "interested_party_number", party, &writer_parties, "writer");
                }
            }
            "SPT" | "OPT" => {
                if let Some(party) = record.text("interested_party_number") {
                    orphan(record, "interested_party_number", party, &publisher_parties, "publisher");
                }
            }
            "PWR" => {
                if let Some(party) = record.text("publisher_ip_number") {
                    orphan(record, "publisher_ip_number", party, &publisher_parties, "publisher");
                }
                if let Some(party) = record.text("writer_ip_number") {
                    orphan(record, "writer_ip_number", party, &writer_parties, "writer");
                }
            }
            _ => {}
        }
    }
}

/// Mandatory fields must carry a value after decode.
fn check_mandatory_fields(version: CwrVersion, record: &ParsedRecord, diagnostics: &mut Vec<Diagnostic>) {
    if !record.known {
        return;
    }
    let Some(record_schema) = schema::record_schema(version, &record.record_type) else { return };
    for spec in record_schema.mandatory_fields() {
        if !record.has_value(spec.name) {
            diagnostics.push(
                Diagnostic::new(
                    Severity::Record,
                    DiagnosticCode::MissingMandatoryField,
                    format!("mandatory field '{}' is missing or empty", spec.name),
                    record.line_number,
                )
                .with_record_type(&record.record_type)
                .with_field(spec.name)
                .in_pass(MANDATORY_PASS),
            );
        }
    }
}

/// Lookup-coded fields must be members of their table when present.
fn check_lookup_membership(
    version: CwrVersion,
    lookups: &LookupManager,
    record: &ParsedRecord,
    diagnostics: &mut Vec<Diagnostic>,
    missing_tables: &mut HashSet<&'static str>,
) {
    if !record.known {
        return;
    }
    let Some(record_schema) = schema::record_schema(version, &record.record_type) else { return };
    for spec in &record_schema.fields {
        let FieldFormat::Lookup(table) = spec.format else { continue };
        let Some(code) = record.code(spec.name) else { continue };

        if lookups.get_table(table).is_none() {
            // Configuration gap: the rule is skipped, loudly.
            if missing_tables.insert(table) {
                warn!("lookup table '{}' is unavailable; membership checks for it are skipped", table);
                diagnostics.push(
                    Diagnostic::new(
                        Severity::Warning,
                        DiagnosticCode::MissingLookupTable,
                        format!("lookup table '{}' is unavailable; membership checks skipped", table),
                        record.line_number,
                    )
                    .with_record_type(&record.record_type)
                    .with_field(spec.name)
                    .in_pass(LOOKUP_PASS),
                );
            }
            continue;
        }
        if !lookups.is_valid(table, CODE_COLUMN, code) {
            diagnostics.push(
                Diagnostic::new(
                    Severity::Field,
                    DiagnosticCode::UnknownCode,
                    format!("'{}' is not a member of the {} table", code, table),
                    record.line_number,
                )
                .with_record_type(&record.record_type)
                .with_field(spec.name)
                .in_pass(LOOKUP_PASS),
            );
        }
    }
}
