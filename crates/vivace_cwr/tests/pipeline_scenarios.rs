//! End-to-end scenarios through the full tokenize → decode → assemble →
//! validate pipeline.

use vivace_cwr::test_utils::{build_line, grh, grt, hdr, line, trl};
use vivace_cwr::{
    parse_cwr, CwrParseReport, CwrVersion, DiagnosticCode, LookupManager, ParseOptions, Severity,
};

fn parse(lines: &[String]) -> CwrParseReport {
    let lookups = LookupManager::new();
    parse_cwr(&lines.join("\r\n"), &lookups, &ParseOptions::default())
}

fn work_header(title: &str) -> String {
    line("WRK", &[("transaction_sequence", "0"), ("record_sequence", "0"), ("work_title", title)])
}

#[test]
fn minimal_valid_file() {
    let report = parse(&[
        hdr("02.20"),
        grh("NWR", 1, "02.20"),
        work_header("SONG"),
        grt(1, 1, 3),
        trl(1, 1, 5),
    ]);

    assert!(report.is_valid, "{:?}", report.diagnostics);
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.version, CwrVersion::V2_2);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].transactions.len(), 1);
    let transaction = &report.groups[0].transactions[0];
    assert_eq!(transaction.record_count(), 1);
    assert_eq!(transaction.header.text("work_title"), Some("SONG"));
    assert!(report.header.is_some());
    assert!(report.trailer.is_some());
}

#[test]
fn group_version_mismatch_still_completes() {
    let report = parse(&[
        hdr("02.20"),
        grh("NWR", 1, "02.10"),
        work_header("SONG"),
        grt(1, 1, 3),
        trl(1, 1, 5),
    ]);

    let mismatches: Vec<_> =
        report.diagnostics.iter().filter(|d| d.code == DiagnosticCode::VersionMismatch).collect();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].severity, Severity::Group);
    assert!(!report.is_valid);
    // the parse still ran to the trailer
    assert!(report.trailer.is_some());
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].transactions.len(), 1);
}

#[test]
fn ownership_share_sum_off_by_one_percent() {
    let report = parse(&[
        hdr("02.20"),
        grh("NWR", 1, "02.20"),
        work_header("SONG"),
        line(
            "SWR",
            &[
                ("transaction_sequence", "0"),
                ("record_sequence", "1"),
                ("interested_party_number", "W001"),
                ("pr_ownership_share", "050000"),
            ],
        ),
        line(
            "SPU",
            &[
                ("transaction_sequence", "0"),
                ("record_sequence", "2"),
                ("interested_party_number", "P001"),
                ("pr_ownership_share", "049000"),
            ],
        ),
        grt(1, 1, 5),
        trl(1, 1, 7),
    ]);

    let sums: Vec<_> = report.diagnostics.iter().filter(|d| d.code == DiagnosticCode::ShareSumInvalid).collect();
    assert_eq!(sums.len(), 1);
    assert_eq!(sums[0].severity, Severity::Transaction);
    assert!(sums[0].message.contains("PR"), "{}", sums[0].message);
    assert!(sums[0].message.contains("99000"), "{}", sums[0].message);
    assert!(!report.is_valid);
}

#[test]
fn orphan_territory_reference() {
    let report = parse(&[
        hdr("02.20"),
        grh("NWR", 1, "02.20"),
        work_header("SONG"),
        build_line(
            CwrVersion::V2_2,
            "SWT",
            &[
                ("transaction_sequence", "0"),
                ("record_sequence", "1"),
                ("interested_party_number", "I123"),
                ("inclusion_exclusion_indicator", "I"),
                ("tis_numeric_code", "2136"),
            ],
        ),
        grt(1, 1, 4),
        trl(1, 1, 6),
    ]);

    let orphans: Vec<_> =
        report.diagnostics.iter().filter(|d| d.code == DiagnosticCode::OrphanReference).collect();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].severity, Severity::Transaction);
    assert!(orphans[0].message.contains("I123"), "{}", orphans[0].message);
}

#[test]
fn unknown_record_type_mid_group() {
    let report = parse(&[
        hdr("02.20"),
        grh("NWR", 1, "02.20"),
        work_header("SONG"),
        "XYZ0000000000000001SOMETHING UNRECOGNIZED".to_string(),
        line(
            "ALT",
            &[
                ("transaction_sequence", "0"),
                ("record_sequence", "2"),
                ("alternate_title", "OTHER NAME"),
                ("title_type", "AT"),
            ],
        ),
        grt(1, 1, 5),
        trl(1, 1, 7),
    ]);

    let unknown: Vec<_> =
        report.diagnostics.iter().filter(|d| d.code == DiagnosticCode::UnknownRecordType).collect();
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].line_number, 4);
    assert_eq!(unknown[0].severity, Severity::Record);

    // the unrecognized line is carried raw and the ALT after it still decodes
    let records = &report.groups[0].transactions[0].records;
    assert_eq!(records.len(), 2);
    assert!(!records[0].known);
    assert_eq!(records[0].raw, "XYZ0000000000000001SOMETHING UNRECOGNIZED");
    assert!(records[1].known);
    assert_eq!(records[1].text("alternate_title"), Some("OTHER NAME"));
}

#[test]
fn truncated_work_header_line() {
    let full = work_header("SONG");
    let truncated: String = full.chars().take(50).collect();
    let report = parse(&[
        hdr("02.20"),
        grh("NWR", 1, "02.20"),
        truncated,
        grt(1, 1, 3),
        trl(1, 1, 5),
    ]);

    let truncations: Vec<_> =
        report.diagnostics.iter().filter(|d| d.code == DiagnosticCode::Truncated).collect();
    assert!(truncations.len() > 1, "expected several truncated fields, got {:?}", truncations);
    assert!(truncations.iter().all(|d| d.severity == Severity::Field));
    assert!(truncations.iter().all(|d| d.line_number == 3));

    // the record survives with the fields that fit
    let transaction = &report.groups[0].transactions[0];
    assert_eq!(transaction.header.text("work_title"), Some("SONG"));
    assert_eq!(transaction.header.number("transaction_sequence"), Some(0));
    // field severity does not invalidate anything
    assert!(report.is_valid, "{:?}", report.diagnostics);
}

#[test]
fn diagnostics_are_ordered_by_line_then_rule() {
    let report = parse(&[
        hdr("02.20"),
        grh("NWR", 1, "02.20"),
        line("WRK", &[("transaction_sequence", "0"), ("record_sequence", "0"), ("language_code", "QQ")]),
        grt(1, 1, 3),
        trl(1, 1, 5),
    ]);

    // line 3 carries both a mandatory-field and a lookup finding, in that order
    let on_line_3: Vec<_> = report.diagnostics.iter().filter(|d| d.line_number == 3).collect();
    assert_eq!(on_line_3.len(), 2);
    assert_eq!(on_line_3[0].code, DiagnosticCode::MissingMandatoryField);
    assert_eq!(on_line_3[1].code, DiagnosticCode::UnknownCode);
}

#[test]
fn territory_sequence_number_only_decodes_under_2_2() {
    let swt_values: &[(&str, &str)] = &[
        ("transaction_sequence", "0"),
        ("record_sequence", "2"),
        ("interested_party_number", "W001"),
        ("inclusion_exclusion_indicator", "I"),
        ("tis_numeric_code", "2136"),
        ("sequence_number", "1"),
    ];
    let swr = line(
        "SWR",
        &[("transaction_sequence", "0"), ("record_sequence", "1"), ("interested_party_number", "W001")],
    );
    let report = parse(&[
        hdr("02.20"),
        grh("NWR", 1, "02.20"),
        work_header("SONG"),
        swr,
        build_line(CwrVersion::V2_2, "SWT", swt_values),
        grt(1, 1, 5),
        trl(1, 1, 7),
    ]);

    let records = &report.groups[0].transactions[0].records;
    let swt = records.iter().find(|r| r.record_type == "SWT").expect("SWT expected");
    assert_eq!(swt.number("sequence_number"), Some(1));
}
