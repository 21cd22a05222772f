//! Record layout tables for CWR 2.1 and 2.2.
//!
//! Every supported record type is described by an ordered list of
//! [`FieldSpec`]s. Layouts are assembled through a cursor-based builder, so a
//! field always begins where the previous one ended: the tables cannot
//! contain gaps or overlaps. Adding a record type means adding one layout
//! function and one registration line; nothing else in the pipeline changes.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported CWR format revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CwrVersion {
    V2_1,
    V2_2,
}

impl CwrVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            CwrVersion::V2_1 => "02.10",
            CwrVersion::V2_2 => "02.20",
        }
    }

    /// Accepts both the wire form ("02.10") and the short form ("2.1").
    pub fn from_version_str(s: &str) -> Option<CwrVersion> {
        match s.trim() {
            "02.10" | "2.1" | "2.10" => Some(CwrVersion::V2_1),
            "02.20" | "2.2" | "2.20" => Some(CwrVersion::V2_2),
            _ => None,
        }
    }
}

impl std::fmt::Display for CwrVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire format of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Free text, right-padded with spaces.
    Alphanumeric,
    /// Non-negative integer, left-padded with zeros; all-space means absent.
    Numeric,
    /// YYYYMMDD; all-zero or all-space means absent.
    Date,
    /// HHMMSS, or HHMMSSFF with hundredths when the field is 8 wide.
    Time,
    /// HHMMSS elapsed time.
    Duration,
    /// Y, N, or U.
    Flag,
    /// Y or N.
    Boolean,
    /// Percentage in integer thousandths: six digits, three implied decimals.
    Share,
    /// Code checked against the named lookup table by the validator.
    Lookup(&'static str),
}

/// One fixed-width field: 1-indexed start position, byte length, format.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub start: usize,
    pub len: usize,
    pub format: FieldFormat,
    pub mandatory: bool,
}

/// Full layout of one record type under one version.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    pub record_type: &'static str,
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
    /// Declared record width: the end position of the last field.
    pub width: usize,
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn mandatory_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.mandatory)
    }
}

/// Cursor-based layout assembler; starts are derived, never declared.
struct Layout {
    record_type: &'static str,
    name: &'static str,
    fields: Vec<FieldSpec>,
    cursor: usize,
}

impl Layout {
    fn new(record_type: &'static str, name: &'static str) -> Self {
        Layout { record_type, name, fields: Vec::new(), cursor: 1 }
    }

    fn push(mut self, name: &'static str, title: &'static str, len: usize, format: FieldFormat, mandatory: bool) -> Self {
        self.fields.push(FieldSpec { name, title, start: self.cursor, len, format, mandatory });
        self.cursor += len;
        self
    }

    fn req(self, name: &'static str, title: &'static str, len: usize, format: FieldFormat) -> Self {
        self.push(name, title, len, format, true)
    }

    fn opt(self, name: &'static str, title: &'static str, len: usize, format: FieldFormat) -> Self {
        self.push(name, title, len, format, false)
    }

    /// Standard transaction/detail prefix: type plus the two sequence numbers.
    fn transaction_prefix(self) -> Self {
        self.req("record_type", "Record type", 3, FieldFormat::Alphanumeric)
            .req("transaction_sequence", "Transaction sequence number", 8, FieldFormat::Numeric)
            .req("record_sequence", "Record sequence number", 8, FieldFormat::Numeric)
    }

    fn build(self) -> RecordSchema {
        RecordSchema { record_type: self.record_type, name: self.name, width: self.cursor - 1, fields: self.fields }
    }
}

use FieldFormat::*;

fn hdr_layout(version: CwrVersion) -> RecordSchema {
    let layout = Layout::new("HDR", "Transmission header")
        .req("record_type", "Always 'HDR'", 3, Alphanumeric)
        .req("sender_type", "Sender type", 2, Alphanumeric)
        .req("sender_id", "Sender ID", 9, Alphanumeric)
        .req("sender_name", "Sender name", 45, Alphanumeric)
        .req("edi_standard_version_number", "EDI standard version number", 5, Alphanumeric)
        .req("creation_date", "Creation date YYYYMMDD", 8, Date)
        .req("creation_time", "Creation time HHMMSS", 6, Time)
        .req("transmission_date", "Transmission date YYYYMMDD", 8, Date)
        .opt("character_set", "Character set", 15, Lookup("character_set"));
    match version {
        CwrVersion::V2_1 => layout.build(),
        CwrVersion::V2_2 => layout
            .opt("cwr_version", "CWR version", 5, Alphanumeric)
            .opt("cwr_revision", "CWR revision", 3, Numeric)
            .opt("software_package", "Software package", 30, Alphanumeric)
            .opt("software_package_version", "Software package version", 30, Alphanumeric)
            .build(),
    }
}

fn grh_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("GRH", "Group header")
        .req("record_type", "Always 'GRH'", 3, Alphanumeric)
        .req("transaction_type", "Transaction type of the group", 3, Alphanumeric)
        .req("group_id", "Group ID", 5, Numeric)
        .req("version_number", "Transaction version number", 5, Alphanumeric)
        .opt("batch_request", "Batch request number", 10, Numeric)
        .opt("submission_distribution_type", "Submission/distribution type", 2, Alphanumeric)
        .build()
}

fn grt_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("GRT", "Group trailer")
        .req("record_type", "Always 'GRT'", 3, Alphanumeric)
        .req("group_id", "Group ID", 5, Numeric)
        .req("transaction_count", "Transaction count", 8, Numeric)
        .req("record_count", "Record count", 8, Numeric)
        .opt("currency_indicator", "Currency indicator", 3, Alphanumeric)
        .opt("total_monetary_value", "Total monetary value", 10, Numeric)
        .build()
}

fn trl_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("TRL", "Transmission trailer")
        .req("record_type", "Always 'TRL'", 3, Alphanumeric)
        .req("group_count", "Group count", 5, Numeric)
        .req("transaction_count", "Transaction count", 8, Numeric)
        .req("record_count", "Record count", 8, Numeric)
        .build()
}

/// Shared by WRK, REV, NWR, ISW, and ISR.
fn work_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("WRK", "Work registration")
        .transaction_prefix()
        .req("work_title", "Work title", 60, Alphanumeric)
        .opt("language_code", "Language code", 2, Lookup("language"))
        .opt("submitter_work_number", "Submitter work number", 14, Alphanumeric)
        .opt("iswc", "ISWC", 11, Alphanumeric)
        .opt("copyright_date", "Copyright date", 8, Date)
        .opt("copyright_number", "Copyright number", 12, Alphanumeric)
        .opt("musical_work_distribution_category", "Musical work distribution category", 3, Lookup("musical_work_distribution_category"))
        .opt("duration", "Duration HHMMSS", 6, Duration)
        .opt("recorded_indicator", "Recorded indicator", 1, Flag)
        .opt("text_music_relationship", "Text music relationship", 3, Lookup("text_music_relationship"))
        .opt("composite_type", "Composite type", 3, Lookup("composite_type"))
        .opt("version_type", "Version type", 3, Lookup("version_type"))
        .opt("excerpt_type", "Excerpt type", 3, Lookup("excerpt_type"))
        .opt("music_arrangement", "Music arrangement", 3, Lookup("music_arrangement"))
        .opt("lyric_adaptation", "Lyric adaptation", 3, Lookup("lyric_adaptation"))
        .opt("contact_name", "Contact name", 21, Alphanumeric)
        .opt("contact_id", "Contact ID", 10, Alphanumeric)
        .opt("cwr_work_type", "CWR work type", 2, Lookup("work_type"))
        .opt("grand_rights_indicator", "Grand rights indicator", 1, Boolean)
        .opt("composite_component_count", "Composite component count", 3, Numeric)
        .opt("priority_flag", "Priority flag", 1, Flag)
        .build()
}

/// Shared by SWR and OWR.
fn writer_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("SWR", "Writer controlled by submitter")
        .transaction_prefix()
        .opt("interested_party_number", "Interested party number", 9, Alphanumeric)
        .opt("writer_last_name", "Writer last name", 45, Alphanumeric)
        .opt("writer_first_name", "Writer first name", 30, Alphanumeric)
        .opt("writer_unknown_indicator", "Writer unknown indicator", 1, Flag)
        .opt("writer_designation_code", "Writer designation code", 2, Lookup("writer_designation"))
        .opt("tax_id", "Tax ID number", 9, Alphanumeric)
        .opt("ipi_name_number", "Writer IPI name number", 11, Alphanumeric)
        .opt("pr_society", "PR affiliation society", 3, Lookup("society"))
        .opt("pr_ownership_share", "PR ownership share", 6, Share)
        .opt("mr_society", "MR affiliation society", 3, Lookup("society"))
        .opt("mr_ownership_share", "MR ownership share", 6, Share)
        .opt("sr_society", "SR affiliation society", 3, Lookup("society"))
        .opt("sr_ownership_share", "SR ownership share", 6, Share)
        .opt("reversionary_indicator", "Reversionary indicator", 1, Flag)
        .opt("first_recording_refusal_indicator", "First recording refusal indicator", 1, Flag)
        .opt("work_for_hire_indicator", "Work for hire indicator", 1, Flag)
        .opt("usa_license_indicator", "USA license indicator", 1, Flag)
        .build()
}

/// Shared by SPU and OPU.
fn publisher_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("SPU", "Publisher controlled by submitter")
        .transaction_prefix()
        .opt("publisher_sequence_number", "Publisher sequence number", 2, Numeric)
        .opt("interested_party_number", "Interested party number", 9, Alphanumeric)
        .opt("publisher_name", "Publisher name", 45, Alphanumeric)
        .opt("publisher_unknown_indicator", "Publisher unknown indicator", 1, Flag)
        .opt("publisher_type", "Publisher type", 2, Lookup("publisher_type"))
        .opt("tax_id", "Tax ID number", 9, Alphanumeric)
        .opt("ipi_name_number", "Publisher IPI name number", 11, Alphanumeric)
        .opt("submitter_agreement_number", "Submitter agreement number", 14, Alphanumeric)
        .opt("pr_society", "PR affiliation society", 3, Lookup("society"))
        .opt("pr_ownership_share", "PR ownership share", 6, Share)
        .opt("mr_society", "MR affiliation society", 3, Lookup("society"))
        .opt("mr_ownership_share", "MR ownership share", 6, Share)
        .opt("sr_society", "SR affiliation society", 3, Lookup("society"))
        .opt("sr_ownership_share", "SR ownership share", 6, Share)
        .opt("special_agreements_indicator", "Special agreements indicator", 1, Flag)
        .opt("first_recording_refusal_indicator", "First recording refusal indicator", 1, Flag)
        .build()
}

/// Shared by SWT, OWT, SPT, and OPT; the 2.2 revision appends a sequence number.
fn territory_layout(version: CwrVersion) -> RecordSchema {
    let layout = Layout::new("SWT", "Territory of control")
        .transaction_prefix()
        .opt("interested_party_number", "Interested party number", 9, Alphanumeric)
        .opt("pr_collection_share", "PR collection share", 6, Share)
        .opt("mr_collection_share", "MR collection share", 6, Share)
        .opt("sr_collection_share", "SR collection share", 6, Share)
        .req("inclusion_exclusion_indicator", "Inclusion/exclusion indicator", 1, Alphanumeric)
        .req("tis_numeric_code", "TIS numeric code", 4, Lookup("territory"))
        .opt("shares_change_indicator", "Shares change indicator", 1, Flag);
    match version {
        CwrVersion::V2_1 => layout.build(),
        CwrVersion::V2_2 => layout.opt("sequence_number", "Territory sequence number", 3, Numeric).build(),
    }
}

fn pwr_layout(version: CwrVersion) -> RecordSchema {
    let layout = Layout::new("PWR", "Publisher for writer")
        .transaction_prefix()
        .req("publisher_ip_number", "Publisher interested party number", 9, Alphanumeric)
        .opt("publisher_name", "Publisher name", 45, Alphanumeric)
        .opt("submitter_agreement_number", "Submitter agreement number", 14, Alphanumeric)
        .opt("society_assigned_agreement_number", "Society-assigned agreement number", 14, Alphanumeric)
        .opt("writer_ip_number", "Writer interested party number", 9, Alphanumeric);
    match version {
        CwrVersion::V2_1 => layout.build(),
        CwrVersion::V2_2 => layout.opt("publisher_sequence_number", "Publisher sequence number", 2, Numeric).build(),
    }
}

fn alt_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("ALT", "Alternate title")
        .transaction_prefix()
        .req("alternate_title", "Alternate title", 60, Alphanumeric)
        .req("title_type", "Title type", 2, Lookup("title_type"))
        .opt("language_code", "Language code", 2, Lookup("language"))
        .build()
}

fn ewt_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("EWT", "Entire work title for excerpts")
        .transaction_prefix()
        .req("entire_work_title", "Entire work title", 60, Alphanumeric)
        .opt("iswc", "ISWC of the entire work", 11, Alphanumeric)
        .opt("language_code", "Language code", 2, Lookup("language"))
        .opt("writer_one_last_name", "Writer one last name", 45, Alphanumeric)
        .opt("writer_one_first_name", "Writer one first name", 30, Alphanumeric)
        .opt("source", "Source", 20, Alphanumeric)
        .build()
}

fn ver_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("VER", "Original work title for versions")
        .transaction_prefix()
        .req("original_work_title", "Original work title", 60, Alphanumeric)
        .opt("iswc", "ISWC of the original work", 11, Alphanumeric)
        .opt("language_code", "Language code", 2, Lookup("language"))
        .opt("writer_one_last_name", "Writer one last name", 45, Alphanumeric)
        .opt("writer_one_first_name", "Writer one first name", 30, Alphanumeric)
        .opt("source", "Source", 20, Alphanumeric)
        .build()
}

fn per_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("PER", "Performing artist")
        .transaction_prefix()
        .req("performing_artist_last_name", "Performing artist last name", 45, Alphanumeric)
        .opt("performing_artist_first_name", "Performing artist first name", 30, Alphanumeric)
        .opt("ipi_name_number", "Performing artist IPI name number", 11, Alphanumeric)
        .opt("ipi_base_number", "Performing artist IPI base number", 13, Alphanumeric)
        .build()
}

fn rec_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("REC", "Recording detail")
        .transaction_prefix()
        .opt("release_date", "First release date", 8, Date)
        .opt("release_duration", "First release duration", 6, Duration)
        .opt("album_title", "First album title", 60, Alphanumeric)
        .opt("album_label", "First album label", 60, Alphanumeric)
        .opt("catalogue_number", "First release catalogue number", 18, Alphanumeric)
        .opt("ean", "EAN", 13, Alphanumeric)
        .opt("isrc", "ISRC", 12, Alphanumeric)
        .opt("recording_format", "Recording format", 1, Alphanumeric)
        .opt("recording_technique", "Recording technique", 1, Alphanumeric)
        .build()
}

fn orn_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("ORN", "Work origin")
        .transaction_prefix()
        .req("intended_purpose", "Intended purpose", 3, Lookup("intended_purpose"))
        .opt("production_title", "Production title", 60, Alphanumeric)
        .opt("cd_identifier", "CD identifier", 15, Alphanumeric)
        .opt("cut_number", "Cut number", 4, Numeric)
        .build()
}

fn com_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("COM", "Composite component")
        .transaction_prefix()
        .req("title", "Component title", 60, Alphanumeric)
        .opt("iswc", "ISWC of the component", 11, Alphanumeric)
        .opt("submitter_work_number", "Submitter work number", 14, Alphanumeric)
        .opt("duration", "Duration HHMMSS", 6, Duration)
        .opt("writer_one_last_name", "Writer one last name", 45, Alphanumeric)
        .opt("writer_one_first_name", "Writer one first name", 30, Alphanumeric)
        .build()
}

fn ind_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("IND", "Instrumentation detail")
        .transaction_prefix()
        .req("instrument_code", "Instrument code", 3, Lookup("instrument"))
        .opt("number_of_players", "Number of players", 3, Numeric)
        .build()
}

fn ins_layout(_version: CwrVersion) -> RecordSchema {
    Layout::new("INS", "Instrumentation summary")
        .transaction_prefix()
        .opt("number_of_voices", "Number of voices", 3, Numeric)
        .opt("standard_instrumentation_type", "Standard instrumentation type", 3, Lookup("standard_instrumentation"))
        .opt("instrumentation_description", "Instrumentation description", 50, Alphanumeric)
        .build()
}

/// Record types that open a transaction.
pub const TRANSACTION_HEADER_TYPES: &[&str] = &["ISR", "ISW", "NWR", "REV", "WRK"];

/// Record types that delimit the file and group levels.
pub const STRUCTURAL_TYPES: &[&str] = &["HDR", "GRH", "GRT", "TRL"];

pub fn is_transaction_header(record_type: &str) -> bool {
    TRANSACTION_HEADER_TYPES.contains(&record_type)
}

pub fn is_structural(record_type: &str) -> bool {
    STRUCTURAL_TYPES.contains(&record_type)
}

type SchemaMap = HashMap<(CwrVersion, &'static str), RecordSchema>;

fn register(map: &mut SchemaMap, codes: &[&'static str], layout: fn(CwrVersion) -> RecordSchema) {
    for &version in &[CwrVersion::V2_1, CwrVersion::V2_2] {
        for &code in codes {
            let mut schema = layout(version);
            schema.record_type = code;
            map.insert((version, code), schema);
        }
    }
}

static SCHEMAS: Lazy<SchemaMap> = Lazy::new(|| {
    let mut map = SchemaMap::new();
    register(&mut map, &["HDR"], hdr_layout);
    register(&mut map, &["GRH"], grh_layout);
    register(&mut map, &["GRT"], grt_layout);
    register(&mut map, &["TRL"], trl_layout);
    register(&mut map, &["WRK", "REV", "NWR", "ISW", "ISR"], work_layout);
    register(&mut map, &["SWR", "OWR"], writer_layout);
    register(&mut map, &["SPU", "OPU"], publisher_layout);
    register(&mut map, &["SWT", "OWT", "SPT", "OPT"], territory_layout);
    register(&mut map, &["PWR"], pwr_layout);
    register(&mut map, &["ALT"], alt_layout);
    register(&mut map, &["EWT"], ewt_layout);
    register(&mut map, &["VER"], ver_layout);
    register(&mut map, &["PER"], per_layout);
    register(&mut map, &["REC"], rec_layout);
    register(&mut map, &["ORN"], orn_layout);
    register(&mut map, &["COM"], com_layout);
    register(&mut map, &["IND"], ind_layout);
    register(&mut map, &["INS"], ins_layout);
    map
});

/// Layout for a record type under a version, or `None` for unknown types.
pub fn record_schema(version: CwrVersion, record_type: &str) -> Option<&'static RecordSchema> {
    SCHEMAS
        .iter()
        .find(|((v, rt), _)| *v == version && *rt == record_type)
        .map(|(_, schema)| schema)
}

/// All record type codes with a compiled-in layout, sorted.
pub fn supported_record_types() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> =
        SCHEMAS.keys().filter(|(v, _)| *v == CwrVersion::V2_1).map(|(_, code)| *code).collect();
    codes.sort();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_are_contiguous_and_cover_declared_width() {
        for ((version, code), schema) in SCHEMAS.iter() {
            let mut cursor = 1;
            for field in &schema.fields {
                assert_eq!(
                    field.start, cursor,
                    "{} {:?}: field '{}' starts at {} but previous field ended at {}",
                    code, version, field.name, field.start, cursor
                );
                assert!(field.len > 0, "{} {:?}: field '{}' has zero length", code, version, field.name);
                cursor += field.len;
            }
            assert_eq!(schema.width, cursor - 1, "{} {:?}: declared width disagrees with field coverage", code, version);
        }
    }

    #[test]
    fn test_record_type_always_first_and_mandatory() {
        for schema in SCHEMAS.values() {
            let first = &schema.fields[0];
            assert_eq!(first.name, "record_type");
            assert_eq!((first.start, first.len), (1, 3));
            assert!(first.mandatory);
        }
    }

    #[test]
    fn test_full_catalog_is_registered() {
        let codes = supported_record_types();
        for expected in [
            "HDR", "GRH", "GRT", "TRL", "WRK", "REV", "NWR", "ISW", "ISR", "ALT", "EWT", "VER", "PER", "REC",
            "ORN", "SWR", "OWR", "SPU", "OPU", "SWT", "OWT", "SPT", "OPT", "PWR", "COM", "IND", "INS",
        ] {
            assert!(codes.contains(&expected), "missing layout for {}", expected);
        }
        assert_eq!(codes.len(), 27);
    }

    #[test]
    fn test_work_layout_width_matches_both_versions() {
        assert_eq!(record_schema(CwrVersion::V2_1, "WRK").unwrap().width, 192);
        assert_eq!(record_schema(CwrVersion::V2_2, "WRK").unwrap().width, 192);
    }

    #[test]
    fn test_territory_layout_gains_sequence_number_in_2_2() {
        let v21 = record_schema(CwrVersion::V2_1, "SWT").unwrap();
        let v22 = record_schema(CwrVersion::V2_2, "SWT").unwrap();
        assert!(v21.field("sequence_number").is_none());
        assert!(v22.field("sequence_number").is_some());
        assert_eq!(v22.width, v21.width + 3);
    }

    #[test]
    fn test_hdr_layout_extends_in_2_2() {
        let v21 = record_schema(CwrVersion::V2_1, "HDR").unwrap();
        let v22 = record_schema(CwrVersion::V2_2, "HDR").unwrap();
        assert_eq!(v21.width, 101);
        assert!(v22.width > v21.width);
        assert!(v22.field("cwr_version").is_some());
    }

    #[test]
    fn test_classification_helpers() {
        assert!(is_transaction_header("WRK"));
        assert!(is_transaction_header("REV"));
        assert!(is_transaction_header("ISR"));
        assert!(!is_transaction_header("SWR"));
        assert!(is_structural("HDR"));
        assert!(is_structural("GRT"));
        assert!(!is_structural("NWR"));
    }

    #[test]
    fn test_version_strings() {
        assert_eq!(CwrVersion::from_version_str("02.10"), Some(CwrVersion::V2_1));
        assert_eq!(CwrVersion::from_version_str("2.2"), Some(CwrVersion::V2_2));
        assert_eq!(CwrVersion::from_version_str("03.00"), None);
        assert_eq!(CwrVersion::V2_2.as_str(), "02.20");
    }
}
