//! Named-table access to the enumerated code tables.
//!
//! Compiled-in tables (see [`crate::lookups`]) are materialized into
//! [`LookupTable`]s on first request and cached. A bulk CSV dump can extend
//! or override them at initialization time; after that the manager is
//! read-only and freely shareable by reference.

use crate::diagnostic::{Diagnostic, DiagnosticCode, Severity};
use crate::error::CwrError;
use crate::lookups;
use log::warn;
use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, RwLock};

/// Column carrying the code in a table row.
pub const CODE_COLUMN: &str = "CODE";
/// Column carrying the textual definition in a table row.
pub const DEFINITION_COLUMN: &str = "DEFINITION";

/// Table names with a compiled-in fallback.
pub const KNOWN_TABLES: &[&str] = &[
    "agreement_type",
    "character_set",
    "composite_type",
    "excerpt_type",
    "instrument",
    "intended_purpose",
    "language",
    "lyric_adaptation",
    "music_arrangement",
    "musical_work_distribution_category",
    "publisher_type",
    "society",
    "standard_instrumentation",
    "territory",
    "text_music_relationship",
    "title_type",
    "version_type",
    "work_type",
    "writer_designation",
];

/// One named code table: `code → row attributes`.
///
/// Rows always carry `CODE` and, for compiled-in tables, `DEFINITION`; bulk
/// imports may add arbitrary extra columns.
#[derive(Debug, Clone)]
pub struct LookupTable {
    pub name: String,
    rows: HashMap<String, HashMap<String, String>>,
}

impl LookupTable {
    fn new(name: &str) -> Self {
        LookupTable { name: name.to_string(), rows: HashMap::new() }
    }

    fn insert_pair(&mut self, code: &str, definition: &str) {
        let mut attributes = HashMap::new();
        attributes.insert(CODE_COLUMN.to_string(), code.to_string());
        attributes.insert(DEFINITION_COLUMN.to_string(), definition.to_string());
        self.rows.insert(code.to_string(), attributes);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rows.contains_key(code)
    }

    pub fn row(&self, code: &str) -> Option<&HashMap<String, String>> {
        self.rows.get(code)
    }

    pub fn definition(&self, code: &str) -> Option<&str> {
        self.rows.get(code).and_then(|row| row.get(DEFINITION_COLUMN)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn builtin_table(name: &str) -> Option<LookupTable> {
    let pairs: Vec<(&str, &str)> = match name {
        "agreement_type" => lookups::agreement_types::AGREEMENT_TYPES.iter().map(|(k, v)| (*k, *v)).collect(),
        "character_set" => lookups::character_sets::CHARACTER_SETS.iter().map(|(k, v)| (*k, *v)).collect(),
        "composite_type" => lookups::composite_types::COMPOSITE_TYPES.iter().map(|(k, v)| (*k, *v)).collect(),
        "excerpt_type" => lookups::excerpt_types::EXCERPT_TYPES.iter().map(|(k, v)| (*k, *v)).collect(),
        "instrument" => lookups::instruments::INSTRUMENT_CODES.iter().map(|(k, v)| (*k, *v)).collect(),
        "intended_purpose" => lookups::intended_purposes::INTENDED_PURPOSES.iter().map(|(k, v)| (*k, *v)).collect(),
        "language" => lookups::languages::LANGUAGE_CODES.iter().map(|(k, v)| (*k, *v)).collect(),
        "lyric_adaptation" => lookups::lyric_adaptations::LYRIC_ADAPTATIONS.iter().map(|(k, v)| (*k, *v)).collect(),
        "music_arrangement" => {
            lookups::music_arrangements::MUSIC_ARRANGEMENTS.iter().map(|(k, v)| (*k, *v)).collect()
        }
        "musical_work_distribution_category" => {
            lookups::distribution_categories::DISTRIBUTION_CATEGORIES.iter().map(|(k, v)| (*k, *v)).collect()
        }
        "publisher_type" => lookups::publisher_types::PUBLISHER_TYPES.iter().map(|(k, v)| (*k, *v)).collect(),
        "society" => lookups::societies::SOCIETY_CODES.iter().map(|(k, v)| (*k, *v)).collect(),
        "standard_instrumentation" => {
            lookups::standard_instrumentations::STANDARD_INSTRUMENTATIONS.iter().map(|(k, v)| (*k, *v)).collect()
        }
        "territory" => lookups::territories::TIS_CODES.iter().map(|(k, v)| (*k, *v)).collect(),
        "text_music_relationship" => {
            lookups::text_music_relationships::TEXT_MUSIC_RELATIONSHIPS.iter().map(|(k, v)| (*k, *v)).collect()
        }
        "title_type" => lookups::title_types::TITLE_TYPES.iter().map(|(k, v)| (*k, *v)).collect(),
        "version_type" => lookups::version_types::VERSION_TYPES.iter().map(|(k, v)| (*k, *v)).collect(),
        "work_type" => lookups::work_types::WORK_TYPES.iter().map(|(k, v)| (*k, *v)).collect(),
        "writer_designation" => {
            lookups::writer_designations::WRITER_DESIGNATIONS.iter().map(|(k, v)| (*k, *v)).collect()
        }
        _ => return None,
    };
    let mut table = LookupTable::new(name);
    for (code, definition) in pairs {
        table.insert_pair(code, definition);
    }
    Some(table)
}

/// Lazily caching facade over the compiled-in and imported tables.
pub struct LookupManager {
    cache: RwLock<HashMap<String, Arc<LookupTable>>>,
}

impl Default for LookupManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupManager {
    pub fn new() -> Self {
        LookupManager { cache: RwLock::new(HashMap::new()) }
    }

    /// The named table, materializing the compiled-in data on first request.
    pub fn get_table(&self, name: &str) -> Option<Arc<LookupTable>> {
        if let Some(table) = self.cache.read().expect("lookup cache poisoned").get(name) {
            return Some(Arc::clone(table));
        }
        let table = Arc::new(builtin_table(name)?);
        let mut cache = self.cache.write().expect("lookup cache poisoned");
        Some(Arc::clone(cache.entry(name.to_string()).or_insert(table)))
    }

    /// True when `key_value` appears in `key_field` of the named table.
    pub fn is_valid(&self, table: &str, key_field: &str, key_value: &str) -> bool {
        let Some(table) = self.get_table(table) else { return false };
        if key_field == CODE_COLUMN {
            return table.contains(key_value);
        }
        table.rows.values().any(|row| row.get(key_field).is_some_and(|v| v == key_value))
    }

    /// Find the row where `key_field` is `key_value` and return `value_field`.
    pub fn lookup(&self, table: &str, key_field: &str, key_value: &str, value_field: &str) -> Option<String> {
        let table = self.get_table(table)?;
        if key_field == CODE_COLUMN {
            return table.row(key_value)?.get(value_field).cloned();
        }
        table
            .rows
            .values()
            .find(|row| row.get(key_field).is_some_and(|v| v == key_value))
            .and_then(|row| row.get(value_field))
            .cloned()
    }

    /// Bootstrap tables from a multi-table CSV dump.
    ///
    /// Rows are grouped by their `Category` column; each category becomes a
    /// table named by its lowercased, underscored form, merged over any
    /// compiled-in rows. Extra columns are preserved as row attributes.
    /// Unknown categories and codeless rows produce Warning diagnostics,
    /// never failures.
    pub fn extract_all_lookup_tables<R: Read>(&mut self, source: R) -> Result<Vec<Diagnostic>, CwrError> {
        let mut reader = csv::Reader::from_reader(source);
        let headers = reader.headers()?.clone();

        let category_idx = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case("category"))
            .ok_or_else(|| CwrError::BadFormat("lookup dump has no 'Category' column".to_string()))?;
        if !headers.iter().any(|h| h == CODE_COLUMN) {
            return Err(CwrError::BadFormat("lookup dump has no 'CODE' column".to_string()));
        }

        let mut tables: HashMap<String, LookupTable> = HashMap::new();
        let mut diagnostics = Vec::new();
        let mut unknown_categories: Vec<String> = Vec::new();

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

            let category = record.get(category_idx).unwrap_or("").trim();
            if category.is_empty() {
                diagnostics.push(Diagnostic::new(
                    Severity::Warning,
                    DiagnosticCode::UnknownLookupCategory,
                    "lookup row has an empty Category".to_string(),
                    line,
                ));
                continue;
            }
            let table_name = category.to_lowercase().replace(' ', "_");

            let mut attributes = HashMap::new();
            for (header, value) in headers.iter().zip(record.iter()) {
                attributes.insert(header.to_string(), value.to_string());
            }
            let Some(code) = attributes.get(CODE_COLUMN).map(|c| c.trim().to_string()).filter(|c| !c.is_empty())
            else {
                diagnostics.push(Diagnostic::new(
                    Severity::Warning,
                    DiagnosticCode::UnknownCode,
                    format!("lookup row in '{}' has an empty CODE", category),
                    line,
                ));
                continue;
            };

            let table = tables.entry(table_name.clone()).or_insert_with(|| {
                if !KNOWN_TABLES.contains(&table_name.as_str()) && !unknown_categories.contains(&table_name) {
                    warn!("lookup dump contains unknown category '{}'", category);
                    diagnostics.push(Diagnostic::new(
                        Severity::Warning,
                        DiagnosticCode::UnknownLookupCategory,
                        format!("lookup dump contains unknown category '{}'", category),
                        line,
                    ));
                    unknown_categories.push(table_name.clone());
                }
                builtin_table(&table_name).unwrap_or_else(|| LookupTable::new(&table_name))
            });
            table.rows.insert(code, attributes);
        }

        let mut cache = self.cache.write().expect("lookup cache poisoned");
        for (name, table) in tables {
            cache.insert(name, Arc::new(table));
        }
        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_materialize() {
        let manager = LookupManager::new();
        let table = manager.get_table("version_type").expect("table expected");
        assert!(table.contains("ORI"));
        assert!(table.contains("MOD"));
        assert_eq!(table.definition("ORI"), Some("Original Work"));
        assert!(manager.get_table("no_such_table").is_none());
    }

    #[test]
    fn test_is_valid_is_pure_and_stable() {
        let manager = LookupManager::new();
        for _ in 0..3 {
            assert!(manager.is_valid("language", CODE_COLUMN, "EN"));
            assert!(!manager.is_valid("language", CODE_COLUMN, "XX"));
        }
    }

    #[test]
    fn test_lookup_by_and_for_arbitrary_fields() {
        let manager = LookupManager::new();
        assert_eq!(manager.lookup("society", CODE_COLUMN, "021", DEFINITION_COLUMN), Some("BMI".to_string()));
        assert_eq!(manager.lookup("society", DEFINITION_COLUMN, "BMI", CODE_COLUMN), Some("021".to_string()));
        assert_eq!(manager.lookup("society", CODE_COLUMN, "999", DEFINITION_COLUMN), None);
    }

    #[test]
    fn test_bulk_import_merges_over_builtin() {
        let csv = "Category,CODE,DEFINITION,SOURCE\n\
                   Language,XX,Test Language,unit\n\
                   Language,EN,English,unit\n";
        let mut manager = LookupManager::new();
        let diags = manager.extract_all_lookup_tables(csv.as_bytes()).expect("import should succeed");
        assert!(diags.is_empty(), "{:?}", diags);

        let table = manager.get_table("language").expect("table expected");
        assert!(table.contains("XX"));
        // compiled-in rows survive the merge
        assert!(table.contains("FR"));
        // extra columns are preserved as row attributes
        assert_eq!(table.row("XX").unwrap().get("SOURCE").map(String::as_str), Some("unit"));
    }

    #[test]
    fn test_bulk_import_flags_unknown_category_once() {
        let csv = "Category,CODE,DEFINITION\n\
                   Mystery Table,AA,First\n\
                   Mystery Table,BB,Second\n";
        let mut manager = LookupManager::new();
        let diags = manager.extract_all_lookup_tables(csv.as_bytes()).expect("import should succeed");
        let unknown: Vec<_> = diags.iter().filter(|d| d.code == DiagnosticCode::UnknownLookupCategory).collect();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].severity, Severity::Warning);
        // the table is still served
        assert!(manager.get_table("mystery_table").expect("table expected").contains("BB"));
    }

    #[test]
    fn test_bulk_import_requires_category_and_code_columns() {
        let mut manager = LookupManager::new();
        assert!(manager.extract_all_lookup_tables("CODE,DEFINITION\nAA,x\n".as_bytes()).is_err());
        assert!(manager.extract_all_lookup_tables("Category,DEFINITION\nx,y\n".as_bytes()).is_err());
    }

    #[test]
    fn test_bulk_import_flags_codeless_rows() {
        let csv = "Category,CODE,DEFINITION\nLanguage,,Nameless\n";
        let mut manager = LookupManager::new();
        let diags = manager.extract_all_lookup_tables(csv.as_bytes()).expect("import should succeed");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
    }
}
