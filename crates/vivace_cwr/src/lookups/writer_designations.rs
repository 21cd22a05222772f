//! Writer designation codes lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Writer designation codes mapping
pub static WRITER_DESIGNATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("AD", "Adaptor");
    m.insert("AR", "Arranger");
    m.insert("A", "Author, Writer, Author of Lyrics");
    m.insert("C", "Composer, Writer");
    m.insert("CA", "Composer/Author");
    m.insert("SR", "Sub-Arranger");
    m.insert("SA", "Sub-Author");
    m.insert("TR", "Translator");
    m.insert("PA", "Income Participant");
    m
});
