//! Composite types lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Composite types mapping
pub static COMPOSITE_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("COS", "Composite of Samples");
    m.insert("MED", "Medley");
    m.insert("POT", "Potpourri");
    m.insert("UCO", "Unspecified Composite");
    m
});
