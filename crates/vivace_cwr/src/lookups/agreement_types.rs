//! Agreement types lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Agreement types mapping
pub static AGREEMENT_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("OS", "Original Specific");
    m.insert("PS", "Sub-publishing Specific");
    m.insert("PG", "Sub-publishing General");
    m.insert("OG", "Original General");
    m
});
