//! Musical work distribution categories lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Musical work distribution categories mapping
pub static DISTRIBUTION_CATEGORIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("JAZ", "Jazz");
    m.insert("POP", "Popular");
    m.insert("SER", "Serious");
    m.insert("UNC", "Unclassified Distribution Category");
    m
});
