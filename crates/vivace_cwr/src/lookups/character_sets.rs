//! Character sets lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Character sets mapping
pub static CHARACTER_SETS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ASCII", "American Standard Code for Information Interchange");
    m.insert("UTF-8", "Unicode Transformation Format, 8-bit");
    m.insert("TRADITIONAL BIG5", "Traditional Chinese, Big5");
    m.insert("SIMPLIFIED GB", "Simplified Chinese, GB");
    m
});
