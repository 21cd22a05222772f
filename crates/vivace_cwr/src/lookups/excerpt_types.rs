//! Excerpt types lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Excerpt types mapping
pub static EXCERPT_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("MOV", "Movement");
    m.insert("UEX", "Unspecified Excerpt");
    m
});
