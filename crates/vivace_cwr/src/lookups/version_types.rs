//! Version types lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Version types mapping
pub static VERSION_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("MOD", "Modified Version of a musical work");
    m.insert("ORI", "Original Work");
    m
});
