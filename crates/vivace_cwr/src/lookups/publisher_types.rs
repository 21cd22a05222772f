//! Publisher types lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Publisher types mapping
pub static PUBLISHER_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("AQ", "Acquirer");
    m.insert("AM", "Administrator");
    m.insert("PA", "Income Participant");
    m.insert("E", "Original Publisher");
    m.insert("ES", "Substituted Publisher");
    m.insert("SE", "Sub-Publisher");
    m
});
