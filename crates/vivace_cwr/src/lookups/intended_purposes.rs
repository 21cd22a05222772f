//! Intended purposes lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Intended purposes mapping
pub static INTENDED_PURPOSES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("COM", "Commercial/Jingle/Trailer");
    m.insert("FIL", "Film");
    m.insert("GEN", "General Usage");
    m.insert("LIB", "Library Work");
    m.insert("MUL", "Multimedia");
    m.insert("RAD", "Radio");
    m.insert("TEL", "Television");
    m.insert("THR", "Theatre");
    m.insert("VID", "Video");
    m
});
