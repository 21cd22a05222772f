//! Lyric adaptations lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Lyric adaptations mapping
pub static LYRIC_ADAPTATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("NEW", "New lyrics added to the existing lyrics");
    m.insert("MOD", "Lyrics modified in the original language");
    m.insert("NON", "No lyrics included in the work");
    m.insert("ORI", "Original lyrics");
    m.insert("REP", "Lyrics replaced with new lyrics");
    m.insert("ADL", "Lyrics added to a pre-existing instrumental work");
    m.insert("UNS", "Unspecified lyric adaptation");
    m.insert("TRA", "Lyrics translated into another language");
    m
});
