//! Music arrangements lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Music arrangements mapping
pub static MUSIC_ARRANGEMENTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("NEW", "New music added to existing music");
    m.insert("ARR", "A version of a work in which musical elements have been modified");
    m.insert("ADM", "Music added to a pre-existing text");
    m.insert("UNS", "Unspecified arrangement");
    m.insert("ORI", "Original arrangement");
    m
});
