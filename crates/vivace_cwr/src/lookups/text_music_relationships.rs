//! Text music relationships lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Text music relationships mapping
pub static TEXT_MUSIC_RELATIONSHIPS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("MUS", "Music only");
    m.insert("MTX", "Music and text combined");
    m.insert("TXT", "Text only");
    m.insert("MTN", "Music and text existing in non-associated form");
    m
});
