//! Title types lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Title types mapping
pub static TITLE_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("AT", "Alternative Title");
    m.insert("TE", "First Line of Text");
    m.insert("FT", "Formal Title");
    m.insert("IT", "Incorrect Title");
    m.insert("OT", "Original Title");
    m.insert("TT", "Original Title Translated");
    m.insert("PT", "Part Title");
    m.insert("RT", "Restricted Title");
    m.insert("ET", "Extra Search Title");
    m.insert("OL", "Original Title with National Characters");
    m.insert("AL", "Alternative Title with National Characters");
    m
});
