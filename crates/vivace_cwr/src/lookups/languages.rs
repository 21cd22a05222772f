//! Language codes lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Language codes mapping
pub static LANGUAGE_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("AR", "Arabic");
    m.insert("BG", "Bulgarian");
    m.insert("CA", "Catalan");
    m.insert("CS", "Czech");
    m.insert("DA", "Danish");
    m.insert("DE", "German");
    m.insert("EL", "Greek");
    m.insert("EN", "English");
    m.insert("ES", "Spanish");
    m.insert("ET", "Estonian");
    m.insert("FI", "Finnish");
    m.insert("FR", "French");
    m.insert("HE", "Hebrew");
    m.insert("HI", "Hindi");
    m.insert("HR", "Croatian");
    m.insert("HU", "Hungarian");
    m.insert("ID", "Indonesian");
    m.insert("IS", "Icelandic");
    m.insert("IT", "Italian");
    m.insert("JA", "Japanese");
    m.insert("KO", "Korean");
    m.insert("LT", "Lithuanian");
    m.insert("LV", "Latvian");
    m.insert("NL", "Dutch");
    m.insert("NO", "Norwegian");
    m.insert("PL", "Polish");
    m.insert("PT", "Portuguese");
    m.insert("RO", "Romanian");
    m.insert("RU", "Russian");
    m.insert("SK", "Slovak");
    m.insert("SL", "Slovenian");
    m.insert("SR", "Serbian");
    m.insert("SV", "Swedish");
    m.insert("TH", "Thai");
    m.insert("TR", "Turkish");
    m.insert("UK", "Ukrainian");
    m.insert("VI", "Vietnamese");
    m.insert("ZH", "Chinese");
    m
});
