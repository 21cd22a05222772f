//! Standard instrumentation types lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Standard instrumentation types mapping
pub static STANDARD_INSTRUMENTATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("BBA", "Brass Band");
    m.insert("BQU", "Brass Quartet");
    m.insert("BQN", "Brass Quintet");
    m.insert("CBA", "Concert Band");
    m.insert("CEN", "Chamber Ensemble");
    m.insert("CHO", "Chorus");
    m.insert("FOR", "Full Orchestra");
    m.insert("JZE", "Jazz Ensemble");
    m.insert("PDU", "Piano Duo");
    m.insert("PQN", "Piano Quintet");
    m.insert("PTR", "Piano Trio");
    m.insert("SOR", "String Orchestra");
    m.insert("SQU", "String Quartet");
    m.insert("STR", "String Trio");
    m.insert("SYO", "Symphony Orchestra");
    m.insert("WEN", "Wind Ensemble");
    m.insert("WQN", "Woodwind Quintet");
    m.insert("WQU", "Woodwind Quartet");
    m
});
