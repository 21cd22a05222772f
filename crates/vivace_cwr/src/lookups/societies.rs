//! Performing and mechanical rights society codes lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Society codes mapping, keyed by the zero-padded wire form
pub static SOCIETY_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("001", "ACUM");
    m.insert("005", "AKM");
    m.insert("008", "APRA");
    m.insert("010", "ASCAP");
    m.insert("021", "BMI");
    m.insert("023", "BUMA");
    m.insert("026", "CASH");
    m.insert("035", "GEMA");
    m.insert("040", "KODA");
    m.insert("044", "MCPS");
    m.insert("048", "SOCAN");
    m.insert("052", "PRS");
    m.insert("055", "SIAE");
    m.insert("058", "SACEM");
    m.insert("061", "JASRAC");
    m.insert("071", "SESAC");
    m.insert("072", "SGAE");
    m.insert("077", "STIM");
    m.insert("078", "SUISA");
    m.insert("088", "CMRRA");
    m.insert("089", "TEOSTO");
    m.insert("090", "TONO");
    m.insert("101", "SODRAC");
    m
});
