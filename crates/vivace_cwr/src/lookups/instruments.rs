//! Instrument codes lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Instrument codes mapping
pub static INSTRUMENT_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ACC", "Accordion");
    m.insert("AFL", "Alto Flute");
    m.insert("ASX", "Alto Saxophone");
    m.insert("BAN", "Banjo");
    m.insert("BAS", "Bassoon");
    m.insert("BCL", "Bass Clarinet");
    m.insert("BDR", "Bass Drum");
    m.insert("BSX", "Baritone Saxophone");
    m.insert("BTB", "Bass Trombone");
    m.insert("CEL", "Cello");
    m.insert("CHI", "Chimes");
    m.insert("CLA", "Clarinet");
    m.insert("CON", "Contrabassoon");
    m.insert("COR", "Cornet");
    m.insert("CYM", "Cymbals");
    m.insert("DBL", "Double Bass");
    m.insert("DRM", "Drums");
    m.insert("EGT", "Electric Guitar");
    m.insert("EHN", "English Horn");
    m.insert("FLT", "Flute");
    m.insert("FRH", "French Horn");
    m.insert("GIT", "Guitar");
    m.insert("GLO", "Glockenspiel");
    m.insert("HAR", "Harp");
    m.insert("HPS", "Harpsichord");
    m.insert("KEY", "Keyboard");
    m.insert("MAN", "Mandolin");
    m.insert("MAR", "Marimba");
    m.insert("OBO", "Oboe");
    m.insert("ORG", "Organ");
    m.insert("PER", "Percussion");
    m.insert("PIA", "Piano");
    m.insert("PIC", "Piccolo");
    m.insert("SAX", "Saxophone");
    m.insert("SYN", "Synthesizer");
    m.insert("TBN", "Trombone");
    m.insert("TIM", "Timpani");
    m.insert("TRP", "Trumpet");
    m.insert("TSX", "Tenor Saxophone");
    m.insert("TUB", "Tuba");
    m.insert("UKU", "Ukulele");
    m.insert("VIB", "Vibraphone");
    m.insert("VIO", "Violin");
    m.insert("VLA", "Viola");
    m.insert("VOC", "Vocal");
    m.insert("XYL", "Xylophone");
    m
});
