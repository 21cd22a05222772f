//! TIS territory codes lookup table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// TIS numeric territory codes mapping, keyed by the four-digit wire form
pub static TIS_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("0036", "Australia");
    m.insert("0040", "Austria");
    m.insert("0056", "Belgium");
    m.insert("0076", "Brazil");
    m.insert("0124", "Canada");
    m.insert("0208", "Denmark");
    m.insert("0246", "Finland");
    m.insert("0250", "France");
    m.insert("0276", "Germany");
    m.insert("0300", "Greece");
    m.insert("0372", "Ireland");
    m.insert("0380", "Italy");
    m.insert("0392", "Japan");
    m.insert("0484", "Mexico");
    m.insert("0528", "Netherlands");
    m.insert("0554", "New Zealand");
    m.insert("0578", "Norway");
    m.insert("0620", "Portugal");
    m.insert("0724", "Spain");
    m.insert("0752", "Sweden");
    m.insert("0756", "Switzerland");
    m.insert("0826", "United Kingdom");
    m.insert("0840", "United States");
    m.insert("2100", "Africa");
    m.insert("2101", "America");
    m.insert("2106", "Asia");
    m.insert("2112", "British Isles");
    m.insert("2118", "Central America");
    m.insert("2120", "Europe");
    m.insert("2123", "European Economic Area");
    m.insert("2126", "Nordic Countries");
    m.insert("2130", "North America");
    m.insert("2132", "Oceania");
    m.insert("2134", "South America");
    m.insert("2136", "World");
    m
});
