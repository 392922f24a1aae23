//! Address variations for external property lookups.
//!
//! The property source matches addresses textually, so the same street
//! can miss under one spelling and hit under another. Variations are
//! produced in the order they should be tried:
//!
//! 1. Lowercased with road-type words abbreviated (`"street"` → `"st"`)
//! 2. Plain lowercase

use regex::Regex;
use std::sync::LazyLock;

/// Road-type words and their abbreviations, applied in order.
pub const ADDRESS_ABBREVIATIONS: &[(&str, &str)] = &[
    ("road", "rd"),
    ("street", "st"),
    ("avenue", "ave"),
    ("boulevard", "blvd"),
    ("circle", "cir"),
    ("court", "ct"),
    ("drive", "dr"),
    ("lane", "ln"),
    ("place", "pl"),
    ("ridge", "rdg"),
    ("terrace", "ter"),
    ("trail", "trl"),
    ("way", "wy"),
];

/// Whole-word, case-insensitive matchers for [`ADDRESS_ABBREVIATIONS`].
static ABBREVIATION_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ADDRESS_ABBREVIATIONS
        .iter()
        .map(|(full, abbr)| {
            let re = Regex::new(&format!(r"(?i)\b{full}\b")).expect("valid regex");
            (re, *abbr)
        })
        .collect()
});

/// Lowercases `address` and abbreviates every whole-word road type.
#[must_use]
pub fn abbreviate(address: &str) -> String {
    ABBREVIATION_RES
        .iter()
        .fold(address.to_lowercase(), |acc, (re, abbr)| {
            re.replace_all(&acc, *abbr).into_owned()
        })
}

/// Generates the ordered, de-duplicated address variations to try.
#[must_use]
pub fn generate_address_variations(address: &str) -> Vec<String> {
    let mut variations: Vec<String> = Vec::with_capacity(2);

    for candidate in [abbreviate(address), address.to_lowercase()] {
        if !variations.contains(&candidate) {
            variations.push(candidate);
        }
    }

    variations
}
