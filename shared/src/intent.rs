//! Keyword intent classifier
//!
//! Queries are matched case-insensitively against bilingual keyword sets.
//! The sets are checked in a fixed order and the first one that matches
//! decides the intent, so "rain rate" is a price query, not a weather one.

use crate::models::Intent;

/// Ordered (keywords, intent) table
pub const INTENT_KEYWORDS: [(&[&str], Intent); 4] = [
    (
        &["irrigate", "water", "watering", "irrigation", "ਸਿੰਚਾਈ", "ਪਾਣੀ"],
        Intent::Irrigation,
    ),
    (&["price", "rate", "mandi", "ਭਾਅ", "ਦਾਮ"], Intent::Price),
    (
        &[
            "weather",
            "rain",
            "forecast",
            "temperature",
            "humidity",
            "ਮੌਸਮ",
            "ਮੀਹ",
            "ਤਾਪਮਾਨ",
            "ਨਮੀ",
        ],
        Intent::Weather,
    ),
    (
        &["soil", "fertilizer", "nutrient", "ph", "ਮਿੱਟੀ", "ਖਾਦ", "ਪੋਸ਼ਕ"],
        Intent::Soil,
    ),
];

/// Classify a free-text query
pub fn classify(query: &str) -> Intent {
    let lowered = query.to_lowercase();
    INTENT_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Unknown)
}
