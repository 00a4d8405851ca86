//! Market price models

use serde::{Deserialize, Serialize};

/// Mandi price for a commodity, in rupees per quintal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub commodity: String,
    pub amount: i64,
    pub is_fallback: bool,
}

/// Canonical commodity name: first letter uppercase, the rest lowercase
pub fn canonical_commodity(crop: &str) -> String {
    let mut chars = crop.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_commodity() {
        assert_eq!(canonical_commodity("wheat"), "Wheat");
        assert_eq!(canonical_commodity("WHEAT"), "Wheat");
        assert_eq!(canonical_commodity("  rice "), "Rice");
        assert_eq!(canonical_commodity("bajra millet"), "Bajra millet");
        assert_eq!(canonical_commodity(""), "");
    }
}
