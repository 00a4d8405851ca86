//! Crop recommendation models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Crops the recommender can suggest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Crop {
    Rice,
    Wheat,
    Maize,
    Cotton,
    Pulses,
}

impl Crop {
    pub fn name(&self) -> &'static str {
        match self {
            Crop::Rice => "Rice",
            Crop::Wheat => "Wheat",
            Crop::Maize => "Maize",
            Crop::Cotton => "Cotton",
            Crop::Pulses => "Pulses",
        }
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Soil and climate features used for crop selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropFeatures {
    #[serde(rename = "N")]
    pub nitrogen: Decimal,
    #[serde(rename = "P")]
    pub phosphorus: Decimal,
    #[serde(rename = "K")]
    pub potassium: Decimal,
    pub temp: Decimal,
    pub humidity: Decimal,
    pub ph: Decimal,
    pub rainfall: Decimal,
}
