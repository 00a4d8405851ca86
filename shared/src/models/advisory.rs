//! Advisory request and reply models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Locale;

/// Classified purpose of a free-text query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Irrigation,
    Price,
    Weather,
    Soil,
    Unknown,
}

/// Soil nutrient readings supplied with a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilReading {
    #[serde(rename = "N")]
    pub nitrogen: Decimal,
    #[serde(rename = "P")]
    pub phosphorus: Decimal,
    #[serde(rename = "K")]
    pub potassium: Decimal,
    pub ph: Decimal,
}

impl SoilReading {
    pub fn new(nitrogen: Decimal, phosphorus: Decimal, potassium: Decimal, ph: Decimal) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
            ph,
        }
    }
}

impl Default for SoilReading {
    /// Readings assumed when the caller has none: N=P=K=50, pH 6.5
    fn default() -> Self {
        Self::new(
            Decimal::from(50),
            Decimal::from(50),
            Decimal::from(50),
            Decimal::new(65, 1),
        )
    }
}

/// Everything one advisory computation needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryContext {
    pub query: String,
    pub district: String,
    pub crop: String,
    pub soil: SoilReading,
    pub locale: Locale,
}

/// Localized answer, optionally with synthesized speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryReply {
    pub text: String,
    pub audio_handle: Option<String>,
}
