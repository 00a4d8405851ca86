//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Supported response languages
///
/// English is the primary locale. Every other language code resolves to
/// Punjabi, so resolution never fails.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pa")]
    Punjabi,
}

impl Locale {
    /// Code of the primary locale
    pub const PRIMARY_CODE: &'static str = "en";

    /// Resolve a language code to a locale
    pub fn resolve(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case(Self::PRIMARY_CODE) {
            Locale::English
        } else {
            Locale::Punjabi
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Punjabi => "pa",
        }
    }

    /// Language tag for speech recognition
    pub fn speech_code(&self) -> &'static str {
        match self {
            Locale::English => "en-IN",
            Locale::Punjabi => "pa-IN",
        }
    }

    /// Language tag for speech synthesis
    pub fn tts_code(&self) -> &'static str {
        self.code()
    }

    /// Pick the rendering for this locale
    pub fn pick<T>(&self, english: T, punjabi: T) -> T {
        match self {
            Locale::English => english,
            Locale::Punjabi => punjabi,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
