//! External API integrations
//!
//! Each provider is consumed through an object-safe trait so the advisory
//! engine can be driven by the real HTTP clients in production and by
//! in-memory fakes in tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{GpsCoordinates, Locale};
use thiserror::Error;

pub mod mandi;
pub mod nasa_power;
pub mod speech;

pub use mandi::{MandiClient, PriceRecord};
pub use nasa_power::{NasaPowerClient, RawWeather};
pub use speech::{GoogleSpeechClient, GoogleTtsClient};

/// Failure of an external provider call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("timed out after {0} seconds")]
    Timeout(u64),

    #[error("no usable data: {0}")]
    Empty(String),

    #[error("not configured: {0}")]
    NotConfigured(&'static str),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ProviderError::Status(status.as_u16())
        } else if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else {
            ProviderError::Request(err.to_string())
        }
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        ProviderError::Storage(err.to_string())
    }
}

/// Daily weather series for a coordinate
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_weather_raw(
        &self,
        location: GpsCoordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawWeather, ProviderError>;
}

/// Recent mandi price records for a commodity in a state
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_price_raw(
        &self,
        commodity: &str,
        state: &str,
    ) -> Result<Vec<PriceRecord>, ProviderError>;
}

#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio: &[u8], locale: Locale) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Returns MP3 bytes
    async fn synthesize(&self, text: &str, locale: Locale) -> Result<Vec<u8>, ProviderError>;
}

/// Preferred reply language of a registered user
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Language code for the user, `en` when the user is unknown
    async fn lookup_user_locale(&self, username: &str) -> String;
}
