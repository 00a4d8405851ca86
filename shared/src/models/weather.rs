//! Weather data models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily weather observation for a district
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherPoint {
    pub date: NaiveDate,
    pub temperature: Decimal,
    pub humidity: Decimal,
    pub rainfall: Decimal,
}

impl WeatherPoint {
    pub fn new(date: NaiveDate, temperature: Decimal, humidity: Decimal, rainfall: Decimal) -> Self {
        Self {
            date,
            temperature,
            humidity,
            rainfall,
        }
    }

    /// Placeholder point used when no provider data is available
    pub fn placeholder(date: NaiveDate) -> Self {
        Self::new(date, Decimal::from(25), Decimal::from(70), Decimal::from(100))
    }
}

/// Latest reading plus the trailing daily series it was taken from
///
/// `latest` is the last element of `forecast` whenever `forecast` is
/// non-empty. An empty `forecast` means the data was unavailable and
/// `latest` is a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub latest: WeatherPoint,
    pub forecast: Vec<WeatherPoint>,
}

impl WeatherReport {
    /// Build a report from a chronological series. Returns `None` for an empty series.
    pub fn from_forecast(forecast: Vec<WeatherPoint>) -> Option<Self> {
        let latest = forecast.last()?.clone();
        Some(Self { latest, forecast })
    }

    /// Report used when the provider could not be reached
    pub fn unavailable(today: NaiveDate) -> Self {
        Self {
            latest: WeatherPoint::placeholder(today),
            forecast: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        !self.forecast.is_empty()
    }
}
