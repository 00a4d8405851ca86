//! Weather aggregation by district with a placeholder fallback

use chrono::{Days, Local, NaiveDate};
use rust_decimal::Decimal;
use shared::{GpsCoordinates, WeatherPoint, WeatherReport};
use std::sync::Arc;
use std::time::Duration;

use super::sourced::Sourced;
use crate::external::{ProviderError, RawWeather, WeatherProvider};

/// Days of history requested before today
const WINDOW_DAYS: u64 = 5;

/// District centroids, in (latitude, longitude) thousandths of a degree
const DISTRICTS: [(&str, i64, i64); 7] = [
    ("Amritsar", 31_634, 74_872),
    ("Ludhiana", 30_901, 75_857),
    ("Patiala", 30_339, 76_386),
    ("Bathinda", 30_210, 74_945),
    ("Ferozepur", 30_933, 74_622),
    ("Hoshiarpur", 31_532, 75_905),
    ("Jalandhar", 31_326, 75_576),
];

/// Used for any district not in the table
const DEFAULT_LOCATION: (i64, i64) = (30_901, 75_857);

/// Coordinates for a district name (exact match), or the default location
pub fn district_coordinates(district: &str) -> GpsCoordinates {
    let (lat, lon) = DISTRICTS
        .iter()
        .find(|(name, _, _)| *name == district)
        .map(|(_, lat, lon)| (*lat, *lon))
        .unwrap_or(DEFAULT_LOCATION);
    GpsCoordinates::new(Decimal::new(lat, 3), Decimal::new(lon, 3))
}

/// Round a provider reading to exactly one decimal place
fn reading(value: f64) -> Result<Decimal, ProviderError> {
    let mut rounded = Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(1))
        .ok_or_else(|| ProviderError::Malformed(format!("reading out of range: {}", value)))?;
    rounded.rescale(1);
    Ok(rounded)
}

/// Build the chronological series from the raw provider maps
///
/// Every date of the temperature series becomes a point. Missing rainfall
/// counts as zero; missing humidity means the response is unusable.
pub fn build_forecast(raw: &RawWeather) -> Result<Vec<WeatherPoint>, ProviderError> {
    raw.temperature
        .iter()
        .map(|(date, temperature)| {
            let humidity = raw
                .humidity
                .get(date)
                .ok_or_else(|| ProviderError::Malformed(format!("no humidity for {}", date)))?;
            let rainfall = raw.precipitation.get(date).copied().unwrap_or(0.0);
            Ok(WeatherPoint::new(
                *date,
                reading(*temperature)?,
                reading(*humidity)?,
                reading(rainfall)?,
            ))
        })
        .collect()
}

/// Wraps a weather provider with district geocoding, a time bound and a fallback
#[derive(Clone)]
pub struct WeatherAggregator {
    provider: Arc<dyn WeatherProvider>,
    timeout: Duration,
}

impl WeatherAggregator {
    pub fn new(provider: Arc<dyn WeatherProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Weather for a district with today taken from the local clock
    pub async fn fetch_report(&self, district: &str) -> Sourced<WeatherReport> {
        self.fetch_report_on(district, Local::now().date_naive()).await
    }

    /// Weather for a district over the window ending on `today`
    pub async fn fetch_report_on(&self, district: &str, today: NaiveDate) -> Sourced<WeatherReport> {
        let location = district_coordinates(district);
        let start = today.checked_sub_days(Days::new(WINDOW_DAYS)).unwrap_or(today);

        match self.fetch_live(location, start, today).await {
            Ok(report) => Sourced::Live(report),
            Err(reason) => {
                tracing::warn!(district, %reason, "weather unavailable, using placeholder");
                Sourced::Fallback {
                    value: WeatherReport::unavailable(today),
                    reason,
                }
            }
        }
    }

    pub async fn get_weather(&self, district: &str) -> WeatherReport {
        self.fetch_report(district).await.into_value()
    }

    async fn fetch_live(
        &self,
        location: GpsCoordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WeatherReport, ProviderError> {
        let raw = tokio::time::timeout(
            self.timeout,
            self.provider.fetch_weather_raw(location, start, end),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.timeout.as_secs()))??;

        let forecast = build_forecast(&raw)?;
        WeatherReport::from_forecast(forecast)
            .ok_or_else(|| ProviderError::Empty("weather series has no dates".to_string()))
    }
}
