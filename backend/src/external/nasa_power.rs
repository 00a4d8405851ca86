//! NASA POWER API client for daily agro-climatology data
//!
//! Fetches 2m air temperature (T2M), relative humidity (RH2M) and corrected
//! precipitation (PRECTOTCORR) for a single point.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use shared::GpsCoordinates;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::{ProviderError, WeatherProvider};

const DATE_FORMAT: &str = "%Y%m%d";

/// NASA POWER daily point client
#[derive(Clone)]
pub struct NasaPowerClient {
    client: Client,
    base_url: String,
}

/// Daily series keyed by date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWeather {
    /// T2M in °C
    pub temperature: BTreeMap<NaiveDate, f64>,
    /// RH2M in %
    pub humidity: BTreeMap<NaiveDate, f64>,
    /// PRECTOTCORR in mm/day
    pub precipitation: BTreeMap<NaiveDate, f64>,
}

/// NASA POWER API response
#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameters,
}

#[derive(Debug, Deserialize)]
struct PowerParameters {
    #[serde(rename = "T2M")]
    t2m: HashMap<String, f64>,
    #[serde(rename = "RH2M")]
    rh2m: HashMap<String, f64>,
    #[serde(rename = "PRECTOTCORR", default)]
    prectotcorr: HashMap<String, f64>,
}

impl NasaPowerClient {
    /// Create a new NasaPowerClient
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Request parameters for a point and date window
    fn query_params(
        location: GpsCoordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("parameters", "T2M,RH2M,PRECTOTCORR".to_string()),
            ("community", "ag".to_string()),
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("start", start.format(DATE_FORMAT).to_string()),
            ("end", end.format(DATE_FORMAT).to_string()),
            ("format", "JSON".to_string()),
        ]
    }

    /// Convert the date-string keyed response to typed series
    fn convert_response(data: PowerResponse) -> Result<RawWeather, ProviderError> {
        let parameter = data.properties.parameter;
        Ok(RawWeather {
            temperature: parse_series(parameter.t2m)?,
            humidity: parse_series(parameter.rh2m)?,
            precipitation: parse_series(parameter.prectotcorr)?,
        })
    }
}

fn parse_series(series: HashMap<String, f64>) -> Result<BTreeMap<NaiveDate, f64>, ProviderError> {
    series
        .into_iter()
        .map(|(key, value)| {
            NaiveDate::parse_from_str(&key, DATE_FORMAT)
                .map(|date| (date, value))
                .map_err(|_| ProviderError::Malformed(format!("invalid date key: {}", key)))
        })
        .collect()
}

#[async_trait]
impl WeatherProvider for NasaPowerClient {
    async fn fetch_weather_raw(
        &self,
        location: GpsCoordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawWeather, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&Self::query_params(location, start, end))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let data: PowerResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("weather response: {}", e)))?;

        Self::convert_response(data)
    }
}
