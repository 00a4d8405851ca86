//! HTTP handler for district weather

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::WeatherReport;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub district: String,
}

/// Recent weather for a district. Falls back to a placeholder report, never errors.
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Json<WeatherReport> {
    Json(state.engine.get_weather(query.district.trim()).await)
}
