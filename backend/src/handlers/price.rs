//! HTTP handler for mandi prices

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub crop: String,
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub price: i64,
    pub commodity: String,
    pub is_fallback: bool,
}

/// Current price of a crop in a state (default state when omitted)
pub async fn get_mandi_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> AppResult<Json<PriceResponse>> {
    if query.crop.trim().is_empty() {
        return Err(AppError::invalid("crop", "Crop is required"));
    }

    let market_state = query
        .state
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let quote = state.engine.get_price(&query.crop, market_state).await;

    Ok(Json(PriceResponse {
        price: quote.amount,
        commodity: quote.commodity,
        is_fallback: quote.is_fallback,
    }))
}
