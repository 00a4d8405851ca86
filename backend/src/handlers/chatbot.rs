//! HTTP handler for text queries

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{validate_query, validate_soil_reading, AdvisoryContext, Locale, SoilReading};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub district: String,
    pub crop: String,
    #[serde(rename = "N")]
    pub nitrogen: Option<Decimal>,
    #[serde(rename = "P")]
    pub phosphorus: Option<Decimal>,
    #[serde(rename = "K")]
    pub potassium: Option<Decimal>,
    pub ph: Option<Decimal>,
    /// Reply language; the user's stored preference is used when omitted
    pub lang: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub audio_url: Option<String>,
}

impl ChatRequest {
    fn soil(&self) -> SoilReading {
        let defaults = SoilReading::default();
        SoilReading::new(
            self.nitrogen.unwrap_or(defaults.nitrogen),
            self.phosphorus.unwrap_or(defaults.phosphorus),
            self.potassium.unwrap_or(defaults.potassium),
            self.ph.unwrap_or(defaults.ph),
        )
    }
}

/// Reply language: explicit code, then the user's preference, then English
async fn request_locale(state: &AppState, lang: Option<&str>, username: Option<&str>) -> Locale {
    if let Some(code) = lang {
        return Locale::resolve(code);
    }
    match username.map(str::trim).filter(|u| !u.is_empty()) {
        Some(username) => Locale::resolve(&state.directory.lookup_user_locale(username).await),
        None => Locale::default(),
    }
}

pub async fn chatbot(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    validate_query(&body.query).map_err(|msg| AppError::invalid("query", msg))?;
    let soil = body.soil();
    validate_soil_reading(&soil).map_err(|msg| AppError::invalid("soil", msg))?;

    let locale = request_locale(&state, body.lang.as_deref(), body.username.as_deref()).await;
    let ctx = AdvisoryContext {
        query: body.query,
        district: body.district,
        crop: body.crop,
        soil,
        locale,
    };

    let reply = state.engine.compose(&ctx).await;
    Ok(Json(ChatResponse {
        reply: reply.text,
        audio_url: reply.audio_handle,
    }))
}
