//! HTTP handler for crop recommendation

use axum::{extract::State, Json};
use serde::Serialize;
use shared::{validate_crop_features, Crop, CropFeatures};

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CropResponse {
    pub crop: Crop,
}

pub async fn recommend_crop(
    State(state): State<AppState>,
    Json(features): Json<CropFeatures>,
) -> AppResult<Json<CropResponse>> {
    validate_crop_features(&features).map_err(|msg| AppError::invalid("features", msg))?;

    let crop = state.engine.recommend(&features);
    tracing::debug!(%crop, "recommended crop");
    Ok(Json(CropResponse { crop }))
}
