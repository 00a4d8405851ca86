//! Serves synthesized speech

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use crate::error::{AppError, AppResult};
use crate::AppState;

pub async fn get_audio(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let bytes = state
        .audio
        .load(&file_name)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("Audio {}", file_name)))?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], bytes))
}
