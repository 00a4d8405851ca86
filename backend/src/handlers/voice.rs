//! HTTP handler for recorded voice queries

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::Locale;

use crate::error::{AppError, AppResult};
use crate::services::VoiceUpload;
use crate::AppState;

/// Multipart field carrying the recording
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct VoiceQueryParams {
    #[serde(default = "default_district")]
    pub district: String,
    #[serde(default = "default_crop")]
    pub crop: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_district() -> String {
    "Ludhiana".to_string()
}

fn default_crop() -> String {
    "Wheat".to_string()
}

fn default_lang() -> String {
    Locale::PRIMARY_CODE.to_string()
}

#[derive(Debug, Serialize)]
pub struct VoiceQueryResponse {
    pub query_text: String,
    pub reply_text: String,
    pub audio_url: Option<String>,
}

/// Pull the recording out of the multipart body
async fn read_upload(mut multipart: Multipart) -> AppResult<VoiceUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidUpload(e.to_string()))?;
        if bytes.is_empty() {
            return Err(AppError::InvalidUpload("recording is empty".to_string()));
        }
        return Ok(VoiceUpload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }
    Err(AppError::InvalidUpload(format!("missing '{}' field", FILE_FIELD)))
}

pub async fn voice_query(
    State(state): State<AppState>,
    Query(params): Query<VoiceQueryParams>,
    multipart: Multipart,
) -> AppResult<Json<VoiceQueryResponse>> {
    let upload = read_upload(multipart).await?;
    let locale = Locale::resolve(&params.lang);

    let reply = state
        .voice
        .answer(upload, &params.district, &params.crop, locale)
        .await?;

    Ok(Json(VoiceQueryResponse {
        query_text: reply.query_text,
        reply_text: reply.reply_text,
        audio_url: reply.audio_handle,
    }))
}
