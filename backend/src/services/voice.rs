//! Voice queries: transcribe an uploaded recording, answer it, speak the answer

use serde::Serialize;
use shared::{AdvisoryContext, Locale, SoilReading};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use super::advisory::AdvisoryEngine;
use crate::error::{AppError, AppResult};
use crate::external::SpeechToText;

/// Recording received from the client
#[derive(Debug, Clone)]
pub struct VoiceUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Transcript and answer of a voice query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceReply {
    pub query_text: String,
    pub reply_text: String,
    pub audio_handle: Option<String>,
}

/// Voice query pipeline around the advisory engine
#[derive(Clone)]
pub struct VoicePathway {
    engine: Arc<AdvisoryEngine>,
    stt: Arc<dyn SpeechToText>,
    upload_dir: PathBuf,
}

/// Extension of the uploaded file when it is a plain alphanumeric one
fn upload_suffix(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

impl VoicePathway {
    pub fn new(engine: Arc<AdvisoryEngine>, stt: Arc<dyn SpeechToText>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            stt,
            upload_dir: upload_dir.into(),
        }
    }

    /// Answer a recorded question
    ///
    /// The recording is staged in a temporary file that is removed when this
    /// call returns, whatever the outcome. A failed transcription is reported
    /// back as the reply instead of an error.
    pub async fn answer(
        &self,
        upload: VoiceUpload,
        district: &str,
        crop: &str,
        locale: Locale,
    ) -> AppResult<VoiceReply> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;

        let dir = self.upload_dir.clone();
        let suffix = upload_suffix(upload.file_name.as_deref());
        let bytes = upload.bytes;
        let (staged, audio) = tokio::task::spawn_blocking(move || -> std::io::Result<_> {
            let mut staged = tempfile::Builder::new()
                .prefix("voice-")
                .suffix(&suffix)
                .tempfile_in(&dir)?;
            staged.write_all(&bytes)?;
            staged.flush()?;
            Ok((staged, bytes))
        })
        .await
        .map_err(|e| AppError::Internal(format!("staging task failed: {}", e)))??;
        tracing::debug!(path = %staged.path().display(), size = audio.len(), "staged voice upload");

        let reply = match self.stt.transcribe(&audio, locale).await {
            Ok(query_text) => {
                tracing::info!(query = %query_text, %locale, "transcribed voice query");
                let ctx = AdvisoryContext {
                    query: query_text.clone(),
                    district: district.to_string(),
                    crop: crop.to_string(),
                    soil: SoilReading::default(),
                    locale,
                };
                let reply = self.engine.compose(&ctx).await;
                VoiceReply {
                    query_text,
                    reply_text: reply.text,
                    audio_handle: reply.audio_handle,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "speech recognition failed");
                let message = format!("Speech recognition failed: {}", e);
                let audio_handle = self.engine.synthesize_reply(&message, locale).await;
                VoiceReply {
                    query_text: message.clone(),
                    reply_text: message,
                    audio_handle,
                }
            }
        };

        // removes the staged recording
        drop(staged);
        Ok(reply)
    }
}
