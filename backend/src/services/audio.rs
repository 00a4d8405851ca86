//! Storage for synthesized speech served back under `/api/v1/audio`

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::external::ProviderError;

/// URL prefix of stored audio
pub const AUDIO_ROUTE_PREFIX: &str = "/api/v1/audio";

/// Persists MP3 bytes and hands out a URL path for them
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Store the audio and return its handle
    async fn store(&self, audio: Vec<u8>) -> Result<String, ProviderError>;

    /// Bytes of a stored file, `None` when the name is unknown or not a plain `.mp3` name
    async fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>, ProviderError>;
}

/// Plain `{name}.mp3` file name with no path components
pub fn is_audio_file_name(file_name: &str) -> bool {
    match file_name.strip_suffix(".mp3") {
        Some(stem) => {
            !stem.is_empty()
                && !stem.contains("..")
                && stem
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }
        None => false,
    }
}

/// Audio store backed by a directory on disk
///
/// Files older than `ttl` are swept whenever a new reply is stored.
#[derive(Debug, Clone)]
pub struct FileAudioStore {
    dir: PathBuf,
    ttl: Duration,
}

impl FileAudioStore {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Remove stored replies last modified more than `ttl` ago. Returns how many were removed.
    pub async fn sweep_expired(&self) -> Result<usize, ProviderError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let now = SystemTime::now();
        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if !name.to_str().map(is_audio_file_name).unwrap_or(false) {
                continue;
            }
            let modified = entry.metadata().await?.modified()?;
            let age = now.duration_since(modified).unwrap_or_default();
            if age <= self.ttl {
                continue;
            }
            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => removed += 1,
                // a concurrent sweep got there first
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        if removed > 0 {
            tracing::debug!(removed, "swept expired audio");
        }
        Ok(removed)
    }
}

#[async_trait]
impl AudioStore for FileAudioStore {
    async fn store(&self, audio: Vec<u8>) -> Result<String, ProviderError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        if let Err(e) = self.sweep_expired().await {
            tracing::warn!(error = %e, "audio sweep failed");
        }
        let file_name = format!("{}.mp3", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&file_name), audio).await?;
        tracing::debug!(file = %file_name, "stored synthesized audio");
        Ok(format!("{}/{}", AUDIO_ROUTE_PREFIX, file_name))
    }

    async fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>, ProviderError> {
        if !is_audio_file_name(file_name) {
            return Ok(None);
        }
        match tokio::fs::read(self.dir.join(file_name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
