//! Speech recognition and synthesis clients
//!
//! - Transcription uses the Google Speech-to-Text `speech:recognize` REST call
//! - Synthesis uses the Google Translate TTS endpoint, which returns MP3

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::Locale;
use std::time::Duration;

use super::{ProviderError, SpeechToText, TextToSpeech};

/// Longest text the TTS endpoint accepts per request
const TTS_MAX_CHARS: usize = 100;

/// Google Speech-to-Text client
#[derive(Clone)]
pub struct GoogleSpeechClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    language_code: &'a str,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

impl GoogleSpeechClient {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Join the best alternative of every result
    fn best_transcript(response: RecognizeResponse) -> Result<String, ProviderError> {
        let transcript = response
            .results
            .into_iter()
            .filter_map(|r| r.alternatives.into_iter().next())
            .map(|alt| alt.transcript.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if transcript.is_empty() {
            return Err(ProviderError::Empty("speech could not be understood".to_string()));
        }
        Ok(transcript)
    }
}

#[async_trait]
impl SpeechToText for GoogleSpeechClient {
    async fn transcribe(&self, audio: &[u8], locale: Locale) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured("speech recognition API key"));
        }

        let body = RecognizeRequest {
            config: RecognitionConfig {
                language_code: locale.speech_code(),
            },
            audio: RecognitionAudio {
                content: BASE64.encode(audio),
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let data: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("recognize response: {}", e)))?;

        Self::best_transcript(data)
    }
}

/// Google Translate TTS client
#[derive(Clone)]
pub struct GoogleTtsClient {
    client: Client,
    endpoint: String,
}

impl GoogleTtsClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

/// Split text into pieces of at most `max_chars` characters, breaking on whitespace
/// where possible. MP3 frames concatenate, so the pieces can be synthesized one by one.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        // hard-split words longer than a whole chunk
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let rest = word.split_off(split_at);
            chunks.push(word);
            word = rest;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[async_trait]
impl TextToSpeech for GoogleTtsClient {
    async fn synthesize(&self, text: &str, locale: Locale) -> Result<Vec<u8>, ProviderError> {
        let chunks = chunk_text(text, TTS_MAX_CHARS);
        if chunks.is_empty() {
            return Err(ProviderError::Empty("nothing to synthesize".to_string()));
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", locale.tts_code()),
                    ("q", chunk.as_str()),
                    ("idx", idx.to_string().as_str()),
                    ("total", total.as_str()),
                ])
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(ProviderError::Status(response.status().as_u16()));
            }
            audio.extend_from_slice(&response.bytes().await?);
        }

        if audio.is_empty() {
            return Err(ProviderError::Empty("synthesis returned no audio".to_string()));
        }
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_short_text_is_single_chunk() {
        assert_eq!(chunk_text("Irrigate every 7–10 days.", 100), vec!["Irrigate every 7–10 days."]);
    }

    #[test]
    fn test_chunk_breaks_on_whitespace() {
        let chunks = chunk_text("aaa bbb ccc", 7);
        assert_eq!(chunks, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_chunk_counts_characters_not_bytes() {
        // Gurmukhi characters are three bytes each
        let text = "ਸਿੰਚਾਈ ਕਰੋ";
        assert_eq!(chunk_text(text, 10), vec![text]);
    }

    #[test]
    fn test_chunk_hard_splits_long_words() {
        let chunks = chunk_text("abcdefghij", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_chunk_empty_text() {
        assert!(chunk_text("   ", 100).is_empty());
    }

    #[test]
    fn test_best_transcript() {
        let body = r#"{"results": [
            {"alternatives": [{"transcript": "when to irrigate", "confidence": 0.92}]},
            {"alternatives": [{"transcript": " wheat "}]}
        ]}"#;
        let response: RecognizeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            GoogleSpeechClient::best_transcript(response).unwrap(),
            "when to irrigate wheat"
        );
    }

    #[test]
    fn test_no_results_is_empty_error() {
        let response: RecognizeResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            GoogleSpeechClient::best_transcript(response),
            Err(ProviderError::Empty(_))
        ));
    }
}
