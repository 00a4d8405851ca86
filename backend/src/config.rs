//! Configuration management for the Agri Advisory Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with ADVISORY_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// NASA POWER weather API configuration
    pub weather: WeatherConfig,

    /// Mandi price API configuration
    pub market: MarketConfig,

    /// Speech recognition and synthesis configuration
    pub speech: SpeechConfig,

    /// Local file storage for audio
    pub storage: StorageConfig,

    /// Allowed browser origins
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Daily point endpoint
    pub api_endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketConfig {
    /// data.gov.in resource endpoint for daily mandi prices
    pub api_endpoint: String,

    /// data.gov.in API key
    pub api_key: String,

    /// State used when a request does not name one
    pub default_state: String,

    /// Maximum number of records requested
    pub record_limit: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Speech-to-text recognize endpoint
    pub stt_endpoint: String,

    /// Speech-to-text API key (transcription is disabled when empty)
    pub stt_api_key: String,

    /// Text-to-speech endpoint
    pub tts_endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory for synthesized replies
    pub audio_dir: String,

    /// Directory for request-scoped voice uploads
    pub upload_dir: String,

    /// Age in seconds after which synthesized replies are deleted
    pub audio_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("ADVISORY_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let defaults = Config::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", defaults.server.port)?
            .set_default("server.host", defaults.server.host)?
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", defaults.database.max_connections)?
            .set_default("database.min_connections", defaults.database.min_connections)?
            .set_default("weather.api_endpoint", defaults.weather.api_endpoint)?
            .set_default("weather.timeout_secs", defaults.weather.timeout_secs)?
            .set_default("market.api_endpoint", defaults.market.api_endpoint)?
            .set_default("market.api_key", defaults.market.api_key)?
            .set_default("market.default_state", defaults.market.default_state)?
            .set_default("market.record_limit", defaults.market.record_limit)?
            .set_default("market.timeout_secs", defaults.market.timeout_secs)?
            .set_default("speech.stt_endpoint", defaults.speech.stt_endpoint)?
            .set_default("speech.stt_api_key", defaults.speech.stt_api_key)?
            .set_default("speech.tts_endpoint", defaults.speech.tts_endpoint)?
            .set_default("speech.timeout_secs", defaults.speech.timeout_secs)?
            .set_default("storage.audio_dir", defaults.storage.audio_dir)?
            .set_default("storage.upload_dir", defaults.storage.upload_dir)?
            .set_default("storage.audio_ttl_secs", defaults.storage.audio_ttl_secs)?
            .set_default("cors.allowed_origins", defaults.cors.allowed_origins)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (ADVISORY_ prefix)
            .add_source(
                Environment::with_prefix("ADVISORY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl MarketConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SpeechConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl StorageConfig {
    pub fn audio_ttl(&self) -> Duration {
        Duration::from_secs(self.audio_ttl_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/agri_advisory".to_string(),
            max_connections: 10,
            min_connections: 2,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://power.larc.nasa.gov/api/temporal/daily/point".to_string(),
            timeout_secs: 15,
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_endpoint:
                "https://api.data.gov.in/resource/9ef84268-d588-465a-a308-a864a43d0070"
                    .to_string(),
            api_key: String::new(),
            default_state: "Punjab".to_string(),
            record_limit: 5,
            timeout_secs: 12,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_endpoint: "https://speech.googleapis.com/v1/speech:recognize".to_string(),
            stt_api_key: String::new(),
            tts_endpoint: "https://translate.google.com/translate_tts".to_string(),
            timeout_secs: 20,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: "data/audio".to_string(),
            upload_dir: "data/uploads".to_string(),
            audio_ttl_secs: 3600,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}
