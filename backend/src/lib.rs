//! Agri Advisory Platform - backend library
//!
//! Advisory service for Punjab farmers: weather, mandi prices, crop
//! selection and irrigation guidance, answered by text or voice in
//! English or Punjabi.

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{
    GoogleSpeechClient, GoogleTtsClient, MandiClient, NasaPowerClient, ProviderError,
    UserDirectory,
};
use services::{
    AdvisoryEngine, AudioStore, FileAudioStore, PriceAggregator, UserService, VoicePathway,
    WeatherAggregator,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub engine: Arc<AdvisoryEngine>,
    pub voice: Arc<VoicePathway>,
    pub directory: Arc<dyn UserDirectory>,
    pub audio: Arc<dyn AudioStore>,
}

impl AppState {
    /// Wire the production provider clients from configuration
    pub fn from_config(config: Config, db: sqlx::PgPool) -> Result<Self, ProviderError> {
        let weather = WeatherAggregator::new(
            Arc::new(NasaPowerClient::new(
                config.weather.api_endpoint.clone(),
                config.weather.timeout(),
            )?),
            config.weather.timeout(),
        );
        let price = PriceAggregator::new(
            Arc::new(MandiClient::new(
                config.market.api_endpoint.clone(),
                config.market.api_key.clone(),
                config.market.record_limit,
                config.market.timeout(),
            )?),
            config.market.timeout(),
            config.market.default_state.clone(),
        );
        let tts = Arc::new(GoogleTtsClient::new(
            config.speech.tts_endpoint.clone(),
            config.speech.timeout(),
        )?);
        let stt = Arc::new(GoogleSpeechClient::new(
            config.speech.stt_endpoint.clone(),
            config.speech.stt_api_key.clone(),
            config.speech.timeout(),
        )?);
        let audio: Arc<dyn AudioStore> = Arc::new(FileAudioStore::new(
            &config.storage.audio_dir,
            config.storage.audio_ttl(),
        ));

        let engine = Arc::new(AdvisoryEngine::new(weather, price, tts, audio.clone()));
        let voice = Arc::new(VoicePathway::new(
            engine.clone(),
            stt,
            &config.storage.upload_dir,
        ));

        Ok(Self {
            directory: Arc::new(UserService::new(db.clone())),
            db,
            config: Arc::new(config),
            engine,
            voice,
            audio,
        })
    }
}

/// CORS layer for the configured browser origins
pub fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Agri Advisory Platform API v1.0"
}
