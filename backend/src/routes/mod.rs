//! Route definitions for the Agri Advisory Platform

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Largest accepted voice recording
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Advisory data
        .route("/weather", get(handlers::get_weather))
        .route("/mandi-price", get(handlers::get_mandi_price))
        .route("/recommend-crop", post(handlers::recommend_crop))
        // Queries
        .route("/chatbot", post(handlers::chatbot))
        .route(
            "/voice-query",
            post(handlers::voice_query).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/audio/:filename", get(handlers::get_audio))
        // Accounts
        .merge(account_routes())
}

/// Account routes
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/users/:username", get(handlers::get_user))
        .route("/users/:username/language", put(handlers::set_language))
}
