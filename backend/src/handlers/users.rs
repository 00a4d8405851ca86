//! Account handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{validate_password, validate_username, Locale, User};

use crate::error::{AppError, AppResult};
use crate::services::UserService;
use crate::AppState;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub pref_lang: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LanguageRequest {
    pub lang: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Signup endpoint handler. `success` is false when the username is taken.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> AppResult<Json<SuccessResponse>> {
    validate_username(&body.username).map_err(|msg| AppError::invalid("username", msg))?;
    validate_password(&body.password).map_err(|msg| AppError::invalid("password", msg))?;

    let locale = body
        .pref_lang
        .as_deref()
        .map(Locale::resolve)
        .unwrap_or_default();

    let service = UserService::new(state.db);
    let success = service.signup(&body.username, &body.password, locale).await?;
    Ok(Json(SuccessResponse { success }))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let service = UserService::new(state.db);
    let success = service.login(&body.username, &body.password).await?;
    Ok(Json(SuccessResponse { success }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db);
    service
        .find_user(&username)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {}", username)))
}

/// Update a user's preferred reply language
pub async fn set_language(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<LanguageRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let service = UserService::new(state.db);
    let updated = service
        .set_language(&username, Locale::resolve(&body.lang))
        .await?;
    if !updated {
        return Err(AppError::NotFound(format!("User {}", username)));
    }
    Ok(Json(SuccessResponse { success: true }))
}
