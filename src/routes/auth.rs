use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::config::get_config;
use crate::dto::auth_dto::{AuthResponse, LoginRequest, SignupRequest};
use crate::error::Error;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::token::issue_token;
use crate::AppState;

#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> crate::error::Result<Response> {
    payload.validate()?;

    let password_hash = hash_password(&payload.password)?;
    let user = state
        .store
        .create_user(&payload.name, &payload.email, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "New user registered");

    let config = get_config();
    let token = issue_token(
        user.id,
        &user.name,
        &config.jwt_secret,
        config.jwt_expiration_secs,
    )?;

    let response = AuthResponse {
        token,
        user_id: user.id,
        name: user.name,
        email: user.email,
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> crate::error::Result<Response> {
    payload.validate()?;

    // Same error for unknown email and wrong password.
    let user = state
        .store
        .user_by_email(&payload.email)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(Error::Unauthorized("Invalid email or password".to_string()));
    }

    let config = get_config();
    let token = issue_token(
        user.id,
        &user.name,
        &config.jwt_secret,
        config.jwt_expiration_secs,
    )?;

    let response = AuthResponse {
        token,
        user_id: user.id,
        name: user.name,
        email: user.email,
    };
    Ok(Json(response).into_response())
}
