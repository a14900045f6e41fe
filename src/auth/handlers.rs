use axum::{
    extract::{FromRef, Query, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::auth::{
    dto::{LoginRequest, LoginResponse, RegisterRequest, ResendParams, VerifyRequest},
    error::AuthError,
    jwt::JwtKeys,
    repo_types::User,
    services,
};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/login", post(login))
        .route("/auth/verify", post(verify))
        .route("/auth/resend", post(resend))
}

#[instrument(skip(state, payload))]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<User>, AuthError> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    if !services::is_valid_email(&payload.email) {
        return Err(AuthError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        return Err(AuthError::Validation("Password too short".into()));
    }

    let user = services::sign_up(&state, payload).await?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let user = services::login(&state, payload).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_subject(&user.username)?;
    Ok(Json(LoginResponse {
        token,
        expires_in: keys.expiration_millis(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn verify(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> Result<&'static str, AuthError> {
    services::verify_account(&state, payload).await?;
    Ok("Account Successfully Verified")
}

#[instrument(skip(state))]
pub async fn resend(
    State(state): State<AppState>,
    Query(params): Query<ResendParams>,
) -> Result<&'static str, AuthError> {
    services::resend_verification(&state, &params.email).await?;
    Ok("Verification Code Sent")
}
