use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::auth::dto::{LoginRequest, RegisterRequest, VerifyRequest};
use crate::auth::error::AuthError;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo_types::User;
use crate::mailer::{verification_body, verification_subject};
use crate::state::AppState;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Uniformly random 5-digit code in [10000, 99999].
pub fn generate_verification_code() -> String {
    rand::thread_rng().gen_range(10_000..=99_999).to_string()
}

async fn send_verification_email(
    state: &AppState,
    email: &str,
    username: &str,
    code: &str,
) -> Result<(), AuthError> {
    state
        .mailer
        .send_email(email, &verification_subject(username), &verification_body(code))
        .await
        .map_err(AuthError::Mail)
}

/// Register a new user: hash the password, store the row with a pending
/// verification code, then send the code by email.
pub async fn sign_up(state: &AppState, req: RegisterRequest) -> Result<User, AuthError> {
    if User::find_by_username(&state.db, &req.username).await?.is_some()
        || User::find_by_email(&state.db, &req.email).await?.is_some()
    {
        warn!(username = %req.username, "sign-up for taken username or email");
        return Err(AuthError::AlreadyRegistered);
    }

    let password_hash = hash_password(&req.password)?;
    let code = generate_verification_code();
    let expires_at =
        OffsetDateTime::now_utc() + Duration::minutes(state.config.verification.signup_ttl_minutes);

    // New accounts are stored enabled, matching the upstream service this
    // replaces; the login gate only ever fires for rows created elsewhere.
    let user = User::create(
        &state.db,
        &req.username,
        &req.email,
        &password_hash,
        true,
        &code,
        expires_at,
    )
    .await?;

    send_verification_email(state, &user.email, &user.username, &code).await?;
    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Authenticate a username/password pair. The enabled gate is checked
/// before the password so an unverified account never reaches hashing.
pub async fn login(state: &AppState, req: LoginRequest) -> Result<User, AuthError> {
    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or(AuthError::NotFound)?;

    if !user.enabled {
        warn!(username = %user.username, "login before verification");
        return Err(AuthError::NotVerified);
    }

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(username = %user.username, "login with invalid password");
        return Err(AuthError::InvalidCredentials);
    }

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(user)
}

/// Consume a pending verification code. An expired code is left in place
/// so the account still needs a resend; a wrong code is an explicit error.
pub async fn verify_account(state: &AppState, req: VerifyRequest) -> Result<User, AuthError> {
    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or(AuthError::NotFound)?;

    let Some(code) = user.verification_code.as_deref() else {
        return Err(AuthError::AlreadyVerified);
    };
    let expires_at = user
        .verification_expires_at
        .ok_or_else(|| anyhow::anyhow!("verification code present without expiry"))?;

    if expires_at < OffsetDateTime::now_utc() {
        warn!(username = %user.username, "verification code expired");
        return Err(AuthError::Expired);
    }
    if code != req.verification_code {
        warn!(username = %user.username, "verification code mismatch");
        return Err(AuthError::CodeMismatch);
    }

    let user = User::mark_verified(&state.db, user.id).await?;
    info!(user_id = %user.id, username = %user.username, "account verified");
    Ok(user)
}

/// Issue a fresh code with the longer resend lifetime and email it.
pub async fn resend_verification(state: &AppState, email: &str) -> Result<(), AuthError> {
    let user = User::find_by_email(&state.db, email)
        .await?
        .ok_or(AuthError::NotFound)?;

    if user.enabled {
        return Err(AuthError::AlreadyVerified);
    }

    let code = generate_verification_code();
    let expires_at =
        OffsetDateTime::now_utc() + Duration::minutes(state.config.verification.resend_ttl_minutes);
    let user = User::set_verification(&state.db, user.id, &code, expires_at).await?;

    send_verification_email(state, &user.email, &user.username, &code).await?;
    info!(user_id = %user.id, username = %user.username, "verification code resent");
    Ok(())
}
