use axum::{extract::State, Json};
use tracing::{error, instrument};

use crate::auth::{error::AuthError, extractors::AuthUser, repo_types::User};
use crate::state::AppState;

/// Current principal, looked up from the token subject.
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(username): AuthUser,
) -> Result<Json<User>, AuthError> {
    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| {
            error!(%username, "token subject has no user row");
            AuthError::NotFound
        })?;
    Ok(Json(user))
}

#[instrument(skip(state, _auth))]
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<User>>, AuthError> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(users))
}
