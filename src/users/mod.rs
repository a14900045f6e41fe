use crate::state::AppState;
use axum::{routing::get, Router};

pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::me))
        .route("/users", get(handlers::list_users))
}
