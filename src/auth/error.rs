use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Domain failures surfaced to the HTTP boundary. Each variant carries a
/// human-readable message and maps to a fixed status code.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User Not Found")]
    NotFound,
    #[error("Account Not Verified")]
    NotVerified,
    #[error("Account Is Already Verified")]
    AlreadyVerified,
    #[error("Verification code has expired")]
    Expired,
    #[error("Verification code does not match")]
    CodeMismatch,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Username or email already registered")]
    AlreadyRegistered,
    #[error("{0}")]
    Validation(String),
    #[error("Email Error")]
    Mail(#[source] anyhow::Error),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::NotVerified => StatusCode::FORBIDDEN,
            AuthError::AlreadyVerified | AuthError::AlreadyRegistered => StatusCode::CONFLICT,
            AuthError::Expired | AuthError::CodeMismatch | AuthError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Mail(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // The original cause of server-side failures is logged, not exposed.
        match &self {
            AuthError::Mail(cause) => error!(error = %cause, "mail transport failure"),
            AuthError::Internal(cause) => error!(error = %cause, "internal error"),
            _ => {}
        }
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(AuthError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::NotVerified.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::AlreadyVerified.status(), StatusCode::CONFLICT);
        assert_eq!(AuthError::Expired.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::CodeMismatch.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::AlreadyRegistered.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn transport_failures_are_server_errors_with_generic_message() {
        let err = AuthError::Mail(anyhow::anyhow!("connection refused"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The SMTP cause must not leak into the client-facing message.
        assert_eq!(err.to_string(), "Email Error");
    }
}
