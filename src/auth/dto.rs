use serde::{Deserialize, Serialize};

/// Request body for sign-up.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for verification-code consumption.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub email: String,
    pub username: String,
    pub verification_code: String,
}

/// Query parameters for resending a verification code.
#[derive(Debug, Deserialize)]
pub struct ResendParams {
    pub email: String,
}

/// Response returned after a successful login. `expires_in` is the token
/// lifetime in milliseconds so clients know the absolute expiry without
/// decoding the token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_uses_camel_case() {
        let res = LoginResponse {
            token: "abc".into(),
            expires_in: 3_600_000,
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains("\"expiresIn\":3600000"));
        assert!(json.contains("\"token\":\"abc\""));
    }

    #[test]
    fn verify_request_accepts_camel_case_code() {
        let req: VerifyRequest = serde_json::from_str(
            r#"{"email":"a@x.com","username":"alice","verificationCode":"12345"}"#,
        )
        .unwrap();
        assert_eq!(req.verification_code, "12345");
        assert_eq!(req.username, "alice");
    }
}
