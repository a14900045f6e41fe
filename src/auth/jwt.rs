use axum::extract::FromRef;
use base64ct::{Base64, Encoding};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::state::AppState;

/// JWT payload: subject is the username. Any extra claims are flattened
/// into the payload next to the registered ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
    #[serde(flatten, default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// HS256 signing/verification keys plus the configured token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    ttl_millis: i64,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let jwt = &state.config.jwt;
        // The secret is base64-encoded key material (validated at config
        // load); non-base64 input is treated as the raw key bytes.
        let key = Base64::decode_vec(&jwt.secret)
            .unwrap_or_else(|_| jwt.secret.as_bytes().to_vec());
        Self {
            encoding: EncodingKey::from_secret(&key),
            decoding: DecodingKey::from_secret(&key),
            ttl_millis: jwt.ttl_millis,
        }
    }
}

impl JwtKeys {
    /// Configured token lifetime in milliseconds, returned alongside issued
    /// tokens so clients know the absolute expiry without decoding.
    pub fn expiration_millis(&self) -> i64 {
        self.ttl_millis
    }

    pub fn sign(
        &self,
        subject: &str,
        extra: serde_json::Map<String, serde_json::Value>,
    ) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + Duration::milliseconds(self.ttl_millis);
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            extra,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(%subject, "jwt signed");
        Ok(token)
    }

    pub fn sign_subject(&self, subject: &str) -> anyhow::Result<String> {
        self.sign(subject, serde_json::Map::new())
    }

    /// Checks signature and expiry. Zero leeway: a token whose expiry has
    /// passed fails immediately.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(subject = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }

    /// Checks signature, expiry, and that the subject matches `expected`.
    pub fn verify_subject(&self, token: &str, expected: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.sub = Some(expected.to_string());
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &[u8], ttl_millis: i64) -> JwtKeys {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_millis,
        }
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys(b"dev-secret", 300_000);
        let token = keys.sign_subject("alice").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys(b"dev-secret", -1_000);
        let token = keys.sign_subject("alice").expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let keys = make_keys(b"dev-secret", 300_000);
        let other = make_keys(b"other-secret", 300_000);
        let token = keys.sign_subject("alice").expect("sign");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn verify_subject_rejects_other_subject() {
        let keys = make_keys(b"dev-secret", 300_000);
        let token = keys.sign_subject("alice").expect("sign");
        assert!(keys.verify_subject(&token, "alice").is_ok());
        assert!(keys.verify_subject(&token, "bob").is_err());
    }

    #[test]
    fn extra_claims_survive_the_roundtrip() {
        let keys = make_keys(b"dev-secret", 300_000);
        let mut extra = serde_json::Map::new();
        extra.insert("device".into(), serde_json::json!("cli"));
        let token = keys.sign("alice", extra).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.extra.get("device"), Some(&serde_json::json!("cli")));
    }

    #[tokio::test]
    async fn keys_from_state_decode_base64_secret_and_expose_lifetime() {
        let state = crate::state::AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        assert_eq!(keys.expiration_millis(), 300_000);
        let token = keys.sign_subject("alice").expect("sign");
        assert_eq!(keys.verify(&token).expect("verify").sub, "alice");
    }
}
