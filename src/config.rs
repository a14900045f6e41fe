use base64ct::{Base64, Encoding};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Base64-encoded HMAC key material.
    pub secret: String,
    pub ttl_millis: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    pub signup_ttl_minutes: i64,
    pub resend_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub smtp: SmtpConfig,
    pub verification: VerificationConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        let secret = std::env::var("JWT_SECRET")?;
        if Base64::decode_vec(&secret).is_err() {
            anyhow::bail!("JWT_SECRET must be base64-encoded key material");
        }
        let jwt = JwtConfig {
            secret,
            ttl_millis: std::env::var("JWT_TTL_MILLIS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(3_600_000),
        };

        let smtp = SmtpConfig {
            host: std::env::var("SMTP_HOST")?,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(465),
            username: std::env::var("SMTP_USERNAME")?,
            password: std::env::var("SMTP_PASSWORD")?,
            from: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "Doorman <no-reply@doorman.local>".into()),
        };

        let verification = VerificationConfig {
            signup_ttl_minutes: std::env::var("VERIFICATION_SIGNUP_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(15),
            resend_ttl_minutes: std::env::var("VERIFICATION_RESEND_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };

        Ok(Self {
            database_url,
            jwt,
            smtp,
            verification,
        })
    }
}
