use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database. Serialized with camelCase field names on
/// the wire; the password hash is never exposed in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub enabled: bool,
    // Both null (verified) or both set (verification pending).
    pub verification_code: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub verification_expires_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@x.com".into(),
            password_hash: "$argon2id$...".into(),
            enabled: true,
            verification_code: Some("12345".into()),
            verification_expires_at: Some(OffsetDateTime::now_utc()),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn serialization_hides_password_hash() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("passwordHash"));
    }

    #[test]
    fn serialization_uses_camel_case_wire_names() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(json.contains("\"verificationCode\":\"12345\""));
        assert!(json.contains("\"verificationExpiresAt\""));
        assert!(json.contains("\"createdAt\""));
    }
}
