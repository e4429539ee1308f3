/// Access token claim set (RFC 7519 registered claims only).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, CredentialError};

/// Issuer written into every access token this service mints, and the
/// only issuer accepted on verification.
pub const TOKEN_ISSUER: &str = "murmur";

/// Claims carried by an access token. The token is self-contained and
/// stateless; nothing here is persisted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Subject (user ID as UUID string)
    #[serde(default)]
    pub sub: String,
    /// Issued at (Unix timestamp, UTC)
    pub iat: i64,
    /// Expiration time (Unix timestamp, UTC)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `user_id` expiring `ttl` from now.
    ///
    /// `ttl` is not clamped here; callers pick the lifetime per use
    /// case (sessions use one hour, tests may pass a negative ttl to
    /// mint an already-expired token).
    pub fn new(user_id: Uuid, ttl: chrono::Duration) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now,
            exp: now + ttl.num_seconds(),
        }
    }

    /// Extract the user ID from the subject claim.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Credential(CredentialError::MalformedSubject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_carry_subject_and_issuer() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, chrono::Duration::hours(1));

        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn user_id_round_trips() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, chrono::Duration::hours(1));

        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn non_uuid_subject_is_malformed() {
        let mut claims = Claims::new(Uuid::new_v4(), chrono::Duration::hours(1));
        claims.sub = "not-a-uuid".to_string();

        assert!(matches!(
            claims.user_id(),
            Err(AppError::Credential(CredentialError::MalformedSubject))
        ));
    }

    #[test]
    fn empty_subject_is_malformed() {
        let mut claims = Claims::new(Uuid::new_v4(), chrono::Duration::hours(1));
        claims.sub = String::new();

        assert!(claims.user_id().is_err());
    }
}
