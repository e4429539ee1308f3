/// Refresh Token Store
///
/// Refresh tokens are opaque 256-bit secrets, hex-encoded and stored
/// as-is: the token string itself is the primary key. A token is
/// usable iff it is unexpired and not revoked. Tokens are NOT rotated
/// on use; a token stays valid until expiry or an explicit revoke.
///
/// All store operations are single-row statements, so the database's
/// per-row consistency is enough and no in-process locking exists.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, StorageError};

/// Refresh tokens outlive access tokens by design: 60 days.
pub const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 60;

/// A persisted refresh token record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// A token is usable iff `now` is before expiry and it has never
    /// been revoked.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at && self.revoked_at.is_none()
    }
}

/// Generate a fresh refresh-token secret: 64 bytes from the OS CSPRNG,
/// hex-encoded to 128 characters.
///
/// # Errors
/// `AppError::Randomness` if the OS randomness source fails.
pub fn make_refresh_token() -> Result<String, AppError> {
    let mut bytes = [0u8; 64];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::Randomness(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// Persist a newly generated refresh token for `user_id`.
pub async fn create_refresh_token(
    pool: &PgPool,
    token: &str,
    user_id: Uuid,
) -> Result<RefreshToken, AppError> {
    let now = Utc::now();
    let expires_at = now + Duration::days(REFRESH_TOKEN_LIFETIME_DAYS);

    let record = sqlx::query_as::<_, RefreshToken>(
        r#"
        INSERT INTO refresh_tokens (token, user_id, created_at, updated_at, expires_at)
        VALUES ($1, $2, $3, $3, $4)
        RETURNING token, user_id, created_at, updated_at, expires_at, revoked_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(now)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Exact-match lookup by token string.
///
/// # Errors
/// `StorageError::NotFound` when no record matches.
pub async fn get_refresh_token(pool: &PgPool, token: &str) -> Result<RefreshToken, AppError> {
    let record = sqlx::query_as::<_, RefreshToken>(
        r#"
        SELECT token, user_id, created_at, updated_at, expires_at, revoked_at
        FROM refresh_tokens
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    record.ok_or_else(|| {
        tracing::warn!("Refresh token not found in store");
        AppError::Storage(StorageError::NotFound("refresh token".to_string()))
    })
}

/// Set the revocation timestamp to now. Revoking a token that is
/// already revoked just moves the timestamp and is not an error.
pub async fn revoke_refresh_token(pool: &PgPool, token: &str) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE refresh_tokens
        SET revoked_at = $1, updated_at = $1
        WHERE token = $2
        "#,
    )
    .bind(Utc::now())
    .bind(token)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Storage(StorageError::NotFound(
            "refresh token".to_string(),
        )));
    }

    Ok(())
}

/// Bulk-delete every refresh token. Only the dev-environment reset
/// path calls this; the route layer rejects it elsewhere.
pub async fn delete_all_refresh_tokens(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query("DELETE FROM refresh_tokens").execute(pool).await?;
    Ok(())
}
