/// Session routes: login, token refresh, and refresh-token revocation.
///
/// Login verifies the password and hands back both credentials: a
/// one-hour access token and a sixty-day refresh token. Refresh trades
/// a usable refresh token for a fresh access token; the refresh token
/// itself is not rotated. Revoke marks the refresh token unusable.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{
    create_refresh_token, get_bearer_token, get_refresh_token, make_jwt, make_refresh_token,
    revoke_refresh_token, verify_password,
};
use crate::configuration::AuthSettings;
use crate::error::{AppError, CredentialError};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the user's public record plus both credentials.
#[derive(Serialize)]
pub struct LoginResponse {
    pub id: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// POST /api/login
///
/// Unknown email and wrong password produce the same 401 so a probing
/// client cannot enumerate accounts.
pub async fn login(
    form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    auth_settings: web::Data<AuthSettings>,
) -> Result<HttpResponse, AppError> {
    let user = sqlx::query_as::<_, (Uuid, String, String, chrono::DateTime<Utc>, chrono::DateTime<Utc>)>(
        "SELECT id, email, hashed_password, created_at, updated_at FROM users WHERE email = $1",
    )
    .bind(&form.email)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or(AppError::Credential(CredentialError::PasswordMismatch))?;

    let (user_id, email, hashed_password, created_at, updated_at) = user;

    verify_password(&form.password, &hashed_password)?;

    let token = make_jwt(
        user_id,
        &auth_settings.jwt_secret,
        chrono::Duration::seconds(auth_settings.access_token_expiry),
    )?;

    let refresh_token_secret = make_refresh_token()?;
    let refresh_token = create_refresh_token(pool.get_ref(), &refresh_token_secret, user_id).await?;

    tracing::info!(user_id = %user_id, "User logged in");

    Ok(HttpResponse::Ok().json(LoginResponse {
        id: user_id.to_string(),
        email,
        created_at: created_at.to_rfc3339(),
        updated_at: updated_at.to_rfc3339(),
        token,
        refresh_token: refresh_token.token,
    }))
}

/// POST /api/refresh
///
/// The refresh secret arrives as `Authorization: Bearer <secret>`.
/// An unknown, expired or revoked token all end in a 401; the caller
/// only learns "log in again".
pub async fn refresh(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    auth_settings: web::Data<AuthSettings>,
) -> Result<HttpResponse, AppError> {
    let secret = get_bearer_token(req.headers())?;

    let refresh_token = get_refresh_token(pool.get_ref(), &secret).await?;

    if !refresh_token.is_usable(Utc::now()) {
        tracing::warn!(
            user_id = %refresh_token.user_id,
            revoked = refresh_token.revoked_at.is_some(),
            "Refresh token no longer usable"
        );
        return Err(AppError::Credential(CredentialError::Expired));
    }

    let token = make_jwt(
        refresh_token.user_id,
        &auth_settings.jwt_secret,
        chrono::Duration::seconds(auth_settings.access_token_expiry),
    )?;

    tracing::info!(user_id = %refresh_token.user_id, "Access token refreshed");

    Ok(HttpResponse::Ok().json(RefreshResponse { token }))
}

/// POST /api/revoke
///
/// Revoke the presented refresh token. 204 on success.
pub async fn revoke(req: HttpRequest, pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let secret = get_bearer_token(req.headers())?;

    revoke_refresh_token(pool.get_ref(), &secret).await?;

    tracing::info!("Refresh token revoked");

    Ok(HttpResponse::NoContent().finish())
}
