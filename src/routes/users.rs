/// User account routes.
///
/// Accounts hold the salted one-way password hash; the plaintext is
/// never stored and never logged, and the hash never appears in a
/// response body.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::hash_password;
use crate::error::AppError;
use crate::middleware::AuthenticatedUser;
use crate::validators::is_valid_email;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user record.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// POST /api/users
///
/// Create an account. 201 on success, 409 on duplicate email.
pub async fn create_user(
    form: web::Json<CreateUserRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let email = is_valid_email(&form.email)?;
    let hashed_password = hash_password(&form.password)?;

    let user_id = Uuid::new_v4();
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO users (id, email, hashed_password, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        "#,
    )
    .bind(user_id)
    .bind(&email)
    .bind(&hashed_password)
    .bind(now)
    .execute(pool.get_ref())
    .await?;

    tracing::info!(user_id = %user_id, "User created");

    Ok(HttpResponse::Created().json(UserResponse {
        id: user_id.to_string(),
        email,
        created_at: now.to_rfc3339(),
        updated_at: now.to_rfc3339(),
    }))
}

/// PUT /api/me
///
/// Update the authenticated user's email and password. Requires a
/// valid access token; the principal comes from the auth middleware.
pub async fn update_user(
    user: web::ReqData<AuthenticatedUser>,
    form: web::Json<UpdateUserRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let email = is_valid_email(&form.email)?;
    let hashed_password = hash_password(&form.password)?;

    let now = Utc::now();
    let row = sqlx::query_as::<_, (Uuid, String, chrono::DateTime<Utc>, chrono::DateTime<Utc>)>(
        r#"
        UPDATE users
        SET email = $1, hashed_password = $2, updated_at = $3
        WHERE id = $4
        RETURNING id, email, created_at, updated_at
        "#,
    )
    .bind(&email)
    .bind(&hashed_password)
    .bind(now)
    .bind(user.user_id)
    .fetch_one(pool.get_ref())
    .await?;

    tracing::info!(user_id = %user.user_id, "User updated");

    Ok(HttpResponse::Ok().json(UserResponse {
        id: row.0.to_string(),
        email: row.1,
        created_at: row.2.to_rfc3339(),
        updated_at: row.3.to_rfc3339(),
    }))
}

/// GET /api/me
///
/// Return the authenticated user's record.
pub async fn get_current_user(
    user: web::ReqData<AuthenticatedUser>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let row = sqlx::query_as::<_, (Uuid, String, chrono::DateTime<Utc>, chrono::DateTime<Utc>)>(
        "SELECT id, email, created_at, updated_at FROM users WHERE id = $1",
    )
    .bind(user.user_id)
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: row.0.to_string(),
        email: row.1,
        created_at: row.2.to_rfc3339(),
        updated_at: row.3.to_rfc3339(),
    }))
}
