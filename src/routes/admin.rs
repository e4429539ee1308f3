/// Administrative routes. The reset endpoint wipes users (refresh
/// tokens cascade with them) and exists for local development only;
/// any platform other than "dev" gets a 403.

use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::delete_all_refresh_tokens;
use crate::configuration::Settings;
use crate::error::AppError;

/// POST /admin/reset
pub async fn reset(
    pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    if settings.application.platform != "dev" {
        tracing::warn!(
            platform = %settings.application.platform,
            "Reset attempted outside dev environment"
        );
        return Ok(HttpResponse::Forbidden().body("You can only reset on dev environment."));
    }

    delete_all_refresh_tokens(pool.get_ref()).await?;
    sqlx::query("DELETE FROM users").execute(pool.get_ref()).await?;

    tracing::info!("Development reset: all users and refresh tokens deleted");

    Ok(HttpResponse::Ok().body("OK"))
}
