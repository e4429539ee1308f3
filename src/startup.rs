use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;

use crate::configuration::Settings;
use crate::middleware::{AuthMiddleware, RequestLogger};
use crate::routes::{
    create_user, get_current_user, health_check, login, refresh, reset, revoke, update_user,
};

pub fn run(
    listener: TcpListener,
    connection: PgPool,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let connection = web::Data::new(connection);
    let auth_settings = web::Data::new(settings.auth.clone());
    let settings_data = web::Data::new(settings.clone());
    let jwt_secret = settings.auth.jwt_secret;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestLogger)
            .app_data(connection.clone())
            .app_data(auth_settings.clone())
            .app_data(settings_data.clone())
            // Public routes
            .route("/health_check", web::get().to(health_check))
            .route("/api/users", web::post().to(create_user))
            .route("/api/login", web::post().to(login))
            .route("/api/refresh", web::post().to(refresh))
            .route("/api/revoke", web::post().to(revoke))
            .route("/admin/reset", web::post().to(reset))
            // Protected routes (require a valid access token)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(jwt_secret.clone()))
                    .service(
                        web::resource("/me")
                            .route(web::get().to(get_current_user))
                            .route(web::put().to(update_user)),
                    ),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
