/// Authentication Middleware
///
/// Per request: extract the bearer token, verify it, and attach the
/// authenticated principal to the request. Any failure at any step
/// short-circuits with a 401 response and the wrapped handler never
/// runs; authentication failure is never transient, so there are no
/// retries.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;
use uuid::Uuid;

use crate::auth::{get_bearer_token, validate_jwt};

/// The verified identity attached to a request after successful
/// authentication. Handlers take it as `web::ReqData<AuthenticatedUser>`
/// instead of digging through untyped extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Middleware guarding routes that require a valid access token.
pub struct AuthMiddleware {
    jwt_secret: String,
}

impl AuthMiddleware {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt_secret: self.jwt_secret.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt_secret: String,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = match get_bearer_token(req.headers()) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Missing or malformed Authorization header");
                let response = HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "You're not logged in.",
                    "code": "UNAUTHORIZED"
                }));
                return Box::pin(async move {
                    Err(actix_web::error::InternalError::from_response(
                        "Unauthorized",
                        response,
                    )
                    .into())
                });
            }
        };

        match validate_jwt(&token, &self.jwt_secret) {
            Ok(user_id) => {
                req.extensions_mut().insert(AuthenticatedUser { user_id });

                tracing::debug!(user_id = %user_id, "Access token validated");

                let service = self.service.clone();
                Box::pin(async move { service.call(req).await })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Access token validation failed");
                let response = HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "Invalid or expired token",
                    "code": "TOKEN_INVALID"
                }));
                Box::pin(async move {
                    Err(actix_web::error::InternalError::from_response(
                        "Invalid token",
                        response,
                    )
                    .into())
                })
            }
        }
    }
}
