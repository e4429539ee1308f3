/// Middleware module
///
/// Authentication guard and request logging.

mod auth_middleware;
mod request_logger;

pub use auth_middleware::AuthMiddleware;
pub use auth_middleware::AuthenticatedUser;
pub use request_logger::RequestLogger;
