/// Authentication module
///
/// Password hashing, access-token mint/verify, refresh-token
/// lifecycle, and Authorization-header extraction.

mod claims;
mod headers;
mod jwt;
mod password;
mod refresh_token;

pub use claims::Claims;
pub use claims::TOKEN_ISSUER;
pub use headers::get_api_key;
pub use headers::get_bearer_token;
pub use jwt::make_jwt;
pub use jwt::validate_jwt;
pub use password::hash_password;
pub use password::verify_password;
pub use refresh_token::create_refresh_token;
pub use refresh_token::delete_all_refresh_tokens;
pub use refresh_token::get_refresh_token;
pub use refresh_token::make_refresh_token;
pub use refresh_token::revoke_refresh_token;
pub use refresh_token::RefreshToken;
pub use refresh_token::REFRESH_TOKEN_LIFETIME_DAYS;
