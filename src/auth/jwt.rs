/// Access Token Codec
///
/// Mints and verifies the signed, time-bounded access tokens that
/// carry a user identity. Signing is symmetric (HS256 over a single
/// process-wide secret); rotating the secret invalidates every
/// outstanding access token at once.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::claims::{Claims, TOKEN_ISSUER};
use crate::error::{AppError, CredentialError};

/// Mint a signed access token for `user_id` that expires `ttl` from
/// now. The codec does not clamp `ttl`; session callers pass one hour.
pub fn make_jwt(user_id: Uuid, token_secret: &str, ttl: chrono::Duration) -> Result<String, AppError> {
    let claims = Claims::new(user_id, ttl);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(token_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token generation failed: {}", e)))
}

/// Verify `token` under `token_secret` and return the subject user ID.
///
/// Signature, expiry, issuer and subject are all checked; each failure
/// is equally terminal and maps to a 401-class response upstream.
pub fn validate_jwt(token: &str, token_secret: &str) -> Result<Uuid, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(token_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Credential(CredentialError::Expired)
        }
        _ => AppError::Credential(CredentialError::SignatureInvalid),
    })?;

    // Issuer is checked after decode so the rejected issuer can be
    // logged, like the subject check below.
    if data.claims.iss != TOKEN_ISSUER {
        tracing::warn!(issuer = %data.claims.iss, "Token presented with foreign issuer");
        return Err(AppError::Credential(CredentialError::WrongIssuer(
            data.claims.iss,
        )));
    }

    data.claims.user_id()
}
