/// Credential Extractor
///
/// Pulls authentication material out of the `Authorization` header.
/// Two schemes exist: `Bearer` for user sessions (access or refresh
/// tokens) and `ApiKey` for the billing-webhook caller. The header is
/// always a single two-token string; comma-lists and multiple schemes
/// are not supported.

use actix_web::http::header::HeaderMap;

use crate::error::{AppError, InputError};

/// Extract the value of `Authorization: Bearer <token>`.
pub fn get_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    get_scheme_value(headers, "Bearer")
}

/// Extract the value of `Authorization: ApiKey <key>`.
pub fn get_api_key(headers: &HeaderMap) -> Result<String, AppError> {
    get_scheme_value(headers, "ApiKey")
}

fn get_scheme_value(headers: &HeaderMap, scheme: &str) -> Result<String, AppError> {
    let authorization = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if authorization.is_empty() {
        return Err(AppError::Input(InputError::MissingAuthorization));
    }

    // Scheme keyword is case-sensitive, separator is a single space.
    match authorization.split_once(' ') {
        Some((found_scheme, value)) if found_scheme == scheme && !value.is_empty() => {
            Ok(value.to_string())
        }
        _ => Err(AppError::Input(InputError::MalformedAuthorization)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers_with_authorization("Bearer abc123");
        assert_eq!(get_bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn missing_header_is_missing() {
        let headers = HeaderMap::new();
        assert!(matches!(
            get_bearer_token(&headers),
            Err(AppError::Input(InputError::MissingAuthorization))
        ));
    }

    #[test]
    fn empty_header_is_missing() {
        let headers = headers_with_authorization("");
        assert!(matches!(
            get_bearer_token(&headers),
            Err(AppError::Input(InputError::MissingAuthorization))
        ));
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        let headers = headers_with_authorization("Basic abc123");
        assert!(matches!(
            get_bearer_token(&headers),
            Err(AppError::Input(InputError::MalformedAuthorization))
        ));
    }

    #[test]
    fn scheme_keyword_is_case_sensitive() {
        let headers = headers_with_authorization("bearer abc123");
        assert!(get_bearer_token(&headers).is_err());
    }

    #[test]
    fn scheme_without_value_is_malformed() {
        for raw in ["Bearer", "Bearer ", "BearerToken"] {
            let headers = headers_with_authorization(raw);
            assert!(
                get_bearer_token(&headers).is_err(),
                "should reject {:?}",
                raw
            );
        }
    }

    #[test]
    fn api_key_is_extracted() {
        let headers = headers_with_authorization("ApiKey f271c81ff7084ee5b99a5091b42d486e");
        assert_eq!(
            get_api_key(&headers).unwrap(),
            "f271c81ff7084ee5b99a5091b42d486e"
        );
    }

    #[test]
    fn api_key_rejects_bearer_scheme() {
        let headers = headers_with_authorization("Bearer abc123");
        assert!(matches!(
            get_api_key(&headers),
            Err(AppError::Input(InputError::MalformedAuthorization))
        ));
    }
}
