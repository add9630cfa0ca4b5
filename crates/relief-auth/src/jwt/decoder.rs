//! Token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::de::DeserializeOwned;

use relief_core::config::AuthConfig;
use relief_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims};

/// Verifies access and refresh tokens against their own keys.
#[derive(Clone)]
pub struct JwtDecoder {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            access_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            validation,
        }
    }

    /// Verify an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        self.decode_with(token, &self.access_key)
    }

    /// Verify a refresh token.
    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        self.decode_with(token, &self.refresh_key)
    }

    fn decode_with<T: DeserializeOwned>(&self, token: &str, key: &DecodingKey) -> Result<T, AppError> {
        decode::<T>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::Base64(_)
                | jsonwebtoken::errors::ErrorKind::Json(_)
                | jsonwebtoken::errors::ErrorKind::Utf8(_) => {
                    AppError::authentication("Invalid token format")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use relief_core::error::ErrorKind;
    use relief_entity::user::UserRole;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config() -> AuthConfig {
        AuthConfig::with_secrets(
            "access-secret-access-secret-access-secret",
            "refresh-secret-refresh-secret-refresh-secret",
        )
    }

    fn access_claims(exp_offset: i64) -> AccessClaims {
        let now = Utc::now().timestamp();
        AccessClaims {
            sub: Uuid::new_v4(),
            username: "officer1".into(),
            role: UserRole::Officer,
            district: Some("Colombo".into()),
            iat: now,
            exp: now + exp_offset,
        }
    }

    #[test]
    fn test_access_round_trip() {
        let cfg = config();
        let claims = access_claims(600);
        let token = JwtEncoder::new(&cfg).encode_access(&claims).unwrap();

        let decoded = JwtDecoder::new(&cfg).decode_access_token(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expired_token_rejected() {
        let cfg = config();
        let token = JwtEncoder::new(&cfg)
            .encode_access(&access_claims(-3600))
            .unwrap();

        let err = JwtDecoder::new(&cfg).decode_access_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_keys_are_not_interchangeable() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let access = encoder.encode_access(&access_claims(600)).unwrap();
        assert!(decoder.decode_refresh_token(&access).is_err());

        let now = Utc::now().timestamp();
        let refresh = encoder
            .encode_refresh(&RefreshClaims {
                sub: Uuid::new_v4(),
                jti: Uuid::new_v4(),
                iat: now,
                exp: now + 600,
            })
            .unwrap();
        assert!(decoder.decode_access_token(&refresh).is_err());
    }

    #[test]
    fn test_garbage_is_authentication_error() {
        let err = JwtDecoder::new(&config())
            .decode_access_token("not-a-jwt")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
