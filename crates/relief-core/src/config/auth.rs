//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum length accepted for either token signing secret.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Authentication and credential configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for access tokens.
    pub access_token_secret: String,
    /// HMAC secret for refresh tokens. Must differ from the access secret.
    pub refresh_token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Name of the HTTP-only cookie carrying the refresh token.
    #[serde(default = "default_cookie_name")]
    pub refresh_cookie_name: String,
    /// Whether the refresh cookie is marked `Secure`.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .field("refresh_cookie_name", &self.refresh_cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("password_min_length", &self.password_min_length)
            .finish()
    }
}

impl AuthConfig {
    /// Build a configuration from two secrets, every other field defaulted.
    pub fn with_secrets(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access_token_secret: access.into(),
            refresh_token_secret: refresh.into(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            refresh_cookie_name: default_cookie_name(),
            cookie_secure: true,
            password_min_length: default_password_min(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
        }
    }

    /// Check the signing secrets.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_token_secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.access_token_secret must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }
        if self.refresh_token_secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_secret must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }
        if self.access_token_secret == self.refresh_token_secret {
            return Err(AppError::configuration(
                "auth.access_token_secret and auth.refresh_token_secret must differ",
            ));
        }
        if self.access_ttl_minutes == 0 || self.refresh_ttl_days == 0 {
            return Err(AppError::configuration("token TTLs must be positive"));
        }
        Ok(())
    }

    /// Refresh token lifetime in seconds.
    pub fn refresh_ttl_seconds(&self) -> i64 {
        (self.refresh_ttl_days * 24 * 60 * 60) as i64
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_cookie_name() -> String {
    "jwt".to_string()
}

fn default_true() -> bool {
    true
}

fn default_password_min() -> usize {
    8
}

fn default_argon2_memory() -> u32 {
    19_456
}

fn default_argon2_iterations() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS: &str = "access-secret-access-secret-access-secret";
    const REFRESH: &str = "refresh-secret-refresh-secret-refresh-secret";

    #[test]
    fn test_valid_secrets() {
        assert!(AuthConfig::with_secrets(ACCESS, REFRESH).validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let err = AuthConfig::with_secrets("short", REFRESH)
            .validate()
            .unwrap_err();
        assert!(err.message.contains("access_token_secret"));
    }

    #[test]
    fn test_identical_secrets_rejected() {
        assert!(AuthConfig::with_secrets(ACCESS, ACCESS).validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", AuthConfig::with_secrets(ACCESS, REFRESH));
        assert!(!rendered.contains(ACCESS));
        assert!(rendered.contains("<redacted>"));
    }
}
