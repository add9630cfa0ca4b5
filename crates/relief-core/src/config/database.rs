//! `[database]` section.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Postgres connection and pool sizing.
///
/// Only `url` is required; the pool settings default to values that suit a
/// single district office deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a free connection before failing the request.
    pub connect_timeout_seconds: u64,
    /// Seconds before an unused connection is closed.
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 300,
        }
    }
}

impl DatabaseConfig {
    /// Default pool settings pointed at `url`.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.url.trim().is_empty() {
            return Err(AppError::configuration("database.url must be set"));
        }
        if self.min_connections > self.max_connections {
            return Err(AppError::configuration(
                "database.min_connections cannot exceed database.max_connections",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_is_required() {
        assert!(DatabaseConfig::default().validate().is_err());
        assert!(DatabaseConfig::with_url("postgres://localhost/relief").validate().is_ok());
    }

    #[test]
    fn test_pool_bounds_checked() {
        let mut cfg = DatabaseConfig::with_url("postgres://localhost/relief");
        cfg.min_connections = 20;
        assert!(cfg.validate().is_err());
    }
}
