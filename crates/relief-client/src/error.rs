//! Client error type.

use thiserror::Error;

/// Errors returned by [`crate::SessionStore`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with an error body.
    #[error("API error ({status}) {code}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code.
        code: String,
        /// Human-readable message.
        message: String,
    },

    /// The base URL or a path could not be joined.
    #[error("invalid URL: {0}")]
    Url(String),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Url(_) => None,
        }
    }

    /// Whether the API rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
