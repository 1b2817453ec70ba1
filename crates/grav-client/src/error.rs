//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to a Gravibase deployment.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a status outside the accepted set.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A bearer token is required but `authenticate` has not succeeded.
    #[error("not authenticated: call authenticate first")]
    NotAuthenticated,
}

impl ClientError {
    /// HTTP status for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The API answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
