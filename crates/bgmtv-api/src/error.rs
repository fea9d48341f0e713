//! Error types for the bgm.tv API client.

use serde_json::Value;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors produced by `BangumiClient` operations.
///
/// The legacy bgm.tv API signals failures three different ways: the
/// transport can fail, the body can be unparseable, or a well-formed
/// payload can carry an `error` field. Each kind gets its own variant so
/// callers can discriminate by matching.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request path does not start with `/`. Raised before any I/O.
    #[error("invalid path {path:?}: must start with '/'")]
    InvalidPath {
        /// The offending path.
        path: String,
    },
    /// Client construction or URL assembly failed.
    #[error("configuration error: {0}")]
    Config(String),
    /// Network or socket failure (connect, send, or body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Response body is not valid JSON, or does not match the expected shape.
    #[error("failed to decode JSON response: {source} (body: {preview})")]
    Decode {
        /// Underlying deserialization error.
        source: serde_json::Error,
        /// Leading bytes of the response body, for diagnostics.
        preview: String,
    },
    /// Response parsed successfully but the payload carries an `error` field.
    #[error("API error: {message}")]
    Remote {
        /// Value of the `error` field, rendered as text.
        message: String,
        /// The full parsed response payload.
        payload: Value,
    },
}

impl ApiError {
    /// Returns the remote payload when the error came from the API itself.
    #[must_use]
    pub const fn remote_payload(&self) -> Option<&Value> {
        match self {
            Self::Remote { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_remote_error_display_uses_message() {
        // Arrange
        let payload: Value =
            serde_json::from_str(r#"{"request":"/collection/12","code":401,"error":"Unauthorized"}"#)
                .unwrap();

        // Act
        let err = ApiError::Remote {
            message: String::from("Unauthorized"),
            payload,
        };

        // Assert
        assert_eq!(err.to_string(), "API error: Unauthorized");
        assert_eq!(err.remote_payload().unwrap()["code"], 401);
    }

    #[test]
    fn test_remote_payload_is_none_for_other_kinds() {
        // Arrange & Act
        let err = ApiError::InvalidPath {
            path: String::from("calendar"),
        };

        // Assert
        assert!(err.remote_payload().is_none());
        assert!(err.to_string().contains("must start with '/'"));
    }
}
