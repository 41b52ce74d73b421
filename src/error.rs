// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Error types for the Obsidian REST client.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias for
//! `std::result::Result<T, ObsidianError>`. HTTP error statuses are mapped by
//! [`from_status`] into one of three variants sharing the [`ApiError`]
//! payload:
//!
//! | Status | Variant |
//! |---|---|
//! | 401 | [`ObsidianError::Authentication`] |
//! | 404 | [`ObsidianError::NotFound`] |
//! | any other ≥ 400 | [`ObsidianError::Api`] |
//!
//! The remaining variants cover failures that never reached an HTTP status:
//! transport errors, undecodable success bodies, bad configuration and
//! requests that cannot be put on the wire.

use std::fmt;

use thiserror::Error;

/// Details of an error status returned by the REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code (always ≥ 400).
    pub status_code: u16,
    /// Server-supplied `message`, or the raw response body when there is none.
    pub message: String,
    /// Server-supplied numeric `errorCode`, when present.
    pub error_code: Option<i64>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status_code, self.message)?;
        if let Some(code) = self.error_code {
            write!(f, " (error code {code})")?;
        }
        Ok(())
    }
}

/// Error type for every client operation.
#[derive(Error, Debug)]
pub enum ObsidianError {
    /// 401: the API key is missing or wrong.
    #[error("Authentication failed: {0}")]
    Authentication(ApiError),

    /// 404: the note, file, command or active file does not exist.
    #[error("Not found: {0}")]
    NotFound(ApiError),

    /// Any other error status, including 5xx.
    #[error("API error: {0}")]
    Api(ApiError),

    /// An underlying HTTP / network transport error from `reqwest`.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response body did not match the expected shape.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client configuration is unusable (bad host, API key, scheme...).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The request could not be encoded (e.g. a header value with control
    /// characters). Nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request exceeded the configured timeout duration.
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

impl ObsidianError {
    /// The API error payload, for the three status-derived variants.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Authentication(e) | Self::NotFound(e) | Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status code, for the three status-derived variants.
    pub fn status_code(&self) -> Option<u16> {
        self.api_error().map(|e| e.status_code)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}

/// Crate-level result alias using [`ObsidianError`].
pub type Result<T> = std::result::Result<T, ObsidianError>;

/// Map an error status and its body text to the matching [`ObsidianError`].
///
/// The body is read as a JSON object carrying optional `message` and
/// `errorCode` fields. Anything else (plain text, HTML, a JSON array, an
/// empty body) becomes the message verbatim with no error code.
pub fn from_status(status: u16, body: &str) -> ObsidianError {
    let (message, error_code) = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(fields)) => {
            let message = fields
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| body.to_owned(), str::to_owned);
            let error_code = fields.get("errorCode").and_then(serde_json::Value::as_i64);
            (message, error_code)
        }
        _ => (body.to_owned(), None),
    };

    let error = ApiError {
        status_code: status,
        message,
        error_code,
    };

    match status {
        401 => ObsidianError::Authentication(error),
        404 => ObsidianError::NotFound(error),
        _ => ObsidianError::Api(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_maps_to_authentication() {
        let err = from_status(401, r#"{"message": "Unauthorized"}"#);
        assert!(err.is_authentication());
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.api_error().unwrap().message, "Unauthorized");
    }

    #[test]
    fn test_404_keeps_message() {
        let err = from_status(404, r#"{"message":"No daily note found"}"#);
        assert!(err.is_not_found());
        let api = err.api_error().unwrap();
        assert_eq!(api.status_code, 404);
        assert_eq!(api.message, "No daily note found");
        assert_eq!(api.error_code, None);
    }

    #[test]
    fn test_error_code_extracted() {
        let err = from_status(404, r#"{"message": "Not found", "errorCode": 40401}"#);
        assert_eq!(err.api_error().unwrap().error_code, Some(40401));
    }

    #[test]
    fn test_non_json_body_is_message() {
        let err = from_status(500, "Internal Server Error");
        match err {
            ObsidianError::Api(api) => {
                assert_eq!(api.status_code, 500);
                assert_eq!(api.message, "Internal Server Error");
                assert!(api.error_code.is_none());
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_json_without_message_falls_back_to_body() {
        let body = r#"{"errorCode": 50000}"#;
        let api = from_status(503, body).api_error().cloned().unwrap();
        assert_eq!(api.message, body);
        assert_eq!(api.error_code, Some(50000));
    }

    #[test]
    fn test_non_object_json_is_raw_text() {
        let api = from_status(400, "[1, 2]").api_error().cloned().unwrap();
        assert_eq!(api.message, "[1, 2]");
        assert!(api.error_code.is_none());
    }

    #[test]
    fn test_every_error_status_maps_to_one_variant() {
        for status in 400..600u16 {
            let err = from_status(status, "");
            let variant = match &err {
                ObsidianError::Authentication(_) => 401,
                ObsidianError::NotFound(_) => 404,
                ObsidianError::Api(_) => 0,
                other => panic!("unexpected variant {other:?}"),
            };
            match status {
                401 | 404 => assert_eq!(variant, status),
                _ => assert_eq!(variant, 0),
            }
            assert_eq!(err.status_code(), Some(status));
        }
    }

    #[test]
    fn test_display_appends_error_code_only_when_present() {
        let with_code = ApiError {
            status_code: 400,
            message: "Bad patch".into(),
            error_code: Some(40080),
        };
        assert_eq!(with_code.to_string(), "[400] Bad patch (error code 40080)");

        let without = ApiError {
            status_code: 500,
            message: "boom".into(),
            error_code: None,
        };
        assert_eq!(without.to_string(), "[500] boom");
        assert_eq!(
            ObsidianError::Api(without).to_string(),
            "API error: [500] boom"
        );
    }

    #[test]
    fn test_non_status_errors_have_no_api_payload() {
        let err = ObsidianError::Config("bad host".into());
        assert!(err.api_error().is_none());
        assert!(err.status_code().is_none());
    }
}
