//! API client errors.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Token cannot be sent as a header value")]
    InvalidToken,

    #[error("Cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Not authorized ({status}): check the API token")]
    Unauthorized { status: u16 },

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Maps a non-success status and its body to an error.
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        let code = status.as_u16();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Self::Unauthorized { status: code }
        } else if status.is_client_error() {
            Self::Rejected {
                status: code,
                message: error_message(&body),
            }
        } else {
            Self::Server { status: code, body }
        }
    }
}

/// Pulls a readable message out of a REST framework error body.
///
/// Handles `{"detail": "..."}`, field errors such as
/// `{"job_url": ["Enter a valid URL."]}`, bare lists, and falls back to the
/// raw body.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };
    match value {
        Value::Object(map) => {
            if let Some(Value::String(detail)) = map.get("detail") {
                return detail.clone();
            }
            let parts: Vec<String> = map
                .iter()
                .map(|(field, errors)| {
                    let text = flatten_messages(errors).join(" ");
                    if field == "non_field_errors" {
                        text
                    } else {
                        format!("{field}: {text}")
                    }
                })
                .collect();
            if parts.is_empty() {
                body.trim().to_string()
            } else {
                parts.join("; ")
            }
        }
        other => {
            let parts = flatten_messages(&other);
            if parts.is_empty() {
                body.trim().to_string()
            } else {
                parts.join(" ")
            }
        }
    }
}

fn flatten_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(flatten_messages).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_statuses() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = ApiError::from_status(status, String::new());
            assert!(matches!(err, ApiError::Unauthorized { .. }));
        }
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, String::new());
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_detail_message() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "resume_id is required."}"#.to_string(),
        );
        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "resume_id is required.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_field_errors() {
        let body = r#"{"non_field_errors": ["Provide a job URL or provide all manual fields."]}"#;
        assert_eq!(
            error_message(body),
            "Provide a job URL or provide all manual fields."
        );
    }

    #[test]
    fn test_field_errors() {
        let body = r#"{"job_url": ["Enter a valid URL."]}"#;
        assert_eq!(error_message(body), "job_url: Enter a valid URL.");
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(error_message("  Not Found\n"), "Not Found");
    }

    #[test]
    fn test_server_error_keeps_body() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        match err {
            ApiError::Server { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
