//! Failure categories for calls to the completion service.
//!
//! Each variant's `Display` is the message shown to the operator, so the categories
//! stay distinguishable on the console.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Authentication error: Please check your OpenAI API key. ({message})")]
    Authentication { message: String },

    #[error("Rate limit error: You have exceeded the API rate limit. Please try again later. ({message})")]
    RateLimit { message: String },

    #[error("API connection error: There was an issue connecting to the OpenAI API.")]
    Connection(#[source] reqwest::Error),

    #[error("Invalid request error: {0}")]
    InvalidRequest(String),

    #[error("An error occurred while contacting the completion API: {status} {message}")]
    Service { status: StatusCode, message: String },

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// OpenAI-style error envelope: `{"error": {"message": ..., "type": ..., "code": ...}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl AdvisorError {
    /// Classify a non-success HTTP response.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|e| e.error.message)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                let body = body.trim();
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("no details").to_string()
                } else {
                    body.to_string()
                }
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Authentication { message },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit { message },
            StatusCode::BAD_REQUEST
            | StatusCode::NOT_FOUND
            | StatusCode::CONFLICT
            | StatusCode::UNPROCESSABLE_ENTITY => Self::InvalidRequest(message),
            _ => Self::Service { status, message },
        }
    }
}

impl From<reqwest::Error> for AdvisorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Unexpected(format!("could not decode completion response: {e}"))
        } else if e.is_builder() {
            Self::InvalidRequest(e.to_string())
        } else if let Some(status) = e.status() {
            Self::from_status(status, "")
        } else {
            Self::Connection(e)
        }
    }
}
