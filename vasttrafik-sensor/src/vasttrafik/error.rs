//! Journey planner client error types.

use std::fmt;

use crate::domain::DomainError;

/// Errors from the Västtrafik HTTP client.
#[derive(Debug)]
pub enum PlannerError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// API answered 200 but reported an error in the payload
    Provider { code: String, message: String },

    /// Response decoded but does not describe a usable result
    Invalid(DomainError),

    /// Rate limited by the API
    RateLimited,

    /// Access token rejected or expired
    Unauthorized,
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::Http(e) => write!(f, "HTTP error: {e}"),
            PlannerError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            PlannerError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            PlannerError::Provider { code, message } => {
                write!(f, "provider error {code}: {message}")
            }
            PlannerError::Invalid(e) => write!(f, "invalid response: {e}"),
            PlannerError::RateLimited => write!(f, "rate limited by Västtrafik API"),
            PlannerError::Unauthorized => write!(f, "unauthorized (invalid or expired token)"),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::Http(e) => Some(e),
            PlannerError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        PlannerError::Http(err)
    }
}
