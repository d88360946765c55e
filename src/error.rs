// src/error.rs

//! Unified error handling for the notice board client.

use std::fmt;

use thiserror::Error;

/// Result type alias for notice board operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport failure, non-success status or unreadable response
    #[error("Network error{}: {message}", status_suffix(.status))]
    Network {
        status: Option<u16>,
        message: String,
    },

    /// Client-side validation or backend rejection of the payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// Mutation target no longer exists
    #[error("Notice not found: {0}")]
    NotFound(String),

    /// Export requested for an empty view
    #[error("No notices to export")]
    EmptyExport,

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network {
            status: error.status().map(|s| s.as_u16()),
            message: error.to_string(),
        }
    }
}

impl AppError {
    /// Create a network error without a status code.
    pub fn network(message: impl fmt::Display) -> Self {
        Self::Network {
            status: None,
            message: message.to_string(),
        }
    }

    /// Create a network error for a non-success HTTP status.
    pub fn http_status(status: u16, message: impl fmt::Display) -> Self {
        Self::Network {
            status: Some(status),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error for a notice ID.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
