//! Error handling for the KPI Game client.
//!
//! Transport, decoding, configuration and session-storage failures.
//! Domain rejections from the campaign API (`ok != "true"`) are not errors;
//! they travel as [`crate::models::AuthOutcome`] values.

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KpiGameError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Session store error at {path}: {reason}")]
    SessionStore { path: PathBuf, reason: String },

    #[error("Invalid date range: {reason}")]
    InvalidDateRange { reason: String },

    #[error("Invalid input: {}", summarize(.errors))]
    Validation { errors: BTreeMap<String, String> },
}

impl KpiGameError {
    /// Create an API error from a status code and response body
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a session store error
    pub fn session_store(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SessionStore {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid date range error
    pub fn invalid_date_range(reason: impl Into<String>) -> Self {
        Self::InvalidDateRange {
            reason: reason.into(),
        }
    }

    /// True for failures on the way to or from the remote API
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            KpiGameError::Transport(_) | KpiGameError::Api { .. } | KpiGameError::Json(_)
        )
    }
}

fn summarize(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, KpiGameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transport() {
        assert!(KpiGameError::api(500, "boom").is_transport());
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(KpiGameError::from(json_err).is_transport());

        assert!(!KpiGameError::configuration("missing api key").is_transport());
        assert!(!KpiGameError::invalid_date_range("start after end").is_transport());
    }

    #[test]
    fn test_validation_display_lists_fields() {
        let mut errors = BTreeMap::new();
        errors.insert("email".to_string(), "Email inválido".to_string());
        errors.insert("password".to_string(), "Campo requerido".to_string());

        let err = KpiGameError::Validation { errors };
        assert_eq!(
            err.to_string(),
            "Invalid input: email: Email inválido; password: Campo requerido"
        );
    }
}
