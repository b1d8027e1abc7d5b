//! # Atlas Tooling Errors
//!
//! Error types shared across the Atlas migration tooling.
//!
//! - Uses `thiserror` for structured error definitions
//! - Named fields so messages stay readable when fields are added

use thiserror::Error;

/// Errors raised while populating the process environment from a dotenv
/// file.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("Environment file not found: {path}")]
    FileNotFound { path: String },

    #[error("Environment file {path} is malformed: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Failed to read environment file {path}: {reason}")]
    Io { path: String, reason: String }
}

/// Connectivity probe errors.
///
/// These never escape the prober; they are turned into a failure outcome
/// carrying [`ProbeError::to_string`] as the operator-facing message.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid connection string: {reason}")]
    InvalidConnectionString { reason: String },

    #[error("Connection to {backend} failed: {reason}")]
    ConnectionError { backend: String, reason: String }
}

impl ProbeError {
    pub fn connection(backend: impl Into<String>, reason: impl ToString) -> Self {
        Self::ConnectionError {
            backend: backend.into(),
            reason: reason.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_message_names_backend() {
        let err = ProbeError::connection("MongoDB", "server selection timeout");
        assert_eq!(
            err.to_string(),
            "Connection to MongoDB failed: server selection timeout"
        );
    }

    #[test]
    fn test_environment_error_messages() {
        let err = EnvironmentError::Malformed {
            path: ".env".to_string(),
            reason: "line 3".to_string()
        };
        assert_eq!(err.to_string(), "Environment file .env is malformed: line 3");

        let err = EnvironmentError::FileNotFound {
            path: "missing.env".to_string()
        };
        assert!(err.to_string().contains("missing.env"));
    }
}
