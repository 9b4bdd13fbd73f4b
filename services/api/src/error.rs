//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service.

use crate::config::ConfigError;
use daily_fortune_core::{FortuneError, PortError};

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the storage adapters.
    #[error("Storage Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a rejected store operation, e.g. a second fortune on one day.
    #[error("Fortune Error: {0}")]
    Fortune(#[from] FortuneError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_errors_convert_with_their_message() {
        let err: ApiError = PortError::Corrupt("user_data.json: EOF".to_string()).into();
        assert!(matches!(err, ApiError::Port(PortError::Corrupt(_))));
        assert!(err.to_string().starts_with("Storage Port Error: "));
        assert!(err.to_string().contains("user_data.json: EOF"));
    }
}
