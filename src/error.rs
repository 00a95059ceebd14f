//! Error types
//!
//! Only caller defects surface as [`DetectionError`]. Missing or degraded data
//! is never an error: detectors resolve it to a neutral result with a
//! [`crate::types::ReasonCode`].

use thiserror::Error;

/// Hard failures of a detection call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("couple id is required")]
    MissingCoupleId,
}

/// Failures reported by a [`crate::core::DataSource`] implementation.
#[derive(Error, Debug, Clone)]
pub enum DataSourceError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),
}

/// Problems loading or validating a [`crate::core::DetectorConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(DetectionError::MissingCoupleId.to_string(), "couple id is required");

        let err = DataSourceError::Query("timeout".into());
        assert!(err.to_string().contains("timeout"));

        let err = ConfigError::Invalid { field: "severe_ratio", message: "must be >= 1".into() };
        assert!(err.to_string().contains("severe_ratio"));
    }
}
