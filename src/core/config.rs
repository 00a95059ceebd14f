//! Detector configuration
//!
//! Every field defaults to the constant of the same name in the crate root,
//! so an empty JSON object is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
pub use crate::types::Alignment;
use crate::{
    CORRELATION_BALANCED, CORRELATION_PURSUE_WITHDRAW, DEFAULT_WINDOW_DAYS, DISPARITY_MODERATE,
    DISPARITY_SEVERE, HEALTHY_ENGAGEMENT_MEAN, LOW_ENGAGEMENT_MEAN, MAX_WINDOW_DAYS, MIN_DATA_POINTS,
    TREND_CORRELATION_DELTA, TREND_DISPARITY_CHANGE,
};

/// Thresholds and options for pursue-withdraw detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub window_days: u32,
    pub min_data_points: u32,
    pub correlation_pursue_withdraw: f64,
    pub correlation_balanced: f64,
    pub low_engagement_mean: f64,
    pub healthy_engagement_mean: f64,
    pub disparity_moderate: f64,
    pub disparity_severe: f64,
    pub trend_correlation_delta: f64,
    pub trend_disparity_change: f64,
    pub alignment: Alignment,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            min_data_points: MIN_DATA_POINTS,
            correlation_pursue_withdraw: CORRELATION_PURSUE_WITHDRAW,
            correlation_balanced: CORRELATION_BALANCED,
            low_engagement_mean: LOW_ENGAGEMENT_MEAN,
            healthy_engagement_mean: HEALTHY_ENGAGEMENT_MEAN,
            disparity_moderate: DISPARITY_MODERATE,
            disparity_severe: DISPARITY_SEVERE,
            trend_correlation_delta: TREND_CORRELATION_DELTA,
            trend_disparity_change: TREND_DISPARITY_CHANGE,
            alignment: Alignment::Positional,
        }
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, message: message.into() }
}

impl DetectorConfig {
    /// Parse and validate
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DetectorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Check ranges and threshold ordering
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_data_points == 0 {
            return Err(invalid("min_data_points", "must be at least 1"));
        }
        if self.window_days == 0 {
            return Err(invalid("window_days", "must be at least 1"));
        }
        if self.window_days > MAX_WINDOW_DAYS {
            return Err(invalid("window_days", format!("must not exceed {}", MAX_WINDOW_DAYS)));
        }
        for (field, value) in [
            ("correlation_pursue_withdraw", self.correlation_pursue_withdraw),
            ("correlation_balanced", self.correlation_balanced),
        ] {
            if !(-1.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{} is outside -1..1", value)));
            }
        }
        if self.correlation_pursue_withdraw >= self.correlation_balanced {
            return Err(invalid(
                "correlation_pursue_withdraw",
                "must be below correlation_balanced",
            ));
        }
        if !(0.0..=100.0).contains(&self.low_engagement_mean)
            || !(0.0..=100.0).contains(&self.healthy_engagement_mean)
        {
            return Err(invalid("low_engagement_mean", "engagement means are on a 0-100 scale"));
        }
        if self.disparity_moderate < 1.0 {
            return Err(invalid("disparity_moderate", "must be >= 1"));
        }
        if self.disparity_severe <= self.disparity_moderate {
            return Err(invalid("disparity_severe", "must exceed disparity_moderate"));
        }
        if self.trend_correlation_delta <= 0.0 {
            return Err(invalid("trend_correlation_delta", "must be positive"));
        }
        if !(self.trend_disparity_change > 0.0 && self.trend_disparity_change < 1.0) {
            return Err(invalid("trend_disparity_change", "must be within (0, 1)"));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DetectorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_data_points, MIN_DATA_POINTS);
        assert_eq!(config.alignment, Alignment::Positional);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = DetectorConfig::from_json_str(r#"{"alignment": "by-date", "window_days": 21}"#).unwrap();
        assert_eq!(config.alignment, Alignment::ByDate);
        assert_eq!(config.window_days, 21);
        assert_eq!(config.disparity_severe, DISPARITY_SEVERE);
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(DetectorConfig::from_json_str("{}").unwrap(), DetectorConfig::default());
    }

    #[test]
    fn test_rejects_inverted_disparity() {
        let err = DetectorConfig::from_json_str(r#"{"disparity_severe": 2.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "disparity_severe", .. }));
    }

    #[test]
    fn test_rejects_oversize_window() {
        let err = DetectorConfig::from_json_str(r#"{"window_days": 4000}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "window_days", .. }));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = DetectorConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = DetectorConfig::load("/nonexistent/bondsignal.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
