//! bondsignal: behavioral and textual risk detection for couples coaching
//!
//! Two sibling detectors turn raw client data into severity-classified risk
//! signals:
//! - crisis text classification (weighted rule tables + forced escalation)
//! - pursue-withdraw detection over a couple's daily engagement series
//!
//! Both are pure over their inputs. Data access is injected through
//! [`core::DataSource`]; alert delivery consumes [`types::RiskSignal`].

pub mod core;
pub mod error;
pub mod types;

pub use crate::core::{classify_crisis_text, classify_pursue_withdraw, CrisisClassifier, PursueWithdrawDetector};
pub use crate::error::{ConfigError, DataSourceError, DetectionError};

// =============================================================================
// ENGAGEMENT WEIGHTS [C] - composite daily score, clamped to 100
// =============================================================================

/// Any daily log recorded
pub const ENGAGEMENT_WEIGHT_LOG: f64 = 25.0;

/// Mood contributes its own value up to this cap
pub const ENGAGEMENT_MOOD_CAP: f64 = 10.0;

/// Journal contribution cap (~500 chars saturates)
pub const ENGAGEMENT_JOURNAL_CAP: f64 = 20.0;

/// Journal characters per engagement point
pub const JOURNAL_CHARS_PER_POINT: f64 = 25.0;

pub const ENGAGEMENT_WEIGHT_GRATITUDE: f64 = 15.0;
pub const ENGAGEMENT_WEIGHT_MEDIA: f64 = 15.0;
pub const ENGAGEMENT_WEIGHT_ASSESSMENT: f64 = 15.0;

/// Upper bound of the composite score
pub const ENGAGEMENT_MAX: f64 = 100.0;

// =============================================================================
// PATTERN THRESHOLDS [C]
// =============================================================================

/// Minimum effective window, and half the combined data points required
pub const MIN_DATA_POINTS: u32 = 7;

/// Window used when the caller has no preference
pub const DEFAULT_WINDOW_DAYS: u32 = 14;

/// Longest window a detection will look back over; larger requests are capped
pub const MAX_WINDOW_DAYS: u32 = 365;

/// Correlation below this flags pursue-withdraw
pub const CORRELATION_PURSUE_WITHDRAW: f64 = -0.4;

/// Correlation above this (with healthy means) is balanced-healthy
pub const CORRELATION_BALANCED: f64 = 0.3;

/// Both means below this is mutual avoidance
pub const LOW_ENGAGEMENT_MEAN: f64 = 20.0;

/// Both means above this counts as healthy engagement
pub const HEALTHY_ENGAGEMENT_MEAN: f64 = 40.0;

/// Disparity ratio thresholds (pursuer mean / withdrawer mean). Anything
/// below moderate is mild, ratios under 1.5 included.
pub const DISPARITY_MODERATE: f64 = 2.5;
pub const DISPARITY_SEVERE: f64 = 4.0;

/// Denominator floor for disparity ratios
pub const DISPARITY_FLOOR: f64 = 1.0;

/// Correlation needs at least this many aligned points, otherwise 0
pub const MIN_CORRELATION_POINTS: usize = 3;

/// Each half of the window needs this many points per partner for a trend
pub const MIN_TREND_POINTS: usize = 2;

/// Half-over-half correlation change that counts as a trend
pub const TREND_CORRELATION_DELTA: f64 = 0.15;

/// Half-over-half relative disparity change that counts as a trend
pub const TREND_DISPARITY_CHANGE: f64 = 0.2;

// =============================================================================
// CRISIS SCORING [C]
// =============================================================================

/// Amplifier matches needed to raise severity one level
pub const AMPLIFIER_MIN_MATCHES: usize = 2;

/// Match count at which the count half of confidence saturates
pub const CONFIDENCE_MATCH_NORM: f64 = 3.0;

/// Winning category weight at which the weight half of confidence saturates
pub const CONFIDENCE_WEIGHT_NORM: f64 = 6.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
