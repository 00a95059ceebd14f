//! Core engines for bondsignal

pub mod aggregator;
pub mod config;
pub mod crisis;
pub mod detector;
pub mod notes;
pub mod pattern;
pub mod rules;
pub mod source;
pub mod stats;

pub use aggregator::{activity_totals, build_series, compute_daily_engagement, fold_activity, partner_activity};
pub use config::{Alignment, DetectorConfig};
pub use crisis::CrisisClassifier;
pub use detector::{PursueWithdrawDetector, PARTNER_A_LABEL, PARTNER_B_LABEL};
pub use pattern::{PatternAnalysis, PatternClassifier};
pub use source::{DataSource, InMemoryDataSource};
pub use stats::pearson_correlation;

use crate::error::DetectionError;
use crate::types::{CrisisDetectionResult, PursueWithdrawResult};

/// Classify one text passage with the default rule tables
pub fn classify_crisis_text(text: &str) -> CrisisDetectionResult {
    CrisisClassifier::new().classify(text)
}

/// Run pursue-withdraw detection with default thresholds
///
/// `couple_id` of `None` is the same caller error as a blank id.
/// `window_days` of `None` uses [`crate::DEFAULT_WINDOW_DAYS`].
pub async fn classify_pursue_withdraw<S>(
    source: &S,
    couple_id: Option<&str>,
    window_days: Option<u32>,
) -> Result<PursueWithdrawResult, DetectionError>
where
    S: DataSource + ?Sized,
{
    let couple_id = couple_id.ok_or(DetectionError::MissingCoupleId)?;
    PursueWithdrawDetector::new()
        .detect(source, couple_id, window_days.unwrap_or(crate::DEFAULT_WINDOW_DAYS))
        .await
}
