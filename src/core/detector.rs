//! Pursue-withdraw detector: data source → classified result
//!
//! Degraded data never fails a call. Missing relationships, single
//! participants, inactive couples, thin data and data-source failures all
//! resolve to a neutral result carrying a [`ReasonCode`]. The only hard
//! error is a missing couple id.

use chrono::{NaiveDate, Utc};
use tracing::{debug, error, info};

use crate::core::aggregator::partner_activity;
use crate::core::config::DetectorConfig;
use crate::core::notes::clinical_notes;
use crate::core::pattern::PatternClassifier;
use crate::core::source::DataSource;
use crate::error::{ConfigError, DataSourceError, DetectionError};
use crate::MAX_WINDOW_DAYS;
use crate::types::{
    days_before, DataQuality, DateRange, PatternMetadata, PursueWithdrawResult, RawActivity, ReasonCode,
};

/// Label used for `user1` of the relationship
pub const PARTNER_A_LABEL: &str = "Partner A";
/// Label used for `user2` of the relationship
pub const PARTNER_B_LABEL: &str = "Partner B";

/// Detects pursue-withdraw cycles from a couple's recent engagement
#[derive(Debug, Clone, Default)]
pub struct PursueWithdrawDetector {
    classifier: PatternClassifier,
}

impl PursueWithdrawDetector {
    /// Detector with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector with a validated config
    pub fn try_new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: PatternClassifier::new(config),
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        self.classifier.config()
    }

    /// Requested window clamped into `min_data_points..=MAX_WINDOW_DAYS`
    pub fn effective_window(&self, window_days: u32) -> u32 {
        window_days
            .max(self.config().min_data_points)
            .min(MAX_WINDOW_DAYS.max(self.config().min_data_points))
    }

    /// Detect over the window ending today (UTC)
    pub async fn detect<S>(
        &self,
        source: &S,
        couple_id: &str,
        window_days: u32,
    ) -> Result<PursueWithdrawResult, DetectionError>
    where
        S: DataSource + ?Sized,
    {
        self.detect_at(source, couple_id, window_days, Utc::now().date_naive()).await
    }

    /// Detect over the window ending at `as_of`
    pub async fn detect_at<S>(
        &self,
        source: &S,
        couple_id: &str,
        window_days: u32,
        as_of: NaiveDate,
    ) -> Result<PursueWithdrawResult, DetectionError>
    where
        S: DataSource + ?Sized,
    {
        let couple_id = couple_id.trim();
        if couple_id.is_empty() {
            return Err(DetectionError::MissingCoupleId);
        }

        let window = self.effective_window(window_days);
        let range = DateRange::ending_at(as_of, window);
        let mid = days_before(as_of, window / 2);

        let mut metadata = PatternMetadata {
            couple_id: couple_id.to_string(),
            window_days: window,
            window_start: range.start,
            window_end: range.end,
            partner_a_data_points: 0,
            partner_b_data_points: 0,
            data_quality: DataQuality::Insufficient,
            alignment: self.config().alignment,
        };

        let relationship = match source.find_relationship(couple_id).await {
            Ok(Some(r)) => r,
            Ok(None) => return Ok(neutral(ReasonCode::R101_RELATIONSHIP_NOT_FOUND, None, metadata)),
            Err(e) => return Ok(source_failure(e, metadata)),
        };

        let Some(user2_id) = relationship.user2_id.clone() else {
            return Ok(neutral(ReasonCode::R102_SINGLE_PARTICIPANT, None, metadata));
        };
        if !relationship.is_active() {
            return Ok(neutral(ReasonCode::R103_RELATIONSHIP_INACTIVE, None, metadata));
        }
        let user1_id = relationship.user1_id;

        let (raw_a, raw_b) = tokio::join!(
            fetch_activity(source, &user1_id, &range),
            fetch_activity(source, &user2_id, &range),
        );
        let (raw_a, raw_b) = match (raw_a, raw_b) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => return Ok(source_failure(e, metadata)),
        };

        let a = partner_activity(&user1_id, PARTNER_A_LABEL, &raw_a);
        let b = partner_activity(&user2_id, PARTNER_B_LABEL, &raw_b);

        metadata.partner_a_data_points = a.series.len();
        metadata.partner_b_data_points = b.series.len();
        let total = a.series.len() + b.series.len();
        let required = 2 * self.config().min_data_points as usize;

        if total < required {
            let detail = format!("{} daily data points across both partners, need {}", total, required);
            return Ok(neutral(ReasonCode::R104_INSUFFICIENT_DATA, Some(detail), metadata));
        }

        metadata.data_quality = if total >= 2 * window as usize {
            DataQuality::Good
        } else {
            DataQuality::Limited
        };

        let analysis = self.classifier.classify(&a, &b, mid);
        let pursuer = analysis.pursuer().cloned();
        let withdrawer = analysis.withdrawer().cloned();

        let notes = clinical_notes(
            analysis.pattern_type,
            analysis.intensity,
            analysis.trend,
            pursuer.as_ref(),
            withdrawer.as_ref(),
            analysis.disparity,
        );

        info!(
            couple_id = %metadata.couple_id,
            pattern = %analysis.pattern_type,
            intensity = %analysis.intensity,
            trend = %analysis.trend,
            correlation = analysis.correlation,
            "pursue-withdraw analysis complete"
        );

        Ok(PursueWithdrawResult {
            pattern_detected: analysis.pattern_detected(),
            pattern_type: analysis.pattern_type,
            pursuer,
            withdrawer,
            correlation: analysis.correlation,
            engagement_disparity: analysis.disparity,
            intensity: analysis.intensity,
            trend: analysis.trend,
            reason: analysis.reason,
            clinical_notes: notes,
            metadata,
        })
    }
}

/// All four record kinds for one user, fetched concurrently
async fn fetch_activity<S>(source: &S, user_id: &str, range: &DateRange) -> Result<RawActivity, DataSourceError>
where
    S: DataSource + ?Sized,
{
    let (daily_logs, gratitude_dates, media_dates, assessment_dates) = tokio::try_join!(
        source.daily_logs(user_id, range),
        source.gratitude_entries(user_id, range),
        source.media_completions(user_id, range),
        source.assessment_completions(user_id, range),
    )?;

    Ok(RawActivity {
        daily_logs,
        gratitude_dates,
        media_dates,
        assessment_dates,
    })
}

fn neutral(reason: ReasonCode, detail: Option<String>, metadata: PatternMetadata) -> PursueWithdrawResult {
    debug!(couple_id = %metadata.couple_id, reason = %reason, "neutral pursue-withdraw result");
    PursueWithdrawResult::neutral(reason, detail, metadata)
}

fn source_failure(err: DataSourceError, metadata: PatternMetadata) -> PursueWithdrawResult {
    error!(couple_id = %metadata.couple_id, error = %err, "data source failed during pursue-withdraw detection");
    PursueWithdrawResult::neutral(ReasonCode::R105_DATA_SOURCE_ERROR, Some(err.to_string()), metadata)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::InMemoryDataSource;
    use crate::types::{Relationship, RelationshipStatus};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn test_effective_window_clamped() {
        let detector = PursueWithdrawDetector::new();
        assert_eq!(detector.effective_window(1), 7);
        assert_eq!(detector.effective_window(7), 7);
        assert_eq!(detector.effective_window(30), 30);
        assert_eq!(detector.effective_window(MAX_WINDOW_DAYS), MAX_WINDOW_DAYS);
        assert_eq!(detector.effective_window(u32::MAX), MAX_WINDOW_DAYS);
    }

    #[tokio::test]
    async fn test_huge_window_is_capped() {
        let source = InMemoryDataSource::new().with_relationship(Relationship::couple("c1", "u1", "u2"));
        let result = PursueWithdrawDetector::new()
            .detect_at(&source, "c1", u32::MAX, as_of())
            .await
            .unwrap();
        assert_eq!(result.reason, ReasonCode::R104_INSUFFICIENT_DATA);
        assert_eq!(result.metadata.window_days, MAX_WINDOW_DAYS);
        assert_eq!(result.metadata.window_end, as_of());
        assert_eq!(result.metadata.window_start, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[tokio::test]
    async fn test_window_at_earliest_date_saturates() {
        let source = InMemoryDataSource::new().with_relationship(Relationship::couple("c1", "u1", "u2"));
        let result = PursueWithdrawDetector::new()
            .detect_at(&source, "c1", 30, NaiveDate::MIN)
            .await
            .unwrap();
        assert_eq!(result.metadata.window_start, NaiveDate::MIN);
        assert_eq!(result.reason, ReasonCode::R104_INSUFFICIENT_DATA);
    }

    #[test]
    fn test_try_new_rejects_invalid() {
        let config = DetectorConfig {
            min_data_points: 0,
            ..DetectorConfig::default()
        };
        assert!(PursueWithdrawDetector::try_new(config).is_err());
    }

    #[tokio::test]
    async fn test_blank_couple_id_is_error() {
        let source = InMemoryDataSource::new();
        let detector = PursueWithdrawDetector::new();
        let err = detector.detect_at(&source, "  ", 14, as_of()).await.unwrap_err();
        assert_eq!(err, DetectionError::MissingCoupleId);
    }

    #[tokio::test]
    async fn test_unknown_couple_is_neutral() {
        let source = InMemoryDataSource::new();
        let result = PursueWithdrawDetector::new()
            .detect_at(&source, "missing", 3, as_of())
            .await
            .unwrap();
        assert!(!result.pattern_detected);
        assert_eq!(result.reason, ReasonCode::R101_RELATIONSHIP_NOT_FOUND);
        assert_eq!(result.metadata.window_days, 7);
        assert_eq!(result.metadata.data_quality, DataQuality::Insufficient);
    }

    #[tokio::test]
    async fn test_inactive_couple_is_neutral() {
        let mut relationship = Relationship::couple("c1", "u1", "u2");
        relationship.status = RelationshipStatus::Inactive;
        let source = InMemoryDataSource::new().with_relationship(relationship);
        let result = PursueWithdrawDetector::new()
            .detect_at(&source, "c1", 14, as_of())
            .await
            .unwrap();
        assert_eq!(result.reason, ReasonCode::R103_RELATIONSHIP_INACTIVE);
    }

    #[tokio::test]
    async fn test_no_activity_is_insufficient() {
        let source = InMemoryDataSource::new().with_relationship(Relationship::couple("c1", "u1", "u2"));
        let result = PursueWithdrawDetector::new()
            .detect_at(&source, "c1", 14, as_of())
            .await
            .unwrap();
        assert_eq!(result.reason, ReasonCode::R104_INSUFFICIENT_DATA);
        assert!(result.reason_text().contains("need 14"));
    }
}
