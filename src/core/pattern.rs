//! Pattern Classifier: two engagement series → pattern, intensity, trend
//!
//! Pure over its inputs. The detector does the fetching and hands in both
//! partners' activity plus the window midpoint.
//!
//! Decision order:
//! 1. correlation below the pursue-withdraw threshold → pursue-withdraw
//! 2. both means low → mutual avoidance
//! 3. positive correlation with both means healthy → balanced (healthy)
//! 4. anything else → balanced (ambiguous)

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::core::config::{Alignment, DetectorConfig};
use crate::core::stats::{mean, pearson_correlation, round_to, sample_variance};
use crate::types::{
    EngagementSeries, Intensity, PartnerActivity, PartnerProfile, PartnerRole, PatternType,
    ReasonCode, Trend,
};
use crate::{DISPARITY_FLOOR, MIN_TREND_POINTS};

/// Everything the classifier concluded about one couple
#[derive(Debug, Clone, PartialEq)]
pub struct PatternAnalysis {
    pub pattern_type: PatternType,
    pub reason: ReasonCode,
    /// Three decimals
    pub correlation: f64,
    /// Two decimals; 1.0 unless pursue-withdraw
    pub disparity: f64,
    pub intensity: Intensity,
    pub trend: Trend,
    pub partner_a: PartnerProfile,
    pub partner_b: PartnerProfile,
}

impl PatternAnalysis {
    /// Only a pursue-withdraw pattern has a pursuer
    pub fn pursuer(&self) -> Option<&PartnerProfile> {
        if self.pattern_type != PatternType::PursueWithdraw {
            return None;
        }
        self.with_role(PartnerRole::Pursuer)
    }

    /// Only a pursue-withdraw pattern has a withdrawer; mutual avoidance
    /// marks both partners withdrawn but names neither
    pub fn withdrawer(&self) -> Option<&PartnerProfile> {
        if self.pattern_type != PatternType::PursueWithdraw {
            return None;
        }
        self.with_role(PartnerRole::Withdrawer)
    }

    fn with_role(&self, role: PartnerRole) -> Option<&PartnerProfile> {
        [&self.partner_a, &self.partner_b].into_iter().find(|p| p.role == role)
    }

    pub fn pattern_detected(&self) -> bool {
        matches!(self.pattern_type, PatternType::PursueWithdraw | PatternType::MutualAvoidance)
    }
}

/// Pursue-withdraw classifier over precomputed series
#[derive(Debug, Clone, Default)]
pub struct PatternClassifier {
    config: DetectorConfig,
}

impl PatternClassifier {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Profile with role still unassigned (balanced)
    pub fn profile(&self, partner: &PartnerActivity) -> PartnerProfile {
        let scores = partner.series.scores();
        let active_days = partner.series.len();
        let log_frequency = if active_days > 0 {
            round_to(partner.totals.log_count as f64 / active_days as f64, 2)
        } else {
            0.0
        };

        PartnerProfile {
            user_id: partner.user_id.clone(),
            label: partner.label.clone(),
            role: PartnerRole::Balanced,
            engagement_score: round_to(mean(&scores), 1),
            activity_count: partner.totals.activity_count,
            engagement_variance: round_to(sample_variance(&scores), 1),
            avg_mood: partner.totals.avg_mood,
            log_frequency,
            avg_journal_length: partner.totals.avg_journal_length,
        }
    }

    /// Paired score vectors under the configured alignment
    pub fn aligned_scores(&self, a: &EngagementSeries, b: &EngagementSeries) -> (Vec<f64>, Vec<f64>) {
        match self.config.alignment {
            Alignment::Positional => (a.scores(), b.scores()),
            Alignment::ByDate => {
                let dates: BTreeSet<NaiveDate> =
                    a.points().iter().chain(b.points()).map(|p| p.date).collect();
                dates
                    .into_iter()
                    .map(|d| {
                        (
                            a.score_on(d).map_or(0.0, f64::from),
                            b.score_on(d).map_or(0.0, f64::from),
                        )
                    })
                    .unzip()
            }
        }
    }

    /// Correlation of two series under the configured alignment
    pub fn correlation(&self, a: &EngagementSeries, b: &EngagementSeries) -> f64 {
        let (xa, xb) = self.aligned_scores(a, b);
        pearson_correlation(&xa, &xb)
    }

    /// Pattern type and reason from correlation and raw means
    pub fn identify_pattern(&self, correlation: f64, mean_a: f64, mean_b: f64) -> (PatternType, ReasonCode) {
        let c = &self.config;
        if correlation < c.correlation_pursue_withdraw {
            return (PatternType::PursueWithdraw, ReasonCode::R201_PURSUE_WITHDRAW);
        }
        if mean_a < c.low_engagement_mean && mean_b < c.low_engagement_mean {
            return (PatternType::MutualAvoidance, ReasonCode::R202_MUTUAL_AVOIDANCE);
        }
        if correlation > c.correlation_balanced
            && mean_a > c.healthy_engagement_mean
            && mean_b > c.healthy_engagement_mean
        {
            return (PatternType::Balanced, ReasonCode::R203_BALANCED_HEALTHY);
        }
        (PatternType::Balanced, ReasonCode::R204_BALANCED_AMBIGUOUS)
    }

    /// Intensity for a pattern; disparity only matters for pursue-withdraw
    pub fn intensity(&self, pattern_type: PatternType, disparity: f64) -> Intensity {
        match pattern_type {
            PatternType::Balanced => Intensity::None,
            PatternType::MutualAvoidance => Intensity::Moderate,
            PatternType::PursueWithdraw => {
                if disparity >= self.config.disparity_severe {
                    Intensity::Severe
                } else if disparity >= self.config.disparity_moderate {
                    Intensity::Moderate
                } else {
                    Intensity::Mild
                }
            }
        }
    }

    /// Compare the halves before and from `mid`
    ///
    /// Stable unless both partners have enough points in both halves.
    pub fn trend(&self, a: &EngagementSeries, b: &EngagementSeries, mid: NaiveDate) -> Trend {
        let (first_a, second_a) = a.split_at_date(mid);
        let (first_b, second_b) = b.split_at_date(mid);

        if [&first_a, &second_a, &first_b, &second_b]
            .iter()
            .any(|half| half.len() < MIN_TREND_POINTS)
        {
            return Trend::Stable;
        }

        let first_corr = self.correlation(&first_a, &first_b);
        let second_corr = self.correlation(&second_a, &second_b);
        let first_disp = half_disparity(&first_a, &first_b);
        let second_disp = half_disparity(&second_a, &second_b);

        let delta = self.config.trend_correlation_delta;
        let change = self.config.trend_disparity_change;

        if second_corr < first_corr - delta || second_disp > first_disp * (1.0 + change) {
            Trend::Intensifying
        } else if second_corr > first_corr + delta || second_disp < first_disp * (1.0 - change) {
            Trend::Improving
        } else {
            Trend::Stable
        }
    }

    /// Full classification of one couple
    pub fn classify(&self, a: &PartnerActivity, b: &PartnerActivity, mid: NaiveDate) -> PatternAnalysis {
        let mut partner_a = self.profile(a);
        let mut partner_b = self.profile(b);

        let mean_a = mean(&a.series.scores());
        let mean_b = mean(&b.series.scores());
        let correlation = self.correlation(&a.series, &b.series);

        let (pattern_type, reason) = self.identify_pattern(correlation, mean_a, mean_b);

        let mut disparity = 1.0;
        match pattern_type {
            PatternType::PursueWithdraw => {
                let (pursuer_mean, withdrawer_mean) = if mean_a >= mean_b {
                    partner_a.role = PartnerRole::Pursuer;
                    partner_b.role = PartnerRole::Withdrawer;
                    (mean_a, mean_b)
                } else {
                    partner_b.role = PartnerRole::Pursuer;
                    partner_a.role = PartnerRole::Withdrawer;
                    (mean_b, mean_a)
                };
                disparity = pursuer_mean / withdrawer_mean.max(DISPARITY_FLOOR);
            }
            PatternType::MutualAvoidance => {
                partner_a.role = PartnerRole::Withdrawer;
                partner_b.role = PartnerRole::Withdrawer;
            }
            PatternType::Balanced => {}
        }

        let intensity = self.intensity(pattern_type, disparity);
        let trend = self.trend(&a.series, &b.series, mid);

        PatternAnalysis {
            pattern_type,
            reason,
            correlation: round_to(correlation, 3),
            disparity: round_to(disparity, 2),
            intensity,
            trend,
            partner_a,
            partner_b,
        }
    }
}

fn half_disparity(a: &EngagementSeries, b: &EngagementSeries) -> f64 {
    let ma = mean(&a.scores());
    let mb = mean(&b.scores());
    ma.max(mb) / ma.min(mb).max(DISPARITY_FLOOR)
}

// =============================================================================
// TESTS
// =============================================================================
