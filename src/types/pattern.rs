//! Pursue-withdraw detection result types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::ReasonCode;

/// Relational pattern between two partners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternType {
    PursueWithdraw,
    MutualAvoidance,
    Balanced,
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PatternType::PursueWithdraw => "pursue-withdraw",
            PatternType::MutualAvoidance => "mutual-avoidance",
            PatternType::Balanced => "balanced",
        };
        write!(f, "{}", name)
    }
}

/// How pronounced the pattern is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Intensity::None => "none",
            Intensity::Mild => "mild",
            Intensity::Moderate => "moderate",
            Intensity::Severe => "severe",
        };
        write!(f, "{}", name)
    }
}

/// Direction of change between the two halves of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Intensifying,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Intensifying => "intensifying",
        };
        write!(f, "{}", name)
    }
}

/// A partner's position in the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerRole {
    Pursuer,
    Withdrawer,
    Balanced,
}

/// Summary of one partner's engagement over the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerProfile {
    pub user_id: String,
    /// "Partner A" / "Partner B"; never a real name
    pub label: String,
    pub role: PartnerRole,
    /// Mean daily composite score
    pub engagement_score: f64,
    pub activity_count: usize,
    /// Sample variance of daily scores (high = reactive)
    pub engagement_variance: f64,
    pub avg_mood: f64,
    /// Daily logs per active day
    pub log_frequency: f64,
    pub avg_journal_length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    Good,
    Limited,
    Insufficient,
}

/// How two partners' daily scores are paired for correlation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// i-th active day of A against i-th active day of B, truncated to the
    /// shorter series
    #[default]
    Positional,
    /// Union of calendar dates; a day missing for one partner scores 0
    ByDate,
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alignment::Positional => write!(f, "positional"),
            Alignment::ByDate => write!(f, "by-date"),
        }
    }
}

/// Window and data coverage behind a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMetadata {
    pub couple_id: String,
    /// Effective (clamped) window
    pub window_days: u32,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub partner_a_data_points: usize,
    pub partner_b_data_points: usize,
    pub data_quality: DataQuality,
    pub alignment: Alignment,
}

/// Therapist-facing narrative; a hypothesis, never a label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalNotes {
    pub pattern_description: String,
    pub theoretical_context: String,
    pub clinical_implications: Vec<String>,
    pub suggested_interventions: Vec<String>,
    pub caveats: Vec<String>,
}

/// Result of one pursue-withdraw detection call
///
/// `pursuer` and `withdrawer` are set exactly when `pattern_type` is
/// pursue-withdraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PursueWithdrawResult {
    pub pattern_detected: bool,
    pub pattern_type: PatternType,
    pub pursuer: Option<PartnerProfile>,
    pub withdrawer: Option<PartnerProfile>,
    /// -1.0..1.0, three decimals
    pub correlation: f64,
    /// Pursuer mean / withdrawer mean, two decimals; 1.0 when not pursue-withdraw
    pub engagement_disparity: f64,
    pub intensity: Intensity,
    pub trend: Trend,
    pub reason: ReasonCode,
    pub clinical_notes: ClinicalNotes,
    pub metadata: PatternMetadata,
}

impl PursueWithdrawResult {
    /// Neutral "no pattern" result for degraded data
    pub fn neutral(reason: ReasonCode, detail: Option<String>, metadata: PatternMetadata) -> Self {
        let description = match detail {
            Some(d) => format!("{}: {}", reason.description(), d),
            None => reason.description().to_string(),
        };

        Self {
            pattern_detected: false,
            pattern_type: PatternType::Balanced,
            pursuer: None,
            withdrawer: None,
            correlation: 0.0,
            engagement_disparity: 1.0,
            intensity: Intensity::None,
            trend: Trend::Stable,
            reason,
            clinical_notes: ClinicalNotes {
                pattern_description: description.clone(),
                caveats: vec![description],
                ..ClinicalNotes::default()
            },
            metadata,
        }
    }

    /// Human-readable reason text
    pub fn reason_text(&self) -> &str {
        &self.clinical_notes.pattern_description
    }
}
