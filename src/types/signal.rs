//! Risk result contract consumed by the alerting collaborator
//!
//! Detectors never deliver or persist anything. They hand back immutable
//! results, and these conversions map them onto alert severities:
//! - crisis level 1 → MEDIUM, 2 → HIGH, 3 → CRITICAL
//! - pursue-withdraw only when detected AND intensifying; severe → HIGH,
//!   otherwise MEDIUM

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::types::{CrisisDetectionResult, CrisisLevel, Intensity, PursueWithdrawResult, Trend};

/// Alert severity understood by the routing collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskKind {
    /// From the crisis text classifier
    Crisis,
    /// From behavioral pattern detection
    Risk,
}

/// One risk signal ready for alert routing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSignal {
    pub kind: RiskKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub summary: String,
    pub details: serde_json::Value,
}

impl AlertSeverity {
    /// Severity for a crisis level; NONE has no alert
    pub fn for_crisis_level(level: CrisisLevel) -> Option<AlertSeverity> {
        match level {
            CrisisLevel::None => None,
            CrisisLevel::Elevated => Some(AlertSeverity::Medium),
            CrisisLevel::Acute => Some(AlertSeverity::High),
            CrisisLevel::Emergency => Some(AlertSeverity::Critical),
        }
    }
}

impl CrisisDetectionResult {
    /// Map to an alert; `None` when there is no crisis
    pub fn to_risk_signal(&self) -> Option<RiskSignal> {
        let severity = AlertSeverity::for_crisis_level(self.level)?;
        let type_name = self
            .primary_type
            .map(|t| t.display_name())
            .unwrap_or("Unknown");

        let title = if self.safety_risk {
            format!("SAFETY RISK - Level {} Crisis Detected", self.level.as_u8())
        } else {
            format!("Crisis Detected - {} ({})", self.level.label(), type_name)
        };

        let mut summary = format!(
            "{} crisis indicators detected (confidence {:.0}%).",
            type_name,
            self.confidence * 100.0
        );
        if self.all_types.len() > 1 {
            let others: Vec<&str> = self
                .all_types
                .iter()
                .filter(|t| Some(**t) != self.primary_type)
                .map(|t| t.display_name())
                .collect();
            summary.push_str(&format!(" Also present: {}.", others.join(", ")));
        }
        if self.safety_risk {
            summary.push_str(" Safety language present; crisis resources were provided.");
        }

        Some(RiskSignal {
            kind: RiskKind::Crisis,
            severity,
            title,
            summary,
            details: json!({
                "crisis_level": self.level,
                "crisis_type": self.primary_type,
                "all_types": self.all_types,
                "safety_risk": self.safety_risk,
                "safety_resources": self.safety_resources,
                "confidence": self.confidence,
            }),
        })
    }
}

impl PursueWithdrawResult {
    /// Map to an alert; only a detected, intensifying pattern produces one
    pub fn to_risk_signal(&self) -> Option<RiskSignal> {
        if !self.pattern_detected || self.trend != Trend::Intensifying {
            return None;
        }

        let severity = if self.intensity == Intensity::Severe {
            AlertSeverity::High
        } else {
            AlertSeverity::Medium
        };

        let pursuer = self.pursuer.as_ref().map(|p| p.label.as_str()).unwrap_or("One partner");
        let withdrawer = self.withdrawer.as_ref().map(|p| p.label.as_str()).unwrap_or("the other");

        let summary = match self.pattern_type {
            crate::types::PatternType::MutualAvoidance => format!(
                "{} mutual avoidance detected and worsening. Both partners are withdrawing.",
                self.intensity
            ),
            _ => format!(
                "{} pursue-withdraw cycle detected and worsening. {} is pursuing while {} is withdrawing.",
                self.intensity, pursuer, withdrawer
            ),
        };

        Some(RiskSignal {
            kind: RiskKind::Risk,
            severity,
            title: "Pursue-Withdraw Pattern Intensifying".to_string(),
            summary,
            details: json!({
                "relationship_id": self.metadata.couple_id,
                "pattern_type": self.pattern_type,
                "intensity": self.intensity,
                "trend": self.trend,
                "pursuer": self.pursuer,
                "withdrawer": self.withdrawer,
                "window_days": self.metadata.window_days,
            }),
        })
    }
}
