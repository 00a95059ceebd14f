//! Reason codes for pattern detection outcomes

use serde::{Deserialize, Serialize};

/// Why a pursue-withdraw result came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R1xx: Neutral outcomes (no analysis performed)
    // =========================================================================
    /// No relationship with this id
    R101_RELATIONSHIP_NOT_FOUND,
    /// Relationship has only one participant
    R102_SINGLE_PARTICIPANT,
    /// Relationship is not active
    R103_RELATIONSHIP_INACTIVE,
    /// Combined data points below twice the minimum
    R104_INSUFFICIENT_DATA,
    /// Data source failed while fetching
    R105_DATA_SOURCE_ERROR,

    // =========================================================================
    // R2xx: Classified outcomes
    // =========================================================================
    /// Strong negative correlation between partners
    R201_PURSUE_WITHDRAW,
    /// Both partners below the low-engagement threshold
    R202_MUTUAL_AVOIDANCE,
    /// Positively correlated, both engaged
    R203_BALANCED_HEALTHY,
    /// No clear signal either way
    R204_BALANCED_AMBIGUOUS,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_RELATIONSHIP_NOT_FOUND => "R101_RELATIONSHIP_NOT_FOUND",
            Self::R102_SINGLE_PARTICIPANT => "R102_SINGLE_PARTICIPANT",
            Self::R103_RELATIONSHIP_INACTIVE => "R103_RELATIONSHIP_INACTIVE",
            Self::R104_INSUFFICIENT_DATA => "R104_INSUFFICIENT_DATA",
            Self::R105_DATA_SOURCE_ERROR => "R105_DATA_SOURCE_ERROR",
            Self::R201_PURSUE_WITHDRAW => "R201_PURSUE_WITHDRAW",
            Self::R202_MUTUAL_AVOIDANCE => "R202_MUTUAL_AVOIDANCE",
            Self::R203_BALANCED_HEALTHY => "R203_BALANCED_HEALTHY",
            Self::R204_BALANCED_AMBIGUOUS => "R204_BALANCED_AMBIGUOUS",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_RELATIONSHIP_NOT_FOUND => "Relationship not found",
            Self::R102_SINGLE_PARTICIPANT => "Not a couple relationship (single user)",
            Self::R103_RELATIONSHIP_INACTIVE => "Relationship is not active",
            Self::R104_INSUFFICIENT_DATA => "Insufficient data for reliable detection",
            Self::R105_DATA_SOURCE_ERROR => "Analysis error while fetching activity",
            Self::R201_PURSUE_WITHDRAW => "Pursue-withdraw cycle detected",
            Self::R202_MUTUAL_AVOIDANCE => "Both partners show low engagement",
            Self::R203_BALANCED_HEALTHY => "Balanced, mutually engaged",
            Self::R204_BALANCED_AMBIGUOUS => "No clear pattern in available data",
        }
    }

    /// True for outcomes where no analysis ran
    pub fn is_neutral(&self) -> bool {
        matches!(
            self,
            Self::R101_RELATIONSHIP_NOT_FOUND
                | Self::R102_SINGLE_PARTICIPANT
                | Self::R103_RELATIONSHIP_INACTIVE
                | Self::R104_INSUFFICIENT_DATA
                | Self::R105_DATA_SOURCE_ERROR
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
