//! Crisis classification result types

use serde::{Deserialize, Serialize};

use crate::types::CrisisLevel;

/// Crisis categories the text classifier recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrisisType {
    AffairDiscovery,
    SeparationThreat,
    EscalatedConflict,
    EmotionalFlooding,
    BetrayalTrauma,
}

impl CrisisType {
    /// Wire code, e.g. `AFFAIR_DISCOVERY`
    pub fn code(&self) -> &'static str {
        match self {
            CrisisType::AffairDiscovery => "AFFAIR_DISCOVERY",
            CrisisType::SeparationThreat => "SEPARATION_THREAT",
            CrisisType::EscalatedConflict => "ESCALATED_CONFLICT",
            CrisisType::EmotionalFlooding => "EMOTIONAL_FLOODING",
            CrisisType::BetrayalTrauma => "BETRAYAL_TRAUMA",
        }
    }

    /// Human-readable name for alert titles
    pub fn display_name(&self) -> &'static str {
        match self {
            CrisisType::AffairDiscovery => "Affair Discovery",
            CrisisType::SeparationThreat => "Separation Threat",
            CrisisType::EscalatedConflict => "Escalated Conflict",
            CrisisType::EmotionalFlooding => "Emotional Flooding",
            CrisisType::BetrayalTrauma => "Betrayal Trauma",
        }
    }
}

impl std::fmt::Display for CrisisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which hotline a [`SafetyResource`] points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    SuicideAndCrisisLifeline,
    CrisisTextLine,
    DomesticViolenceHotline,
    BehavioralHealthHelpline,
}

impl ResourceKind {
    /// Build the full resource entry
    pub fn resource(self) -> SafetyResource {
        let (name, contact, available, url) = match self {
            ResourceKind::SuicideAndCrisisLifeline => (
                "988 Suicide & Crisis Lifeline",
                "Call or text 988",
                "24/7",
                "https://988lifeline.org",
            ),
            ResourceKind::CrisisTextLine => (
                "Crisis Text Line",
                "Text HOME to 741741",
                "24/7",
                "https://www.crisistextline.org",
            ),
            ResourceKind::DomesticViolenceHotline => (
                "National Domestic Violence Hotline",
                "Call 1-800-799-7233 or text START to 88788",
                "24/7",
                "https://www.thehotline.org",
            ),
            ResourceKind::BehavioralHealthHelpline => (
                "SAMHSA National Helpline",
                "Call 1-800-662-4357",
                "24/7, free, confidential",
                "https://www.samhsa.gov/find-help/national-helpline",
            ),
        };

        SafetyResource {
            kind: self,
            name: name.to_string(),
            contact: contact.to_string(),
            available: available.to_string(),
            url: url.to_string(),
        }
    }
}

/// A crisis line or helpline attached to a detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyResource {
    pub kind: ResourceKind,
    pub name: String,
    pub contact: String,
    pub available: String,
    pub url: String,
}

/// Per-category rule match totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub crisis_type: CrisisType,
    /// Sum of matched pattern weights
    pub score: u32,
    /// Number of matched patterns
    pub match_count: usize,
    /// Category's base severity
    pub base_level: CrisisLevel,
}

/// Result of classifying one text passage
///
/// `is_crisis == (level > NONE)`; a NONE result has no types;
/// `safety_risk` implies EMERGENCY.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisDetectionResult {
    pub is_crisis: bool,
    pub level: CrisisLevel,
    pub primary_type: Option<CrisisType>,
    /// Every detected category, in rule-table order
    pub all_types: Vec<CrisisType>,
    pub safety_risk: bool,
    pub safety_resources: Vec<SafetyResource>,
    /// 0.0-1.0, two decimals
    pub confidence: f64,
}

impl CrisisDetectionResult {
    /// The no-crisis result
    pub fn none() -> Self {
        Self {
            is_crisis: false,
            level: CrisisLevel::None,
            primary_type: None,
            all_types: Vec::new(),
            safety_risk: false,
            safety_resources: Vec::new(),
            confidence: 0.0,
        }
    }

    /// Whether a resource of this kind was attached
    pub fn has_resource(&self, kind: ResourceKind) -> bool {
        self.safety_resources.iter().any(|r| r.kind == kind)
    }
}

impl Default for CrisisDetectionResult {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crisis_type_wire_format() {
        let json = serde_json::to_string(&CrisisType::AffairDiscovery).unwrap();
        assert_eq!(json, "\"AFFAIR_DISCOVERY\"");
        assert_eq!(CrisisType::EmotionalFlooding.to_string(), "EMOTIONAL_FLOODING");
    }

    #[test]
    fn test_none_result_shape() {
        let result = CrisisDetectionResult::none();
        assert!(!result.is_crisis);
        assert_eq!(result.level, CrisisLevel::None);
        assert!(result.primary_type.is_none());
        assert!(result.all_types.is_empty());
        assert!(result.safety_resources.is_empty());
    }

    #[test]
    fn test_lifeline_resource() {
        let resource = ResourceKind::SuicideAndCrisisLifeline.resource();
        assert!(resource.name.contains("988"));
        assert_eq!(resource.kind, ResourceKind::SuicideAndCrisisLifeline);
    }
}
