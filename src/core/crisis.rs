//! Crisis Text Classifier: free text → crisis level, types, resources
//!
//! Pipeline:
//! 1. Score every category table (sum of matched weights, match count)
//! 2. Primary type = highest score, first in table order on ties
//! 3. Two or more intensity amplifiers raise the level by one
//! 4. Any safety escalator forces EMERGENCY
//! 5. Attach safety resources for the final level

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::rules::{self, CATEGORY_RULES, DOMESTIC_VIOLENCE_MARKERS};
use crate::core::stats::round_to;
use crate::types::{CategoryScore, CrisisDetectionResult, CrisisLevel, CrisisType, ResourceKind};
use crate::{AMPLIFIER_MIN_MATCHES, CONFIDENCE_MATCH_NORM, CONFIDENCE_WEIGHT_NORM};

/// Rule-based crisis classifier; stateless, cheap to construct
#[derive(Debug, Default, Clone, Copy)]
pub struct CrisisClassifier;

impl CrisisClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one passage. Never fails; unusable input yields NONE.
    pub fn classify(&self, text: &str) -> CrisisDetectionResult {
        if text.trim().is_empty() {
            return CrisisDetectionResult::none();
        }

        let scores = self.score(text);
        let detected: Vec<&CategoryScore> = scores.iter().filter(|s| s.match_count > 0).collect();
        let escalators = rules::matched_escalators(text);
        let safety_risk = !escalators.is_empty();

        if detected.is_empty() && !safety_risk {
            return CrisisDetectionResult::none();
        }

        // strictly greater keeps the earliest category on ties
        let mut primary: Option<&CategoryScore> = None;
        for &s in &detected {
            if primary.map_or(true, |p| s.score > p.score) {
                primary = Some(s);
            }
        }

        let mut level = primary.map_or(CrisisLevel::Elevated, |p| p.base_level);
        let top_weight = primary.map_or(0, |p| p.score);

        if rules::amplifier_count(text) >= AMPLIFIER_MIN_MATCHES {
            level = level.step_up();
        }
        if safety_risk {
            level = level.raise(CrisisLevel::Emergency);
        }

        let all_types: Vec<CrisisType> = detected.iter().map(|s| s.crisis_type).collect();
        let primary_type = primary.map_or(CrisisType::EmotionalFlooding, |p| p.crisis_type);

        // category matches only; escalators and amplifiers move the level
        let total_matches: usize = detected.iter().map(|s| s.match_count).sum();
        let confidence = round_to(
            0.5 * (total_matches as f64 / CONFIDENCE_MATCH_NORM).min(1.0)
                + 0.5 * (f64::from(top_weight) / CONFIDENCE_WEIGHT_NORM).min(1.0),
            2,
        );

        let mut resources = Vec::new();
        if safety_risk || level == CrisisLevel::Emergency {
            resources.push(ResourceKind::SuicideAndCrisisLifeline.resource());
            resources.push(ResourceKind::CrisisTextLine.resource());
        }
        if all_types.contains(&CrisisType::EscalatedConflict) && DOMESTIC_VIOLENCE_MARKERS.is_match(text) {
            resources.push(ResourceKind::DomesticViolenceHotline.resource());
        }
        if level == CrisisLevel::Emergency {
            resources.push(ResourceKind::BehavioralHealthHelpline.resource());
        }

        if safety_risk {
            warn!(
                level = level.as_u8(),
                escalators = escalators.len(),
                "safety risk language detected"
            );
        } else {
            debug!(level = level.as_u8(), primary = %primary_type, types = all_types.len(), "crisis detected");
        }

        CrisisDetectionResult {
            is_crisis: level > CrisisLevel::None,
            level,
            primary_type: Some(primary_type),
            all_types,
            safety_risk,
            safety_resources: resources,
            confidence,
        }
    }

    /// Classify untyped input; anything that is not a string is NONE
    pub fn classify_value(&self, value: &Value) -> CrisisDetectionResult {
        match value {
            Value::String(text) => self.classify(text),
            _ => CrisisDetectionResult::none(),
        }
    }

    /// Per-category match breakdown, one entry per table in table order
    pub fn score(&self, text: &str) -> Vec<CategoryScore> {
        CATEGORY_RULES
            .iter()
            .map(|rule| {
                let mut score = 0;
                let mut match_count = 0;
                for p in &rule.patterns {
                    if p.regex.is_match(text) {
                        score += p.weight;
                        match_count += 1;
                    }
                }
                CategoryScore {
                    crisis_type: rule.crisis_type,
                    score,
                    match_count,
                    base_level: rule.base_level,
                }
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
