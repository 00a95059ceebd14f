//! Therapist-facing clinical notes
//!
//! Templated on (pattern type, intensity, trend). Notes frame the cycle as
//! the problem and stay a hypothesis; they never label either partner.

use crate::types::{ClinicalNotes, Intensity, PartnerProfile, PatternType, Trend};

const STANDARD_CAVEATS: [&str; 3] = [
    "Detection uses app engagement as a proxy for relationship dynamics, not a direct measure.",
    "Treat this as a hypothesis to explore in session, not a diagnostic conclusion.",
    "The cycle is the problem, not either partner. Avoid framing results as blame.",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn trend_implication(trend: Trend) -> &'static str {
    match trend {
        Trend::Intensifying => {
            "The cycle is intensifying. Without intervention, emotional distance and separation risk tend to grow."
        }
        Trend::Improving => "The cycle shows signs of easing. The couple may be finding ways to interrupt it.",
        Trend::Stable => "The cycle is stable, neither worsening nor easing. Intervention could shift it.",
    }
}

/// Build notes for a classified couple
pub fn clinical_notes(
    pattern_type: PatternType,
    intensity: Intensity,
    trend: Trend,
    pursuer: Option<&PartnerProfile>,
    withdrawer: Option<&PartnerProfile>,
    disparity: f64,
) -> ClinicalNotes {
    let caveats = strings(&STANDARD_CAVEATS);

    match pattern_type {
        PatternType::PursueWithdraw => {
            let pursuer_label = pursuer.map_or("One partner", |p| p.label.as_str());
            let pursuer_score = pursuer.map_or(0.0, |p| p.engagement_score);
            let withdrawer_label = withdrawer.map_or("the other", |p| p.label.as_str());
            let withdrawer_score = withdrawer.map_or(0.0, |p| p.engagement_score);

            ClinicalNotes {
                pattern_description: format!(
                    "A pursue-withdraw cycle is detected ({} intensity, {}). {} shows markedly higher \
                     engagement (score {:.0}) while {} shows minimal or declining engagement (score {:.0}). \
                     Engagement disparity is {:.1}:1.",
                    intensity,
                    trend,
                    pursuer_label,
                    pursuer_score,
                    withdrawer_label,
                    withdrawer_score,
                    disparity
                ),
                theoretical_context: "Pursue-withdraw is a core path in the distance and isolation cascade. \
                    In attachment terms the pursuer's activity reads as protest behavior, and the \
                    withdrawer's disengagement as deactivation under perceived criticism or overwhelm."
                    .to_string(),
                clinical_implications: vec![
                    "High engagement from the pursuing partner may be a bid for connection driven by attachment anxiety."
                        .to_string(),
                    "Low engagement from the withdrawing partner may signal overwhelm or shame rather than a lack of caring."
                        .to_string(),
                    trend_implication(trend).to_string(),
                ],
                suggested_interventions: strings(&[
                    "Help the pursuer voice the fear underneath the pursuit instead of protest.",
                    "Help the withdrawer voice the overwhelm underneath the silence instead of stonewalling.",
                    "Introduce structured turn-taking conversations with uninterrupted speaking time.",
                    "Explore each partner's attachment history and how it feeds the current cycle.",
                    "Suggest shared in-app activities that even out engagement.",
                ]),
                caveats,
            }
        }
        PatternType::MutualAvoidance => ClinicalNotes {
            pattern_description: format!(
                "Both partners show low engagement, suggesting mutual withdrawal ({}). \
                 Neither partner is actively pursuing connection through the platform.",
                trend
            ),
            theoretical_context: "Mutual withdrawal is the freeze-and-flee dialogue: both partners have \
                stopped protesting and retreated into self-protection. It carries a higher dissolution \
                risk than open conflict."
                .to_string(),
            clinical_implications: vec![
                "The absence of conflict may mask deep disconnection.".to_string(),
                "Both partners may have lost hope that their needs can be met.".to_string(),
                trend_implication(trend).to_string(),
            ],
            suggested_interventions: strings(&[
                "Create space for each partner to name the needs they have stopped voicing.",
                "Rebuild fondness and admiration with small, low-risk positive interactions.",
                "Assign one small shared activity per week to rebuild momentum.",
            ]),
            caveats,
        },
        PatternType::Balanced => ClinicalNotes {
            pattern_description:
                "Both partners show balanced engagement. No significant pursue-withdraw dynamic detected."
                    .to_string(),
            theoretical_context: "Balanced engagement is consistent with secure functioning: both \
                partners are accessible, responsive and engaged."
                .to_string(),
            clinical_implications: strings(&[
                "The couple is engaging with the program evenly, a positive indicator.",
                "Keep monitoring; balanced patterns can shift under stress.",
            ]),
            suggested_interventions: strings(&[
                "Acknowledge the couple's mutual investment.",
                "Use current engagement as a foundation for deeper work.",
            ]),
            caveats,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PartnerRole;

    fn profile(label: &str, score: f64, role: PartnerRole) -> PartnerProfile {
        PartnerProfile {
            user_id: label.to_string(),
            label: label.to_string(),
            role,
            engagement_score: score,
            activity_count: 10,
            engagement_variance: 0.0,
            avg_mood: 0.0,
            log_frequency: 1.0,
            avg_journal_length: 0.0,
        }
    }

    #[test]
    fn test_pursue_withdraw_names_labels_only() {
        let p = profile("Partner A", 96.5, PartnerRole::Pursuer);
        let w = profile("Partner B", 22.5, PartnerRole::Withdrawer);
        let notes = clinical_notes(
            PatternType::PursueWithdraw,
            Intensity::Severe,
            Trend::Intensifying,
            Some(&p),
            Some(&w),
            4.29,
        );
        assert!(notes.pattern_description.contains("Partner A"));
        assert!(notes.pattern_description.contains("4.3:1"));
        assert!(notes.clinical_implications.iter().any(|i| i.contains("intensifying")));
        assert_eq!(notes.caveats.len(), 3);
    }

    #[test]
    fn test_every_pattern_has_caveats() {
        for pattern in [PatternType::PursueWithdraw, PatternType::MutualAvoidance, PatternType::Balanced] {
            let notes = clinical_notes(pattern, Intensity::None, Trend::Stable, None, None, 1.0);
            assert!(!notes.pattern_description.is_empty());
            assert!(!notes.caveats.is_empty());
        }
    }
}
