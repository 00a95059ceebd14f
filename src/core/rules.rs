//! Crisis rule tables
//!
//! Declarative data: five weighted category tables, the safety escalators,
//! the intensity amplifiers and the domestic-violence marker. All patterns
//! are case-insensitive and compiled once per process.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{CrisisLevel, CrisisType};

/// One regex and the weight it adds to its category
#[derive(Debug)]
pub struct WeightedPattern {
    pub regex: Regex,
    pub weight: u32,
}

/// A crisis category: base severity plus weighted patterns
#[derive(Debug)]
pub struct CategoryRule {
    pub crisis_type: CrisisType,
    pub base_level: CrisisLevel,
    pub patterns: Vec<WeightedPattern>,
}

/// What a safety escalator is guarding against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalatorKind {
    SuicidalIdeation,
    SelfHarm,
    NotWantingToLive,
    WeaponMention,
    ChildrenInDanger,
    Hopelessness,
}

/// A pattern whose match forces EMERGENCY
#[derive(Debug)]
pub struct SafetyEscalator {
    pub kind: EscalatorKind,
    pub regex: Regex,
}

fn ci(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).unwrap()
}

fn weighted(pattern: &str, weight: u32) -> WeightedPattern {
    WeightedPattern { regex: ci(pattern), weight }
}

lazy_static! {
    // =========================================================================
    // Category tables, in tie-break order
    // =========================================================================
    pub static ref CATEGORY_RULES: Vec<CategoryRule> = vec![
        CategoryRule {
            crisis_type: CrisisType::AffairDiscovery,
            base_level: CrisisLevel::Acute,
            patterns: vec![
                weighted(r"\b(cheating|cheated|affair|unfaithful|infidelity)\b", 3),
                weighted(r"\b(found (messages?|texts?|emails?|photos?))\b", 3),
                weighted(r"\b(sexting|dating app|tinder|bumble|hinge)\b", 2),
                weighted(r"\b(other (wo)?man|someone else|sleeping with)\b", 3),
                weighted(r"\b(betrayed|betrayal|lied about .*(seeing|meeting|talking))\b", 2),
                weighted(r"\b(just (found|discovered|realized))\b", 1),
            ],
        },
        CategoryRule {
            crisis_type: CrisisType::SeparationThreat,
            base_level: CrisisLevel::Acute,
            patterns: vec![
                weighted(r"\b(divorce|separation|leaving( me)?|moving out)\b", 3),
                weighted(r"\b(it'?s over|we'?re done|i'?m done|ending (this|it|us))\b", 3),
                weighted(r"\b(lawyer|attorney|custody|papers)\b", 3),
                weighted(r"\b(packed (bags?|things)|staying (at|with) (a friend|my (mom|parent)))\b", 2),
                weighted(r"\b(trial separation|taking a break|need space)\b", 1),
                weighted(r"\b(can'?t do this anymore|i give up)\b", 2),
            ],
        },
        CategoryRule {
            crisis_type: CrisisType::EscalatedConflict,
            base_level: CrisisLevel::Elevated,
            patterns: vec![
                weighted(r"\b(screaming|yelling|throwing things|slammed)\b", 3),
                weighted(r"\b(huge fight|worst fight|explosive|blow[- ]?up)\b", 2),
                weighted(r"\b(said (horrible|terrible|unforgivable) things)\b", 2),
                weighted(r"\b(in front of (the )?kids|children (heard|saw|were there))\b", 3),
                weighted(r"\b(threatening|threatened|scared of (him|her|them))\b", 3),
                weighted(r"\b(police|cops|called 911)\b", 3),
                weighted(r"\b(hit|pushed|grabbed|shoved|physical)\b", 3),
            ],
        },
        CategoryRule {
            crisis_type: CrisisType::EmotionalFlooding,
            base_level: CrisisLevel::Elevated,
            patterns: vec![
                weighted(r"\b(can'?t (breathe|think|stop crying|function|sleep|eat))\b", 2),
                weighted(r"\b(panic attack|anxiety attack|shaking|trembling)\b", 2),
                weighted(r"\b(heart (racing|pounding)|chest (tight|hurts))\b", 2),
                weighted(r"\b(spiraling|losing (it|my mind)|falling apart|breaking down)\b", 2),
                weighted(r"\b(numb|can'?t feel anything|dissociat(ing|ed))\b", 2),
                weighted(r"\b(haven'?t (slept|eaten) in)\b", 2),
            ],
        },
        CategoryRule {
            crisis_type: CrisisType::BetrayalTrauma,
            base_level: CrisisLevel::Acute,
            patterns: vec![
                weighted(r"\b(gaslighting|gaslit|manipulated|lied for (months|years|weeks))\b", 3),
                weighted(r"\b(double life|secret (family|relationship|account))\b", 3),
                weighted(r"\b(everything was a lie|whole (life|marriage|relationship) was)\b", 3),
                weighted(r"\b(financial (infidelity|betrayal|secret)|hidden (money|debt|accounts))\b", 2),
                weighted(r"\b(porn addiction|sex addiction|compulsive)\b", 2),
                weighted(r"\b(don'?t know what'?s real|can'?t trust (my own|myself))\b", 2),
            ],
        },
    ];

    // =========================================================================
    // Safety escalators: any match means EMERGENCY
    // =========================================================================
    pub static ref SAFETY_ESCALATORS: Vec<SafetyEscalator> = vec![
        SafetyEscalator {
            kind: EscalatorKind::SuicidalIdeation,
            regex: ci(r"\b(suicid(e|al)|kill (myself|me)|want to die|end (it all|my life))\b"),
        },
        SafetyEscalator {
            kind: EscalatorKind::SelfHarm,
            regex: ci(r"\b(self[- ]?harm|cutting|hurt(ing)? myself)\b"),
        },
        SafetyEscalator {
            kind: EscalatorKind::NotWantingToLive,
            regex: ci(r"\b(don'?t want to (live|be here|go on|wake up))\b"),
        },
        SafetyEscalator {
            kind: EscalatorKind::WeaponMention,
            regex: ci(r"\b(weapon|gun|knife)\b"),
        },
        SafetyEscalator {
            kind: EscalatorKind::ChildrenInDanger,
            regex: ci(r"\b(children (in danger|at risk|being hurt)|hurting (the )?kids)\b"),
        },
        SafetyEscalator {
            kind: EscalatorKind::Hopelessness,
            regex: ci(r"\b(no (one|body) (cares|would (miss|notice)))\b"),
        },
    ];

    // =========================================================================
    // Intensity amplifiers: two or more raise the category level by one
    // =========================================================================
    pub static ref INTENSITY_AMPLIFIERS: Vec<Regex> = vec![
        ci(r"\b(just (happened|found out|discovered)|right now|happening now)\b"),
        ci(r"\b(i don'?t know what to do)\b"),
        ci(r"\b(please help|desperate|emergency)\b"),
        ci(r"\b(worst (day|moment|thing) (of|in) my life)\b"),
        ci(r"\b(completely (lost|broken|destroyed|shattered))\b"),
    ];

    // Physical violence, weapons or fear; no trailing boundary so "shoving"
    // and "threatens" still count
    pub static ref DOMESTIC_VIOLENCE_MARKERS: Regex =
        ci(r"\b(hit|push|grab|shov|physical|weapon|scared of (him|her|them)|threaten)");
}

/// Rule for a category
pub fn rule_for(crisis_type: CrisisType) -> Option<&'static CategoryRule> {
    CATEGORY_RULES.iter().find(|r| r.crisis_type == crisis_type)
}

/// Escalators matching `text`
pub fn matched_escalators(text: &str) -> Vec<EscalatorKind> {
    SAFETY_ESCALATORS
        .iter()
        .filter(|e| e.regex.is_match(text))
        .map(|e| e.kind)
        .collect()
}

/// Number of amplifier patterns matching `text`
pub fn amplifier_count(text: &str) -> usize {
    INTENSITY_AMPLIFIERS.iter().filter(|re| re.is_match(text)).count()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_compile() {
        lazy_static::initialize(&CATEGORY_RULES);
        lazy_static::initialize(&SAFETY_ESCALATORS);
        lazy_static::initialize(&INTENSITY_AMPLIFIERS);
        lazy_static::initialize(&DOMESTIC_VIOLENCE_MARKERS);
        assert_eq!(CATEGORY_RULES.len(), 5);
        assert_eq!(SAFETY_ESCALATORS.len(), 6);
        assert_eq!(INTENSITY_AMPLIFIERS.len(), 5);
    }

    #[test]
    fn test_table_order_and_base_levels() {
        let order: Vec<CrisisType> = CATEGORY_RULES.iter().map(|r| r.crisis_type).collect();
        assert_eq!(
            order,
            vec![
                CrisisType::AffairDiscovery,
                CrisisType::SeparationThreat,
                CrisisType::EscalatedConflict,
                CrisisType::EmotionalFlooding,
                CrisisType::BetrayalTrauma,
            ]
        );
        assert_eq!(rule_for(CrisisType::EscalatedConflict).unwrap().base_level, CrisisLevel::Elevated);
        assert_eq!(rule_for(CrisisType::BetrayalTrauma).unwrap().base_level, CrisisLevel::Acute);
    }

    #[test]
    fn test_every_weight_positive() {
        for rule in CATEGORY_RULES.iter() {
            assert!(!rule.patterns.is_empty());
            for p in &rule.patterns {
                assert!(p.weight >= 1 && p.weight <= 3, "{:?}: {}", rule.crisis_type, p.regex);
            }
        }
    }

    #[test]
    fn test_case_insensitive() {
        let affair = rule_for(CrisisType::AffairDiscovery).unwrap();
        assert!(affair.patterns[0].regex.is_match("He was CHEATING"));
    }

    #[test]
    fn test_escalators() {
        assert_eq!(matched_escalators("I want to die"), vec![EscalatorKind::SuicidalIdeation]);
        assert_eq!(matched_escalators("he has a gun"), vec![EscalatorKind::WeaponMention]);
        assert_eq!(matched_escalators("nobody would notice"), vec![EscalatorKind::Hopelessness]);
        assert!(matched_escalators("we went shopping").is_empty());
    }

    #[test]
    fn test_word_boundaries() {
        // "gunsmith" and "hitch" are not whole-word matches
        assert!(matched_escalators("the gunsmith shop").is_empty());
        let conflict = rule_for(CrisisType::EscalatedConflict).unwrap();
        assert!(!conflict.patterns[6].regex.is_match("a white hitch"));
    }

    #[test]
    fn test_amplifiers() {
        assert_eq!(amplifier_count("please help, I don't know what to do"), 2);
        assert_eq!(amplifier_count("a calm evening"), 0);
    }

    #[test]
    fn test_dv_marker_prefix_match() {
        assert!(DOMESTIC_VIOLENCE_MARKERS.is_match("he was shoving me"));
        assert!(DOMESTIC_VIOLENCE_MARKERS.is_match("she threatens to leave"));
        assert!(!DOMESTIC_VIOLENCE_MARKERS.is_match("we were yelling"));
    }
}
