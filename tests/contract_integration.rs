//! Integration tests for the result contract
//!
//! Wire spellings, risk signal mapping and fixture loading as seen by
//! downstream consumers

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use bondsignal::classify_crisis_text;
use bondsignal::core::{DetectorConfig, InMemoryDataSource, PursueWithdrawDetector};
use bondsignal::types::{
    AlertSeverity, CrisisDetectionResult, CrisisLevel, PursueWithdrawResult, RiskKind,
};

#[test]
fn test_crisis_result_wire_shape() {
    let result = classify_crisis_text("He has been cheating on me");
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["is_crisis"], json!(true));
    assert_eq!(value["level"], json!(2));
    assert_eq!(value["primary_type"], json!("AFFAIR_DISCOVERY"));
    assert_eq!(value["all_types"], json!(["AFFAIR_DISCOVERY"]));
    assert_eq!(value["safety_risk"], json!(false));
    assert_eq!(value["safety_resources"], json!([]));
}

#[test]
fn test_none_result_wire_shape() {
    let value = serde_json::to_value(CrisisDetectionResult::none()).unwrap();
    assert_eq!(
        value,
        json!({
            "is_crisis": false,
            "level": 0,
            "primary_type": null,
            "all_types": [],
            "safety_risk": false,
            "safety_resources": [],
            "confidence": 0.0
        })
    );
}

#[test]
fn test_crisis_result_roundtrips() {
    let result = classify_crisis_text("I want to die, nobody would notice");
    let json = serde_json::to_string(&result).unwrap();
    let back: CrisisDetectionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_crisis_level_rejects_out_of_range() {
    assert!(serde_json::from_value::<CrisisLevel>(json!(4)).is_err());
    assert_eq!(serde_json::from_value::<CrisisLevel>(json!(3)).unwrap(), CrisisLevel::Emergency);
}

#[test]
fn test_crisis_signal_severity_mapping() {
    let cases = [
        ("we had a huge fight", AlertSeverity::Medium),
        ("my husband wants a divorce", AlertSeverity::High),
        ("I want to end my life", AlertSeverity::Critical),
    ];
    for (text, severity) in cases {
        let signal = classify_crisis_text(text).to_risk_signal().unwrap();
        assert_eq!(signal.kind, RiskKind::Crisis);
        assert_eq!(signal.severity, severity, "{}", text);
    }
    assert!(classify_crisis_text("lovely walk today").to_risk_signal().is_none());
}

#[test]
fn test_safety_signal_title_and_details() {
    let signal = classify_crisis_text("I don't want to live anymore").to_risk_signal().unwrap();
    assert_eq!(signal.title, "SAFETY RISK - Level 3 Crisis Detected");
    assert_eq!(signal.details["crisis_level"], json!(3));
    assert_eq!(signal.details["safety_risk"], json!(true));
    assert!(signal.details["safety_resources"].as_array().unwrap().len() >= 2);
}

const FIXTURE: &str = r#"{
    "relationships": [
        {"id": "couple-1", "user1_id": "u1", "user2_id": "u2", "status": "active"}
    ],
    "activity": {
        "u1": {
            "daily_logs": [
                {"date": "2026-03-01", "mood": 8, "journal_entry": "long day, tried to talk"},
                {"date": "2026-03-02", "mood": 7},
                {"date": "2026-03-03", "mood": 8, "journal_entry": "asked again about the weekend"},
                {"date": "2026-03-04", "mood": 6},
                {"date": "2026-03-05", "mood": 8, "journal_entry": "wrote down what I need"},
                {"date": "2026-03-06", "mood": 6},
                {"date": "2026-03-07", "mood": 9, "journal_entry": "we finally talked"}
            ],
            "gratitude_dates": ["2026-03-01", "2026-03-03", "2026-03-05", "2026-03-07"],
            "media_dates": ["2026-03-01", "2026-03-03", "2026-03-05", "2026-03-07"]
        },
        "u2": {
            "gratitude_dates": ["2026-03-02", "2026-03-04", "2026-03-06",
                                "2026-03-01", "2026-03-03", "2026-03-05", "2026-03-07"],
            "media_dates": ["2026-03-02", "2026-03-04", "2026-03-06"]
        }
    }
}"#;

#[tokio::test]
async fn test_fixture_end_to_end_json() {
    let source = InMemoryDataSource::from_json_str(FIXTURE).unwrap();
    let as_of = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    let result = PursueWithdrawDetector::new()
        .detect_at(&source, "couple-1", 7, as_of)
        .await
        .unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["pattern_type"], json!("pursue-withdraw"));
    assert_eq!(value["reason"], json!("R201_PURSUE_WITHDRAW"));
    assert_eq!(value["pursuer"]["label"], json!("Partner A"));
    assert_eq!(value["pursuer"]["role"], json!("pursuer"));
    assert_eq!(value["withdrawer"]["role"], json!("withdrawer"));
    assert_eq!(value["metadata"]["couple_id"], json!("couple-1"));
    assert_eq!(value["metadata"]["window_start"], json!("2026-03-01"));
    assert_eq!(value["metadata"]["alignment"], json!("positional"));

    let back: PursueWithdrawResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}

#[tokio::test]
async fn test_neutral_result_wire_shape() {
    let source = InMemoryDataSource::new();
    let as_of = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    let result = PursueWithdrawDetector::new()
        .detect_at(&source, "ghost", 14, as_of)
        .await
        .unwrap();
    let value: Value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["pattern_detected"], json!(false));
    assert_eq!(value["pattern_type"], json!("balanced"));
    assert_eq!(value["intensity"], json!("none"));
    assert_eq!(value["trend"], json!("stable"));
    assert_eq!(value["pursuer"], Value::Null);
    assert_eq!(value["correlation"], json!(0.0));
    assert_eq!(value["engagement_disparity"], json!(1.0));
    assert_eq!(value["metadata"]["data_quality"], json!("insufficient"));
    assert_eq!(
        value["clinical_notes"]["pattern_description"],
        json!("Relationship not found")
    );
}

#[test]
fn test_config_file_shape() {
    let config = DetectorConfig::from_json_str(
        r#"{"window_days": 21, "disparity_severe": 5.0, "alignment": "by-date"}"#,
    )
    .unwrap();
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["window_days"], json!(21));
    assert_eq!(value["alignment"], json!("by-date"));
    assert_eq!(value["min_data_points"], json!(7));
}
