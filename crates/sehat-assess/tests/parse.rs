use sehat_assess::parse::parse_assessment;
use sehat_core::models::assessment::{AssessmentOutcome, RiskCategory};

fn assessed(text: &str) -> sehat_core::models::assessment::Assessment {
    match parse_assessment(text) {
        AssessmentOutcome::Assessed(a) => a,
        AssessmentOutcome::Unavailable { reason } => panic!("expected assessment, got: {reason}"),
    }
}

#[test]
fn full_reply_is_parsed() {
    let a = assessed(
        r#"{
            "risk_score": 35,
            "risk_category": "Moderate",
            "recommendations": "Repeat CBC in 3 months.",
            "consultation_doctor": "Hematologist",
            "image_analysis": "N/A",
            "feature_importance": {"Age": 0.3, "Biomarkers": 0.5, "History": 0.2}
        }"#,
    );

    assert_eq!(a.risk_score, Some(35));
    assert_eq!(a.category(), Some(RiskCategory::Moderate));
    assert_eq!(a.recommendations.as_deref(), Some("Repeat CBC in 3 months."));
    assert_eq!(a.consultation_doctor.as_deref(), Some("Hematologist"));
    assert_eq!(a.image_analysis.as_deref(), Some("N/A"));
    let weights = a.feature_importance.unwrap();
    assert_eq!(weights.len(), 3);
    assert_eq!(weights["Biomarkers"], 0.5);
}

#[test]
fn invalid_json_is_unavailable() {
    let outcome = parse_assessment("I'm sorry, I can't help with that.");
    assert!(matches!(outcome, AssessmentOutcome::Unavailable { .. }));
}

#[test]
fn empty_reply_is_unavailable() {
    assert!(!parse_assessment("").is_available());
    assert!(!parse_assessment("   \n").is_available());
}

#[test]
fn non_object_json_is_unavailable() {
    match parse_assessment("[1, 2, 3]") {
        AssessmentOutcome::Unavailable { reason } => assert!(reason.contains("an array")),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn empty_object_is_assessed_but_empty() {
    let a = assessed("{}");
    assert!(a.is_empty());
}

#[test]
fn code_fence_is_stripped() {
    let a = assessed("```json\n{\"risk_score\": 12, \"risk_category\": \"Low\"}\n```");
    assert_eq!(a.risk_score, Some(12));
    assert_eq!(a.category(), Some(RiskCategory::Low));
}

#[test]
fn score_accepts_floats_and_numeric_strings() {
    assert_eq!(assessed(r#"{"risk_score": 41.6}"#).risk_score, Some(42));
    assert_eq!(assessed(r#"{"risk_score": " 77 "}"#).risk_score, Some(77));
    assert_eq!(assessed(r#"{"risk_score": "12.4"}"#).risk_score, Some(12));
    assert_eq!(assessed(r#"{"risk_score": "high"}"#).risk_score, None);
    assert_eq!(assessed(r#"{"risk_score": null}"#).risk_score, None);
}

#[test]
fn out_of_range_score_is_kept() {
    let a = assessed(r#"{"risk_score": 140}"#);
    assert_eq!(a.risk_score, Some(140));
    assert!(!a.score_in_range());
}

#[test]
fn wrongly_shaped_fields_are_dropped_individually() {
    let a = assessed(
        r#"{
            "risk_score": 50,
            "risk_category": 3,
            "recommendations": {"text": "nested"},
            "consultation_doctor": "Oncologist",
            "feature_importance": "Age"
        }"#,
    );

    assert_eq!(a.risk_score, Some(50));
    assert_eq!(a.risk_category, None);
    assert_eq!(a.recommendations, None);
    assert_eq!(a.consultation_doctor.as_deref(), Some("Oncologist"));
    assert_eq!(a.feature_importance, None);
}

#[test]
fn recommendation_list_is_joined() {
    let a = assessed(r#"{"recommendations": ["Stop smoking", "Annual CT scan"]}"#);
    assert_eq!(a.recommendations.as_deref(), Some("Stop smoking\nAnnual CT scan"));
}

#[test]
fn non_numeric_weights_are_dropped() {
    let a = assessed(r#"{"feature_importance": {"Age": 0.7, "History": "high"}}"#);
    let weights = a.feature_importance.unwrap();
    assert_eq!(weights.len(), 1);
    assert_eq!(weights["Age"], 0.7);
}

#[test]
fn unknown_category_is_kept_verbatim() {
    let a = assessed(r#"{"risk_category": "Very High"}"#);
    assert_eq!(a.risk_category.as_deref(), Some("Very High"));
    assert_eq!(a.category(), None);
}
