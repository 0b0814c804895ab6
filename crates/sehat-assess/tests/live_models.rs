//! Integration tests against real model endpoints.
//!
//! These need credentials in the environment: `GEMINI_API_KEY` for Gemini,
//! the default AWS chain plus `SEHAT_BEDROCK_MODEL_ID` for Bedrock.
//!
//! Run with: `cargo test -p sehat-assess --test live_models -- --ignored`

use std::sync::Arc;

use sehat_assess::AssessmentRequester;
use sehat_assess::bedrock::BedrockClient;
use sehat_assess::gemini::{DEFAULT_MODEL_ID, GeminiClient};
use sehat_core::models::screening::PatientInputs;

fn sample_inputs() -> PatientInputs {
    PatientInputs {
        patient_name: "Live Test".to_string(),
        age: Some(61),
        gender: Some("Male".to_string()),
        family_history: Some("Father: colon cancer".to_string()),
        smoking_status: Some("Current".to_string()),
        bmi: Some(29.1),
        wbc: Some(12.4),
        rbc: Some(3.9),
        hemoglobin: Some(11.0),
        tumor_marker: Some(45.0),
    }
}

#[tokio::test]
#[ignore]
async fn gemini_returns_parsable_assessment() {
    let api_key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
    let client = GeminiClient::new(api_key, DEFAULT_MODEL_ID, None).expect("client");
    let requester = AssessmentRequester::new(Arc::new(client));

    let outcome = requester
        .assess(&sample_inputs(), None)
        .await
        .expect("gemini call should succeed");

    println!("{outcome:?}");
    let assessment = outcome.assessment().expect("reply should be a JSON object");
    assert!(assessment.risk_score.is_some());
    assert_eq!(assessment.image_analysis.as_deref(), Some("N/A"));
}

#[tokio::test]
#[ignore]
async fn bedrock_returns_parsable_assessment() {
    let model_id =
        std::env::var("SEHAT_BEDROCK_MODEL_ID").expect("SEHAT_BEDROCK_MODEL_ID must be set");
    let client = BedrockClient::from_env(model_id).await;
    let requester = AssessmentRequester::new(Arc::new(client));

    let outcome = requester
        .assess(&sample_inputs(), None)
        .await
        .expect("bedrock call should succeed");

    println!("{outcome:?}");
    assert!(outcome.is_available());
}
