use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sehat_assess::error::AssessError;
use sehat_assess::{AssessmentModel, AssessmentRequester, ModelRequest};
use sehat_core::models::assessment::AssessmentOutcome;
use sehat_core::models::image::ImageAttachment;
use sehat_core::models::screening::PatientInputs;

/// Replies with a fixed body and records what it was asked.
struct ScriptedModel {
    reply: Result<String, String>,
    seen: Mutex<Vec<ModelRequest>>,
}

impl ScriptedModel {
    fn replying(body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(body.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl AssessmentModel for ScriptedModel {
    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &ModelRequest) -> Result<String, AssessError> {
        self.seen.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(AssessError::Invocation)
    }
}

#[tokio::test]
async fn reply_is_parsed_into_assessment() {
    let model = ScriptedModel::replying(r#"{"risk_score": 22, "risk_category": "Low", "image_analysis": "N/A"}"#);
    let requester = AssessmentRequester::new(model.clone());

    let outcome = requester.assess(&PatientInputs::default(), None).await.unwrap();
    let assessment = outcome.assessment().expect("assessed");
    assert_eq!(assessment.risk_score, Some(22));
    assert_eq!(assessment.image_analysis.as_deref(), Some("N/A"));

    let seen = model.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].image.is_none());
    assert!(seen[0].prompt.contains("No medical image provided."));
}

#[tokio::test]
async fn image_is_forwarded_to_model() {
    let model = ScriptedModel::replying("{}");
    let requester = AssessmentRequester::new(model.clone());
    let image = ImageAttachment::new(vec![1, 2, 3, 4], Some("image/jpeg"), Some("xray.jpg"));

    requester
        .assess(&PatientInputs::default(), Some(image.clone()))
        .await
        .unwrap();

    let seen = model.seen.lock().unwrap();
    assert_eq!(seen[0].image.as_ref(), Some(&image));
    assert!(seen[0].prompt.contains("A medical image has also been provided"));
}

#[tokio::test]
async fn unreadable_reply_is_unavailable_not_error() {
    let requester = AssessmentRequester::new(ScriptedModel::replying("not json at all"));
    let outcome = requester.assess(&PatientInputs::default(), None).await.unwrap();
    assert!(matches!(outcome, AssessmentOutcome::Unavailable { .. }));
}

#[tokio::test]
async fn model_failure_is_an_error() {
    let requester = AssessmentRequester::new(ScriptedModel::failing("connection reset"));
    let err = requester
        .assess(&PatientInputs::default(), None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn out_of_range_values_pass_through() {
    let requester = AssessmentRequester::new(ScriptedModel::replying(
        r#"{"risk_score": 180, "risk_category": "Extreme"}"#,
    ));
    let outcome = requester.assess(&PatientInputs::default(), None).await.unwrap();
    let assessment = outcome.assessment().unwrap();
    assert_eq!(assessment.risk_score, Some(180));
    assert_eq!(assessment.risk_category.as_deref(), Some("Extreme"));
}

#[tokio::test]
async fn zero_byte_image_is_not_sent() {
    let model = ScriptedModel::replying(r#"{"risk_score": 40, "image_analysis": "N/A"}"#);
    let requester = AssessmentRequester::new(model.clone());
    assert_eq!(requester.model_id(), "scripted");

    let empty = ImageAttachment::new(Vec::new(), Some("image/png"), Some("blank.png"));
    requester
        .assess(&PatientInputs::default(), Some(empty))
        .await
        .unwrap();

    let seen = model.seen.lock().unwrap();
    assert!(seen[0].image.is_none());
    assert!(seen[0].prompt.contains("No medical image provided."));
}

#[tokio::test]
async fn object_without_known_fields_is_assessed_but_empty() {
    let model = ScriptedModel::replying(r#"{"verdict": "fine"}"#);
    let requester = AssessmentRequester::new(model);

    let outcome = requester.assess(&PatientInputs::default(), None).await.unwrap();
    assert!(outcome.is_available());
    assert!(outcome.assessment().is_some_and(|a| a.is_empty()));
}
