use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use sehat_core::models::assessment::AssessmentOutcome;
use sehat_core::models::image::ImageAttachment;
use sehat_core::models::screening::PatientInputs;

use crate::error::AssessError;
use crate::model::{AssessmentModel, ModelRequest};
use crate::{parse, prompt};

/// Turns patient inputs into a risk assessment using a model backend.
///
/// Each call makes exactly one model request: no retries, no caching.
#[derive(Clone)]
pub struct AssessmentRequester {
    model: Arc<dyn AssessmentModel>,
}

impl AssessmentRequester {
    pub fn new(model: Arc<dyn AssessmentModel>) -> Self {
        Self { model }
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// Request an assessment.
    ///
    /// Returns `Err` only when the model call fails. A reply that cannot be
    /// read comes back as `Ok(AssessmentOutcome::Unavailable { .. })`.
    /// Out-of-range scores and unknown categories are logged and passed
    /// through unchanged.
    pub async fn assess(
        &self,
        inputs: &PatientInputs,
        image: Option<ImageAttachment>,
    ) -> Result<AssessmentOutcome, AssessError> {
        let assessment_id = Uuid::new_v4();
        // A zero-byte upload is no image at all.
        let image = image.filter(|img| !img.is_empty());
        let has_image = image.is_some();
        let image_bytes = image.as_ref().map_or(0, ImageAttachment::len);

        let request = ModelRequest {
            prompt: prompt::build_prompt(inputs, has_image),
            image,
        };

        info!(
            assessment_id = %assessment_id,
            model = self.model_id(),
            has_image,
            image_bytes,
            "requesting risk assessment"
        );

        let text = self.model.generate(&request).await?;
        let outcome = parse::parse_assessment(&text);

        match &outcome {
            AssessmentOutcome::Assessed(assessment) => {
                if assessment.is_empty() {
                    warn!(assessment_id = %assessment_id, "model reply carried no assessment fields");
                }
                if let Some(score) = assessment.risk_score
                    && !assessment.score_in_range()
                {
                    warn!(assessment_id = %assessment_id, score, "risk_score outside 0-100");
                }
                if let Some(category) = &assessment.risk_category
                    && assessment.category().is_none()
                {
                    warn!(
                        assessment_id = %assessment_id,
                        category = %category,
                        "unrecognised risk_category"
                    );
                }
                info!(
                    assessment_id = %assessment_id,
                    risk_score = ?assessment.risk_score,
                    risk_category = ?assessment.risk_category,
                    "risk assessment complete"
                );
            }
            AssessmentOutcome::Unavailable { reason } => {
                warn!(
                    assessment_id = %assessment_id,
                    reason = %reason,
                    "model reply unreadable, storing screening without assessment"
                );
            }
        }

        Ok(outcome)
    }
}
