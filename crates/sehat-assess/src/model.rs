use async_trait::async_trait;

use sehat_core::models::image::ImageAttachment;

use crate::error::AssessError;

/// One request to a generative model: a text instruction and at most one
/// image to go with it.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub prompt: String,
    pub image: Option<ImageAttachment>,
}

/// A generative model backend that answers with raw text.
///
/// Implementations ask the model for a JSON reply but do not parse it; an
/// `Err` means the call itself failed (transport, auth, non-success status),
/// never that the reply was unreadable.
#[async_trait]
pub trait AssessmentModel: Send + Sync {
    /// Identifier of the model being invoked, for logging.
    fn model_id(&self) -> &str;

    async fn generate(&self, request: &ModelRequest) -> Result<String, AssessError>;
}
