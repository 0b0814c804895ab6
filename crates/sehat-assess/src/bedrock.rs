//! AWS Bedrock backend (Converse API).
//!
//! The instruction goes out as a text content block; an attached image
//! follows as an image content block. Bedrock accepts png, jpeg, gif and
//! webp only, so other media types are rejected before the call.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ImageBlock, ImageFormat, ImageSource, Message,
};
use tracing::info;

use crate::error::AssessError;
use crate::model::{AssessmentModel, ModelRequest};

pub struct BedrockClient {
    client: Client,
    model_id: String,
}

impl BedrockClient {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            model_id: model_id.into(),
        }
    }

    /// Build a client from the default AWS credential and region chain.
    pub async fn from_env(model_id: impl Into<String>) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self::new(&config, model_id)
    }
}

#[async_trait]
impl AssessmentModel for BedrockClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, request: &ModelRequest) -> Result<String, AssessError> {
        let mut message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(request.prompt.clone()));

        if let Some(image) = &request.image {
            let format = image_format_for_media_type(&image.media_type)
                .ok_or_else(|| AssessError::UnsupportedImage(image.media_type.clone()))?;
            let block = ImageBlock::builder()
                .format(format)
                .source(ImageSource::Bytes(aws_smithy_types::Blob::new(
                    image.bytes.clone(),
                )))
                .build()
                .map_err(|e| AssessError::Invocation(e.to_string()))?;
            message = message.content(ContentBlock::Image(block));
        }

        let message = message
            .build()
            .map_err(|e| AssessError::Invocation(e.to_string()))?;

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .messages(message)
            .send()
            .await
            .map_err(|e| AssessError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| AssessError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        info!(
            model_id = %self.model_id,
            text_len = text.len(),
            "bedrock converse complete"
        );

        Ok(text)
    }
}

/// Map a declared image media type to a Bedrock `ImageFormat`.
///
/// Returns `None` for types the Converse API cannot take.
pub fn image_format_for_media_type(media_type: &str) -> Option<ImageFormat> {
    match media_type.to_ascii_lowercase().as_str() {
        "image/png" => Some(ImageFormat::Png),
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
        "image/gif" => Some(ImageFormat::Gif),
        "image/webp" => Some(ImageFormat::Webp),
        _ => None,
    }
}
