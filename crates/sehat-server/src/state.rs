use std::sync::Arc;

use sehat_assess::bedrock::BedrockClient;
use sehat_assess::gemini::GeminiClient;
use sehat_assess::{AssessmentModel, AssessmentRequester};
use sehat_storage::ScreeningStore;

use crate::config::{ModelConfig, ModelProvider, ServerConfig};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: ScreeningStore,
    pub requester: AssessmentRequester,
}

impl AppState {
    pub fn new(store: ScreeningStore, requester: AssessmentRequester) -> Self {
        Self { store, requester }
    }

    /// Open the store and construct the configured model backend.
    pub async fn initialise(config: &ServerConfig) -> eyre::Result<Self> {
        let store = ScreeningStore::open(&config.database_url).await?;
        let requester = AssessmentRequester::new(build_model(&config.model).await?);

        tracing::info!(
            provider = %config.model.provider,
            model_id = requester.model_id(),
            "model backend ready"
        );

        Ok(Self::new(store, requester))
    }
}

async fn build_model(config: &ModelConfig) -> eyre::Result<Arc<dyn AssessmentModel>> {
    let model: Arc<dyn AssessmentModel> = match config.provider {
        ModelProvider::Gemini => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| eyre::eyre!("GEMINI_API_KEY is required for the gemini provider"))?;
            Arc::new(GeminiClient::new(api_key, &config.model_id, config.timeout)?)
        }
        ModelProvider::Bedrock => {
            if config.timeout.is_some() {
                tracing::warn!("SEHAT_MODEL_TIMEOUT_SECS is ignored by the bedrock provider");
            }
            Arc::new(BedrockClient::from_env(&config.model_id).await)
        }
    };

    Ok(model)
}
