use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use crate::ai::common::{build_chat_body, request_chat_content};
use crate::ai::config::AiConfig;
use crate::ai::prompts::ClassifierPrompt;

/// Opaque food classifier.
///
/// Implementations return the model's reply text as-is; interpreting it is
/// left to [`crate::ai::parse`].
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Name for logging.
    fn name(&self) -> &str;

    async fn classify(&self, prompt: &ClassifierPrompt) -> Result<String>;
}

/// Classifier backed by the OpenAI Chat Completions API.
pub struct OpenAiClassifier {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiClassifier {
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.gpt_model.clone(),
            url: config.chat_url().to_string(),
        })
    }
}

#[async_trait]
impl Classifier for OpenAiClassifier {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(level = "trace", skip(self, prompt), fields(model = %self.model))]
    async fn classify(&self, prompt: &ClassifierPrompt) -> Result<String> {
        let body = build_chat_body(&self.model, prompt);
        request_chat_content(&self.client, &self.api_key, &body, &self.url).await
    }
}
