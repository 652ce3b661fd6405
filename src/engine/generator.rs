use async_trait::async_trait;
use rig::client::ProviderClient;
use rig::providers::gemini;
use std::time::Duration;
use thiserror::Error;

/// Env var read by the Gemini provider
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("{0}")]
    Provider(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Prompt → text capability.
#[async_trait]
pub trait Generate: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Wrapper around the LLM client
pub struct LlmClient {
    client: gemini::Client,
    model: String,
}

impl LlmClient {
    /// Create client from GEMINI_API_KEY env var
    pub fn from_env(model: impl Into<String>) -> Result<Self, GenerationError> {
        if std::env::var(GEMINI_API_KEY_VAR).is_err() {
            return Err(GenerationError::MissingApiKey);
        }

        let client = gemini::Client::from_env();
        Ok(Self {
            client,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Generate for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        use rig::client::CompletionClient;
        use rig::completion::Prompt;

        let agent = self.client.agent(&self.model).build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| GenerationError::Provider(e.to_string()))
    }
}

/// Generate a response, giving up after `timeout`. Not retried.
pub async fn generate(
    prompt: &str,
    generator: &dyn Generate,
    timeout: Duration,
) -> Result<String, GenerationError> {
    match tokio::time::timeout(timeout, generator.generate(prompt)).await {
        Ok(result) => result,
        Err(_) => Err(GenerationError::Timeout(timeout)),
    }
}
