use roster_store::{FastEmbedder, NearestNeighborIndex, artifacts};
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;
use crate::engine::{EngineConfig, LlmClient, ServingContext};

/// Shared state for all handlers. Read-only after startup.
pub struct AppState {
    pub ctx: ServingContext,
}

impl AppState {
    pub fn new(ctx: ServingContext) -> Arc<Self> {
        Arc::new(Self { ctx })
    }

    /// Load the artifact pair, the embedding model and the LLM client.
    /// Any failure here is fatal.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Arc<Self>> {
        let loaded = artifacts::load(&config.artifact_paths())?;
        info!(
            employees = loaded.metadata.len(),
            dimension = loaded.index.dimension(),
            "artifacts loaded"
        );

        let embedder = FastEmbedder::new()?;
        let llm = LlmClient::from_env(config.llm_model.clone())?;
        info!(model = llm.model(), "LLM client ready");

        let engine_config = EngineConfig {
            generation_timeout: config.llm_timeout,
            ..EngineConfig::default()
        };

        let ctx = ServingContext::from_artifacts(
            loaded,
            Arc::new(embedder),
            Arc::new(llm),
            engine_config,
        )?;

        Ok(Self::new(ctx))
    }
}
