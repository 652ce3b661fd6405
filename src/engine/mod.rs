mod config;
pub mod context;
pub mod generator;
pub mod intent;
pub mod pagination;
pub mod resolver;
pub mod retriever;

pub use config::EngineConfig;
pub use generator::{Generate, LlmClient};
pub use intent::{IntentKind, QueryIntent};

use roster_store::{Embed, LoadedArtifacts, NearestNeighborIndex};
use roster_types::Employee;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use resolver::{FieldKeyword, Resolution};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] roster_store::EmbedError),

    #[error("index search failed: {0}")]
    Index(#[from] roster_store::IndexError),

    #[error("metadata store is empty")]
    EmptyStore,

    #[error("index holds {vectors} vectors but metadata holds {records} records")]
    Mismatch { vectors: usize, records: usize },

    #[error("embedder produces {embedder}-dim vectors but index holds {index}-dim vectors")]
    Dimension { embedder: usize, index: usize },
}

/// Everything a request needs, built once at startup and shared read-only.
pub struct ServingContext {
    index: Box<dyn NearestNeighborIndex>,
    metadata: Vec<Employee>,
    embedder: Arc<dyn Embed>,
    generator: Arc<dyn Generate>,
    config: EngineConfig,
}

impl ServingContext {
    /// Refuses an empty store, a length mismatch between index and
    /// metadata, or an embedder whose dimension the index cannot search.
    pub fn new(
        index: Box<dyn NearestNeighborIndex>,
        metadata: Vec<Employee>,
        embedder: Arc<dyn Embed>,
        generator: Arc<dyn Generate>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        if metadata.is_empty() {
            return Err(EngineError::EmptyStore);
        }
        if index.len() != metadata.len() {
            return Err(EngineError::Mismatch {
                vectors: index.len(),
                records: metadata.len(),
            });
        }
        if embedder.dimension() != index.dimension() {
            return Err(EngineError::Dimension {
                embedder: embedder.dimension(),
                index: index.dimension(),
            });
        }

        Ok(Self {
            index,
            metadata,
            embedder,
            generator,
            config,
        })
    }

    pub fn from_artifacts(
        artifacts: LoadedArtifacts,
        embedder: Arc<dyn Embed>,
        generator: Arc<dyn Generate>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        Self::new(
            Box::new(artifacts.index),
            artifacts.metadata,
            embedder,
            generator,
            config,
        )
    }

    /// Records in storage (= index build) order.
    pub fn metadata(&self) -> &[Employee] {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Response payload: text plus the complete ordered match list.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub matches: Vec<Employee>,
    pub intent: IntentKind,
}

impl ChatReply {
    fn text(response: impl Into<String>, intent: IntentKind) -> Self {
        Self {
            response: response.into(),
            matches: Vec::new(),
            intent,
        }
    }

    fn with_matches(response: impl Into<String>, matches: &[&Employee], intent: IntentKind) -> Self {
        Self {
            response: response.into(),
            matches: matches.iter().map(|&e| e.clone()).collect(),
            intent,
        }
    }
}

/// Answer one query end to end.
///
/// Never fails: malformed input, empty retrieval, ambiguous field
/// requests and upstream errors all come back as reply text.
pub async fn answer(query: &str, ctx: &ServingContext) -> ChatReply {
    let query = query.trim();
    let intent = intent::classify(query, ctx.len(), &ctx.config);
    let kind = intent.kind();
    info!(intent = ?kind, "query classified");

    match intent {
        QueryIntent::Malformed(reason) => ChatReply::text(reason.guidance(), kind),
        QueryIntent::ListRequest { k } => list_names(k, ctx),
        QueryIntent::ContactLookup { field, k } => contact_lookup(query, field, k, ctx),
        QueryIntent::SemanticSearch { k } => semantic_search(query, k, ctx).await,
    }
}

/// First `k` records in storage order.
fn list_names(k: usize, ctx: &ServingContext) -> ChatReply {
    let listed: Vec<&Employee> = ctx.metadata.iter().take(k).collect();
    let names: Vec<&str> = listed.iter().map(|e| e.name.as_str()).collect();

    ChatReply::with_matches(
        format!(
            "Here are {} employee names:\n\n{}",
            names.len(),
            names.join("\n")
        ),
        &listed,
        IntentKind::ListRequest,
    )
}

fn contact_lookup(query: &str, field: FieldKeyword, k: usize, ctx: &ServingContext) -> ChatReply {
    let kind = IntentKind::ContactLookup;
    let lower = query.to_lowercase();

    let candidates = match retriever::retrieve(&lower, k, ctx) {
        Ok(c) => c,
        Err(e) => return upstream_failure(&e, kind),
    };
    if candidates.is_empty() {
        return ChatReply::text(retriever::NO_MATCHES, kind);
    }

    match resolver::resolve(&lower, field, &candidates) {
        Resolution::Found { employee, answer } => {
            ChatReply::with_matches(answer, &[employee], kind)
        }
        Resolution::Unresolved => ChatReply::text(resolver::CLARIFICATION, kind),
    }
}

async fn semantic_search(query: &str, k: usize, ctx: &ServingContext) -> ChatReply {
    let kind = IntentKind::SemanticSearch;
    let lower = query.to_lowercase();

    let matches = match retriever::retrieve(&lower, k, ctx) {
        Ok(m) => m,
        Err(e) => return upstream_failure(&e, kind),
    };
    if matches.is_empty() {
        return ChatReply::text(retriever::NO_MATCHES, kind);
    }

    let prompt = context::build_prompt(query, &matches);
    let response = match generator::generate(
        &prompt,
        ctx.generator.as_ref(),
        ctx.config.generation_timeout,
    )
    .await
    {
        Ok(text) if text.trim().is_empty() => context::GENERATION_FALLBACK.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!(error = %e, "generation failed");
            format!("❌ Error contacting LLM: {}", e)
        }
    };

    ChatReply::with_matches(response, &matches, kind)
}

fn upstream_failure(err: &EngineError, kind: IntentKind) -> ChatReply {
    warn!(error = %err, "retrieval failed");
    ChatReply::text(format!("❌ Error searching employees: {}", err), kind)
}
