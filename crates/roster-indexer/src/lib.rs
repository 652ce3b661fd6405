//! roster-indexer: offline index construction
//!
//! Reads the roster document, embeds every profile and writes the
//! index/metadata pair consumed by hr-rag-chat.

use roster_store::artifacts::{self, ArtifactPaths, LoadError, SaveError};
use roster_store::{BuildError, Embed, NearestNeighborIndex, build_index};
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub use roster_store::artifacts::DEFAULT_ROSTER_PATH;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("failed to read roster: {0}")]
    Roster(#[source] LoadError),

    #[error("build failed: {0}")]
    Build(#[from] BuildError),

    #[error("failed to write artifacts: {0}")]
    Save(#[from] SaveError),

    #[error("artifacts are not usable: {0}")]
    Load(#[source] LoadError),
}

/// Summary of a completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub employees: usize,
    pub dimension: usize,
}

/// Summary of an artifact pair on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStatus {
    pub employees: usize,
    pub dimension: usize,
    pub fingerprint: String,
}

/// Roster file → embeddings → artifacts. Nothing is written unless every
/// profile embedded successfully.
pub fn run_build(
    roster_path: &Path,
    paths: &ArtifactPaths,
    embedder: &dyn Embed,
) -> Result<BuildSummary, IndexerError> {
    let roster = artifacts::load_roster(roster_path).map_err(IndexerError::Roster)?;
    info!(
        employees = roster.employees.len(),
        path = %roster_path.display(),
        "loaded roster"
    );

    let built = build_index(roster.employees, embedder)?;
    artifacts::save(&built, paths)?;

    Ok(BuildSummary {
        employees: built.metadata.len(),
        dimension: built.index.dimension(),
    })
}

/// Load and verify an existing pair.
pub fn status(paths: &ArtifactPaths) -> Result<ArtifactStatus, IndexerError> {
    let loaded = artifacts::load(paths).map_err(IndexerError::Load)?;

    Ok(ArtifactStatus {
        employees: loaded.metadata.len(),
        dimension: loaded.index.dimension(),
        fingerprint: loaded.fingerprint,
    })
}
