use roster_types::Employee;
use thiserror::Error;
use tracing::{debug, info};

use crate::embedder::{Embed, EmbedError, format_employee_profile};
use crate::index::{FlatL2Index, IndexError, NearestNeighborIndex};

/// Profiles embedded per model call
pub const EMBEDDING_BATCH_SIZE: usize = 32;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("no employees to index")]
    EmptyRoster,

    #[error("embedding failed for batch starting at employee id {first_id}: {source}")]
    Embed {
        first_id: u64,
        #[source]
        source: EmbedError,
    },

    #[error("embedder returned {found} vectors for {expected} profiles")]
    CountMismatch { expected: usize, found: usize },

    #[error("index error: {0}")]
    Index(#[from] IndexError),
}

/// An index together with the records it was built from, in build order.
#[derive(Debug, Clone)]
pub struct BuiltIndex {
    pub index: FlatL2Index,
    pub metadata: Vec<Employee>,
}

/// Format → embed → index, preserving record order.
///
/// Position `i` of the returned index is the embedding of `metadata[i]`.
/// Any failure aborts the whole build; nothing partial is returned.
pub fn build_index(employees: Vec<Employee>, embedder: &dyn Embed) -> Result<BuiltIndex, BuildError> {
    if employees.is_empty() {
        return Err(BuildError::EmptyRoster);
    }

    let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(employees.len());
    for (batch_no, batch) in employees.chunks(EMBEDDING_BATCH_SIZE).enumerate() {
        let profiles: Vec<String> = batch.iter().map(format_employee_profile).collect();
        let refs: Vec<&str> = profiles.iter().map(|s| s.as_str()).collect();

        let embeddings = embedder
            .embed_batch(&refs)
            .map_err(|source| BuildError::Embed {
                first_id: batch[0].id,
                source,
            })?;

        if embeddings.len() != batch.len() {
            return Err(BuildError::CountMismatch {
                expected: batch.len(),
                found: embeddings.len(),
            });
        }

        vectors.extend(embeddings);
        debug!(batch = batch_no, embedded = vectors.len(), "embedded profile batch");
    }

    let index = FlatL2Index::build(&vectors)?;
    info!(
        employees = employees.len(),
        dimension = index.dimension(),
        "built employee index"
    );

    Ok(BuiltIndex {
        index,
        metadata: employees,
    })
}
