//! roster-store: Embedding, nearest-neighbour index and persisted artifacts
//!
//! Shared between roster-indexer (builds and writes) and hr-rag-chat (loads
//! and searches). The embedding model and the index algorithm sit behind
//! the `Embed` and `NearestNeighborIndex` traits so callers can substitute
//! fakes or other backends.

pub mod artifacts;
pub mod builder;
pub mod embedder;
pub mod index;

pub use artifacts::{ArtifactPaths, LoadError, LoadedArtifacts, SaveError};
pub use builder::{BuildError, BuiltIndex, EMBEDDING_BATCH_SIZE, build_index};
pub use embedder::{
    DEFAULT_EMBEDDING_MODEL, Embed, EmbedError, FastEmbedder, format_employee_profile,
};
pub use index::{FlatL2Index, IndexError, NearestNeighborIndex};
