use roster_types::Employee;
use tracing::{debug, warn};

use super::{EngineError, ServingContext};

/// Returned when the index yields no usable neighbours.
pub const NO_MATCHES: &str = "😕 I couldn't find any employees matching your request. Try using different keywords or check your spelling.";

/// 1. Embed the case-folded query
/// 2. Search the index for the k nearest profiles
/// 3. Map positions back to records, closest first
///
/// Positions outside the metadata store are dropped.
pub fn retrieve<'a>(
    lower: &str,
    k: usize,
    ctx: &'a ServingContext,
) -> Result<Vec<&'a Employee>, EngineError> {
    let query_embedding = ctx.embedder.embed_one(lower)?;
    let positions = ctx.index.search(&query_embedding, k)?;

    let returned = positions.len();
    let matches: Vec<&Employee> = positions
        .into_iter()
        .filter_map(|position| ctx.metadata.get(position))
        .collect();

    if matches.len() < returned {
        warn!(
            dropped = returned - matches.len(),
            "index returned positions outside the metadata store"
        );
    }
    debug!(k, matches = matches.len(), "semantic retrieval");

    Ok(matches)
}
