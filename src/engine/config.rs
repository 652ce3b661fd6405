use std::time::Duration;

/// Engine tuning knobs
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Names returned by a list request without an explicit count
    pub list_default_k: usize,
    /// Neighbours retrieved for semantic search and contact lookup
    pub semantic_default_k: usize,
    /// Upper bound on one generation call
    pub generation_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            list_default_k: 10,
            semantic_default_k: 2,
            generation_timeout: Duration::from_secs(60),
        }
    }
}
