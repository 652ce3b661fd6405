//! hr-rag-chat: answers free-text questions about an employee roster.
//!
//! Queries are routed to one of four paths (malformed-input guidance, a
//! plain name listing, a structured field lookup, or semantic retrieval
//! followed by LLM generation). The vector index and metadata store are
//! built offline by `roster-indexer` and loaded read-only at startup.

pub mod api;
pub mod config;
pub mod engine;
pub mod roster;
