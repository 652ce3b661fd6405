use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::config::EngineConfig;
use super::resolver::{FieldKeyword, detect_field};

static ALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9\s\-.,?!']+$").expect("allowed-characters regex is valid")
});
static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]+\b").expect("number regex is valid"));

/// Shortest query worth routing, in characters.
pub const MIN_QUERY_CHARS: usize = 3;

/// Why a query was rejected before retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    TooShort,
    DisallowedCharacters,
    NoLetters,
}

impl MalformedReason {
    /// Fixed guidance text returned instead of an answer.
    pub fn guidance(self) -> &'static str {
        match self {
            MalformedReason::TooShort => "❌ Please enter a valid query so I can assist you.",
            MalformedReason::DisallowedCharacters | MalformedReason::NoLetters => {
                "🤖 That doesn't look like a valid question. Try something like: *'Find React developers in Berlin'*"
            }
        }
    }
}

/// Classified purpose of a query, carrying what its resolver needs.
///
/// Precedence, first match wins:
///
/// | # | Intent           | Rule                                                        |
/// |---|------------------|-------------------------------------------------------------|
/// | 1 | `Malformed`      | < 3 chars, a char outside `[a-zA-Z0-9\s\-.,?!']`, no letter  |
/// | 2 | `ListRequest`    | "employee names" / "list employees" / list+employees / show+employees |
/// | 3 | `ContactLookup`  | any field keyword ("email", "phone", ...)                    |
/// | 4 | `SemanticSearch` | everything else                                             |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    Malformed(MalformedReason),
    ListRequest { k: usize },
    ContactLookup { field: FieldKeyword, k: usize },
    SemanticSearch { k: usize },
}

/// Payload-free intent tag, reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Malformed,
    ListRequest,
    ContactLookup,
    SemanticSearch,
}

impl QueryIntent {
    pub fn kind(&self) -> IntentKind {
        match self {
            QueryIntent::Malformed(_) => IntentKind::Malformed,
            QueryIntent::ListRequest { .. } => IntentKind::ListRequest,
            QueryIntent::ContactLookup { .. } => IntentKind::ContactLookup,
            QueryIntent::SemanticSearch { .. } => IntentKind::SemanticSearch,
        }
    }
}

/// Classify a raw query against a store of `total_records` employees.
pub fn classify(query: &str, total_records: usize, config: &EngineConfig) -> QueryIntent {
    let query = query.trim();

    if let Some(reason) = check_malformed(query) {
        return QueryIntent::Malformed(reason);
    }

    let lower = query.to_lowercase();

    if is_list_request(&lower) {
        let k = extract_top_k(&lower, config.list_default_k, total_records);
        return QueryIntent::ListRequest { k };
    }

    let k = extract_top_k(&lower, config.semantic_default_k, total_records);
    match detect_field(&lower) {
        Some(field) => QueryIntent::ContactLookup { field, k },
        None => QueryIntent::SemanticSearch { k },
    }
}

/// Length, character set, then letters.
pub fn check_malformed(query: &str) -> Option<MalformedReason> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Some(MalformedReason::TooShort);
    }
    if !ALLOWED_CHARS.is_match(query) {
        return Some(MalformedReason::DisallowedCharacters);
    }
    if !query.chars().any(|c| c.is_ascii_alphabetic()) {
        return Some(MalformedReason::NoLetters);
    }
    None
}

/// Expects a case-folded query.
fn is_list_request(lower: &str) -> bool {
    lower.contains("employee names")
        || lower.contains("list employees")
        || (lower.contains("list") && lower.contains("employees"))
        || (lower.contains("show") && lower.contains("employees"))
}

/// Requested result count: the first standalone integer in the query, or
/// `default` when there is none, clamped to `[1, max_k]`.
///
/// A number too large to represent saturates to `max_k`. Every call site
/// goes through this one function.
pub fn extract_top_k(query: &str, default: usize, max_k: usize) -> usize {
    let max_k = max_k.max(1);
    let requested = NUMBER_TOKEN
        .find(query)
        .map(|m| m.as_str().parse::<usize>().unwrap_or(max_k))
        .unwrap_or(default);

    requested.clamp(1, max_k)
}
