use roster_types::Employee;
use serde::{Deserialize, Serialize};

use crate::engine::{ChatReply, IntentKind};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

/// POST /chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

/// POST /chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub matches: Vec<Employee>,
    pub intent: IntentKind,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            response: reply.response,
            matches: reply.matches,
            intent: reply.intent,
        }
    }
}

/// Paging half of the GET /employees/search query string; the filter half
/// is `EmployeeFilter`, extracted from the same string.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl PageParams {
    /// Defaults applied, then `page >= 1` and `1 <= limit <= MAX_LIMIT` checked.
    pub fn validate(&self) -> Result<(usize, usize), String> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            return Err("page must be at least 1".into());
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(format!("limit must be between 1 and {MAX_LIMIT}"));
        }
        Ok((page, limit))
    }
}

/// GET /employees/search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub results: Vec<Employee>,
}

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub employees: usize,
}
