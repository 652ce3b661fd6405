use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use std::sync::Arc;

use super::dto::*;
use super::error::ApiError;
use super::state::AppState;
use crate::engine::{self, pagination};
use crate::roster::EmployeeFilter;

/// POST /chat - Ask a question about the roster
///
/// Any well-formed body answers 200; routing failures and upstream errors
/// are reply text. An unreadable body is a 400.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    req: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = req?;
    let reply = engine::answer(&req.query, &state.ctx).await;
    Ok(Json(reply.into()))
}

/// GET /employees/search - Structured filtering with paging
pub async fn search_employees(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<EmployeeFilter>, QueryRejection>,
    paging: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(filter) = filter?;
    let Query(paging) = paging?;
    let (page, limit) = paging.validate().map_err(ApiError::BadRequest)?;

    let matched = filter.apply(state.ctx.metadata());
    let window = pagination::window(&matched, page, limit);
    tracing::debug!(total = window.total, page, limit, "employee search");

    Ok(Json(SearchResponse {
        total: window.total,
        page,
        limit,
        results: window.items.iter().map(|&e| e.clone()).collect(),
    }))
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        employees: state.ctx.len(),
    })
}
