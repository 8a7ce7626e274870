use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::Pagination;
use crate::domain::institution::models::Institution;
use crate::inbound::http::router::AppState;

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

pub async fn list_institutions(
    State(state): State<AppState>,
    Query(params): Query<ListInstitutionsParams>,
) -> Result<ApiSuccess<InstitutionsListResponse>, ApiError> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let result = state
        .institution_service
        .list(page, limit)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        InstitutionsListResponse {
            institutions: result.institutions,
            pagination: Pagination::new(page, limit, result.total),
        },
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListInstitutionsParams {
    page: Option<u64>,
    limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstitutionsListResponse {
    pub institutions: Vec<Institution>,
    pub pagination: Pagination,
}
