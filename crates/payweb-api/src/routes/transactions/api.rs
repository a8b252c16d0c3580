//! Transactions API endpoint - same view as the page, as JSON

use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::Json;
use payweb_core::{RawQuery, TransactionsPage, ViewQuery};
use std::collections::HashMap;

/// Sorted, paginated transactions (JSON API)
///
/// Accepts the same `page`, `sortBy` and `order` parameters as the page.
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TransactionsPage>, ApiError> {
    let query = ViewQuery::from_raw(&RawQuery::from_params(&params));
    let page = state.service.page(&query).await.map_err(ApiError::Json)?;
    Ok(Json(page))
}
