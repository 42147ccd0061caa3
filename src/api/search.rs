use axum::extract::{Query, State};
use axum::Json;

use crate::error::ApiError;
use crate::models::{SearchParams, SearchResponse};
use crate::ranking::pipeline::parse_limit;
use crate::ranking::search::{search, SearchField, SearchQuery};
use crate::state::AppState;

/// GET /api/users/search - Substring search over one field with
/// exact > prefix > substring relevance ordering.
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = SearchQuery {
        query: params.q.unwrap_or_default(),
        field: SearchField::parse(params.field.as_deref())?,
        limit: parse_limit(
            params.limit.as_deref(),
            state.config.default_search_limit,
            state.config.max_limit,
        ),
    };

    let records = state.store.fetch_all().await?;
    let outcome = search(records, &query)?;

    Ok(Json(SearchResponse {
        success: true,
        query: query.query.trim().to_string(),
        field: query.field.as_str().to_string(),
        count: outcome.results.len(),
        total_matches: outcome.total_matches,
        results: outcome.results,
    }))
}
