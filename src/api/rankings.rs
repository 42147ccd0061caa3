use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;

use crate::error::ApiError;
use crate::models::{LeaderboardResponse, RankingParams, TrendingResponse};
use crate::ranking::pipeline::{parse_limit, parse_min_points, rank, RankQuery, Timeframe};
use crate::ranking::score::{DEFAULT_ALGORITHM, SIMPLE_ALGORITHM};
use crate::state::AppState;

/// GET /api/trending - Rank the whole table with a selectable algorithm.
pub async fn trending(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> Result<Json<TrendingResponse>, ApiError> {
    let algorithm = params
        .algorithm
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ALGORITHM)
        .to_string();

    let query = RankQuery {
        algorithm: algorithm.clone(),
        timeframe: Timeframe::parse(params.timeframe.as_deref()),
        min_points: parse_min_points(params.min_points.as_deref())?,
        limit: parse_limit(
            params.limit.as_deref(),
            state.config.default_rank_limit,
            state.config.max_limit,
        ),
    };

    let records = state.store.fetch_all().await?;
    let now_ms = Utc::now().timestamp_millis();
    let ranking = rank(&state.registry, records, &query, now_ms)?;

    tracing::debug!(
        "trending algorithm={algorithm} analyzed={} returned={}",
        ranking.total_analyzed,
        ranking.entries.len()
    );

    Ok(Json(TrendingResponse {
        success: true,
        algorithm,
        timeframe: params.timeframe.unwrap_or_else(|| "all".to_string()),
        total_analyzed: ranking.total_analyzed,
        trending: ranking.entries,
    }))
}

/// GET /api/leaderboard - Points-per-hour ranking (the unnamed simple mode).
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let query = RankQuery {
        algorithm: SIMPLE_ALGORITHM.to_string(),
        timeframe: Timeframe::parse(params.timeframe.as_deref()),
        min_points: parse_min_points(params.min_points.as_deref())?,
        limit: parse_limit(
            params.limit.as_deref(),
            state.config.default_rank_limit,
            state.config.max_limit,
        ),
    };

    let records = state.store.fetch_all().await?;
    let now_ms = Utc::now().timestamp_millis();
    let ranking = rank(&state.registry, records, &query, now_ms)?;

    Ok(Json(LeaderboardResponse {
        success: true,
        timeframe: params.timeframe.unwrap_or_else(|| "all".to_string()),
        total: ranking.total_analyzed,
        leaderboard: ranking.entries,
    }))
}
