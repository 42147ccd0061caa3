use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::accounts::service;
use crate::error::ApiError;
use crate::models::{CheckUsernameParams, PublicUser, VerifyRequest};
use crate::state::AppState;

/// Proxy-supplied address first, socket address as fallback.
fn client_ip(headers: &HeaderMap, addr: &SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| addr.ip().to_string())
}

/// POST /api/register - Create an account. The body may be any of the
/// supported payload shapes; the decoder chain normalizes it.
pub async fn register(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let ip = client_ip(&headers, &addr);
    let now_ms = Utc::now().timestamp_millis();
    let user = service::register(
        state.store.as_ref(),
        &state.reg_limiter,
        &ip,
        &body,
        now_ms,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "user": PublicUser::from(&user) })),
    ))
}

/// POST /api/login - Verify credentials and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<Value>, ApiError> {
    let now_ms = Utc::now().timestamp_millis();
    let (token, user) =
        service::login(state.store.as_ref(), &state.sessions, &body, now_ms).await?;

    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": PublicUser::from(&user),
    })))
}

/// POST /api/verify - Check a session token. Always 200; `valid` carries
/// the verdict.
pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Json<Value> {
    let now_ms = Utc::now().timestamp_millis();
    match state.sessions.verify(&req.token, now_ms) {
        Some(session) => Json(json!({
            "success": true,
            "valid": true,
            "username": session.username,
            "userId": session.user_id,
            "expiresAt": session.expires_at_ms,
        })),
        None => Json(json!({ "success": true, "valid": false })),
    }
}

/// GET /api/users/check - Username availability (case-insensitive).
pub async fn check_username(
    State(state): State<AppState>,
    Query(params): Query<CheckUsernameParams>,
) -> Result<Json<Value>, ApiError> {
    let username = params.username.unwrap_or_default();
    let available = service::username_available(state.store.as_ref(), &username).await?;

    Ok(Json(json!({
        "success": true,
        "username": username.trim(),
        "available": available,
    })))
}
