//! Account operations: registration, login, duplicate checks.
//!
//! These are plain async functions over the store so the HTTP handlers stay
//! thin and the flows are testable without a server.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use uuid::Uuid;

use crate::accounts::decode::{decode_credentials, Credentials};
use crate::accounts::rate_limit::RegistrationLimiter;
use crate::accounts::tokens::SessionStore;
use crate::error::ApiError;
use crate::models::UserRecord;
use crate::store::RecordStore;

/// Base64 obfuscation only, kept for compatibility with the legacy store
/// format. Real password hashing is an explicit non-goal.
pub fn encode_password(password: &str) -> String {
    STANDARD.encode(password)
}

fn validate(creds: &Credentials) -> Result<(), ApiError> {
    let name = creds.username.trim();
    if name.len() < 3 || name.len() > 32 {
        return Err(ApiError::Validation(
            "username must be 3-32 characters".to_string(),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(ApiError::Validation(
            "username may only contain letters, digits, '_', '-' and '.'".to_string(),
        ));
    }
    if creds.password.len() < 6 {
        return Err(ApiError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

/// Uniqueness is by convention case-insensitive.
async fn username_taken(store: &dyn RecordStore, username: &str) -> Result<bool, ApiError> {
    let needle = username.to_lowercase();
    let records = store.fetch_all().await?;
    Ok(records
        .iter()
        .any(|r| r.username.to_lowercase() == needle))
}

pub async fn register(
    store: &dyn RecordStore,
    limiter: &RegistrationLimiter,
    client_ip: &str,
    body: &str,
    now_ms: i64,
) -> Result<UserRecord, ApiError> {
    if let Err(retry_after_secs) = limiter.check_and_record(client_ip) {
        tracing::warn!("registration rate limit hit for {client_ip}");
        return Err(ApiError::RateLimited { retry_after_secs });
    }

    let creds = decode_credentials(body)?;
    validate(&creds)?;

    let username = creds.username.trim().to_string();
    if username_taken(store, &username).await? {
        return Err(ApiError::UsernameTaken(username));
    }

    let record = UserRecord {
        id: Uuid::new_v4().to_string(),
        username,
        points: 0,
        submissions: 0,
        created_at: Some(now_ms),
        last_active: Some(now_ms),
        is_active: true,
        email: creds.email,
        password: Some(encode_password(&creds.password)),
    };

    store.insert(record.clone()).await?;
    tracing::info!("registered user '{}'", record.username);
    Ok(record)
}

pub async fn login(
    store: &dyn RecordStore,
    sessions: &SessionStore,
    body: &str,
    now_ms: i64,
) -> Result<(String, UserRecord), ApiError> {
    let creds = decode_credentials(body)?;
    let needle = creds.username.trim().to_lowercase();
    let encoded = encode_password(&creds.password);

    let records = store.fetch_all().await?;
    let user = records
        .into_iter()
        .filter(|r| r.is_active)
        .find(|r| r.username.to_lowercase() == needle)
        .ok_or(ApiError::Unauthorized)?;

    if user.password.as_deref() != Some(encoded.as_str()) {
        return Err(ApiError::Unauthorized);
    }

    // Best-effort: a failed touch must not fail the login.
    if let Err(e) = store.touch_last_active(&user.id, now_ms).await {
        tracing::warn!("failed to update lastActive for '{}': {e}", user.username);
    }

    let token = sessions.issue(&user.id, &user.username, now_ms);
    Ok((token, user))
}

pub async fn username_available(
    store: &dyn RecordStore,
    username: &str,
) -> Result<bool, ApiError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ApiError::Validation("username is required".to_string()));
    }
    Ok(!username_taken(store, username).await?)
}
