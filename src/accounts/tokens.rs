//! Opaque session tokens held in an in-memory map with a TTL.
//!
//! Tokens survive only for the life of the process; real session security
//! is out of scope for this service.

use std::collections::HashMap;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use parking_lot::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub expires_at_ms: i64,
}

pub struct SessionStore {
    ttl_ms: i64,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl_ms: ttl_secs as i64 * 1_000,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a fresh token for a user.
    pub fn issue(&self, user_id: &str, username: &str, now_ms: i64) -> String {
        let token = URL_SAFE_NO_PAD.encode(format!("{}:{now_ms}", Uuid::new_v4()));
        let session = Session {
            user_id: user_id.to_string(),
            username: username.to_string(),
            expires_at_ms: now_ms + self.ttl_ms,
        };
        self.sessions.write().insert(token.clone(), session);
        token
    }

    /// Look up a token, purging it if expired.
    pub fn verify(&self, token: &str, now_ms: i64) -> Option<Session> {
        let mut sessions = self.sessions.write();
        match sessions.get(token) {
            Some(session) if session.expires_at_ms > now_ms => Some(session.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }
}
