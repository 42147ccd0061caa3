//! The record store: the external collection of user records.
//!
//! The ranking core never talks to storage directly; it receives a snapshot
//! from a [`RecordStore`]. Production uses the REST-backed [`rest::RestStore`]
//! against the hosted real-time database, tests and local runs use
//! [`memory::MemoryStore`].

pub mod memory;
pub mod rest;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::UserRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store returned malformed data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("store rejected the request with status {0}")]
    Status(u16),

    #[error("no record with id '{0}'")]
    NotFound(String),
}

/// The full-snapshot interface every handler goes through. One fetch per
/// request; the pipeline never streams or pages.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every user record in the store.
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Insert a freshly registered record.
    async fn insert(&self, record: UserRecord) -> Result<(), StoreError>;

    /// Update a record's `lastActive` timestamp.
    async fn touch_last_active(&self, id: &str, now_ms: i64) -> Result<(), StoreError>;
}
