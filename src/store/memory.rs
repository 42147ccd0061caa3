use async_trait::async_trait;
use parking_lot::RwLock;

use crate::models::UserRecord;
use crate::store::{RecordStore, StoreError};

/// In-memory record store for local runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<UserRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.records.read().clone())
    }

    async fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        self.records.write().push(record);
        Ok(())
    }

    async fn touch_last_active(&self, id: &str, now_ms: i64) -> Result<(), StoreError> {
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.last_active = Some(now_ms);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}
