use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::json;

use crate::config::StoreConfig;
use crate::models::UserRecord;
use crate::store::{RecordStore, StoreError};

/// REST client for the hosted real-time database.
///
/// The table lives at `<base>/users.json` and is returned as an id-keyed
/// object (`{ "<id>": { ...record } }`), or `null` when empty. Individual
/// records are addressed as `<base>/users/<id>.json`.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RestStore {
    pub fn new(config: &StoreConfig, base_url: String) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        match &self.auth_token {
            Some(token) => format!("{}/{path}.json?auth={token}", self.base_url),
            None => format!("{}/{path}.json", self.base_url),
        }
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let resp = self.client.get(self.url("users")).send().await?;
        if !resp.status().is_success() {
            return Err(StoreError::Status(resp.status().as_u16()));
        }

        let body: serde_json::Value = resp.json().await?;
        if body.is_null() {
            return Ok(Vec::new());
        }

        // The table key is authoritative for the id; records written by older
        // clients sometimes omit the embedded one.
        let map: HashMap<String, UserRecord> = serde_json::from_value(body)?;
        let records = map
            .into_iter()
            .map(|(id, mut record)| {
                if record.id.is_empty() {
                    record.id = id;
                }
                record
            })
            .collect();

        Ok(records)
    }

    async fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        let url = self.url(&format!("users/{}", record.id));
        let resp = self.client.put(url).json(&record).send().await?;
        if !resp.status().is_success() {
            return Err(StoreError::Status(resp.status().as_u16()));
        }
        Ok(())
    }

    async fn touch_last_active(&self, id: &str, now_ms: i64) -> Result<(), StoreError> {
        let url = self.url(&format!("users/{id}"));
        let resp = self
            .client
            .patch(url)
            .json(&json!({ "lastActive": now_ms }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(StoreError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}
