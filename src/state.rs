use std::sync::Arc;
use std::time::Duration;

use crate::accounts::rate_limit::RegistrationLimiter;
use crate::accounts::tokens::SessionStore;
use crate::config::Config;
use crate::ranking::score::ScoreRegistry;
use crate::store::memory::MemoryStore;
use crate::store::rest::RestStore;
use crate::store::RecordStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
    pub registry: Arc<ScoreRegistry>,
    pub sessions: Arc<SessionStore>,
    pub reg_limiter: Arc<RegistrationLimiter>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn RecordStore> = match &config.store.base_url {
            Some(base_url) => {
                tracing::info!("using REST record store at {base_url}");
                Arc::new(RestStore::new(&config.store, base_url.clone())?)
            }
            None => {
                tracing::warn!("no store URL configured, using in-memory record store");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self {
            registry: Arc::new(ScoreRegistry::with_defaults()),
            sessions: Arc::new(SessionStore::new(config.token_ttl_secs)),
            reg_limiter: Arc::new(RegistrationLimiter::new(
                config.reg_max_per_ip,
                Duration::from_secs(config.reg_window_secs),
            )),
            store,
            config,
        })
    }
}
