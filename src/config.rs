use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Record store configuration
    pub store: StoreConfig,
    /// Default result count for ranking endpoints
    pub default_rank_limit: usize,
    /// Default result count for the search endpoint
    pub default_search_limit: usize,
    /// Hard cap applied to any requested limit
    pub max_limit: usize,
    /// Session token lifetime in seconds
    pub token_ttl_secs: u64,
    /// Registrations allowed per IP within the window
    pub reg_max_per_ip: u32,
    /// Registration rate-limit window in seconds
    pub reg_window_secs: u64,
}

/// Configuration for the hosted real-time database holding user records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the database REST endpoint (e.g. "https://x.firebaseio.com").
    /// If None, an in-memory store is used (local runs and tests).
    pub base_url: Option<String>,
    /// Auth token appended to store requests
    pub auth_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_token: None,
            timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            store: StoreConfig::default(),
            default_rank_limit: 10,
            default_search_limit: 20,
            max_limit: 100,
            token_ttl_secs: 86_400,
            reg_max_per_ip: 5,
            reg_window_secs: 3_600,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("TRENDBOARD_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(url) = std::env::var("TRENDBOARD_STORE_URL") {
            config.store.base_url = Some(url);
        }
        if let Ok(token) = std::env::var("TRENDBOARD_STORE_AUTH") {
            config.store.auth_token = Some(token);
        }
        if let Ok(val) = std::env::var("TRENDBOARD_STORE_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.store.timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("TRENDBOARD_RANK_LIMIT") {
            if let Ok(v) = val.parse() {
                config.default_rank_limit = v;
            }
        }
        if let Ok(val) = std::env::var("TRENDBOARD_SEARCH_LIMIT") {
            if let Ok(v) = val.parse() {
                config.default_search_limit = v;
            }
        }
        if let Ok(val) = std::env::var("TRENDBOARD_MAX_LIMIT") {
            if let Ok(v) = val.parse() {
                config.max_limit = v;
            }
        }
        if let Ok(val) = std::env::var("TRENDBOARD_TOKEN_TTL_SECS") {
            if let Ok(v) = val.parse() {
                config.token_ttl_secs = v;
            }
        }
        if let Ok(val) = std::env::var("TRENDBOARD_REG_MAX_PER_IP") {
            if let Ok(v) = val.parse() {
                config.reg_max_per_ip = v;
            }
        }
        if let Ok(val) = std::env::var("TRENDBOARD_REG_WINDOW_SECS") {
            if let Ok(v) = val.parse() {
                config.reg_window_secs = v;
            }
        }

        config
    }
}
