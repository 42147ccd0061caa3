use serde::{Deserialize, Serialize};

/// A user record as stored in the hosted real-time database.
///
/// Wire names are camelCase to match the legacy store format. Numeric
/// timestamps are epoch milliseconds. `password` is the stored credential
/// (base64-obscured) and must never be echoed back in any ranking or
/// search payload; those paths use [`RankedEntry`] / [`SearchEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub submissions: i64,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub last_active: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

fn default_true() -> bool {
    true
}

impl UserRecord {
    /// `lastActive` with the documented fallback chain: `createdAt`, then 0.
    pub fn last_active_ms(&self) -> i64 {
        self.last_active.or(self.created_at).unwrap_or(0)
    }
}

/// One entry of a ranked response. Built fresh per query, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub rank: usize,
    pub id: String,
    pub username: String,
    pub points: i64,
    pub submissions: i64,
    /// Rounded to 4 decimal places for display; ordering used full precision.
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active: Option<i64>,
}

/// One entry of a search response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub id: String,
    pub username: String,
    pub points: i64,
    pub submissions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active: Option<i64>,
}

impl From<&UserRecord> for SearchEntry {
    fn from(r: &UserRecord) -> Self {
        Self {
            id: r.id.clone(),
            username: r.username.clone(),
            points: r.points,
            submissions: r.submissions,
            created_at: r.created_at,
            last_active: r.last_active,
        }
    }
}

/// Public view of a user, returned by the account endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub points: i64,
    pub submissions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active: Option<i64>,
}

impl From<&UserRecord> for PublicUser {
    fn from(r: &UserRecord) -> Self {
        Self {
            id: r.id.clone(),
            username: r.username.clone(),
            points: r.points,
            submissions: r.submissions,
            created_at: r.created_at,
            last_active: r.last_active,
        }
    }
}

/// Query parameters for the ranking endpoints.
///
/// Everything is an `Option<String>` so a malformed value never fails
/// extraction: `limit` silently falls back to the endpoint default, while
/// `minPoints` is validated in the handler with a descriptive 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingParams {
    pub algorithm: Option<String>,
    pub timeframe: Option<String>,
    #[serde(rename = "minPoints")]
    pub min_points: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters for `GET /api/users/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(alias = "query")]
    pub q: Option<String>,
    pub field: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters for `GET /api/users/check`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckUsernameParams {
    pub username: Option<String>,
}

/// Body of `POST /api/verify`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

/// `GET /api/trending` response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingResponse {
    pub success: bool,
    pub algorithm: String,
    pub timeframe: String,
    pub total_analyzed: usize,
    pub trending: Vec<RankedEntry>,
}

/// `GET /api/leaderboard` response envelope.
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub success: bool,
    pub timeframe: String,
    pub total: usize,
    pub leaderboard: Vec<RankedEntry>,
}

/// `GET /api/users/search` response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub field: String,
    pub count: usize,
    pub total_matches: usize,
    pub results: Vec<SearchEntry>,
}
