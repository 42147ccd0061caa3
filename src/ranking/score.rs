//! The scoring strategy registry.
//!
//! Each algorithm is a pure function of `(record, context)`; higher scores
//! rank first. The registry is built once at startup and never mutated, so
//! adding an algorithm means one `register` call, not another arm in a
//! conditional.

use std::collections::HashMap;

use crate::error::ApiError;
use crate::models::UserRecord;

const HOUR_MS: f64 = 3_600_000.0;
const DAY_MS: f64 = 86_400_000.0;

/// Single consistent "current time" for one query. Every scoring call within
/// a request sees the same `now`, which keeps results deterministic in tests.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext {
    pub now_ms: i64,
}

pub type ScoreFn = fn(&UserRecord, &ScoringContext) -> f64;

/// One registered algorithm: its scoring function plus whether it needs
/// `createdAt` to produce a meaningful score. Records lacking the field are
/// filtered by the pipeline, never treated as an error.
#[derive(Clone, Copy, Debug)]
pub struct Strategy {
    pub score: ScoreFn,
    pub needs_created_at: bool,
}

pub struct ScoreRegistry {
    strategies: HashMap<&'static str, Strategy>,
}

pub const DEFAULT_ALGORITHM: &str = "hackernews";

/// The unnamed/simple mode used by the leaderboard endpoint.
pub const SIMPLE_ALGORITHM: &str = "simple";

impl ScoreRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            strategies: HashMap::new(),
        };
        registry.register("hackernews", hackernews, true);
        registry.register("reddit", reddit, true);
        registry.register("velocity", velocity, true);
        registry.register("new", newest, true);
        registry.register("top", top, false);
        registry.register("active", active, false);
        registry.register("efficient", efficient, true);
        registry.register("recent", recent, true);
        registry.register(SIMPLE_ALGORITHM, simple, true);
        registry
    }

    fn register(&mut self, name: &'static str, score: ScoreFn, needs_created_at: bool) {
        self.strategies.insert(
            name,
            Strategy {
                score,
                needs_created_at,
            },
        );
    }

    pub fn resolve(&self, name: &str) -> Result<Strategy, ApiError> {
        self.strategies
            .get(name)
            .copied()
            .ok_or_else(|| ApiError::InvalidAlgorithm {
                given: name.to_string(),
                available: self.available(),
            })
    }

    /// Known algorithm names, sorted for stable error messages.
    pub fn available(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.strategies.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for ScoreRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Round to 4 decimal places for display. Sorting always uses the
/// full-precision value; rounding earlier would manufacture ties.
pub fn round4(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

fn age_hours(record: &UserRecord, ctx: &ScoringContext) -> f64 {
    let created = record.created_at.unwrap_or(ctx.now_ms);
    ((ctx.now_ms - created).max(0)) as f64 / HOUR_MS
}

fn age_days(record: &UserRecord, ctx: &ScoringContext) -> f64 {
    let created = record.created_at.unwrap_or(ctx.now_ms);
    ((ctx.now_ms - created).max(0)) as f64 / DAY_MS
}

/// Gravity decay: `(points + 2*submissions) / (age + 2)^1.8`. The +2 offset
/// keeps brand-new records finite.
fn hackernews(record: &UserRecord, ctx: &ScoringContext) -> f64 {
    let base = (record.points + 2 * record.submissions) as f64;
    base / (age_hours(record, ctx) + 2.0).powf(1.8)
}

fn reddit(record: &UserRecord, ctx: &ScoringContext) -> f64 {
    let sign = if record.points > 0 { 1.0 } else { -1.0 };
    let order = (record.points.abs().max(1) as f64).log10();
    sign * order + age_hours(record, ctx) * 3_600.0 / 45_000.0
}

fn velocity(record: &UserRecord, ctx: &ScoringContext) -> f64 {
    let hours = age_hours(record, ctx).max(1.0);
    let pph = record.points as f64 / hours;
    let sph = record.submissions as f64 / hours;
    pph * (1.0 + sph)
}

/// Newest first: negative age, so fresher records sort higher.
fn newest(record: &UserRecord, ctx: &ScoringContext) -> f64 {
    let created = record.created_at.unwrap_or(ctx.now_ms);
    -(((ctx.now_ms - created).max(0)) as f64)
}

fn top(record: &UserRecord, _ctx: &ScoringContext) -> f64 {
    record.points as f64
}

fn active(record: &UserRecord, _ctx: &ScoringContext) -> f64 {
    record.submissions as f64
}

fn efficient(record: &UserRecord, ctx: &ScoringContext) -> f64 {
    record.points as f64 / age_days(record, ctx).max(1.0)
}

fn recent(record: &UserRecord, _ctx: &ScoringContext) -> f64 {
    record.last_active_ms() as f64
}

fn simple(record: &UserRecord, ctx: &ScoringContext) -> f64 {
    record.points as f64 / age_hours(record, ctx).max(1.0)
}
