//! # trendboard
//!
//! A user-ranking HTTP service: trending/leaderboard queries, username
//! search, and account registration/login over a flat collection of user
//! records held in a hosted real-time database.
//!
//! ## Architecture
//!
//! Every ranking request runs the same pipeline over a fresh snapshot:
//!
//! ```text
//!   ┌──────────────┐    fetch_all()    ┌──────────────────────────────┐
//!   │ Record Store │ ────────────────▶ │        Query Pipeline        │
//!   │ (REST / mem) │                   │  active ▸ timeframe ▸ points │
//!   └──────────────┘                   └──────────────┬───────────────┘
//!                                                     │ score(record, now)
//!                                      ┌──────────────▼───────────────┐
//!                                      │   Scoring Strategy Registry  │
//!                                      │ hackernews reddit velocity … │
//!                                      └──────────────┬───────────────┘
//!                                                     │ stable sort desc
//!                                                     │ truncate ▸ rank
//!                                      ┌──────────────▼───────────────┐
//!                                      │     Response Assembler       │
//!                                      └──────────────────────────────┘
//! ```
//!
//! The search endpoint is a sibling pipeline sharing the active-only filter
//! and limit handling, substituting tiered string matching for scoring.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration (`TRENDBOARD_*`)
//! - [`models`] - `UserRecord`, `RankedEntry`, request/response types
//! - [`store`] - The record-store trait plus REST and in-memory backends
//! - [`ranking::score`] - The scoring strategy registry
//! - [`ranking::pipeline`] - Filter/score/sort/rank over a snapshot
//! - [`ranking::search`] - Case-insensitive search with relevance tiers
//! - [`accounts`] - Payload decoder chain, registration/login, sessions
//! - [`api`] - Axum HTTP handlers
//! - [`error`] - The error taxonomy and its HTTP envelope
//! - [`state`] - Shared application state

pub mod accounts;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod ranking;
pub mod state;
pub mod store;
