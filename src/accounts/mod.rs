//! The account surface: payload decoding, registration, login, sessions.

pub mod decode;
pub mod rate_limit;
pub mod service;
pub mod tokens;
