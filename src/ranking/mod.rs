//! The ranking core: a pluggable scoring engine over user-record snapshots,
//! decoupled from storage and transport.

pub mod pipeline;
pub mod score;
pub mod search;
