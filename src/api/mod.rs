//! Axum HTTP handlers. Thin glue: extract parameters, fetch the snapshot,
//! call into the ranking/account core, shape the envelope.

pub mod accounts;
pub mod rankings;
pub mod search;
