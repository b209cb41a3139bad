// Library root: re-exports all modules so integration tests and the
// embedding UI/report layers can access the crate's public API.

pub mod config;
pub mod court;
pub mod game;
pub mod stats;
