//! CLI command implementations.
//!
//! Each command is the boundary layer for the pure core: it resolves the
//! user, fetches task/session snapshots from storage, and passes them into
//! the scheduler or the analytics aggregator.

pub mod analytics;
pub mod config;
pub mod schedule;
pub mod session;
pub mod task;

use studyplan_core::Config;

/// Resolve the user id the CLI operates as.
///
/// STUDYPLAN_USER wins over the configured user; without either the CLI is
/// a single-user tool under the id "default".
pub fn current_user(config: &Config) -> String {
    std::env::var("STUDYPLAN_USER")
        .ok()
        .or_else(|| config.user.clone())
        .unwrap_or_else(|| "default".to_string())
}
