//! # Studyplan Core Library
//!
//! This library provides the core business logic for the Studyplan study
//! planner. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI being a thin layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Scheduler**: A pure, deterministic generator that packs incomplete
//!   tasks into a day-by-day study plan under a daily hour budget
//! - **Analytics**: A pure aggregator that turns task/session snapshots into
//!   summary counters, a per-subject breakdown, and a textual insight
//! - **Storage**: SQLite-based task/session storage and TOML-based
//!   configuration
//!
//! The scheduler and the analytics aggregator never touch storage themselves:
//! the caller fetches a consistent snapshot and passes it in, so both
//! components are trivially unit-testable and safe to call concurrently.
//!
//! ## Key Components
//!
//! - [`Scheduler`]: Greedy multi-day task packer
//! - [`compute_analytics`]: Task/session snapshot aggregator
//! - [`PlannerDb`]: Task and session persistence
//! - [`Config`]: Application configuration management

pub mod analytics;
pub mod error;
pub mod scheduler;
pub mod storage;
pub mod task;

pub use analytics::{compute_analytics, compute_analytics_at, AnalyticsSnapshot};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use scheduler::{generate_schedule, DayLabel, SchedulePlan, ScheduledSession, Scheduler};
pub use storage::{Config, PlannerDb};
pub use task::{Priority, StudySession, Task};
