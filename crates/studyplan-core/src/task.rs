//! Task and study-session types.
//!
//! These are the two persisted record types of the planner. Tasks are created
//! and edited by the user; study sessions are recorded exactly once when a
//! focus interval finishes and are immutable thereafter. Both serialize with
//! camelCase field names, which is the wire format the request surfaces and
//! the storage layer share.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task priority.
///
/// A closed enum rather than a free-form string so invalid values cannot
/// exist past the parsing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Ranking used for deadline tie-breaks in the scheduler.
    ///
    /// A task without a priority ranks 0, i.e. sorts after every ranked task
    /// with the same deadline.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A unit of study work with a deadline and an estimate of remaining hours.
///
/// `estimated_hours` must be positive for any task entering the scheduler;
/// the storage layer enforces this on create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub estimated_hours: f64,
    pub deadline: NaiveDate,
    pub priority: Option<Priority>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Priority rank with the missing-priority fallback applied.
    pub fn priority_rank(&self) -> u8 {
        self.priority.map(Priority::rank).unwrap_or(0)
    }
}

/// A completed timed focus interval.
///
/// `task_id` may dangle: deleting a task does not delete the sessions that
/// were recorded against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub task_id: String,
    /// Duration in minutes.
    #[serde(rename = "duration")]
    pub duration_min: u32,
    pub completed_at: DateTime<Utc>,
}
