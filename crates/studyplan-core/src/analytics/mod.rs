//! Analytics aggregation over task and session snapshots.
//!
//! Turns a user's full task/session history into:
//! - Task counters (total, completed, pending)
//! - Study volume in hours (all-time and trailing 7 days)
//! - A per-subject minute breakdown
//! - A templated textual insight chosen from the weekly volume
//!
//! Like the scheduler, this is pure computation: the caller passes in a
//! consistent snapshot and the aggregator neither reads storage nor keeps
//! state between calls.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{StudySession, Task};

/// Aggregated analytics over one user's tasks and sessions.
///
/// `study_by_subject` maps subject name to cumulative minutes and only
/// includes sessions whose task still exists; a `BTreeMap` keeps iteration
/// and JSON key order deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub total_hours: f64,
    pub week_hours: f64,
    pub study_by_subject: BTreeMap<String, u64>,
    pub insight: String,
}

/// Round to one decimal place.
///
/// Multiplies by 10 and applies `f64::round`, which rounds half away from
/// zero. The visible contract is one-decimal precision; the half-way rule is
/// this implementation's documented choice.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Subject key for sessions whose task has no subject set.
const FALLBACK_SUBJECT: &str = "Other";

/// Insight copy selected by weekly study volume, evaluated top-down.
fn insight_for(week_hours: f64) -> String {
    if week_hours >= 10.0 {
        format!("Amazing! You've studied {week_hours} hours this week. You're crushing it! 🔥")
    } else if week_hours >= 5.0 {
        format!("Great work! You've studied {week_hours} hours this week. Keep it up! 📚")
    } else if week_hours > 0.0 {
        format!("You've studied {week_hours} hours this week. Let's aim for more! 💪")
    } else {
        "No study sessions this week. Time to get started! 🚀".to_string()
    }
}

/// Aggregate analytics using the wall clock for the 7-day window.
pub fn compute_analytics(tasks: &[Task], sessions: &[StudySession]) -> AnalyticsSnapshot {
    compute_analytics_at(tasks, sessions, Utc::now())
}

/// Aggregate analytics with an explicit "now" for the 7-day window.
///
/// The window's lower bound (`now - 7 days`) is inclusive. Sessions whose
/// `task_id` no longer resolves against `tasks` still count toward the hour
/// totals but are excluded from the per-subject breakdown.
pub fn compute_analytics_at(
    tasks: &[Task],
    sessions: &[StudySession],
    now: DateTime<Utc>,
) -> AnalyticsSnapshot {
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|t| t.completed).count();
    let pending_tasks = total_tasks - completed_tasks;

    let total_minutes: u64 = sessions.iter().map(|s| u64::from(s.duration_min)).sum();

    let week_start = now - Duration::days(7);
    let week_minutes: u64 = sessions
        .iter()
        .filter(|s| s.completed_at >= week_start)
        .map(|s| u64::from(s.duration_min))
        .sum();

    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut study_by_subject: BTreeMap<String, u64> = BTreeMap::new();
    for session in sessions {
        if let Some(task) = by_id.get(session.task_id.as_str()) {
            let subject = if task.subject.is_empty() {
                FALLBACK_SUBJECT
            } else {
                task.subject.as_str()
            };
            *study_by_subject.entry(subject.to_string()).or_default() +=
                u64::from(session.duration_min);
        }
    }

    let week_hours = round1(week_minutes as f64 / 60.0);

    AnalyticsSnapshot {
        total_tasks,
        completed_tasks,
        pending_tasks,
        total_hours: round1(total_minutes as f64 / 60.0),
        week_hours,
        study_by_subject,
        insight: insight_for(week_hours),
    }
}
