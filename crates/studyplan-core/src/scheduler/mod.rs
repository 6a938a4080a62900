//! Greedy multi-day study scheduler.
//!
//! This module packs a user's incomplete tasks into day-sized study sessions:
//! - Orders tasks by deadline, breaking ties by priority
//! - Carves each task's remaining hours into sessions that fit the daily budget
//! - Rolls over to the next day whenever the budget is exhausted
//! - Labels each day for display ("Today", "Tomorrow", "Day N")
//!
//! The scheduler is a pure function over its inputs: it never mutates a task,
//! performs no I/O, and produces the same plan for the same snapshot.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Daily budget applied when the caller supplies a non-positive or
/// non-finite hours-per-day value.
pub const DEFAULT_HOURS_PER_DAY: f64 = 2.0;

/// Tolerance for "remaining hours reached zero" comparisons.
///
/// Repeated subtraction of carved amounts can leave a tiny floating-point
/// residue; without the epsilon the carve loop could emit zero-hour sessions.
const HOURS_EPSILON: f64 = 1e-9;

/// Display label for a scheduled day, 1-indexed past tomorrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    Today,
    Tomorrow,
    Day(u32),
}

impl DayLabel {
    /// Label for a 0-based day offset from today.
    pub fn from_offset(day: u32) -> Self {
        match day {
            0 => DayLabel::Today,
            1 => DayLabel::Tomorrow,
            n => DayLabel::Day(n + 1),
        }
    }
}

impl std::fmt::Display for DayLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayLabel::Today => write!(f, "Today"),
            DayLabel::Tomorrow => write!(f, "Tomorrow"),
            DayLabel::Day(n) => write!(f, "Day {n}"),
        }
    }
}

impl std::str::FromStr for DayLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Today" => Ok(DayLabel::Today),
            "Tomorrow" => Ok(DayLabel::Tomorrow),
            other => other
                .strip_prefix("Day ")
                .and_then(|n| n.parse().ok())
                .map(DayLabel::Day)
                .ok_or_else(|| format!("unknown day label: {other}")),
        }
    }
}

// On the wire a day label is its display string ("Day 3"), not a tagged enum.
impl Serialize for DayLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One planned study session for a task on a specific day.
///
/// Ephemeral scheduler output; produced fresh on every invocation and never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSession {
    pub task_id: String,
    pub task_title: String,
    pub subject: String,
    pub hours: f64,
    pub date: NaiveDate,
    pub day_label: DayLabel,
}

/// Scheduler output: the session sequence plus an optional informational
/// message for the no-incomplete-tasks case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePlan {
    pub schedule: Vec<ScheduledSession>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Greedy task packer with a fixed daily hour budget.
#[derive(Debug, Clone)]
pub struct Scheduler {
    hours_per_day: f64,
}

impl Scheduler {
    /// Create a scheduler with the given daily budget.
    ///
    /// Non-positive and non-finite values fall back to
    /// [`DEFAULT_HOURS_PER_DAY`]; any positive budget is accepted as-is.
    pub fn new(hours_per_day: f64) -> Self {
        let hours_per_day = if hours_per_day.is_finite() && hours_per_day > 0.0 {
            hours_per_day
        } else {
            DEFAULT_HOURS_PER_DAY
        };
        Self { hours_per_day }
    }

    /// The normalized daily budget.
    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    /// Generate a study plan for `tasks`, starting on `today`.
    ///
    /// Incomplete tasks are sorted by deadline (earliest first), ties broken
    /// by priority (highest first, unprioritized last); the sort is stable,
    /// so further ties keep their original order. Each task's estimated
    /// hours are then carved into sessions of at most the day's remaining
    /// budget, advancing to the next day whenever the budget runs out. A
    /// task spans as many days as its estimate needs; the next task
    /// continues on whatever budget the current day has left.
    ///
    /// With no incomplete task the plan is empty and carries a celebratory
    /// message instead.
    pub fn generate(&self, tasks: &[Task], today: NaiveDate) -> SchedulePlan {
        let mut pending: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();

        if pending.is_empty() {
            return SchedulePlan {
                schedule: Vec::new(),
                message: Some("All tasks completed! Great job! 🎉".to_string()),
            };
        }

        pending.sort_by(|a, b| {
            a.deadline
                .cmp(&b.deadline)
                .then_with(|| b.priority_rank().cmp(&a.priority_rank()))
        });

        let mut schedule = Vec::new();
        let mut current_day: u32 = 0;
        let mut remaining_today = self.hours_per_day;

        for task in pending {
            let mut remaining_task = task.estimated_hours;

            while remaining_task > HOURS_EPSILON {
                let hours = remaining_task.min(remaining_today);
                let date = today
                    .checked_add_days(Days::new(u64::from(current_day)))
                    .unwrap_or(today);

                schedule.push(ScheduledSession {
                    task_id: task.id.clone(),
                    task_title: task.title.clone(),
                    subject: task.subject.clone(),
                    hours,
                    date,
                    day_label: DayLabel::from_offset(current_day),
                });

                remaining_task -= hours;
                remaining_today -= hours;

                if remaining_today <= HOURS_EPSILON {
                    current_day += 1;
                    remaining_today = self.hours_per_day;
                }
            }
        }

        SchedulePlan {
            schedule,
            message: None,
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_HOURS_PER_DAY)
    }
}

/// Generate a plan starting from the current UTC date.
///
/// Convenience wrapper over [`Scheduler::generate`] for callers that do not
/// need to control the clock.
pub fn generate_schedule(tasks: &[Task], hours_per_day: f64) -> SchedulePlan {
    Scheduler::new(hours_per_day).generate(tasks, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::Utc;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn make_task(id: &str, hours: f64, deadline: NaiveDate, priority: Option<Priority>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            subject: "General".to_string(),
            estimated_hours: hours,
            deadline,
            priority,
            completed: false,
            created_at: Utc::now(),
        }
    }

    fn day(offset: u64) -> NaiveDate {
        start_date().checked_add_days(Days::new(offset)).unwrap()
    }

    fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn five_hour_task_splits_across_three_days() {
        let tasks = vec![make_task("1", 5.0, day(14), Some(Priority::Medium))];
        let plan = Scheduler::new(2.0).generate(&tasks, start_date());

        assert!(plan.message.is_none());
        assert_eq!(plan.schedule.len(), 3);

        assert_eq!(plan.schedule[0].hours, 2.0);
        assert_eq!(plan.schedule[0].date, day(0));
        assert_eq!(plan.schedule[0].day_label, DayLabel::Today);

        assert_eq!(plan.schedule[1].hours, 2.0);
        assert_eq!(plan.schedule[1].date, day(1));
        assert_eq!(plan.schedule[1].day_label, DayLabel::Tomorrow);

        assert_eq!(plan.schedule[2].hours, 1.0);
        assert_eq!(plan.schedule[2].date, day(2));
        assert_eq!(plan.schedule[2].day_label, DayLabel::Day(3));
        assert_eq!(plan.schedule[2].day_label.to_string(), "Day 3");
    }

    #[test]
    fn next_task_continues_on_partial_day() {
        let tasks = vec![
            make_task("a", 1.5, day(3), Some(Priority::High)),
            make_task("b", 1.0, day(5), Some(Priority::High)),
        ];
        let plan = Scheduler::new(2.0).generate(&tasks, start_date());

        // Task a leaves half an hour of today's budget for task b.
        assert_eq!(plan.schedule.len(), 3);
        assert_eq!(plan.schedule[0].task_id, "a");
        assert_eq!(plan.schedule[1].task_id, "b");
        assert_eq!(plan.schedule[1].hours, 0.5);
        assert_eq!(plan.schedule[1].date, day(0));
        assert_eq!(plan.schedule[2].task_id, "b");
        assert_eq!(plan.schedule[2].hours, 0.5);
        assert_eq!(plan.schedule[2].date, day(1));
    }

    #[test]
    fn deadline_orders_before_priority() {
        let tasks = vec![
            make_task("late-high", 1.0, day(9), Some(Priority::High)),
            make_task("early-low", 1.0, day(2), Some(Priority::Low)),
        ];
        let plan = Scheduler::new(4.0).generate(&tasks, start_date());

        assert_eq!(plan.schedule[0].task_id, "early-low");
        assert_eq!(plan.schedule[1].task_id, "late-high");
    }

    #[test]
    fn priority_breaks_deadline_ties_with_missing_last() {
        let deadline = day(4);
        let tasks = vec![
            make_task("none", 1.0, deadline, None),
            make_task("low", 1.0, deadline, Some(Priority::Low)),
            make_task("high", 1.0, deadline, Some(Priority::High)),
            make_task("medium", 1.0, deadline, Some(Priority::Medium)),
        ];
        let plan = Scheduler::new(8.0).generate(&tasks, start_date());

        let order: Vec<&str> = plan.schedule.iter().map(|s| s.task_id.as_str()).collect();
        assert_eq!(order, vec!["high", "medium", "low", "none"]);
    }

    #[test]
    fn equal_deadline_and_priority_keeps_input_order() {
        let deadline = day(4);
        let tasks = vec![
            make_task("first", 1.0, deadline, Some(Priority::Medium)),
            make_task("second", 1.0, deadline, Some(Priority::Medium)),
        ];
        let plan = Scheduler::new(8.0).generate(&tasks, start_date());

        assert_eq!(plan.schedule[0].task_id, "first");
        assert_eq!(plan.schedule[1].task_id, "second");
    }

    #[test]
    fn completed_tasks_are_ignored() {
        let mut done = make_task("done", 3.0, day(1), Some(Priority::High));
        done.completed = true;
        let tasks = vec![done, make_task("open", 1.0, day(2), None)];

        let plan = Scheduler::new(2.0).generate(&tasks, start_date());
        assert_eq!(plan.schedule.len(), 1);
        assert_eq!(plan.schedule[0].task_id, "open");
    }

    #[test]
    fn no_incomplete_tasks_yields_message() {
        let mut done = make_task("done", 3.0, day(1), None);
        done.completed = true;

        let plan = Scheduler::new(2.0).generate(&[done], start_date());
        assert!(plan.schedule.is_empty());
        let message = plan.message.expect("empty plan carries a message");
        assert!(!message.is_empty());

        let empty = Scheduler::new(2.0).generate(&[], start_date());
        assert!(empty.schedule.is_empty());
        assert!(empty.message.is_some());
    }

    #[test]
    fn non_positive_budget_falls_back_to_default() {
        assert_eq!(Scheduler::new(0.0).hours_per_day(), DEFAULT_HOURS_PER_DAY);
        assert_eq!(Scheduler::new(-3.0).hours_per_day(), DEFAULT_HOURS_PER_DAY);
        assert_eq!(Scheduler::new(f64::NAN).hours_per_day(), DEFAULT_HOURS_PER_DAY);
        assert_eq!(Scheduler::new(0.25).hours_per_day(), 0.25);
    }

    #[test]
    fn plan_serializes_with_wire_names() {
        let tasks = vec![make_task("1", 3.0, day(1), Some(Priority::High))];
        let plan = Scheduler::new(2.0).generate(&tasks, start_date());

        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("message").is_none());
        let first = &json["schedule"][0];
        assert_eq!(first["taskId"], "1");
        assert_eq!(first["dayLabel"], "Today");
        assert_eq!(json["schedule"][1]["dayLabel"], "Tomorrow");

        let decoded: SchedulePlan = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.schedule.len(), plan.schedule.len());
    }

    fn arb_priority() -> impl Strategy<Value = Option<Priority>> {
        prop_oneof![
            Just(None),
            Just(Some(Priority::Low)),
            Just(Some(Priority::Medium)),
            Just(Some(Priority::High)),
        ]
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec((1u32..48, 0u64..30, arb_priority()), 1..8).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(index, (quarter_hours, deadline_offset, priority))| {
                    make_task(
                        &format!("t{index}"),
                        f64::from(quarter_hours) * 0.25,
                        day(deadline_offset),
                        priority,
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn hours_are_conserved_per_task(
            tasks in arb_tasks(),
            quarter_budget in 2u32..48,
        ) {
            let budget = f64::from(quarter_budget) * 0.25;
            let plan = Scheduler::new(budget).generate(&tasks, start_date());

            let mut allocated: HashMap<&str, f64> = HashMap::new();
            for session in &plan.schedule {
                *allocated.entry(session.task_id.as_str()).or_default() += session.hours;
            }

            for task in &tasks {
                let total = allocated.get(task.id.as_str()).copied().unwrap_or(0.0);
                prop_assert!((total - task.estimated_hours).abs() < 1e-6);
            }
        }

        #[test]
        fn daily_budget_is_never_exceeded(
            tasks in arb_tasks(),
            quarter_budget in 2u32..48,
        ) {
            let budget = f64::from(quarter_budget) * 0.25;
            let plan = Scheduler::new(budget).generate(&tasks, start_date());

            let mut per_day: HashMap<NaiveDate, f64> = HashMap::new();
            for session in &plan.schedule {
                prop_assert!(session.hours > 0.0);
                *per_day.entry(session.date).or_default() += session.hours;
            }

            for total in per_day.values() {
                prop_assert!(*total <= budget + 1e-6);
            }
        }

        #[test]
        fn dates_are_non_decreasing(
            tasks in arb_tasks(),
            quarter_budget in 2u32..48,
        ) {
            let budget = f64::from(quarter_budget) * 0.25;
            let plan = Scheduler::new(budget).generate(&tasks, start_date());

            for pair in plan.schedule.windows(2) {
                prop_assert!(pair[0].date <= pair[1].date);
            }
        }
    }
}
