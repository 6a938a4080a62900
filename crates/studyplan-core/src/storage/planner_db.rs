//! SQLite-based storage for tasks and study sessions.
//!
//! Both tables are scoped by a `user_id` column; the CLI resolves the user
//! before touching storage, so every query here operates on one user's data.
//! Sessions are insert-only: a session is recorded once when a focus
//! interval finishes and never updated.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{CoreError, DatabaseError, Result, ValidationError};
use crate::task::{Priority, StudySession, Task};

use super::data_dir;

/// Parse priority from a database string.
fn parse_priority(priority_str: Option<&str>) -> Option<Priority> {
    match priority_str {
        Some("low") => Some(Priority::Low),
        Some("medium") => Some(Priority::Medium),
        Some("high") => Some(Priority::High),
        _ => None,
    }
}

/// Format priority for database storage.
fn format_priority(priority: Option<Priority>) -> Option<&'static str> {
    priority.map(|p| match p {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    })
}

/// Parse a datetime from an RFC3339 string with fallback to current time.
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse a calendar date from a `YYYY-MM-DD` string with fallback to today.
fn parse_date_fallback(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap_or_else(|_| Utc::now().date_naive())
}

fn row_to_task(row: &rusqlite::Row) -> std::result::Result<Task, rusqlite::Error> {
    let deadline_str: String = row.get(4)?;
    let priority_str: Option<String> = row.get(5)?;
    let created_at_str: String = row.get(7)?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        subject: row.get(2)?,
        estimated_hours: row.get(3)?,
        deadline: parse_date_fallback(&deadline_str),
        priority: parse_priority(priority_str.as_deref()),
        completed: row.get(6)?,
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

fn row_to_session(row: &rusqlite::Row) -> std::result::Result<StudySession, rusqlite::Error> {
    let completed_at_str: String = row.get(3)?;

    Ok(StudySession {
        id: row.get(0)?,
        task_id: row.get(1)?,
        duration_min: row.get(2)?,
        completed_at: parse_datetime_fallback(&completed_at_str),
    })
}

/// The scheduler requires positive remaining work; reject bad estimates at
/// the storage boundary so the pure core can stay non-defensive.
fn validate_estimated_hours(hours: f64) -> Result<()> {
    if hours.is_finite() && hours > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: "estimatedHours".to_string(),
            message: format!("must be a positive number of hours, got {hours}"),
        }
        .into())
    }
}

/// SQLite database for task and session storage.
pub struct PlannerDb {
    conn: Connection,
}

impl PlannerDb {
    /// Open the database at `~/.config/studyplan/studyplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("studyplan.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tasks (
                id              TEXT PRIMARY KEY,
                user_id         TEXT NOT NULL,
                title           TEXT NOT NULL,
                subject         TEXT NOT NULL DEFAULT '',
                estimated_hours REAL NOT NULL,
                deadline        TEXT NOT NULL,
                priority        TEXT,
                completed       INTEGER NOT NULL DEFAULT 0,
                created_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                id           TEXT PRIMARY KEY,
                user_id      TEXT NOT NULL,
                task_id      TEXT NOT NULL,
                duration_min INTEGER NOT NULL,
                completed_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_user_id ON tasks(user_id);
            CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id);
            CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);",
        )?;
        Ok(())
    }

    /// Insert a new task.
    ///
    /// # Errors
    /// Returns a validation error if `estimated_hours` is not positive, or a
    /// database error if the insert fails.
    pub fn create_task(&self, user_id: &str, task: &Task) -> Result<()> {
        validate_estimated_hours(task.estimated_hours)?;
        self.conn.execute(
            "INSERT INTO tasks (id, user_id, title, subject, estimated_hours, deadline, priority, completed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                user_id,
                task.title,
                task.subject,
                task.estimated_hours,
                task.deadline.format("%Y-%m-%d").to_string(),
                format_priority(task.priority),
                task.completed,
                task.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Fetch a single task by id.
    pub fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let task = self
            .conn
            .prepare(
                "SELECT id, title, subject, estimated_hours, deadline, priority, completed, created_at
                 FROM tasks WHERE id = ?1",
            )?
            .query_row(params![id], row_to_task)
            .optional()?;
        Ok(task)
    }

    /// Update an existing task.
    ///
    /// # Errors
    /// Returns a validation error for a non-positive estimate, and a
    /// not-found error if no row matches the task id.
    pub fn update_task(&self, task: &Task) -> Result<()> {
        validate_estimated_hours(task.estimated_hours)?;
        let updated = self.conn.execute(
            "UPDATE tasks
             SET title = ?2, subject = ?3, estimated_hours = ?4, deadline = ?5, priority = ?6, completed = ?7
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.subject,
                task.estimated_hours,
                task.deadline.format("%Y-%m-%d").to_string(),
                format_priority(task.priority),
                task.completed,
            ],
        )?;
        if updated == 0 {
            return Err(CoreError::Database(DatabaseError::NotFound {
                kind: "Task",
                id: task.id.clone(),
            }));
        }
        Ok(())
    }

    /// Delete a task. Sessions recorded against it are kept; their task id
    /// dangles, which the analytics aggregator tolerates.
    pub fn delete_task(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// All tasks for a user, oldest first.
    pub fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, subject, estimated_hours, deadline, priority, completed, created_at
             FROM tasks WHERE user_id = ?1 ORDER BY created_at",
        )?;
        let tasks = stmt
            .query_map(params![user_id], row_to_task)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Record a completed study session.
    ///
    /// # Errors
    /// Returns a validation error if the duration is zero.
    pub fn record_session(&self, user_id: &str, session: &StudySession) -> Result<()> {
        if session.duration_min == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duration".to_string(),
                message: "must be a positive number of minutes".to_string(),
            }
            .into());
        }
        self.conn.execute(
            "INSERT INTO sessions (id, user_id, task_id, duration_min, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                session.id,
                user_id,
                session.task_id,
                session.duration_min,
                session.completed_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// All sessions for a user, oldest first.
    pub fn list_sessions(&self, user_id: &str) -> Result<Vec<StudySession>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_id, duration_min, completed_at
             FROM sessions WHERE user_id = ?1 ORDER BY completed_at",
        )?;
        let sessions = stmt
            .query_map(params![user_id], row_to_session)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(sessions)
    }
}
