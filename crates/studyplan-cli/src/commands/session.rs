//! Study session log commands for CLI.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use studyplan_core::{Config, PlannerDb, StudySession};
use uuid::Uuid;

use super::current_user;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record a completed focus session
    Log {
        /// Task ID the session was spent on
        task_id: String,
        /// Session duration in minutes
        minutes: u32,
        /// Completion time (RFC3339); defaults to now
        #[arg(long)]
        completed_at: Option<DateTime<Utc>>,
    },
    /// List recorded sessions
    List,
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let user = current_user(&config);
    let db = PlannerDb::open()?;

    match action {
        SessionAction::Log {
            task_id,
            minutes,
            completed_at,
        } => {
            let session = StudySession {
                id: Uuid::new_v4().to_string(),
                task_id,
                duration_min: minutes,
                completed_at: completed_at.unwrap_or_else(Utc::now),
            };
            db.record_session(&user, &session)?;
            println!("Session recorded: {}", session.id);
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        SessionAction::List => {
            let sessions = db.list_sessions(&user)?;
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
    }
    Ok(())
}
