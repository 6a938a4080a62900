//! Analytics command for CLI.

use clap::Subcommand;
use studyplan_core::{compute_analytics, Config, PlannerDb};

use super::current_user;

#[derive(Subcommand)]
pub enum AnalyticsAction {
    /// Aggregate tasks and sessions into an analytics snapshot
    Show,
}

pub fn run(action: AnalyticsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let user = current_user(&config);
    let db = PlannerDb::open()?;

    match action {
        AnalyticsAction::Show => {
            let tasks = db.list_tasks(&user)?;
            let sessions = db.list_sessions(&user)?;
            let snapshot = compute_analytics(&tasks, &sessions);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}
