//! Schedule generation command for CLI.

use clap::Subcommand;
use studyplan_core::{generate_schedule, Config, PlannerDb};

use super::current_user;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Generate a day-by-day study plan from incomplete tasks
    Generate {
        /// Available study hours per day; defaults to the configured budget
        #[arg(long)]
        hours: Option<f64>,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let user = current_user(&config);
    let db = PlannerDb::open()?;

    match action {
        ScheduleAction::Generate { hours } => {
            let hours = hours.unwrap_or_else(|| config.clamped_hours_per_day());
            let tasks = db.list_tasks(&user)?;
            let plan = generate_schedule(&tasks, hours);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
    }
    Ok(())
}
