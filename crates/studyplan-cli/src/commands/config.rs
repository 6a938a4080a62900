//! Configuration commands for CLI.

use clap::Subcommand;
use studyplan_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default daily study budget in hours
    SetHours {
        /// Hours per day
        hours: f64,
    },
    /// Set the user id the CLI operates as
    SetUser {
        /// User id
        user: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::SetHours { hours } => {
            if !hours.is_finite() || hours <= 0.0 {
                return Err(format!("hours must be a positive number, got {hours}").into());
            }
            let mut config = Config::load_or_default();
            config.schedule.hours_per_day = hours;
            config.save()?;
            println!("hours per day set to {hours}");
        }
        ConfigAction::SetUser { user } => {
            let mut config = Config::load_or_default();
            config.user = Some(user.clone());
            config.save()?;
            println!("user set to {user}");
        }
    }
    Ok(())
}
