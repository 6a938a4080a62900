//! Task management commands for CLI.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use studyplan_core::{Config, PlannerDb, Priority, Task};
use uuid::Uuid;

use super::current_user;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Subject category
        #[arg(long, default_value = "")]
        subject: String,
        /// Estimated remaining hours of work
        #[arg(long)]
        hours: f64,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: NaiveDate,
        /// Priority: low, medium or high
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// List tasks
    List {
        /// Only incomplete tasks
        #[arg(long)]
        pending: bool,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New subject
        #[arg(long)]
        subject: Option<String>,
        /// New estimated hours
        #[arg(long)]
        hours: Option<f64>,
        /// New deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<NaiveDate>,
        /// New priority
        #[arg(long)]
        priority: Option<Priority>,
        /// Set completed status
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Mark a task completed
    Done {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let user = current_user(&config);
    let db = PlannerDb::open()?;

    match action {
        TaskAction::Add {
            title,
            subject,
            hours,
            deadline,
            priority,
        } => {
            let task = Task {
                id: Uuid::new_v4().to_string(),
                title,
                subject,
                estimated_hours: hours,
                deadline,
                priority,
                completed: false,
                created_at: Utc::now(),
            };
            db.create_task(&user, &task)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { pending } => {
            let tasks: Vec<_> = db
                .list_tasks(&user)?
                .into_iter()
                .filter(|t| !pending || !t.completed)
                .collect();
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => match db.get_task(&id)? {
            Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Update {
            id,
            title,
            subject,
            hours,
            deadline,
            priority,
            completed,
        } => {
            let mut task = db.get_task(&id)?.ok_or(format!("Task not found: {id}"))?;

            if let Some(t) = title {
                task.title = t;
            }
            if let Some(s) = subject {
                task.subject = s;
            }
            if let Some(h) = hours {
                task.estimated_hours = h;
            }
            if let Some(d) = deadline {
                task.deadline = d;
            }
            if let Some(p) = priority {
                task.priority = Some(p);
            }
            if let Some(c) = completed {
                task.completed = c;
            }

            db.update_task(&task)?;
            println!("Task updated:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Done { id } => {
            let mut task = db.get_task(&id)?.ok_or(format!("Task not found: {id}"))?;
            task.completed = true;
            db.update_task(&task)?;
            println!("Task completed: {id}");
        }
        TaskAction::Delete { id } => {
            db.delete_task(&id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
