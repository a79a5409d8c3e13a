use chrono::NaiveDate;
use clap::Subcommand;

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task.
    Create {
        #[arg(long)]
        description: String,
        #[arg(long)]
        needed_role: String,
        /// YYYY-MM-DD; defaults to tomorrow
        #[arg(long)]
        deadline: Option<NaiveDate>,
        /// 1 (lowest) to 5; defaults to 3
        #[arg(long)]
        priority: Option<u8>,
        /// Hours; defaults to 1.0
        #[arg(long)]
        estimated_time: Option<f64>,
    },
    /// List tasks.
    List,
    /// Get a task by ID.
    Get { id: i64 },
    /// Update fields of a task.
    Update {
        id: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        deadline: Option<NaiveDate>,
        #[arg(long)]
        priority: Option<u8>,
        #[arg(long)]
        estimated_time: Option<f64>,
        #[arg(long)]
        needed_role: Option<String>,
    },
    /// Delete a task and its assignment.
    Delete { id: i64 },
}
