use clap::Subcommand;

/// Direct assignment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AssignCommands {
    /// Assign a task to a user with the matching role.
    Create {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        task: i64,
    },
    /// List assignments.
    List {
        /// Only assignments held by this user
        #[arg(long)]
        user: Option<i64>,
    },
    /// Remove an assignment by ID.
    Delete { id: i64 },
}
