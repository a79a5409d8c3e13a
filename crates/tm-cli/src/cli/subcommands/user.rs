use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user. Workload starts at zero.
    Create {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKMASTER_USER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        role: String,
    },
    /// List users with their current workload.
    List,
    /// Delete a user; their tasks become unassigned.
    Delete { id: i64 },
}
