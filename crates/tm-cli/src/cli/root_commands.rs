use clap::{Args, Subcommand};

use crate::cli::subcommands::{AssignCommands, TaskCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Assign every unassigned task to the least-loaded eligible user, once.
    Schedule,
    /// Users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Tasks.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Direct assignments.
    Assign {
        #[command(subcommand)]
        action: AssignCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address, overriding `server.bind` from config
    #[arg(long)]
    pub bind: Option<String>,
}
