use tm_config::TmConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: &TmConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => commands::serve::handle(&args, config).await,
        Commands::Schedule => commands::schedule::handle(config, flags).await,
        Commands::User { action } => commands::user::handle(action, config, flags).await,
        Commands::Task { action } => commands::task::handle(action, config, flags).await,
        Commands::Assign { action } => commands::assign::handle(action, config, flags).await,
    }
}
