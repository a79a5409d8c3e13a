use serde_json::json;
use tm_config::TmConfig;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssignCommands;
use crate::commands::open_service;
use crate::output::output;

/// Handle `taskmaster assign`.
pub async fn handle(
    action: AssignCommands,
    config: &TmConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = open_service(config).await?;
    match action {
        AssignCommands::Create { user, task } => {
            let assignment = svc.create_assignment(user, task).await?;
            output(&assignment, flags.format)
        }
        AssignCommands::List { user: Some(user_id) } => {
            let assignments = svc
                .list_assignments_for_user(user_id, flags.list_limit(config))
                .await?;
            output(&assignments, flags.format)
        }
        AssignCommands::List { user: None } => {
            let assignments = svc
                .list_assignments(flags.list_limit(config))
                .await?;
            output(&assignments, flags.format)
        }
        AssignCommands::Delete { id } => {
            svc.delete_assignment(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
