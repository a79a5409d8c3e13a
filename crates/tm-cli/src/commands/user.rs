use serde_json::json;
use tm_config::TmConfig;
use tm_core::inputs::NewUser;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::open_service;
use crate::output::output;

/// Handle `taskmaster user`.
pub async fn handle(
    action: UserCommands,
    config: &TmConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = open_service(config).await?;
    match action {
        UserCommands::Create {
            email,
            password,
            first_name,
            last_name,
            role,
        } => {
            let user = svc
                .create_user(NewUser {
                    email,
                    password,
                    first_name,
                    last_name,
                    role,
                })
                .await?;
            output(&user, flags.format)
        }
        UserCommands::List => {
            let users = svc.list_users(flags.list_limit(config)).await?;
            output(&users, flags.format)
        }
        UserCommands::Delete { id } => {
            svc.delete_user(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
