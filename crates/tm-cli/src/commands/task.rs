use serde_json::json;
use tm_config::TmConfig;
use tm_core::inputs::NewTask;
use tm_db::updates::task::TaskUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::commands::open_service;
use crate::output::output;

/// Handle `taskmaster task`.
pub async fn handle(
    action: TaskCommands,
    config: &TmConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::Update {
            id,
            description,
            deadline,
            priority,
            estimated_time,
            needed_role,
        } => {
            let mut builder = TaskUpdateBuilder::new();
            if let Some(description) = description {
                builder = builder.description(description);
            }
            if let Some(deadline) = deadline {
                builder = builder.deadline(deadline);
            }
            if let Some(priority) = priority {
                builder = builder.priority(priority);
            }
            if let Some(hours) = estimated_time {
                builder = builder.estimated_time(hours);
            }
            if let Some(role) = needed_role {
                builder = builder.needed_role(role);
            }
            let update = builder.build();
            if update.is_empty() {
                anyhow::bail!(
                    "At least one of --description, --deadline, --priority, --estimated-time, \
                     or --needed-role must be provided"
                );
            }

            let svc = open_service(config).await?;
            let task = svc.update_task(id, update).await?;
            output(&task, flags.format)
        }
        TaskCommands::Create {
            description,
            needed_role,
            deadline,
            priority,
            estimated_time,
        } => {
            let mut new_task = NewTask::new(description, needed_role);
            new_task.deadline = deadline;
            new_task.priority = priority;
            new_task.estimated_time = estimated_time;

            let svc = open_service(config).await?;
            let task = svc.create_task(new_task).await?;
            output(&task, flags.format)
        }
        TaskCommands::List => {
            let svc = open_service(config).await?;
            let tasks = svc.list_tasks(flags.list_limit(config)).await?;
            output(&tasks, flags.format)
        }
        TaskCommands::Get { id } => {
            let svc = open_service(config).await?;
            output(&svc.get_task(id).await?, flags.format)
        }
        TaskCommands::Delete { id } => {
            let svc = open_service(config).await?;
            svc.delete_task(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
