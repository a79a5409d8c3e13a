use tm_config::TmConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `taskmaster schedule`: one scheduling pass against the database.
pub async fn handle(config: &TmConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = super::open_service(config).await?;
    let report = tm_scheduler::schedule(&svc).await?;
    if !report.skipped_task_ids.is_empty() {
        tracing::warn!(
            skipped = ?report.skipped_task_ids,
            "some tasks have no eligible user"
        );
    }
    output(&report, flags.format)
}
