pub mod assign;
pub mod dispatch;
pub mod schedule;
pub mod serve;
pub mod task;
pub mod user;

use tm_config::TmConfig;
use tm_db::TmService;

/// Open the configured database for a one-shot command.
pub async fn open_service(config: &TmConfig) -> anyhow::Result<TmService> {
    TmService::new_local(&config.database.path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to open database {}: {e}", config.database.path))
}
