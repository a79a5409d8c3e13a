//! Periodic scheduler runs.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tm_db::TmService;
use tm_scheduler::{StoreError, schedule};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Run `schedule()` every `every`, starting immediately. Expired auth tokens
/// are purged on the same tick.
///
/// Conflicts are retried on the next tick. Nothing here stops the loop; abort
/// the handle to end it.
pub fn spawn_scheduler(svc: Arc<TmService>, every: Duration) -> JoinHandle<()> {
    tracing::info!(interval_secs = every.as_secs(), "background scheduler started");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            run_once(&svc).await;
        }
    })
}

async fn run_once(svc: &TmService) {
    match schedule(svc).await {
        Ok(report) if !report.is_noop() => {
            tracing::info!(
                assigned = report.assignments.len(),
                skipped = report.skipped_task_ids.len(),
                "background schedule run"
            );
        }
        Ok(_) => {}
        Err(StoreError::Conflict(msg)) => {
            tracing::warn!(%msg, "background schedule conflicted, retrying next tick");
        }
        Err(StoreError::Fatal(e)) => {
            tracing::error!(error = %e, "background schedule failed");
        }
    }

    if let Err(e) = svc.purge_expired_tokens(Utc::now()).await {
        tracing::warn!(error = %e, "failed to purge expired tokens");
    }
}
