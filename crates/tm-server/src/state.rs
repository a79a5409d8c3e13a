use std::sync::Arc;

use chrono::Duration;
use tm_config::TmConfig;
use tm_db::TmService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub svc: Arc<TmService>,
    pub token_ttl: Duration,
    pub default_limit: u32,
}

impl AppState {
    pub fn new(svc: Arc<TmService>, config: &TmConfig) -> Self {
        Self {
            svc,
            token_ttl: Duration::minutes(i64::from(config.auth.token_ttl_minutes)),
            default_limit: config.general.default_limit,
        }
    }
}
