//! Bearer token configuration.

use serde::{Deserialize, Serialize};

/// Default token lifetime in minutes.
const fn default_token_ttl_minutes() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// How long an issued access token stays valid.
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: default_token_ttl_minutes(),
        }
    }
}
