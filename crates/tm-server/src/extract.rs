//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;
use tm_auth::{AuthError, bearer_token, check_expiry, hash_token};
use tm_core::entities::User;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller. Rejects with 401 when the token is missing,
/// unknown, or expired.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token_hash: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;
        let token_hash = hash_token(bearer_token(header)?);

        let owner = state
            .svc
            .resolve_token(&token_hash)
            .await?
            .ok_or_else(|| ApiError::unauthorized("invalid token"))?;
        check_expiry(owner.expires_at, Utc::now())?;

        Ok(Self {
            user: owner.user,
            token_hash,
        })
    }
}
