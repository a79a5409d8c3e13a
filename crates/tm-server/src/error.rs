//! Mapping from domain errors to HTTP responses.
//!
//! Bodies are `{"detail": "..."}`. Server-side failures get a generic
//! message; the real error is logged.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tm_auth::AuthError;
use tm_db::error::DatabaseError;
use tm_scheduler::StoreError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, detail)
    }

    fn internal(error: &dyn std::fmt::Display) -> Self {
        tracing::error!(%error, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(json!({ "detail": self.detail }))).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            DatabaseError::Validation(msg) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, msg),
            DatabaseError::Conflict(msg) | DatabaseError::InvalidState(msg) => {
                Self::new(StatusCode::CONFLICT, msg)
            }
            other => Self::internal(&other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials | AuthError::TokenExpired | AuthError::MissingToken => {
                Self::unauthorized(e.to_string())
            }
            AuthError::Hashing(_) | AuthError::Random(_) => Self::internal(&e),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            StoreError::Fatal(e) => Self::internal(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_errors_map_to_statuses() {
        let cases = [
            (DatabaseError::not_found("task", 1), StatusCode::NOT_FOUND),
            (DatabaseError::Validation("bad".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (DatabaseError::Conflict("dup".into()), StatusCode::CONFLICT),
            (DatabaseError::InvalidState("no".into()), StatusCode::CONFLICT),
            (DatabaseError::NoResult, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status, status);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let api = ApiError::from(DatabaseError::Query("SELECT secret".into()));
        assert_eq!(api.detail, "internal server error");
    }

    #[test]
    fn unauthorized_sets_challenge_header() {
        let response = ApiError::from(AuthError::MissingToken).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}
