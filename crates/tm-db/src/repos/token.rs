//! Auth token repository. Only SHA-256 hashes of tokens are stored.

use chrono::{DateTime, Utc};
use tm_auth::IssuedToken;
use tm_core::entities::User;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::repos::user::row_to_user;
use crate::service::TmService;

/// The user a token belongs to and when it stops being valid.
#[derive(Debug, Clone)]
pub struct TokenOwner {
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl TmService {
    pub async fn store_token(
        &self,
        user_id: i64,
        token: &IssuedToken,
    ) -> Result<(), DatabaseError> {
        let _gate = self.write_gate().await;
        self.db()
            .conn()
            .execute(
                "INSERT INTO auth_tokens (token_hash, user_id, issued_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    token.token_hash.as_str(),
                    user_id,
                    token.issued_at.to_rfc3339(),
                    token.expires_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(())
    }

    /// Find the owner of a token hash. Expiry is reported, not enforced.
    pub async fn resolve_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<TokenOwner>, DatabaseError> {
        let _gate = self.read_gate().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT u.user_id, u.email, u.first_name, u.last_name, u.role, u.workload, \
                 t.expires_at \
                 FROM auth_tokens t JOIN users u ON u.user_id = t.user_id \
                 WHERE t.token_hash = ?1",
                [token_hash],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        Ok(Some(TokenOwner {
            user: row_to_user(&row)?,
            expires_at: parse_datetime(&row.get::<String>(6)?)?,
        }))
    }

    /// Returns whether a token was removed.
    pub async fn revoke_token(&self, token_hash: &str) -> Result<bool, DatabaseError> {
        let _gate = self.write_gate().await;
        let removed = self
            .db()
            .conn()
            .execute("DELETE FROM auth_tokens WHERE token_hash = ?1", [token_hash])
            .await?;
        Ok(removed > 0)
    }

    /// Delete every token that expired at or before `now`; returns the count.
    pub async fn purge_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, DatabaseError> {
        let _gate = self.write_gate().await;
        let conn = self.db().conn();
        let mut rows = conn
            .query("SELECT token_hash, expires_at FROM auth_tokens", ())
            .await?;
        let mut expired = Vec::new();
        while let Some(row) = rows.next().await? {
            if parse_datetime(&row.get::<String>(1)?)? <= now {
                expired.push(row.get::<String>(0)?);
            }
        }
        drop(rows);

        let mut removed = 0;
        for hash in expired {
            removed += conn
                .execute("DELETE FROM auth_tokens WHERE token_hash = ?1", [hash])
                .await?;
        }
        if removed > 0 {
            tracing::debug!(removed, "expired tokens purged");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{new_user, test_service};
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn stored_token_resolves_to_owner() {
        let svc = test_service().await;
        let user = svc.create_user(new_user("a@example.com", "dev")).await.unwrap();
        let issued = tm_auth::issue_token(Duration::minutes(30)).unwrap();
        svc.store_token(user.user_id, &issued).await.unwrap();

        let owner = svc.resolve_token(&issued.token_hash).await.unwrap().unwrap();
        assert_eq!(owner.user, user);
        assert_eq!(owner.expires_at.timestamp(), issued.expires_at.timestamp());

        assert!(svc.resolve_token("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn revoked_token_no_longer_resolves() {
        let svc = test_service().await;
        let user = svc.create_user(new_user("a@example.com", "dev")).await.unwrap();
        let issued = tm_auth::issue_token(Duration::minutes(30)).unwrap();
        svc.store_token(user.user_id, &issued).await.unwrap();

        assert!(svc.revoke_token(&issued.token_hash).await.unwrap());
        assert!(!svc.revoke_token(&issued.token_hash).await.unwrap());
        assert!(svc.resolve_token(&issued.token_hash).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let svc = test_service().await;
        let user = svc.create_user(new_user("a@example.com", "dev")).await.unwrap();
        let live = tm_auth::issue_token(Duration::minutes(30)).unwrap();
        let stale = tm_auth::issue_token(Duration::minutes(-5)).unwrap();
        svc.store_token(user.user_id, &live).await.unwrap();
        svc.store_token(user.user_id, &stale).await.unwrap();

        assert_eq!(svc.purge_expired_tokens(Utc::now()).await.unwrap(), 1);
        assert!(svc.resolve_token(&live.token_hash).await.unwrap().is_some());
        assert!(svc.resolve_token(&stale.token_hash).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_user_drops_tokens() {
        let svc = test_service().await;
        let user = svc.create_user(new_user("a@example.com", "dev")).await.unwrap();
        let issued = tm_auth::issue_token(Duration::minutes(30)).unwrap();
        svc.store_token(user.user_id, &issued).await.unwrap();

        svc.delete_user(user.user_id).await.unwrap();
        assert!(svc.resolve_token(&issued.token_hash).await.unwrap().is_none());
    }
}
