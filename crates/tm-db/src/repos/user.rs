//! User repository.

use tm_core::entities::User;
use tm_core::inputs::NewUser;

use crate::error::DatabaseError;
use crate::service::{TmService, finish};

const SELECT_COLS: &str = "user_id, email, first_name, last_name, role, workload";

/// A user together with their stored password hash, for login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

pub(crate) fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        user_id: row.get(0)?,
        email: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        role: row.get(4)?,
        workload: row.get(5)?,
    })
}

pub(crate) async fn fetch_user(
    conn: &libsql::Connection,
    user_id: i64,
) -> Result<User, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM users WHERE user_id = ?1"),
            [user_id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("user", user_id))?;
    row_to_user(&row)
}

pub(crate) async fn fetch_users(conn: &libsql::Connection) -> Result<Vec<User>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM users ORDER BY user_id"),
            (),
        )
        .await?;
    let mut users = Vec::new();
    while let Some(row) = rows.next().await? {
        users.push(row_to_user(&row)?);
    }
    Ok(users)
}

pub(crate) async fn set_workload(
    conn: &libsql::Connection,
    user_id: i64,
    workload: f64,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE users SET workload = ?1 WHERE user_id = ?2",
            libsql::params![workload, user_id],
        )
        .await?;
    if changed == 0 {
        return Err(DatabaseError::not_found("user", user_id));
    }
    Ok(())
}

async fn delete_user_row(conn: &libsql::Connection, user_id: i64) -> Result<(), DatabaseError> {
    let changed = conn
        .execute("DELETE FROM users WHERE user_id = ?1", [user_id])
        .await?;
    if changed == 0 {
        return Err(DatabaseError::not_found("user", user_id));
    }
    Ok(())
}

impl TmService {
    /// Register a user. Workload starts at zero.
    ///
    /// # Errors
    ///
    /// `Validation` for bad fields, `Conflict` if the email is taken.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let new_user = new_user.validate()?;
        let password_hash = tm_auth::hash_password(&new_user.password)
            .map_err(|e| DatabaseError::Other(e.into()))?;

        let _gate = self.write_gate().await;
        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO users (email, password_hash, first_name, last_name, role, workload)
             VALUES (?1, ?2, ?3, ?4, ?5, 0)",
            libsql::params![
                new_user.email.as_str(),
                password_hash,
                new_user.first_name.as_str(),
                new_user.last_name.as_str(),
                new_user.role.as_str()
            ],
        )
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::Conflict(_) => DatabaseError::Conflict(format!(
                "email {} is already registered",
                new_user.email
            )),
            other => other,
        })?;

        let user = User {
            user_id: conn.last_insert_rowid(),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            role: new_user.role,
            workload: 0.0,
        };
        tracing::info!(user_id = user.user_id, role = %user.role, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User, DatabaseError> {
        let _gate = self.read_gate().await;
        fetch_user(self.db().conn(), user_id).await
    }

    /// Look up a user and their password hash by email.
    pub async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DatabaseError> {
        let _gate = self.read_gate().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS}, password_hash FROM users WHERE email = ?1"),
                [email.trim()],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        Ok(Some(UserCredentials {
            user: row_to_user(&row)?,
            password_hash: row.get(6)?,
        }))
    }

    /// Users in ascending id order.
    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, DatabaseError> {
        let _gate = self.read_gate().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users ORDER BY user_id LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;
        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    /// Delete a user. Their assignments and tokens go with them; the
    /// affected tasks become unassigned.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), DatabaseError> {
        let _gate = self.write_gate().await;
        let tx = self.db().conn().transaction().await?;
        let result = delete_user_row(&tx, user_id).await;
        finish(tx, result).await?;
        tracing::info!(user_id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{new_user, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_user_roundtrip() {
        let svc = test_service().await;
        let user = svc.create_user(new_user("anna@example.com", "Senior")).await.unwrap();

        assert_eq!(user.role, "senior");
        assert_eq!(user.workload, 0.0);

        let fetched = svc.get_user(user.user_id).await.unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let svc = test_service().await;
        svc.create_user(new_user("anna@example.com", "senior")).await.unwrap();
        let err = svc
            .create_user(new_user("anna@example.com", "junior"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)), "{err:?}");
    }

    #[tokio::test]
    async fn password_is_hashed_and_verifiable() {
        let svc = test_service().await;
        svc.create_user(new_user("anna@example.com", "senior")).await.unwrap();

        let creds = svc
            .find_user_by_email("anna@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(creds.password_hash.starts_with("$argon2id$"));
        tm_auth::verify_password("secret-pw", &creds.password_hash).unwrap();

        assert!(svc.find_user_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_users_in_id_order_with_limit() {
        let svc = test_service().await;
        for i in 0..3 {
            svc.create_user(new_user(&format!("u{i}@example.com"), "dev"))
                .await
                .unwrap();
        }
        let users = svc.list_users(2).await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users[0].user_id < users[1].user_id);
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let svc = test_service().await;
        assert!(matches!(
            svc.delete_user(42).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }
}
