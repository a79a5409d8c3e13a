//! # tm-db
//!
//! libSQL persistence for taskmaster: users, tasks, assignments, and auth
//! tokens, plus the libSQL implementation of the scheduler's store contract.
//!
//! All repository methods live on [`service::TmService`] as `impl TmService`
//! blocks, one file per entity under [`repos`].

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod schedule_store;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use service::TmService;

/// Database handle: one libSQL database and its single connection.
pub struct TmDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl TmDb {
    /// Open a local database file, or `":memory:"`.
    ///
    /// Enables foreign keys and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let tm_db = Self { db, conn };
        tm_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(tm_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    ///
    /// Bypasses the service's access gate.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
