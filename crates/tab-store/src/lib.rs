//! # tab-store
//!
//! libSQL-backed row producer for Tabula.
//!
//! Covers what a cursor's rows come from: table DDL with column families,
//! positional UPSERT, a frame-based data-source write API, and SQL queries
//! collected into a [`tab_core::ResultBatch`].
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod convert;
pub mod datasource;
pub mod error;
pub mod ident;
mod query;
pub mod schema;
mod upsert;

pub use datasource::{Field, Frame, SaveMode, WriteOptions};
pub use error::StoreError;
pub use schema::{ColumnSpec, SqlType, TableColumn, TableSpec};

use libsql::Builder;
use tab_config::{IN_MEMORY, StoreConfig};
use tracing::debug;

/// Database handle for table setup, writes and queries.
pub struct TabStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    fold_identifiers: bool,
}

impl TabStore {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Unquoted identifiers fold to upper case.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        debug!(path, "opened store");
        Ok(Self {
            db,
            conn,
            fold_identifiers: true,
        })
    }

    /// Open the store described by configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let path = if config.is_in_memory() {
            IN_MEMORY
        } else {
            config.path.as_str()
        };
        let store = Self::open_local(path).await?;
        Ok(store.with_fold_identifiers(config.fold_identifiers))
    }

    #[must_use]
    pub const fn with_fold_identifiers(mut self, fold: bool) -> Self {
        self.fold_identifiers = fold;
        self
    }

    #[must_use]
    pub const fn fold_identifiers(&self) -> bool {
        self.fold_identifiers
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Execute a single statement, returning the number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LibSql`] if the statement fails.
    pub async fn execute(&self, sql: &str) -> Result<u64, StoreError> {
        let changed = self.conn.execute(sql, ()).await?;
        debug!(%sql, changed, "execute");
        Ok(changed)
    }

    /// Execute a `;`-separated batch of statements.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LibSql`] if any statement fails.
    pub async fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        self.conn.execute_batch(sql).await?;
        debug!(%sql, "execute batch");
        Ok(())
    }

    /// Names of user tables, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LibSql`] if the catalog query fails.
    pub async fn tables(&self) -> Result<Vec<String>, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                (),
            )
            .await?;
        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get::<String>(0)?);
        }
        Ok(names)
    }
}
