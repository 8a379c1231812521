//! Migration lifecycle operations for the SQLite tables.
//!
//! Provides [`Migration`] for creating and dropping the contact and
//! account tables and inspecting their state. All mutation operations use
//! transactions, so either every statement applies or none do.
//!
//! # Example
//!
//! ```no_run
//! use rowfold_sqlite::Migration;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("contacts.db").unwrap();
//! let mut migration = Migration::new(conn, "cb_").unwrap();
//!
//! migration.up().unwrap();
//!
//! let status = migration.status().unwrap();
//! println!("Contacts: {}", status.contact_count);
//! ```

use rusqlite::Connection;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::schema::{generate_drop_sql, generate_schema_sql, validate_prefix};

/// Manages the lifecycle of the SQLite tables.
pub struct Migration {
    conn: Connection,
    prefix: String,
}

/// Snapshot of the migration state and per-table row counts.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationStatus {
    pub tables_exist: bool,
    pub contact_count: i64,
    pub phone_count: i64,
    pub account_count: i64,
}

impl Migration {
    /// Creates a new migration manager for the given connection and table prefix.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPrefix`] if the prefix contains invalid characters.
    pub fn new(conn: Connection, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn, prefix })
    }

    /// Creates all tables and indexes.
    ///
    /// Uses `CREATE TABLE IF NOT EXISTS`, so it is safe to call multiple
    /// times.
    pub fn up(&mut self) -> Result<()> {
        debug!(prefix = %self.prefix, "Creating tables");
        let sql = generate_schema_sql(&self.prefix)?;
        let tx = self.conn.transaction()?;
        tx.execute_batch(&sql)
            .map_err(|e| StoreError::MigrationError(format!("failed to create tables: {e}")))?;
        tx.commit()?;
        Ok(())
    }

    /// Drops all tables in reverse dependency order.
    pub fn down(&mut self) -> Result<()> {
        debug!(prefix = %self.prefix, "Dropping tables");
        let sql = generate_drop_sql(&self.prefix)?;
        let tx = self.conn.transaction()?;
        tx.execute_batch(&sql)
            .map_err(|e| StoreError::MigrationError(format!("failed to drop tables: {e}")))?;
        tx.commit()?;
        Ok(())
    }

    /// Returns the current state: whether tables exist and how many rows
    /// each holds.
    pub fn status(&self) -> Result<MigrationStatus> {
        let tables_exist = self.table_exists(&format!("{}contacts", self.prefix))?
            && self.table_exists(&format!("{}phones", self.prefix))?
            && self.table_exists(&format!("{}accounts", self.prefix))?;

        if !tables_exist {
            return Ok(MigrationStatus {
                tables_exist: false,
                contact_count: 0,
                phone_count: 0,
                account_count: 0,
            });
        }

        Ok(MigrationStatus {
            tables_exist: true,
            contact_count: self.count_rows(&format!("{}contacts", self.prefix))?,
            phone_count: self.count_rows(&format!("{}phones", self.prefix))?,
            account_count: self.count_rows(&format!("{}accounts", self.prefix))?,
        })
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the migration manager and returns the connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            rusqlite::params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn count_rows(&self, table: &str) -> Result<i64> {
        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_down_round_trip() {
        let conn = Connection::open_in_memory().unwrap();
        let mut migration = Migration::new(conn, "t_").unwrap();

        assert!(!migration.status().unwrap().tables_exist);

        migration.up().unwrap();
        assert!(migration.status().unwrap().tables_exist);

        // Idempotent.
        migration.up().unwrap();

        migration.down().unwrap();
        assert!(!migration.status().unwrap().tables_exist);
    }

    #[test]
    fn test_status_counts_rows() {
        let conn = Connection::open_in_memory().unwrap();
        let mut migration = Migration::new(conn, "t_").unwrap();
        migration.up().unwrap();

        migration
            .connection()
            .execute("INSERT INTO t_contacts (id, name) VALUES (1, 'Alice')", [])
            .unwrap();

        let status = migration.status().unwrap();
        assert_eq!(status.contact_count, 1);
        assert_eq!(status.phone_count, 0);
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            Migration::new(conn, "bad prefix"),
            Err(StoreError::InvalidPrefix(_))
        ));
    }
}
