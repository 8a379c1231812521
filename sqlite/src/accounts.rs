//! Account persistence with monetary balances.
//!
//! [`AccountStore`] is the flat-table counterpart of
//! [`ContactStore`](crate::ContactStore): no joins, but the balance
//! column crosses the boundary through the [`Money`](rowfold_core::Money)
//! converter rather than a raw float.

use rowfold_core::Account;
use rusqlite::Connection;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::query::Session;
use crate::schema::validate_prefix;

/// Store for accounts.
pub struct AccountStore<'conn> {
    conn: &'conn Connection,
    prefix: String,
}

impl<'conn> AccountStore<'conn> {
    /// Creates a store over the given connection and table prefix.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPrefix`] if the prefix is invalid.
    pub fn new(conn: &'conn Connection, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self { conn, prefix })
    }

    /// Inserts a new account.
    pub fn insert(&self, account: &Account) -> Result<()> {
        debug!(account = account.id, "Inserting account");
        Session::new(self.conn).execute(
            &format!(
                "INSERT INTO {}accounts (id, name, balance) VALUES (?1, ?2, ?3)",
                self.prefix
            ),
            &[&account.id, &account.name, &account.balance],
        )?;
        Ok(())
    }

    /// Replaces the name and balance of an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no account has the given id.
    pub fn update(&self, account: &Account) -> Result<()> {
        debug!(account = account.id, "Updating account");
        let rows = Session::new(self.conn).execute(
            &format!(
                "UPDATE {}accounts SET name = ?1, balance = ?2 WHERE id = ?3",
                self.prefix
            ),
            &[&account.name, &account.balance, &account.id],
        )?;

        if rows == 0 {
            return Err(StoreError::NotFound(format!("account {}", account.id)));
        }

        Ok(())
    }

    /// Lists all accounts ordered by id.
    pub fn list(&self) -> Result<Vec<Account>> {
        Session::new(self.conn)
            .query(&format!(
                "SELECT id, name, balance FROM {}accounts ORDER BY id",
                self.prefix
            ))
            .list()
    }

    /// Loads one account by id, `None` when absent.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Account>> {
        Session::new(self.conn)
            .query(&format!(
                "SELECT id, name, balance FROM {}accounts WHERE id = :id",
                self.prefix
            ))
            .bind("id", id)
            .optional()
    }
}
