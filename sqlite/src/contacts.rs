//! Contact persistence and graph reconstruction.
//!
//! [`ContactStore`] keeps every statement it issues in one place: inserts
//! against the normalized `contacts`/`phones` tables, and left-join reads
//! that rebuild the nested [`Contact`] shape through the row fold.
//!
//! # Example
//!
//! ```no_run
//! use rowfold_core::{Contact, Phone, PhoneType};
//! use rowfold_sqlite::ContactStore;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("contacts.db").unwrap();
//! let store = ContactStore::new(&conn, "cb_").unwrap();
//!
//! let alice = Contact::new(1, "Alice")
//!     .with_phone(Phone::new(2, PhoneType::Work, "800-555-1234"));
//! store.insert_full_contact(&alice).unwrap();
//!
//! let loaded = store.get_full_contact(1).unwrap();
//! assert!(loaded.is_some());
//! ```

use rowfold_core::{Contact, Phone};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::query::Session;
use crate::schema::validate_prefix;

/// Store for contacts and their phone numbers.
pub struct ContactStore<'conn> {
    conn: &'conn Connection,
    prefix: String,
}

impl<'conn> ContactStore<'conn> {
    /// Creates a store over the given connection and table prefix.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPrefix`] if the prefix is invalid.
    pub fn new(conn: &'conn Connection, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn, prefix })
    }

    /// Inserts the contact row alone, without phones.
    pub fn insert_contact(&self, contact: &Contact) -> Result<()> {
        debug!(contact = contact.id, "Inserting contact");
        self.conn.execute(
            &format!(
                "INSERT INTO {}contacts (id, name) VALUES (?1, ?2)",
                self.prefix
            ),
            params![contact.id, contact.name],
        )?;
        Ok(())
    }

    /// Inserts phone rows for a contact through one prepared statement.
    pub fn insert_phones(&self, contact_id: i64, phones: &[Phone]) -> Result<()> {
        debug!(contact = contact_id, phones = phones.len(), "Inserting phones");
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO {}phones (id, contact_id, type, phone) VALUES (?1, ?2, ?3, ?4)",
            self.prefix
        ))?;
        for phone in phones {
            stmt.execute(params![
                phone.id,
                contact_id,
                phone.kind.as_str(),
                phone.number
            ])?;
        }
        Ok(())
    }

    /// Inserts a contact together with its phones in one transaction.
    pub fn insert_full_contact(&self, contact: &Contact) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.insert_contact(contact)?;
        self.insert_phones(contact.id, &contact.phones)?;
        tx.commit()?;
        Ok(())
    }

    /// Loads one contact with its full phone list.
    ///
    /// Returns `None` when no contact has the given id; a found contact
    /// with no phones comes back with an empty phone list.
    pub fn get_full_contact(&self, id: i64) -> Result<Option<Contact>> {
        debug!(contact = id, "Loading contact graph");
        Session::new(self.conn)
            .query(&format!(
                "SELECT c.id c_id, c.name c_name, \
                        p.id p_id, p.type p_type, p.phone p_phone \
                 FROM {0}contacts c LEFT JOIN {0}phones p ON c.id = p.contact_id \
                 WHERE c.id = :id ORDER BY p.id",
                self.prefix
            ))
            .bind("id", id)
            .fold_one(
                "p_id",
                |row| Contact::from_row_prefixed(row, "c_"),
                |row| Phone::from_row_prefixed(row, "p_"),
            )
    }

    /// Loads every contact with its phones, ordered by contact name.
    pub fn list_full_contacts(&self) -> Result<Vec<Contact>> {
        debug!("Listing contact graphs");
        Session::new(self.conn)
            .query(&format!(
                "SELECT c.id c_id, c.name c_name, \
                        p.id p_id, p.type p_type, p.phone p_phone \
                 FROM {0}contacts c LEFT JOIN {0}phones p ON c.id = p.contact_id \
                 ORDER BY c.name, p.id",
                self.prefix
            ))
            .fold(
                "c_id",
                "p_id",
                |row| Contact::from_row_prefixed(row, "c_"),
                |row| Phone::from_row_prefixed(row, "p_"),
            )
    }

    /// Deletes a contact; the cascade removes its phones.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no contact has the given id.
    pub fn delete_contact(&self, id: i64) -> Result<()> {
        let rows = self.conn.execute(
            &format!("DELETE FROM {}contacts WHERE id = ?1", self.prefix),
            params![id],
        )?;

        if rows == 0 {
            return Err(StoreError::NotFound(format!("contact {id}")));
        }

        Ok(())
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        self.conn
    }
}
