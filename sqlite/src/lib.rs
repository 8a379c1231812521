//! SQLite execution layer for the rowfold data model.
//!
//! This crate runs SQL against rusqlite connections and hands the result
//! rows to [`rowfold_core`] for mapping and join folding. It is organized
//! into five modules:
//!
//! - **`schema`** — SQL generation with customizable table prefixes
//! - **`migration`** — lifecycle operations (up/down/status)
//! - **`convert`** — `ColumnValue` ↔ SQLite value transformations
//! - **`query`** — fluent query surface ([`Session`] / [`Query`])
//! - **`contacts`** / **`accounts`** — DAO-style stores with their
//!   statements in one place
//!
//! # Quick start
//!
//! ```no_run
//! use rowfold_core::{Contact, Phone, PhoneType};
//! use rowfold_sqlite::{ContactStore, Migration};
//! use rusqlite::Connection;
//!
//! let conn = Connection::open_in_memory().unwrap();
//! let mut migration = Migration::new(conn, "cb_").unwrap();
//! migration.up().unwrap();
//!
//! let conn = migration.into_connection();
//! let store = ContactStore::new(&conn, "cb_").unwrap();
//!
//! store
//!     .insert_full_contact(
//!         &Contact::new(1, "Alice")
//!             .with_phone(Phone::new(2, PhoneType::Work, "800-555-1234"))
//!             .with_phone(Phone::new(3, PhoneType::Mobile, "801-555-1212")),
//!     )
//!     .unwrap();
//!
//! let alice = store.get_full_contact(1).unwrap().unwrap();
//! assert_eq!(alice.phones.len(), 2);
//! ```
//!
//! # Table prefix customization
//!
//! All table and index names carry a configurable prefix, allowing
//! multiple isolated data sets within the same SQLite database. Prefixes
//! must contain only alphanumeric characters and underscores.

mod accounts;
mod contacts;
mod convert;
mod error;
mod migration;
mod query;
mod schema;

pub use accounts::AccountStore;
pub use contacts::ContactStore;
pub use error::{Result, StoreError};
pub use migration::{Migration, MigrationStatus};
pub use query::{Query, Session, SqliteRowSource};
pub use schema::{generate_drop_sql, generate_schema_sql};
