//! Core building blocks for reconstructing object graphs from SQL rows.
//!
//! This crate is storage-agnostic: it defines the entity model, the flat
//! result-row abstraction, and the fold that turns a repeated-parent join
//! result into nested parent/child values.
//!
//! - [`Contact`] / [`Phone`] / [`PhoneType`] — the one-to-many pair the
//!   fold reconstructs.
//! - [`Account`] / [`Money`] — a value type that crosses the column
//!   boundary through custom converters.
//! - [`FlatRow`] / [`ColumnValue`] / [`RowSource`] — the boundary to an
//!   already-executed SQL statement.
//! - [`ColumnDecode`] / [`ColumnEncode`] / [`FromRow`] — statically
//!   dispatched converter and row-mapper traits.
//! - [`fold_rows`] / [`fold_one`] — the join-flattening algorithm.
//!
//! # Example
//!
//! ```
//! use rowfold_core::*;
//!
//! // Two joined rows for one parent, one childless parent.
//! let rows = VecSource::new(vec![
//!     FlatRow::new().with("c_id", 1).with("c_name", "Alice")
//!         .with("p_id", 2).with("p_type", "WORK").with("p_phone", "800-555-1234"),
//!     FlatRow::new().with("c_id", 1).with("c_name", "Alice")
//!         .with("p_id", 3).with("p_type", "MOBILE").with("p_phone", "801-555-1212"),
//!     FlatRow::new().with("c_id", 4).with("c_name", "Bob")
//!         .with("p_id", ColumnValue::Null).with("p_type", ColumnValue::Null)
//!         .with("p_phone", ColumnValue::Null),
//! ]);
//!
//! let contacts = fold_rows(
//!     rows,
//!     "c_id",
//!     "p_id",
//!     |row| Contact::from_row_prefixed(row, "c_"),
//!     |row| Phone::from_row_prefixed(row, "p_"),
//! ).unwrap();
//!
//! assert_eq!(contacts.len(), 2);
//! assert_eq!(contacts[0].phones.len(), 2);
//! assert!(contacts[1].phones.is_empty());
//! ```

mod fold;
mod money;
mod row;
mod types;

pub use fold::{HasMany, fold_one, fold_rows};
pub use money::{Currency, Money};
pub use row::{
    ColumnDecode, ColumnEncode, ColumnValue, FlatRow, FromRow, Result, RowError, RowIter,
    RowSource, VecSource,
};
pub use types::{Account, Contact, Phone, PhoneType};
