//! Fluent query execution over a SQLite connection.
//!
//! [`Session`] wraps a connection and hands out [`Query`] builders: bind
//! named parameters, then terminate with a row-mapped list, a single row,
//! a scalar projection, or a join fold. Rows stream from the cursor one
//! at a time through [`SqliteRowSource`]; nothing is buffered beyond the
//! row being mapped and the result being built.
//!
//! # Example
//!
//! ```no_run
//! use rowfold_sqlite::Session;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open_in_memory().unwrap();
//! let session = Session::new(&conn);
//!
//! session
//!     .execute("create table something (id int primary key, name text)", &[])
//!     .unwrap();
//! session
//!     .execute("insert into something (id, name) values (?1, ?2)", &[&1i64, &"Alice"])
//!     .unwrap();
//!
//! let names: Vec<String> = session
//!     .query("select name from something order by id")
//!     .scalars()
//!     .unwrap();
//!
//! let name: String = session
//!     .query("select name from something where id = :id")
//!     .bind("id", 1i64)
//!     .scalar()
//!     .unwrap();
//! ```

use rowfold_core::{
    ColumnDecode, ColumnEncode, FlatRow, FromRow, HasMany, RowError, RowSource, fold_one,
    fold_rows,
};
use rusqlite::types::Value;
use rusqlite::{Connection, Rows, ToSql};
use tracing::debug;

use crate::convert;
use crate::error::{Result, StoreError};

/// Thin execution handle over a borrowed connection.
pub struct Session<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Session<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Executes a statement with positional arguments, returning the
    /// number of affected rows.
    pub fn execute(&self, sql: &str, args: &[&dyn ColumnEncode]) -> Result<usize> {
        debug!(sql, args = args.len(), "Executing statement");
        let params: Vec<Value> = args
            .iter()
            .map(|arg| convert::to_sql_value(&arg.encode()))
            .collect();
        Ok(self.conn.execute(sql, rusqlite::params_from_iter(params))?)
    }

    /// Starts a fluent query.
    pub fn query(&self, sql: &str) -> Query<'conn> {
        Query {
            conn: self.conn,
            sql: sql.to_string(),
            params: Vec::new(),
        }
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &Connection {
        self.conn
    }
}

/// A parameterized query, terminated by one of the mapping methods.
pub struct Query<'conn> {
    conn: &'conn Connection,
    sql: String,
    params: Vec<(String, Value)>,
}

impl Query<'_> {
    /// Binds a named parameter; `name` matches a `:name` placeholder in
    /// the SQL text.
    pub fn bind(mut self, name: &str, value: impl ColumnEncode) -> Self {
        self.params
            .push((format!(":{name}"), convert::to_sql_value(&value.encode())));
        self
    }

    /// Maps every row through [`FromRow`].
    pub fn list<T: FromRow>(self) -> Result<Vec<T>> {
        self.with_rows(|mut source| {
            let mut items = Vec::new();
            while let Some(row) = source.next_row()? {
                items.push(T::from_row(&row)?);
            }
            Ok(items)
        })
    }

    /// Maps at most one row; more than one is a [`StoreError::MultipleRows`].
    pub fn optional<T: FromRow>(self) -> Result<Option<T>> {
        self.with_rows(|mut source| match source.next_row()? {
            None => Ok(None),
            Some(row) => {
                let item = T::from_row(&row)?;
                match source.next_row()? {
                    None => Ok(Some(item)),
                    Some(_) => Err(StoreError::MultipleRows),
                }
            }
        })
    }

    /// Maps exactly one row; zero rows is a [`StoreError::NotFound`].
    pub fn one<T: FromRow>(self) -> Result<T> {
        self.optional()?
            .ok_or_else(|| StoreError::NotFound("query returned no rows".to_string()))
    }

    /// Reads the first column of every row as `T`.
    pub fn scalars<T: ColumnDecode>(self) -> Result<Vec<T>> {
        self.with_rows(|mut source| {
            let mut items = Vec::new();
            while let Some(row) = source.next_row()? {
                items.push(row.scalar::<T>()?);
            }
            Ok(items)
        })
    }

    /// Reads the first column of exactly one row as `T`.
    pub fn scalar<T: ColumnDecode>(self) -> Result<T> {
        self.with_rows(|mut source| match source.next_row()? {
            None => Err(StoreError::NotFound("query returned no rows".to_string())),
            Some(row) => {
                let item = row.scalar::<T>()?;
                match source.next_row()? {
                    None => Ok(item),
                    Some(_) => Err(StoreError::MultipleRows),
                }
            }
        })
    }

    /// Folds the joined result into parents with nested children; see
    /// [`fold_rows`].
    pub fn fold<P, FP, FC>(
        self,
        parent_key: &str,
        child_key: &str,
        make_parent: FP,
        make_child: FC,
    ) -> Result<Vec<P>>
    where
        P: HasMany,
        FP: FnMut(&FlatRow) -> std::result::Result<P, RowError>,
        FC: FnMut(&FlatRow) -> std::result::Result<P::Child, RowError>,
    {
        self.with_rows(|source| {
            Ok(fold_rows(
                source,
                parent_key,
                child_key,
                make_parent,
                make_child,
            )?)
        })
    }

    /// Single-parent fold for point lookups; see [`fold_one`].
    pub fn fold_one<P, FP, FC>(
        self,
        child_key: &str,
        make_parent: FP,
        make_child: FC,
    ) -> Result<Option<P>>
    where
        P: HasMany,
        FP: FnMut(&FlatRow) -> std::result::Result<P, RowError>,
        FC: FnMut(&FlatRow) -> std::result::Result<P::Child, RowError>,
    {
        self.with_rows(|source| Ok(fold_one(source, child_key, make_parent, make_child)?))
    }

    fn with_rows<T>(self, consume: impl FnOnce(SqliteRowSource<'_>) -> Result<T>) -> Result<T> {
        debug!(sql = %self.sql, params = self.params.len(), "Running query");
        let mut stmt = self.conn.prepare(&self.sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let refs: Vec<(&str, &dyn ToSql)> = self
            .params
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect();
        let rows = stmt.query(refs.as_slice())?;

        consume(SqliteRowSource { rows, names })
    }
}

/// Streaming [`RowSource`] over a live SQLite cursor.
///
/// Cursor faults surface as [`RowError::Upstream`]; consumers abort
/// rather than return a truncated result.
pub struct SqliteRowSource<'stmt> {
    rows: Rows<'stmt>,
    names: Vec<String>,
}

impl RowSource for SqliteRowSource<'_> {
    fn next_row(&mut self) -> std::result::Result<Option<FlatRow>, RowError> {
        match self.rows.next() {
            Ok(Some(row)) => convert::materialize_row(&self.names, row)
                .map(Some)
                .map_err(|e| RowError::Upstream(e.to_string())),
            Ok(None) => Ok(None),
            Err(e) => Err(RowError::Upstream(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowfold_core::Contact;

    fn sample_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE contacts (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
             INSERT INTO contacts (id, name) VALUES (1, 'Alice'), (2, 'Bob');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_scalars_and_scalar() {
        let conn = sample_conn();
        let session = Session::new(&conn);

        let names: Vec<String> = session
            .query("SELECT name FROM contacts ORDER BY id")
            .scalars()
            .unwrap();
        assert_eq!(names, vec!["Alice", "Bob"]);

        let name: String = session
            .query("SELECT name FROM contacts WHERE id = :id")
            .bind("id", 1i64)
            .scalar()
            .unwrap();
        assert_eq!(name, "Alice");
    }

    #[test]
    fn test_list_maps_rows() {
        let conn = sample_conn();
        let contacts: Vec<Contact> = Session::new(&conn)
            .query("SELECT id, name FROM contacts ORDER BY id")
            .list()
            .unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Alice");
        assert!(contacts[0].phones.is_empty());
    }

    #[test]
    fn test_one_cardinality_errors() {
        let conn = sample_conn();
        let session = Session::new(&conn);

        let missing = session
            .query("SELECT id, name FROM contacts WHERE id = :id")
            .bind("id", 99i64)
            .one::<Contact>();
        assert!(matches!(missing, Err(StoreError::NotFound(_))));

        let too_many = session
            .query("SELECT id, name FROM contacts")
            .one::<Contact>();
        assert!(matches!(too_many, Err(StoreError::MultipleRows)));
    }

    #[test]
    fn test_optional_absent_row() {
        let conn = sample_conn();
        let found: Option<Contact> = Session::new(&conn)
            .query("SELECT id, name FROM contacts WHERE id = :id")
            .bind("id", 99i64)
            .optional()
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_scalar_type_mismatch_is_row_error() {
        let conn = sample_conn();
        let result = Session::new(&conn)
            .query("SELECT name FROM contacts WHERE id = :id")
            .bind("id", 1i64)
            .scalar::<i64>();

        assert!(matches!(
            result,
            Err(StoreError::Row(RowError::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn test_execute_binds_positional_args() {
        let conn = sample_conn();
        let session = Session::new(&conn);

        let affected = session
            .execute(
                "INSERT INTO contacts (id, name) VALUES (?1, ?2)",
                &[&3i64, &"Carol"],
            )
            .unwrap();
        assert_eq!(affected, 1);

        let count: i64 = session
            .query("SELECT COUNT(*) FROM contacts")
            .scalar()
            .unwrap();
        assert_eq!(count, 3);
    }
}
