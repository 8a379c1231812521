//! Flat result rows and typed column access.
//!
//! A [`FlatRow`] is one record of an already-joined result set: an ordered
//! list of `(column name, value)` pairs handed over by a [`RowSource`] one
//! row at a time. Rows are ephemeral; they are read during the step that
//! consumes them and never retained.
//!
//! Column values cross the boundary as the storage-class enum
//! [`ColumnValue`]; the [`ColumnDecode`] and [`ColumnEncode`] traits form
//! the statically-dispatched converter table between column values and
//! domain types.

use thiserror::Error;

/// Errors raised while reading rows.
///
/// All three kinds are fatal to the operation consuming the row stream:
/// no partial result is produced, and the error is surfaced unchanged to
/// the caller, who owns retry and reporting policy.
#[derive(Debug, Error)]
pub enum RowError {
    /// Requested column name is absent from the row's schema.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A column's stored value cannot be read as the requested type.
    #[error("type mismatch in column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// The row source failed while being iterated.
    #[error("row source failure: {0}")]
    Upstream(String),
}

/// Convenience alias for results with [`RowError`].
pub type Result<T> = std::result::Result<T, RowError>;

/// A nullable scalar as stored in one column of a result row.
///
/// Mirrors the storage classes of the relational backend; richer domain
/// types ([`Money`](crate::Money), [`PhoneType`](crate::PhoneType)) are
/// reconstructed from these via [`ColumnDecode`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl ColumnValue {
    /// Whether this is the SQL `NULL` value.
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    /// Storage-class name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnValue::Null => "null",
            ColumnValue::Integer(_) => "integer",
            ColumnValue::Real(_) => "real",
            ColumnValue::Text(_) => "text",
            ColumnValue::Blob(_) => "blob",
        }
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        ColumnValue::Integer(v)
    }
}

impl From<i32> for ColumnValue {
    fn from(v: i32) -> Self {
        ColumnValue::Integer(i64::from(v))
    }
}

impl From<f64> for ColumnValue {
    fn from(v: f64) -> Self {
        ColumnValue::Real(v)
    }
}

impl From<&str> for ColumnValue {
    fn from(v: &str) -> Self {
        ColumnValue::Text(v.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(v: String) -> Self {
        ColumnValue::Text(v)
    }
}

/// Decodes a non-null [`ColumnValue`] into a domain type.
///
/// Implementations form an explicit, statically-typed converter table:
/// the type requested at the call site selects the conversion, and an
/// unsupported storage class is reported as
/// [`RowError::TypeMismatch`] by the [`FlatRow`] accessors.
pub trait ColumnDecode: Sized {
    /// Type label used in [`RowError::TypeMismatch`] messages.
    const EXPECTED: &'static str;

    /// Decodes a non-null column value; `None` signals a mismatch.
    fn decode(value: &ColumnValue) -> Option<Self>;
}

impl ColumnDecode for i64 {
    const EXPECTED: &'static str = "integer";

    fn decode(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl ColumnDecode for f64 {
    const EXPECTED: &'static str = "real";

    fn decode(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Real(f) => Some(*f),
            ColumnValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl ColumnDecode for String {
    const EXPECTED: &'static str = "text";

    fn decode(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl ColumnDecode for bool {
    const EXPECTED: &'static str = "boolean";

    fn decode(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Integer(i) => Some(*i != 0),
            _ => None,
        }
    }
}

/// Encodes a domain value into a [`ColumnValue`] for statement binding.
pub trait ColumnEncode {
    fn encode(&self) -> ColumnValue;
}

impl<T: ColumnEncode + ?Sized> ColumnEncode for &T {
    fn encode(&self) -> ColumnValue {
        (**self).encode()
    }
}

impl<T: ColumnEncode> ColumnEncode for Option<T> {
    fn encode(&self) -> ColumnValue {
        match self {
            Some(v) => v.encode(),
            None => ColumnValue::Null,
        }
    }
}

impl ColumnEncode for i64 {
    fn encode(&self) -> ColumnValue {
        ColumnValue::Integer(*self)
    }
}

impl ColumnEncode for i32 {
    fn encode(&self) -> ColumnValue {
        ColumnValue::Integer(i64::from(*self))
    }
}

impl ColumnEncode for f64 {
    fn encode(&self) -> ColumnValue {
        ColumnValue::Real(*self)
    }
}

impl ColumnEncode for bool {
    fn encode(&self) -> ColumnValue {
        ColumnValue::Integer(i64::from(*self))
    }
}

impl ColumnEncode for str {
    fn encode(&self) -> ColumnValue {
        ColumnValue::Text(self.to_string())
    }
}

impl ColumnEncode for String {
    fn encode(&self) -> ColumnValue {
        ColumnValue::Text(self.clone())
    }
}

/// One flat record of a joined result set.
///
/// Column order matches the statement's projection, so the first column
/// is addressable for scalar queries while everything else is looked up
/// by name.
///
/// # Examples
///
/// ```
/// use rowfold_core::{ColumnValue, FlatRow};
///
/// let row = FlatRow::new()
///     .with("id", 7)
///     .with("name", "Alice")
///     .with("note", ColumnValue::Null);
///
/// assert_eq!(row.require::<i64>("id").unwrap(), 7);
/// assert_eq!(row.column::<String>("note").unwrap(), None);
/// assert!(row.require::<String>("missing").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlatRow {
    columns: Vec<(String, ColumnValue)>,
}

impl FlatRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.push(name, value.into());
        self
    }

    /// Appends a column.
    pub fn push(&mut self, name: impl Into<String>, value: ColumnValue) {
        self.columns.push((name.into(), value));
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Raw value of a column, `None` when the name is absent.
    pub fn get(&self, name: &str) -> Option<&ColumnValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    fn lookup(&self, name: &str) -> Result<&ColumnValue> {
        self.get(name)
            .ok_or_else(|| RowError::MissingColumn(name.to_string()))
    }

    /// Reads a nullable column as `T`.
    ///
    /// Returns `Ok(None)` only for SQL `NULL`. An absent column is a
    /// [`RowError::MissingColumn`] and a wrong storage class is a
    /// [`RowError::TypeMismatch`]; the two are never conflated.
    pub fn column<T: ColumnDecode>(&self, name: &str) -> Result<Option<T>> {
        let value = self.lookup(name)?;
        if value.is_null() {
            return Ok(None);
        }
        decode_value(name, value).map(Some)
    }

    /// Reads a required column as `T`; `NULL` is a type mismatch.
    pub fn require<T: ColumnDecode>(&self, name: &str) -> Result<T> {
        let value = self.lookup(name)?;
        if value.is_null() {
            return Err(RowError::TypeMismatch {
                column: name.to_string(),
                expected: T::EXPECTED,
                found: "null".to_string(),
            });
        }
        decode_value(name, value)
    }

    /// Reads the first column as `T`, for single-column projections.
    pub fn scalar<T: ColumnDecode>(&self) -> Result<T> {
        let (name, _) = self
            .columns
            .first()
            .ok_or_else(|| RowError::MissingColumn("#0".to_string()))?;
        let name = name.clone();
        self.require(&name)
    }
}

fn decode_value<T: ColumnDecode>(name: &str, value: &ColumnValue) -> Result<T> {
    T::decode(value).ok_or_else(|| RowError::TypeMismatch {
        column: name.to_string(),
        expected: T::EXPECTED,
        found: value.type_name().to_string(),
    })
}

/// Maps a full row to a value, the counterpart of per-column decoding.
///
/// Implementations read unprefixed column names; entity types additionally
/// provide `from_row_prefixed` constructors for aliased join projections.
pub trait FromRow: Sized {
    fn from_row(row: &FlatRow) -> Result<Self>;
}

/// External supplier of flat rows from an already-executed statement.
///
/// The stream is finite, ordered, and single-pass: consumers take rows
/// strictly forward and must not assume re-iteration. A source that
/// streams from a live cursor reports cursor faults as
/// [`RowError::Upstream`], which consumers propagate rather than
/// truncate into a partial result.
pub trait RowSource {
    /// Produces the next row, or `None` at end of stream.
    fn next_row(&mut self) -> Result<Option<FlatRow>>;
}

/// Row source over an eagerly materialized row set.
#[derive(Debug)]
pub struct VecSource {
    rows: std::vec::IntoIter<FlatRow>,
}

impl VecSource {
    pub fn new(rows: Vec<FlatRow>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl RowSource for VecSource {
    fn next_row(&mut self) -> Result<Option<FlatRow>> {
        Ok(self.rows.next())
    }
}

/// Adapts a fallible row iterator to a [`RowSource`].
pub struct RowIter<I> {
    inner: I,
}

impl<I> RowIter<I>
where
    I: Iterator<Item = Result<FlatRow>>,
{
    pub fn new(rows: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            inner: rows.into_iter(),
        }
    }
}

impl<I> RowSource for RowIter<I>
where
    I: Iterator<Item = Result<FlatRow>>,
{
    fn next_row(&mut self) -> Result<Option<FlatRow>> {
        self.inner.next().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_null_vs_missing() {
        let row = FlatRow::new().with("a", ColumnValue::Null).with("b", 1);

        assert_eq!(row.column::<i64>("a").unwrap(), None);
        assert_eq!(row.column::<i64>("b").unwrap(), Some(1));
        assert!(matches!(
            row.column::<i64>("c"),
            Err(RowError::MissingColumn(name)) if name == "c"
        ));
    }

    #[test]
    fn test_require_rejects_null() {
        let row = FlatRow::new().with("a", ColumnValue::Null);

        match row.require::<i64>("a") {
            Err(RowError::TypeMismatch { found, .. }) => assert_eq!(found, "null"),
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_reports_classes() {
        let row = FlatRow::new().with("name", "Alice");

        match row.require::<i64>("name") {
            Err(RowError::TypeMismatch {
                column,
                expected,
                found,
            }) => {
                assert_eq!(column, "name");
                assert_eq!(expected, "integer");
                assert_eq!(found, "text");
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_reads_first_column() {
        let row = FlatRow::new().with("name", "Alice").with("id", 1);
        assert_eq!(row.scalar::<String>().unwrap(), "Alice");

        let empty = FlatRow::new();
        assert!(matches!(
            empty.scalar::<String>(),
            Err(RowError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_real_decode_promotes_integers() {
        let row = FlatRow::new().with("x", 3);
        assert_eq!(row.require::<f64>("x").unwrap(), 3.0);
    }

    #[test]
    fn test_option_encodes_null() {
        assert_eq!(None::<i64>.encode(), ColumnValue::Null);
        assert_eq!(Some(5i64).encode(), ColumnValue::Integer(5));
    }

    #[test]
    fn test_row_iter_surfaces_errors() {
        let mut source = RowIter::new(vec![
            Ok(FlatRow::new().with("id", 1)),
            Err(RowError::Upstream("cursor gone".to_string())),
        ]);

        assert!(source.next_row().unwrap().is_some());
        assert!(matches!(
            source.next_row(),
            Err(RowError::Upstream(msg)) if msg == "cursor gone"
        ));
    }
}
