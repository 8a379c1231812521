//! Conversion between [`ColumnValue`] and rusqlite's value types.
//!
//! The core crate never sees rusqlite; this module is the seam where a
//! cursor row is materialized into a [`FlatRow`] and where bound values
//! become SQLite parameters.

use rowfold_core::{ColumnValue, FlatRow};
use rusqlite::Row;
use rusqlite::types::{Value, ValueRef};

/// Converts a bound column value into an owned SQLite value.
pub(crate) fn to_sql_value(value: &ColumnValue) -> Value {
    match value {
        ColumnValue::Null => Value::Null,
        ColumnValue::Integer(i) => Value::Integer(*i),
        ColumnValue::Real(f) => Value::Real(*f),
        ColumnValue::Text(s) => Value::Text(s.clone()),
        ColumnValue::Blob(b) => Value::Blob(b.clone()),
    }
}

/// Converts a borrowed SQLite value into an owned column value.
pub(crate) fn from_sql_value(value: ValueRef<'_>) -> ColumnValue {
    match value {
        ValueRef::Null => ColumnValue::Null,
        ValueRef::Integer(i) => ColumnValue::Integer(i),
        ValueRef::Real(f) => ColumnValue::Real(f),
        ValueRef::Text(t) => ColumnValue::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => ColumnValue::Blob(b.to_vec()),
    }
}

/// Materializes one cursor row into a [`FlatRow`] under the statement's
/// column names. Only the row being materialized is buffered.
pub(crate) fn materialize_row(names: &[String], row: &Row<'_>) -> rusqlite::Result<FlatRow> {
    let mut flat = FlatRow::new();
    for (i, name) in names.iter().enumerate() {
        flat.push(name.clone(), from_sql_value(row.get_ref(i)?));
    }
    Ok(flat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_mapping_is_lossless() {
        let values = vec![
            ColumnValue::Null,
            ColumnValue::Integer(42),
            ColumnValue::Real(2.5),
            ColumnValue::Text("hi".to_string()),
            ColumnValue::Blob(vec![1, 2, 3]),
        ];

        for value in values {
            let sql = to_sql_value(&value);
            let back = from_sql_value(ValueRef::from(&sql));
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_materialize_row_keeps_column_order() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let mut stmt = conn
            .prepare("SELECT 1 AS id, 'Alice' AS name, NULL AS note")
            .unwrap();
        let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let mut rows = stmt.query([]).unwrap();

        let row = rows.next().unwrap().unwrap();
        let flat = materialize_row(&names, row).unwrap();

        assert_eq!(flat.len(), 3);
        assert_eq!(flat.require::<i64>("id").unwrap(), 1);
        assert_eq!(flat.scalar::<i64>().unwrap(), 1);
        assert!(flat.get("note").unwrap().is_null());
    }
}
