//! SQL schema generation with customizable table prefixes.
//!
//! Generates `CREATE TABLE` and `CREATE INDEX` statements for the contact
//! and account tables. All table names are prefixed with a configurable
//! string, so multiple isolated data sets can share one SQLite database.
//!
//! # Table structure
//!
//! - `{prefix}contacts` — the one side of the contact/phone relationship
//! - `{prefix}phones` — phone numbers, cascading on contact deletion
//! - `{prefix}accounts` — accounts with a decimal balance column
//!
//! Prefixes must contain only alphanumeric characters and underscores.

use crate::error::{Result, StoreError};

/// Validates that a table prefix contains only alphanumeric characters and underscores.
pub(crate) fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(StoreError::InvalidPrefix(prefix.to_string()));
    }
    if !prefix.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(StoreError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

/// Generates the complete SQL schema for all tables with the given prefix.
///
/// # Errors
///
/// Returns [`StoreError::InvalidPrefix`] if the prefix contains characters
/// other than alphanumerics and underscores, or if it is empty.
pub fn generate_schema_sql(prefix: &str) -> Result<String> {
    validate_prefix(prefix)?;

    let sql = format!(
        r#"
CREATE TABLE IF NOT EXISTS {prefix}contacts (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS {prefix}phones (
    id INTEGER PRIMARY KEY,
    contact_id INTEGER NOT NULL,
    type TEXT NOT NULL CHECK (type IN ('WORK', 'MOBILE', 'HOME')),
    phone TEXT NOT NULL,
    FOREIGN KEY (contact_id) REFERENCES {prefix}contacts(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS {prefix}accounts (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    balance TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_{prefix}phones_contact ON {prefix}phones(contact_id);
"#,
        prefix = prefix
    );

    Ok(sql)
}

/// Generates SQL to drop all schema tables in reverse dependency order.
///
/// # Errors
///
/// Returns [`StoreError::InvalidPrefix`] if the prefix is invalid.
pub fn generate_drop_sql(prefix: &str) -> Result<String> {
    validate_prefix(prefix)?;

    let sql = format!(
        r#"
DROP TABLE IF EXISTS {prefix}phones;
DROP TABLE IF EXISTS {prefix}contacts;
DROP TABLE IF EXISTS {prefix}accounts;
"#,
        prefix = prefix
    );

    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_prefix() {
        assert!(validate_prefix("cb_").is_ok());
        assert!(validate_prefix("test123").is_ok());
        assert!(validate_prefix("A_B_C").is_ok());
    }

    #[test]
    fn test_invalid_prefix_empty() {
        assert!(validate_prefix("").is_err());
    }

    #[test]
    fn test_invalid_prefix_special_chars() {
        assert!(validate_prefix("drop;--").is_err());
        assert!(validate_prefix("hello world").is_err());
        assert!(validate_prefix("test-prefix").is_err());
    }

    #[test]
    fn test_generate_schema_sql_contains_tables() {
        let sql = generate_schema_sql("cb_").unwrap();
        assert!(sql.contains("cb_contacts"));
        assert!(sql.contains("cb_phones"));
        assert!(sql.contains("cb_accounts"));
        assert!(sql.contains("idx_cb_phones_contact"));
    }

    #[test]
    fn test_generate_drop_sql_contains_all_tables() {
        let sql = generate_drop_sql("cb_").unwrap();
        assert!(sql.contains("DROP TABLE IF EXISTS cb_phones"));
        assert!(sql.contains("DROP TABLE IF EXISTS cb_contacts"));
        assert!(sql.contains("DROP TABLE IF EXISTS cb_accounts"));
    }

    #[test]
    fn test_generate_drop_sql_invalid_prefix() {
        assert!(generate_drop_sql("").is_err());
    }

    #[test]
    fn test_phone_type_check_constraint() {
        let sql = generate_schema_sql("t_").unwrap();
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        conn.execute_batch(&sql).unwrap();

        conn.execute(
            "INSERT INTO t_contacts (id, name) VALUES (1, 'Alice')",
            [],
        )
        .unwrap();

        assert!(conn
            .execute(
                "INSERT INTO t_phones (id, contact_id, type, phone) VALUES (2, 1, 'WORK', '555')",
                [],
            )
            .is_ok());

        // Unknown category is rejected by the CHECK constraint.
        assert!(conn
            .execute(
                "INSERT INTO t_phones (id, contact_id, type, phone) VALUES (3, 1, 'FAX', '555')",
                [],
            )
            .is_err());
    }

    #[test]
    fn test_cascade_removes_phones() {
        let sql = generate_schema_sql("t_").unwrap();
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        conn.execute_batch(&sql).unwrap();

        conn.execute("INSERT INTO t_contacts (id, name) VALUES (1, 'Alice')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO t_phones (id, contact_id, type, phone) VALUES (2, 1, 'WORK', '555')",
            [],
        )
        .unwrap();

        conn.execute("DELETE FROM t_contacts WHERE id = 1", [])
            .unwrap();

        let phones: i64 = conn
            .query_row("SELECT COUNT(*) FROM t_phones", [], |row| row.get(0))
            .unwrap();
        assert_eq!(phones, 0);
    }
}
