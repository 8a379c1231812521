//! Fluent query walkthrough.
//!
//! Creates a table, inserts rows with positional arguments, and reads
//! them back through scalar projections and named binds.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p rowfold-demos --example fluent_api
//! ```

use rowfold_sqlite::Session;
use rusqlite::Connection;

fn main() {
    let conn = Connection::open_in_memory().unwrap();
    let session = Session::new(&conn);

    println!("=== Setup ===");
    session
        .execute(
            "CREATE TABLE something (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
            &[],
        )
        .unwrap();
    session
        .execute(
            "INSERT INTO something (id, name) VALUES (?1, ?2)",
            &[&1i64, &"Alice"],
        )
        .unwrap();
    session
        .execute(
            "INSERT INTO something (id, name) VALUES (?1, ?2)",
            &[&2i64, &"Bob"],
        )
        .unwrap();
    println!("Inserted 2 rows");

    println!("\n=== Scalar list ===");
    let names: Vec<String> = session
        .query("SELECT name FROM something ORDER BY id")
        .scalars()
        .unwrap();
    println!("Names: {names:?}");

    println!("\n=== Point lookup ===");
    let name: String = session
        .query("SELECT name FROM something WHERE id = :id")
        .bind("id", 1i64)
        .scalar()
        .unwrap();
    println!("Name of id 1: {name}");

    println!("\nDone!");
}
