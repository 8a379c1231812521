//! Account store walkthrough with monetary balances.
//!
//! Shows the custom column converters at work: `Money` values cross the
//! SQL boundary as exact decimals, never floats.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p rowfold-demos --example accounts
//! ```

use rowfold_core::{Account, Currency, Money};
use rowfold_sqlite::{AccountStore, Migration};
use rusqlite::Connection;

fn main() {
    let conn = Connection::open_in_memory().unwrap();
    let mut migration = Migration::new(conn, "cb_").unwrap();
    migration.up().unwrap();
    let conn = migration.into_connection();

    let store = AccountStore::new(&conn, "cb_").unwrap();

    println!("=== Inserting ===");
    store
        .insert(&Account::new(1, "Alice", Money::of(Currency::Usd, 10)))
        .unwrap();
    store
        .insert(&Account::new(2, "Bob", Money::of(Currency::Usd, 5)))
        .unwrap();

    for account in store.list().unwrap() {
        println!("  {} {} -> {}", account.id, account.name, account.balance);
    }

    println!("\n=== Updating ===");
    store
        .update(&Account::new(2, "Robert", Money::of(Currency::Usd, 10)))
        .unwrap();
    let robert = store.get_by_id(2).unwrap().unwrap();
    println!("  {} now holds {}", robert.name, robert.balance);

    println!("\nDone!");
}
