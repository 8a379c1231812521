//! Contact graph reconstruction walkthrough.
//!
//! Inserts contacts with and without phones, then loads them back as
//! nested graphs through the join fold and dumps the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p rowfold-demos --example contact_graph
//! ```

use rowfold_core::{Contact, Phone, PhoneType};
use rowfold_sqlite::{ContactStore, Migration};
use rusqlite::Connection;

fn main() {
    println!("=== Migration ===");
    let conn = Connection::open_in_memory().unwrap();
    let mut migration = Migration::new(conn, "cb_").unwrap();
    migration.up().unwrap();
    let status = migration.status().unwrap();
    println!("Tables exist: {}", status.tables_exist);

    println!("\n=== Inserting ===");
    let conn = migration.into_connection();
    let store = ContactStore::new(&conn, "cb_").unwrap();

    store
        .insert_full_contact(
            &Contact::new(1, "Alice")
                .with_phone(Phone::new(2, PhoneType::Work, "800-555-1234"))
                .with_phone(Phone::new(3, PhoneType::Mobile, "801-555-1212")),
        )
        .unwrap();
    store.insert_full_contact(&Contact::new(4, "Bob")).unwrap();
    println!("Inserted Alice (2 phones) and Bob (no phones)");

    println!("\n=== Point lookup ===");
    let alice = store.get_full_contact(1).unwrap().unwrap();
    println!("{} has {} phones:", alice.name, alice.phones.len());
    for phone in &alice.phones {
        println!("  {} {}", phone.kind, phone.number);
    }

    let bob = store.get_full_contact(4).unwrap().unwrap();
    println!("{} has {} phones", bob.name, bob.phones.len());

    println!("\n=== Full listing ===");
    let contacts = store.list_full_contacts().unwrap();
    println!("{}", serde_json::to_string_pretty(&contacts).unwrap());

    println!("\n=== Cleanup ===");
    store.delete_contact(1).unwrap();
    println!(
        "After deleting Alice: {} contacts remain",
        store.list_full_contacts().unwrap().len()
    );

    println!("\nDone!");
}
