//! Entity types for the contact-book and account data model.
//!
//! These are the shapes reconstructed from flat result rows: a [`Contact`]
//! owns its [`Phone`]s (the one-to-many pair the fold rebuilds), and an
//! [`Account`] carries a [`Money`] balance decoded through the converter
//! traits. All types round-trip through serde.

use serde::{Deserialize, Serialize};

use crate::fold::HasMany;
use crate::money::Money;
use crate::row::{ColumnDecode, ColumnEncode, ColumnValue, FlatRow, FromRow, Result};

/// Category of a phone number, stored as its upper-case token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhoneType {
    Work,
    Mobile,
    Home,
}

impl PhoneType {
    /// Storage token, e.g. `"WORK"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneType::Work => "WORK",
            PhoneType::Mobile => "MOBILE",
            PhoneType::Home => "HOME",
        }
    }

    /// Parses a storage token back into a phone type.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "WORK" => Some(PhoneType::Work),
            "MOBILE" => Some(PhoneType::Mobile),
            "HOME" => Some(PhoneType::Home),
            _ => None,
        }
    }
}

impl std::fmt::Display for PhoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ColumnDecode for PhoneType {
    const EXPECTED: &'static str = "phone type";

    fn decode(value: &ColumnValue) -> Option<Self> {
        match value {
            ColumnValue::Text(s) => PhoneType::parse(s),
            _ => None,
        }
    }
}

impl ColumnEncode for PhoneType {
    fn encode(&self) -> ColumnValue {
        ColumnValue::Text(self.as_str().to_string())
    }
}

/// A phone number attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub id: i64,
    pub kind: PhoneType,
    pub number: String,
}

impl Phone {
    pub fn new(id: i64, kind: PhoneType, number: &str) -> Self {
        Self {
            id,
            kind,
            number: number.to_string(),
        }
    }

    /// Reads a phone from aliased join columns, e.g. `p_id`, `p_type`,
    /// `p_phone` for prefix `"p_"`.
    pub fn from_row_prefixed(row: &FlatRow, prefix: &str) -> Result<Self> {
        Ok(Self {
            id: row.require(&format!("{prefix}id"))?,
            kind: row.require(&format!("{prefix}type"))?,
            number: row.require(&format!("{prefix}phone"))?,
        })
    }
}

impl FromRow for Phone {
    fn from_row(row: &FlatRow) -> Result<Self> {
        Self::from_row_prefixed(row, "")
    }
}

/// A contact and its phone numbers.
///
/// The phone list preserves first-seen order from the row stream; nothing
/// deduplicates it.
///
/// # Examples
///
/// ```
/// use rowfold_core::{Contact, Phone, PhoneType};
///
/// let alice = Contact::new(1, "Alice")
///     .with_phone(Phone::new(2, PhoneType::Work, "800-555-1234"))
///     .with_phone(Phone::new(3, PhoneType::Mobile, "801-555-1212"));
///
/// assert_eq!(alice.phones.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phones: Vec<Phone>,
}

impl Contact {
    /// Creates a contact with no phones.
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            phones: Vec::new(),
        }
    }

    /// Adds a phone, builder style.
    pub fn with_phone(mut self, phone: Phone) -> Self {
        self.phones.push(phone);
        self
    }

    pub fn add_phone(&mut self, phone: Phone) {
        self.phones.push(phone);
    }

    /// Reads contact columns from an aliased join projection; the phone
    /// list starts empty and is filled by the fold.
    pub fn from_row_prefixed(row: &FlatRow, prefix: &str) -> Result<Self> {
        Ok(Self {
            id: row.require(&format!("{prefix}id"))?,
            name: row.require(&format!("{prefix}name"))?,
            phones: Vec::new(),
        })
    }
}

impl FromRow for Contact {
    fn from_row(row: &FlatRow) -> Result<Self> {
        Self::from_row_prefixed(row, "")
    }
}

impl HasMany for Contact {
    type Child = Phone;

    fn attach(&mut self, child: Phone) {
        self.phones.push(child);
    }
}

/// A named account with a monetary balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub balance: Money,
}

impl Account {
    pub fn new(id: i64, name: &str, balance: Money) -> Self {
        Self {
            id,
            name: name.to_string(),
            balance,
        }
    }
}

impl FromRow for Account {
    fn from_row(row: &FlatRow) -> Result<Self> {
        Ok(Self {
            id: row.require("id")?,
            name: row.require("name")?,
            balance: row.require("balance")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_phone_type_token_round_trip() {
        for kind in [PhoneType::Work, PhoneType::Mobile, PhoneType::Home] {
            assert_eq!(PhoneType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(PhoneType::parse("FAX"), None);
    }

    #[test]
    fn test_contact_builder() {
        let contact = Contact::new(1, "Alice")
            .with_phone(Phone::new(2, PhoneType::Work, "800-555-1234"));

        assert_eq!(contact.id, 1);
        assert_eq!(contact.phones.len(), 1);
        assert_eq!(contact.phones[0].kind, PhoneType::Work);
    }

    #[test]
    fn test_contact_from_prefixed_row() {
        let row = FlatRow::new().with("c_id", 4).with("c_name", "Bob");
        let contact = Contact::from_row_prefixed(&row, "c_").unwrap();

        assert_eq!(contact.id, 4);
        assert_eq!(contact.name, "Bob");
        assert!(contact.phones.is_empty());
    }

    #[test]
    fn test_phone_from_unprefixed_row() {
        let row = FlatRow::new()
            .with("id", 2)
            .with("type", "MOBILE")
            .with("phone", "801-555-1212");
        let phone = Phone::from_row(&row).unwrap();

        assert_eq!(phone.kind, PhoneType::Mobile);
        assert_eq!(phone.number, "801-555-1212");
    }

    #[test]
    fn test_account_from_row() {
        let row = FlatRow::new()
            .with("id", 1)
            .with("name", "Alice")
            .with("balance", "10");
        let account = Account::from_row(&row).unwrap();

        assert_eq!(account.balance, Money::of(Currency::Usd, 10));
    }

    #[test]
    fn test_contact_json_round_trip() {
        let contact = Contact::new(1, "Alice")
            .with_phone(Phone::new(2, PhoneType::Work, "800-555-1234"));

        let json = serde_json::to_string(&contact).unwrap();
        let back: Contact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, contact);
    }
}
