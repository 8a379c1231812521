//! Reconstruction of one-to-many object graphs from joined rows.
//!
//! A left join between a one-side table and a many-side table repeats the
//! parent columns on every child row. The fold in this module walks that
//! flat stream exactly once and rebuilds the nested shape: one parent per
//! distinct key, children appended in row-encounter order.

use std::collections::HashMap;

use crate::row::{FlatRow, Result, RowSource};

/// The one side of a one-to-many relationship being reconstructed.
pub trait HasMany {
    type Child;

    /// Appends a child in encounter order.
    fn attach(&mut self, child: Self::Child);
}

/// Folds a flat, repeated-parent row stream into parents with nested
/// children.
///
/// `make_parent` is called exactly once per distinct value of
/// `parent_key`, on the first row carrying that key; the parent's rank in
/// the output is that first row's position. `make_child` is called once
/// per row whose `child_key` column is non-null; the null test is on the
/// key column specifically, since other child columns may be null in
/// degenerate data. Children are appended as encountered, with no
/// deduplication: the result set is trusted to carry each child key once
/// per parent.
///
/// A parent whose every row has a null child key still appears in the
/// output, with no children. Any row error or source failure aborts the
/// fold; no partial result is returned.
///
/// # Examples
///
/// ```
/// use rowfold_core::{fold_rows, Contact, ColumnValue, FlatRow, Phone, VecSource};
///
/// let rows = VecSource::new(vec![
///     FlatRow::new().with("c_id", 1).with("c_name", "Alice")
///         .with("p_id", 2).with("p_type", "WORK").with("p_phone", "800-555-1234"),
///     FlatRow::new().with("c_id", 4).with("c_name", "Bob")
///         .with("p_id", ColumnValue::Null).with("p_type", ColumnValue::Null)
///         .with("p_phone", ColumnValue::Null),
/// ]);
///
/// let contacts: Vec<Contact> = fold_rows(
///     rows,
///     "c_id",
///     "p_id",
///     |row| Contact::from_row_prefixed(row, "c_"),
///     |row| Phone::from_row_prefixed(row, "p_"),
/// ).unwrap();
///
/// assert_eq!(contacts[0].phones.len(), 1);
/// assert!(contacts[1].phones.is_empty());
/// ```
pub fn fold_rows<S, P, FP, FC>(
    mut rows: S,
    parent_key: &str,
    child_key: &str,
    mut make_parent: FP,
    mut make_child: FC,
) -> Result<Vec<P>>
where
    S: RowSource,
    P: HasMany,
    FP: FnMut(&FlatRow) -> Result<P>,
    FC: FnMut(&FlatRow) -> Result<P::Child>,
{
    let mut parents: Vec<P> = Vec::new();
    // First occurrence of a key fixes the parent's output rank.
    let mut rank: HashMap<i64, usize> = HashMap::new();

    while let Some(row) = rows.next_row()? {
        let key: i64 = row.require(parent_key)?;
        let slot = match rank.get(&key) {
            Some(&slot) => slot,
            None => {
                parents.push(make_parent(&row)?);
                let slot = parents.len() - 1;
                rank.insert(key, slot);
                slot
            }
        };

        if row.column::<i64>(child_key)?.is_some() {
            let child = make_child(&row)?;
            parents[slot].attach(child);
        }
    }

    Ok(parents)
}

/// Single-parent variant of [`fold_rows`] for point lookups.
///
/// All rows are assumed to belong to one parent; the first row constructs
/// it and every non-null `child_key` row appends a child. Zero rows yield
/// `Ok(None)`, a lookup that found nothing, as opposed to a found parent
/// with no children.
pub fn fold_one<S, P, FP, FC>(
    mut rows: S,
    child_key: &str,
    mut make_parent: FP,
    mut make_child: FC,
) -> Result<Option<P>>
where
    S: RowSource,
    P: HasMany,
    FP: FnMut(&FlatRow) -> Result<P>,
    FC: FnMut(&FlatRow) -> Result<P::Child>,
{
    let mut parent: Option<P> = None;

    while let Some(row) = rows.next_row()? {
        if parent.is_none() {
            parent = Some(make_parent(&row)?);
        }

        if row.column::<i64>(child_key)?.is_some() {
            let child = make_child(&row)?;
            if let Some(p) = parent.as_mut() {
                p.attach(child);
            }
        }
    }

    Ok(parent)
}
