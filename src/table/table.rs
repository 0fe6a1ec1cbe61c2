//! RangeTable implementation
//!
//! Insertion-ordered map from `RangeKey` to `GroupEntry`.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::{RangeError, Result};

use super::{GroupEntry, RangeKey, RangeRecord};

/// A mutation applied to a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Declare `key` as an empty group, discarding any records it held
    Create(RangeKey),

    /// Remove `key` if present
    Delete(RangeKey),

    /// Append to an existing group, or start a new one
    InsertOrCreate {
        key: RangeKey,
        records: Vec<RangeRecord>,
    },
}

/// Which branch an `InsertOrCreate` took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Records were appended to an existing group
    Appended,

    /// The key was absent and now holds the records
    Created,

    /// Empty batch; nothing changed
    Unchanged,
}

/// Grouped, ordered table of IP ranges
///
/// ## Ordering
/// - New keys are appended at the end
/// - Overwriting an existing key keeps its position
/// - Deleting a key closes the gap
/// - `sort_keys()` reorders by `RangeKey`; nothing calls it implicitly
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    groups: IndexMap<RangeKey, GroupEntry>,
}

impl RangeTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys (declared-empty groups included)
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across all groups
    pub fn record_count(&self) -> usize {
        self.groups.values().map(|g| g.records().len()).sum()
    }

    pub fn contains_key(&self, key: &RangeKey) -> bool {
        self.groups.contains_key(key)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get the raw group entry for a key
    pub fn get(&self, key: &RangeKey) -> Option<&GroupEntry> {
        self.groups.get(key)
    }

    /// Records for `key`; empty when the key is absent or declared empty
    pub fn get_records(&self, key: &RangeKey) -> &[RangeRecord] {
        self.get(key).map(GroupEntry::records).unwrap_or(&[])
    }

    /// Keys in current iteration order
    pub fn list_keys(&self) -> Vec<RangeKey> {
        self.keys().cloned().collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &RangeKey> {
        self.groups.keys()
    }

    /// Iterate `(key, group)` pairs in current order
    pub fn iter(&self) -> impl Iterator<Item = (&RangeKey, &GroupEntry)> {
        self.groups.iter()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append one record to `key`, starting the group if absent
    ///
    /// Used while loading. A declared-empty group is started fresh.
    pub fn push_record(&mut self, key: RangeKey, record: RangeRecord) {
        match self.groups.entry(key) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if let GroupEntry::Ranges(records) = entry {
                    records.push(record);
                } else {
                    *entry = GroupEntry::Ranges(vec![record]);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(GroupEntry::Ranges(vec![record]));
            }
        }
    }

    /// Declare `key` as an empty group
    ///
    /// Unconditionally overwrites whatever the key held. Returns the
    /// previous entry so callers can tell whether records were discarded.
    pub fn create(&mut self, key: RangeKey) -> Option<GroupEntry> {
        match self.groups.entry(key) {
            Entry::Occupied(mut occupied) => {
                let previous = std::mem::replace(occupied.get_mut(), GroupEntry::Empty);
                if !previous.records().is_empty() {
                    tracing::warn!(
                        key = %occupied.key(),
                        discarded = previous.records().len(),
                        "create discarded existing records"
                    );
                }
                Some(previous)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(GroupEntry::Empty);
                None
            }
        }
    }

    /// Remove `key` and its group; absent keys are ignored
    pub fn delete(&mut self, key: &RangeKey) -> Option<GroupEntry> {
        self.groups.shift_remove(key)
    }

    /// Append `records` to `key`, or start the group if the key is absent
    ///
    /// Appending to a declared-empty group fails with `InvalidState` and
    /// leaves the table untouched; delete the key first to start over.
    pub fn insert_records(
        &mut self,
        key: RangeKey,
        records: Vec<RangeRecord>,
    ) -> Result<InsertOutcome> {
        match self.groups.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_declared_empty() {
                    return Err(RangeError::InvalidState(format!(
                        "cannot append to declared-empty group {}",
                        occupied.key()
                    )));
                }
                if records.is_empty() {
                    return Ok(InsertOutcome::Unchanged);
                }
                if let GroupEntry::Ranges(existing) = occupied.get_mut() {
                    existing.extend(records);
                }
                Ok(InsertOutcome::Appended)
            }
            Entry::Vacant(_) if records.is_empty() => Ok(InsertOutcome::Unchanged),
            Entry::Vacant(vacant) => {
                vacant.insert(GroupEntry::Ranges(records));
                Ok(InsertOutcome::Created)
            }
        }
    }

    /// Apply a tagged mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<()> {
        match mutation {
            Mutation::Create(key) => {
                self.create(key);
            }
            Mutation::Delete(key) => {
                self.delete(&key);
            }
            Mutation::InsertOrCreate { key, records } => {
                self.insert_records(key, records)?;
            }
        }
        Ok(())
    }

    /// Reorder keys ascending by `(range_name, short_name)`
    pub fn sort_keys(&mut self) {
        self.groups.sort_keys();
    }
}

impl PartialEq for RangeTable {
    /// Tables are equal when they hold the same keys, in the same order,
    /// with the same groups
    fn eq(&self, other: &Self) -> bool {
        self.groups.len() == other.groups.len() && self.groups.iter().eq(other.groups.iter())
    }
}

impl Eq for RangeTable {}

impl FromIterator<(RangeKey, RangeRecord)> for RangeTable {
    /// Group records by key in arrival order (no sorting)
    fn from_iter<I: IntoIterator<Item = (RangeKey, RangeRecord)>>(iter: I) -> Self {
        let mut table = RangeTable::new();
        for (key, record) in iter {
            table.push_record(key, record);
        }
        table
    }
}
