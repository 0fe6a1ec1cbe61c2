//! Range Store
//!
//! Loads a GeoIP-style CSV into a `RangeTable` and writes it back.
//!
//! ## Responsibilities
//! - Parse six-field rows into grouped records (all-or-nothing)
//! - Sort keys once, at load time
//! - Serialize groups back in table order, skipping declared-empty groups
//! - Bind a table to its backing file for reload/flush
//!
//! ## Concurrency
//! No internal locking. A `RangeStore` shared between threads must be
//! wrapped by the caller (e.g. a single-writer lock).

use std::path::{Path, PathBuf};

use crate::error::{RangeError, Result};
use crate::format::{RowReader, RowWriter};
use crate::table::{
    GroupEntry, InsertOutcome, Mutation, RangeKey, RangeRecord, RangeTable,
};

// =============================================================================
// Stateless Load / Write
// =============================================================================

/// Load a range file into a freshly built table
///
/// Every row must have exactly six fields; the first bad row aborts the
/// whole load. The returned table is sorted by `(range_name, short_name)`.
pub fn load(path: &Path) -> Result<RangeTable> {
    let reader = RowReader::open(path)?;
    let mut table = RangeTable::new();
    let mut rows = 0usize;

    for row in reader.rows() {
        let row = row?;
        let fields = row.fields.len();
        let (key, record) = RangeRecord::from_fields(row.fields).ok_or(RangeError::Parse {
            line: row.line,
            fields,
        })?;
        table.push_record(key, record);
        rows += 1;
    }

    table.sort_keys();

    tracing::debug!(
        path = %path.display(),
        rows,
        keys = table.len(),
        "loaded range table"
    );

    Ok(table)
}

/// Write a table in its current key order
///
/// Declared-empty groups contribute no rows. Returns the number of rows
/// written.
pub fn write(path: &Path, table: &RangeTable) -> Result<u64> {
    let mut writer = RowWriter::create(path)?;

    for (key, group) in table.iter() {
        for record in group.records() {
            writer.write_row(&record.to_fields(key))?;
        }
    }

    let rows = writer.finish_sync()?;

    tracing::debug!(
        path = %path.display(),
        rows,
        keys = table.len(),
        "wrote range table"
    );

    Ok(rows)
}

// =============================================================================
// File-Backed Store
// =============================================================================

/// A range table bound to its backing file
#[derive(Debug, Clone)]
pub struct RangeStore {
    /// Backing CSV file
    path: PathBuf,

    table: RangeTable,
}

impl RangeStore {
    /// Bind an empty table to `path` without reading it
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: RangeTable::new(),
        }
    }

    /// Bind to `path` and load it
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::new(path);
        store.reload()?;
        Ok(store)
    }

    /// Re-read the backing file, replacing the table
    ///
    /// On failure the current table is kept as it was.
    pub fn reload(&mut self) -> Result<()> {
        self.table = load(&self.path)?;
        Ok(())
    }

    /// Write the table back to the backing file
    pub fn flush(&self) -> Result<u64> {
        write(&self.path, &self.table)
    }

    /// Write the table to another file; the binding is unchanged
    pub fn write_to(&self, path: &Path) -> Result<u64> {
        write(path, &self.table)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Declare `key` as an empty group
    ///
    /// Any records previously held by `key` are discarded.
    pub fn create(&mut self, key: RangeKey) -> Option<GroupEntry> {
        self.table.create(key)
    }

    /// Remove `key`; no-op when absent
    pub fn delete(&mut self, key: &RangeKey) -> Option<GroupEntry> {
        self.table.delete(key)
    }

    /// Append to an existing group or start a new one
    pub fn insert_records(
        &mut self,
        key: RangeKey,
        records: Vec<RangeRecord>,
    ) -> Result<InsertOutcome> {
        self.table.insert_records(key, records)
    }

    pub fn apply(&mut self, mutation: Mutation) -> Result<()> {
        self.table.apply(mutation)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Keys in current order (sorted right after a load only)
    pub fn list_keys(&self) -> Vec<RangeKey> {
        self.table.list_keys()
    }

    /// Records for `key`, or an empty slice
    pub fn get_records(&self, key: &RangeKey) -> &[RangeRecord] {
        self.table.get_records(key)
    }

    pub fn table(&self) -> &RangeTable {
        &self.table
    }

    pub fn into_table(self) -> RangeTable {
        self.table
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
