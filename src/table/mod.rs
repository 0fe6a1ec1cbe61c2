//! Range Table Module
//!
//! In-memory grouping of IP ranges by named category.
//!
//! ## Responsibilities
//! - Group range records under a `(range_name, short_name)` key
//! - Preserve record order inside a group; never deduplicate
//! - Keep keys in insertion order, sorted only when asked (after a load)
//! - Model the declared-but-empty group explicitly
//!
//! ## Ordering
//! ```text
//! load:     rows ──group──▶ table ──sort_keys()──▶ ("Alpha","A"), ("Zeta","Z")
//! mutation: create ("Mid","M") ─────────────────▶ ("Alpha","A"), ("Zeta","Z"), ("Mid","M")
//! ```
//! Sorting happens once. Keys created afterwards are appended and the table
//! is not re-sorted.

mod table;

pub use table::{InsertOutcome, Mutation, RangeTable};

/// Number of fields in a serialized range row
pub const FIELD_COUNT: usize = 6;

/// Identifies a named network category
///
/// Field order matters: the derived `Ord` compares `range_name` first, then
/// `short_name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RangeKey {
    pub range_name: String,
    pub short_name: String,
}

impl RangeKey {
    pub fn new(range_name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            range_name: range_name.into(),
            short_name: short_name.into(),
        }
    }
}

impl std::fmt::Display for RangeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.range_name, self.short_name)
    }
}

/// One IP range, stored exactly as read
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeRecord {
    pub ip_start: String,
    pub ip_end: String,
    pub int_start: String,
    pub int_end: String,
}

impl RangeRecord {
    pub fn new(
        ip_start: impl Into<String>,
        ip_end: impl Into<String>,
        int_start: impl Into<String>,
        int_end: impl Into<String>,
    ) -> Self {
        Self {
            ip_start: ip_start.into(),
            ip_end: ip_end.into(),
            int_start: int_start.into(),
            int_end: int_end.into(),
        }
    }

    /// Split a six-field row into its record and key
    ///
    /// Field order: ip_start, ip_end, int_start, int_end, short_name, range_name.
    /// Returns `None` unless exactly six fields are present.
    pub fn from_fields(fields: Vec<String>) -> Option<(RangeKey, RangeRecord)> {
        let [ip_start, ip_end, int_start, int_end, short_name, range_name]: [String; FIELD_COUNT] =
            fields.try_into().ok()?;

        Some((
            RangeKey {
                range_name,
                short_name,
            },
            RangeRecord {
                ip_start,
                ip_end,
                int_start,
                int_end,
            },
        ))
    }

    /// The six serialized fields for this record under `key`
    pub fn to_fields<'a>(&'a self, key: &'a RangeKey) -> [&'a str; FIELD_COUNT] {
        [
            self.ip_start.as_str(),
            self.ip_end.as_str(),
            self.int_start.as_str(),
            self.int_end.as_str(),
            key.short_name.as_str(),
            key.range_name.as_str(),
        ]
    }
}

/// Value stored under a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupEntry {
    /// Ranges in insertion order (never empty after a load)
    Ranges(Vec<RangeRecord>),

    /// Declared with `create` and not yet filled
    Empty,
}

impl GroupEntry {
    /// Records in this group; a declared group has none
    pub fn records(&self) -> &[RangeRecord] {
        match self {
            GroupEntry::Ranges(records) => records,
            GroupEntry::Empty => &[],
        }
    }

    pub fn is_declared_empty(&self) -> bool {
        matches!(self, GroupEntry::Empty)
    }
}
