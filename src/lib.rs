//! # georange
//!
//! Loader and editor for GeoIP-style IP range files:
//! - Groups IP ranges under `(range_name, short_name)` keys
//! - Sorts keys once at load, preserves record order within groups
//! - Create/insert/delete on groups, write back in the same format
//! - Alert CSV generator sharing the same row writer
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 georange-cli / georange-alertgen             │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              ▼
//!   ┌─────────────────────────┐     ┌─────────────────────────┐
//!   │       RangeStore        │     │     AlertGenerator      │
//!   │  (load / mutate / write)│     │  (sample / write rows)  │
//!   └───────┬─────────┬───────┘     └────────────┬────────────┘
//!           │         │                          │
//!           ▼         ▼                          │
//!   ┌────────────┐ ┌──────────────────────────┐  │
//!   │ RangeTable │ │  Row format (codec,      │◀─┘
//!   │ (grouped)  │ │  reader, writer)         │
//!   └────────────┘ └──────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod format;
pub mod table;
pub mod store;
pub mod alert;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RangeError, Result};
pub use config::{AlertConfig, Config};
pub use store::RangeStore;
pub use table::{GroupEntry, InsertOutcome, Mutation, RangeKey, RangeRecord, RangeTable};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of georange
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
