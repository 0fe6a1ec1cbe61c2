//! Row Format Module
//!
//! Quoted, comma-delimited rows shared by the range table and the alert
//! generator.
//!
//! ## Responsibilities
//! - Encode rows with every field double-quoted
//! - Decode quoted and unquoted fields, including doubled quotes and
//!   newlines embedded inside quotes
//! - Treat `\n`, `\r\n` and a bare `\r` alike as line breaks
//! - Stream rows from a file with line numbers for error reporting
//! - Write rows (optionally after a header) and sync to disk
//!
//! ## Row Format
//! ```text
//! "192.168.1.0","192.168.1.255","3232235776","3232236031","SN","Small Network"\r\n
//!  └─ field ──┘ └─ field ────┘  ...                                 └ terminator ┘
//! ```

mod codec;
mod reader;
mod writer;

pub use codec::{decode_record, encode_row, RecordDecoder, DELIMITER, LINE_TERMINATOR, QUOTE};
pub use reader::{Row, RowIterator, RowReader};
pub use writer::RowWriter;
