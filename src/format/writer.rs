//! Row Writer
//!
//! Emits quoted rows, optionally preceded by a header row.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{RangeError, Result};

use super::encode_row;

/// Writes quoted-CSV rows to any sink
pub struct RowWriter<W: Write> {
    writer: W,
    /// Data rows written (the header is not counted)
    rows_written: u64,
}

impl RowWriter<BufWriter<File>> {
    /// Create (or truncate) a file for writing
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self::new(BufWriter::new(file)))
    }

    /// Flush buffered rows and fsync the file
    pub fn finish_sync(mut self) -> Result<u64> {
        self.writer.flush()?;
        let file = self.writer.into_inner().map_err(|e| {
            RangeError::Io(e.into_error())
        })?;
        file.sync_all()?;
        Ok(self.rows_written)
    }
}

impl<W: Write> RowWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows_written: 0,
        }
    }

    /// Write the column-name row
    pub fn write_header<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<()> {
        self.writer.write_all(encode_row(columns).as_bytes())?;
        Ok(())
    }

    /// Write one data row
    pub fn write_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        self.writer.write_all(encode_row(fields).as_bytes())?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush and hand back the sink
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_not_counted() {
        let mut writer = RowWriter::new(Vec::new());
        writer.write_header(&["target", "source"]).unwrap();
        writer.write_row(&["10.0.0.1", "1.2.3.4"]).unwrap();

        assert_eq!(writer.rows_written(), 1);
        let bytes = writer.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "\"target\",\"source\"\r\n\"10.0.0.1\",\"1.2.3.4\"\r\n"
        );
    }
}
