//! Row Reader
//!
//! Streams decoded rows out of a quoted-CSV file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{RangeError, Result};

use super::RecordDecoder;

/// A decoded row and the line it started on (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Reads rows from any buffered source
#[derive(Debug)]
pub struct RowReader<R> {
    reader: R,
    decoder: RecordDecoder,
    /// Last physical line read; text past `offset` is not yet decoded
    pending: String,
    offset: usize,
}

impl RowReader<BufReader<File>> {
    /// Open a file for reading
    ///
    /// A missing file maps to `RangeError::NotFound` rather than a bare
    /// I/O error.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RangeError::NotFound(path.to_path_buf()),
            _ => RangeError::Io(e),
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> RowReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: RecordDecoder::new(),
            pending: String::new(),
            offset: 0,
        }
    }

    /// Read the next row
    ///
    /// Returns `Ok(None)` at end of input. A quoted field that is still
    /// open at end of input fails with `UnterminatedQuote`.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        let mut start_line = None;

        loop {
            if self.offset >= self.pending.len() {
                self.pending.clear();
                self.offset = 0;

                if self.reader.read_line(&mut self.pending)? == 0 {
                    let line = start_line.unwrap_or(self.decoder.line() + 1);
                    if self.decoder.in_quotes() {
                        return Err(RangeError::UnterminatedQuote { line });
                    }
                    return Ok(self.decoder.finish().map(|fields| Row { line, fields }));
                }
            }

            let line = *start_line.get_or_insert(self.decoder.line() + 1);

            // A bare \r may end a record mid-line: keep the rest for the next call
            match self.decoder.feed(&self.pending[self.offset..]) {
                Some((used, fields)) => {
                    self.offset += used;
                    return Ok(Some(Row { line, fields }));
                }
                None => self.offset = self.pending.len(),
            }
        }
    }

    /// Number of line breaks consumed
    pub fn lines_read(&self) -> usize {
        self.decoder.line()
    }

    /// Iterate over all remaining rows
    pub fn rows(self) -> RowIterator<R> {
        RowIterator {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over rows; stops after the first error
#[derive(Debug)]
pub struct RowIterator<R> {
    reader: RowReader<R>,
    done: bool,
}

impl<R: BufRead> Iterator for RowIterator<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_rows_with_line_numbers() {
        let input = "\"a\",\"b\"\r\n\"c\",\"d\"\r\n";
        let rows: Vec<Row> = RowReader::new(Cursor::new(input))
            .rows()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[1].fields, vec!["c".to_string(), "d".to_string()]);
    }

    #[test]
    fn test_last_row_without_terminator() {
        let mut reader = RowReader::new(Cursor::new("x,y"));
        let row = reader.next_row().unwrap().unwrap();
        assert_eq!(row.fields, vec!["x".to_string(), "y".to_string()]);
        assert!(reader.next_row().unwrap().is_none());
    }

    #[test]
    fn test_multiline_field_keeps_start_line() {
        let input = "one\n\"two\nlines\",z\nthree\n";
        let mut reader = RowReader::new(Cursor::new(input));
        reader.next_row().unwrap();
        let row = reader.next_row().unwrap().unwrap();
        assert_eq!(row.line, 2);
        assert_eq!(row.fields[0], "two\nlines");
        let row = reader.next_row().unwrap().unwrap();
        assert_eq!(row.line, 4);
        assert_eq!(reader.lines_read(), 4);
    }

    #[test]
    fn test_bare_cr_separates_rows() {
        let rows: Vec<Row> = RowReader::new(Cursor::new("a,b\rc,d\re,f"))
            .rows()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].fields, vec!["c".to_string(), "d".to_string()]);
        assert_eq!(rows[2].line, 3);
    }

    #[test]
    fn test_crlf_does_not_yield_blank_rows() {
        let mut reader = RowReader::new(Cursor::new("a\r\nb\r\n"));
        assert_eq!(reader.next_row().unwrap().unwrap().fields, vec!["a".to_string()]);
        let row = reader.next_row().unwrap().unwrap();
        assert_eq!(row.line, 2);
        assert!(reader.next_row().unwrap().is_none());
    }

    #[test]
    fn test_long_multiline_field() {
        let mut input = String::from("\"");
        for i in 0..2000 {
            input.push_str(&format!("part{}\n", i));
        }
        input.push_str("end\",next\nafter\n");

        let mut reader = RowReader::new(Cursor::new(input));
        let row = reader.next_row().unwrap().unwrap();
        assert_eq!(row.line, 1);
        assert_eq!(row.fields.len(), 2);
        assert!(row.fields[0].starts_with("part0\npart1\n"));
        assert!(row.fields[0].ends_with("part1999\nend"));

        let row = reader.next_row().unwrap().unwrap();
        assert_eq!(row.line, 2002);
    }

    #[test]
    fn test_unterminated_quote_at_eof() {
        let mut reader = RowReader::new(Cursor::new("ok\n\"never closed\n"));
        reader.next_row().unwrap();
        let err = reader.next_row().unwrap_err();
        assert!(matches!(err, RangeError::UnterminatedQuote { line: 2 }));
    }

    #[test]
    fn test_open_missing_file_is_not_found() {
        let err = RowReader::open(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, RangeError::NotFound(_)));
    }
}
