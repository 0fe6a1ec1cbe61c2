//! Row codec
//!
//! Encoding and decoding of a single quoted-CSV record.

/// Field separator
pub const DELIMITER: char = ',';

/// Quote character; a literal quote inside a field is written twice
pub const QUOTE: char = '"';

/// Row terminator emitted by the writer
pub const LINE_TERMINATOR: &str = "\r\n";

// =============================================================================
// Encoding
// =============================================================================

/// Encode one row, quoting every field
///
/// Format: `"f1","f2",...,"fn"\r\n`
pub fn encode_row<S: AsRef<str>>(fields: &[S]) -> String {
    let capacity = fields.iter().map(|f| f.as_ref().len() + 3).sum::<usize>() + 2;
    let mut out = String::with_capacity(capacity);

    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push(QUOTE);
        for ch in field.as_ref().chars() {
            if ch == QUOTE {
                out.push(QUOTE);
            }
            out.push(ch);
        }
        out.push(QUOTE);
    }

    out.push_str(LINE_TERMINATOR);
    out
}

// =============================================================================
// Decoding
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StartField,
    Unquoted,
    Quoted,
    /// Saw a quote while inside a quoted field: either an escaped quote or
    /// the closing quote
    QuoteInQuoted,
}

/// Incremental record decoder
///
/// Text is fed in arbitrary chunks; state carries over between calls, so a
/// quoted field spanning many lines is scanned once. `\n`, `\r` and `\r\n`
/// all end a record (or become a single `\n` inside a quoted field).
#[derive(Debug)]
pub struct RecordDecoder {
    fields: Vec<String>,
    field: String,
    state: State,
    /// Any character of the current record seen (blank lines have none)
    saw_any: bool,
    /// Previous character was `\r`; a following `\n` belongs to it
    skip_lf: bool,
    /// Line breaks consumed so far
    line: usize,
}

impl Default for RecordDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordDecoder {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            field: String::new(),
            state: State::StartField,
            saw_any: false,
            skip_lf: false,
            line: 0,
        }
    }

    /// Line breaks consumed so far
    pub fn line(&self) -> usize {
        self.line
    }

    /// True while a quoted field is open
    pub fn in_quotes(&self) -> bool {
        self.state == State::Quoted
    }

    /// True when no part of a record has been consumed
    pub fn is_idle(&self) -> bool {
        self.state == State::StartField && !self.saw_any
    }

    /// Feed the next chunk of text
    ///
    /// Returns the completed record and the number of bytes of `text` it
    /// used, or `None` when the whole chunk was consumed without closing a
    /// record.
    pub fn feed(&mut self, text: &str) -> Option<(usize, Vec<String>)> {
        for (pos, ch) in text.char_indices() {
            if std::mem::take(&mut self.skip_lf) && ch == '\n' {
                continue;
            }

            let terminator = ch == '\n' || ch == '\r';
            if terminator {
                self.line += 1;
                self.skip_lf = ch == '\r';
            }

            match self.state {
                State::StartField | State::Unquoted | State::QuoteInQuoted if terminator => {
                    return Some((pos + ch.len_utf8(), self.take_record()));
                }
                State::StartField => {
                    self.saw_any = true;
                    if ch == QUOTE {
                        self.state = State::Quoted;
                    } else if ch == DELIMITER {
                        self.fields.push(std::mem::take(&mut self.field));
                    } else {
                        self.field.push(ch);
                        self.state = State::Unquoted;
                    }
                }
                State::Unquoted => {
                    if ch == DELIMITER {
                        self.fields.push(std::mem::take(&mut self.field));
                        self.state = State::StartField;
                    } else {
                        self.field.push(ch);
                    }
                }
                State::Quoted => {
                    if terminator {
                        self.field.push('\n');
                    } else if ch == QUOTE {
                        self.state = State::QuoteInQuoted;
                    } else {
                        self.field.push(ch);
                    }
                }
                State::QuoteInQuoted => {
                    if ch == QUOTE {
                        self.field.push(QUOTE);
                        self.state = State::Quoted;
                    } else if ch == DELIMITER {
                        self.fields.push(std::mem::take(&mut self.field));
                        self.state = State::StartField;
                    } else {
                        // Text after a closing quote is kept, as lenient readers do
                        self.field.push(ch);
                        self.state = State::Unquoted;
                    }
                }
            }
        }
        None
    }

    /// Close the record at end of input
    ///
    /// Returns `None` when nothing is pending. Check `in_quotes()` first: an
    /// open quoted field is closed as-is.
    pub fn finish(&mut self) -> Option<Vec<String>> {
        if self.is_idle() {
            return None;
        }
        Some(self.take_record())
    }

    fn take_record(&mut self) -> Vec<String> {
        if self.saw_any {
            let field = std::mem::take(&mut self.field);
            self.fields.push(field);
        }
        self.state = State::StartField;
        self.saw_any = false;
        std::mem::take(&mut self.fields)
    }
}

/// Decode one record from `text`
///
/// Returns `None` while a quoted field is still open. The record ends at the
/// first unquoted line break; anything after it is ignored (use
/// `RecordDecoder` to keep reading).
///
/// A blank line decodes to an empty field list.
pub fn decode_record(text: &str) -> Option<Vec<String>> {
    let mut decoder = RecordDecoder::new();
    if let Some((_, fields)) = decoder.feed(text) {
        return Some(fields);
    }
    if decoder.in_quotes() {
        return None;
    }
    Some(decoder.finish().unwrap_or_default())
}
