/*!
 * Delimited table codec.
 *
 * The aggregate table is plain UTF-8 text with one record per line. Fields are
 * separated by `|` and never quoted. A backslash escapes the character that
 * follows it, so a field may contain a literal `|`, `\`, or line break.
 */

use std::io::{BufRead, Write};

use crate::errors::TableError;

/// Field separator
pub const DELIMITER: char = '|';

/// Escape character
pub const ESCAPE: char = '\\';

/// One line of the table, fields in column order
pub type Record = Vec<String>;

/// Append `field` to `out`, escaping every character the reader treats specially
pub fn escape_into(out: &mut String, field: &str) {
    for c in field.chars() {
        if matches!(c, DELIMITER | ESCAPE | '\n' | '\r') {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}

/// Writes records to an underlying writer
pub struct TableWriter<W: Write> {
    inner: W,
    line: String,
}

impl<W: Write> TableWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            line: String::new(),
        }
    }

    /// Write one record followed by a line terminator
    pub fn write_record<I, S>(&mut self, fields: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.line.clear();
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.line.push(DELIMITER);
            }
            escape_into(&mut self.line, field.as_ref());
        }
        self.line.push('\n');
        self.inner.write_all(self.line.as_bytes())?;
        Ok(())
    }

    /// Write a record whose absent fields are serialized as empty strings
    pub fn write_optional(&mut self, fields: &[Option<String>]) -> Result<(), TableError> {
        self.write_record(fields.iter().map(|f| f.as_deref().unwrap_or("")))
    }

    pub fn flush(&mut self) -> Result<(), TableError> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Reads records from a buffered reader, one record at a time
pub struct TableReader<R: BufRead> {
    inner: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> TableReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
            line: 0,
        }
    }

    /// Read the next record, or `None` at end of input.
    ///
    /// An empty line yields a record with no fields. A record may span several
    /// physical lines when a line break inside a field was escaped.
    pub fn read_record(&mut self) -> Result<Option<Record>, TableError> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut escaped = false;
        let mut started = false;

        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                if escaped {
                    return Err(TableError::DanglingEscape { line: self.line });
                }
                if !started {
                    return Ok(None);
                }
                fields.push(current);
                return Ok(Some(fields));
            }
            self.line += 1;
            started = true;

            let mut chars = self.buf.chars().peekable();
            while let Some(c) = chars.next() {
                if escaped {
                    current.push(c);
                    escaped = false;
                    continue;
                }
                match c {
                    ESCAPE => escaped = true,
                    DELIMITER => fields.push(std::mem::take(&mut current)),
                    '\r' if chars.peek() == Some(&'\n') => {}
                    '\n' => {
                        if !(fields.is_empty() && current.is_empty()) {
                            fields.push(current);
                        }
                        return Ok(Some(fields));
                    }
                    _ => current.push(c),
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for TableReader<R> {
    type Item = Result<Record, TableError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
