//! Delimited row reader shared by every ingestion pass
//!
//! Skip rule: a row with at most one field, or whose first field starts
//! with `#`, is a comment or blank line. For fixed-width formats the first
//! remaining row is the header; it fixes the column count that every later
//! row must match and produces no record.

use super::{IngestError, IngestResult};
use crate::manifest::FileDescriptor;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// How a file type is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabularFormat {
    pub delimiter: u8,
    /// First row is a header and every row has the same width
    pub header: bool,
    /// Width the header must declare, when the format fixes one
    pub columns: Option<usize>,
}

impl TabularFormat {
    /// Header row followed by rows of exactly `columns` fields
    pub const fn fixed(delimiter: u8, columns: usize) -> Self {
        Self {
            delimiter,
            header: true,
            columns: Some(columns),
        }
    }

    /// No header; rows may differ in width
    pub const fn ragged(delimiter: u8) -> Self {
        Self {
            delimiter,
            header: false,
            columns: None,
        }
    }
}

/// One data row with its fields trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the source file
    pub line: u64,
    pub fields: Vec<String>,
}

impl Row {
    /// Field at `column`, or `""` past the end of a ragged row
    pub fn get(&self, column: usize) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Maps record byte offsets to 1-based physical line numbers
///
/// The parser reports a record's offset before it has consumed the line
/// terminator of the previous row and any blank lines, so the offset is
/// first advanced past `\r`/`\n` bytes.
#[derive(Debug)]
struct LineIndex {
    bytes: Arc<[u8]>,
    offset: usize,
    line: u64,
}

impl LineIndex {
    fn new(bytes: Arc<[u8]>) -> Self {
        Self {
            bytes,
            offset: 0,
            line: 1,
        }
    }

    /// Line on which the record at `byte` starts; offsets must not decrease
    fn line_at(&mut self, byte: u64) -> u64 {
        let len = self.bytes.len();
        let mut start = usize::try_from(byte).map_or(len, |b| b.min(len));
        while start < len && matches!(self.bytes[start], b'\r' | b'\n') {
            start += 1;
        }
        if start > self.offset {
            let newlines = self.bytes[self.offset..start].iter().filter(|&&b| b == b'\n').count();
            self.line += newlines as u64;
            self.offset = start;
        }
        self.line
    }
}

/// Iterator over the data rows of one file
pub struct TabularReader {
    file: String,
    format: TabularFormat,
    records: StringRecordsIntoIter<Cursor<Arc<[u8]>>>,
    lines: LineIndex,
    expected: Option<usize>,
}

impl TabularReader {
    pub fn open(file: &FileDescriptor, format: TabularFormat) -> IngestResult<Self> {
        let bytes: Arc<[u8]> = std::fs::read(file.file_path())
            .map_err(|e| IngestError::Read {
                file: file.path().to_string(),
                source: csv::Error::from(e),
            })?
            .into();

        let reader = ReaderBuilder::new()
            .delimiter(format.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(Arc::clone(&bytes)));

        Ok(Self {
            file: file.path().to_string(),
            format,
            records: reader.into_records(),
            lines: LineIndex::new(bytes),
            expected: None,
        })
    }

    fn mismatch(&self, line: u64, expected: usize, found: usize) -> IngestError {
        IngestError::ColumnCountMismatch {
            file: self.file.clone(),
            line,
            expected,
            found,
        }
    }
}

fn is_comment(record: &StringRecord) -> bool {
    record.len() <= 1 || record.get(0).is_some_and(|f| f.starts_with('#'))
}

impl Iterator for TabularReader {
    type Item = IngestResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(source) => {
                    return Some(Err(IngestError::Read {
                        file: self.file.clone(),
                        source,
                    }))
                }
            };
            let byte = record.position().map_or(self.lines.offset as u64, |p| p.byte());
            let line = self.lines.line_at(byte);

            if is_comment(&record) {
                continue;
            }

            let fields: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();

            if !self.format.header {
                return Some(Ok(Row { line, fields }));
            }

            match self.expected {
                None => {
                    if let Some(columns) = self.format.columns {
                        if fields.len() != columns {
                            return Some(Err(self.mismatch(line, columns, fields.len())));
                        }
                    }
                    debug!(file = %self.file, line, columns = fields.len(), "header row");
                    self.expected = Some(fields.len());
                }
                Some(expected) if fields.len() != expected => {
                    return Some(Err(self.mismatch(line, expected, fields.len())));
                }
                Some(_) => return Some(Ok(Row { line, fields })),
            }
        }
    }
}
