//! Synchronous reader for `;`-delimited source files
//!
//! Provides a streaming iterator over the non-blank lines of a seller,
//! product or sales file, already split into trimmed fields.
//!
//! # Design
//!
//! The LineReader wraps a `csv::Reader` configured for the source contract:
//! - `;` delimiter, no header row
//! - flexible field counts (validation belongs to the record parsers)
//! - quoting disabled, so names containing `"` are read verbatim
//! - every field trimmed
//!
//! Blank lines are skipped. Trailing empty fields are dropped, so `P1;3;`
//! yields two fields, the way the files were always split.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors on open) are returned from `from_path()`
//! - A line that cannot be decoded is yielded as `Err(ParseError)` and
//!   iteration continues
//! - An I/O error while reading is yielded as `Err(IoError)` and ends the
//!   iteration

use crate::types::ReportError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// One non-blank line of a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the file
    pub number: u64,

    /// Trimmed fields, trailing empty fields removed
    pub fields: Vec<String>,
}

impl SourceLine {
    pub fn field_refs(&self) -> Vec<&str> {
        self.fields.iter().map(String::as_str).collect()
    }
}

/// Iterator over the lines of a delimited source
#[derive(Debug)]
pub struct LineReader<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
    finished: bool,
}

impl LineReader<File> {
    /// Open a source file for streaming iteration
    ///
    /// # Returns
    ///
    /// * `Ok(LineReader)` if the file opened successfully
    /// * `Err(ReportError::FileNotFound)` if the path does not exist
    /// * `Err(ReportError::SourceUnreadable)` for any other open failure
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ReportError::file_not_found(path.display()),
            _ => ReportError::source_unreadable(path.display(), e),
        })?;

        Ok(Self::from_reader(file))
    }
}

impl<R: Read> LineReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .buffer_capacity(8 * 1024)
            .from_reader(reader);

        Self {
            reader,
            record: StringRecord::new(),
            finished: false,
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Result<SourceLine, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.reader.read_record(&mut self.record) {
                Ok(true) => {
                    let mut fields: Vec<String> =
                        self.record.iter().map(str::to_string).collect();
                    drop_trailing_empty(&mut fields);

                    // Whitespace-only line
                    if fields.is_empty() {
                        continue;
                    }

                    let number = self.record.position().map_or(0, |pos| pos.line());
                    return Some(Ok(SourceLine { number, fields }));
                }
                Ok(false) => self.finished = true,
                Err(e) => {
                    if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                        self.finished = true;
                    }
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}

fn drop_trailing_empty(fields: &mut Vec<String>) {
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
}
