//! Error types for the Sales Report Engine
//!
//! This module defines the errors that abort either the whole batch or a
//! single sales file. Line- and pair-level problems are not errors; they are
//! reported as [`Diagnostic`](super::Diagnostic) values instead.
//!
//! # Error Categories
//!
//! - **Fatal**: missing sources, empty registries, no sales files, report
//!   output failures. The batch stops and no reports are produced.
//! - **Per-file**: empty sales file, malformed header line, unparsable seller
//!   document. The orchestrator logs the error and moves on to the next file.

use thiserror::Error;

/// Main error type for the sales report engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// A required source file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// A required source exists but could not be opened or read to the end
    #[error("Cannot read {path}: {message}")]
    SourceUnreadable { path: String, message: String },

    /// The sales directory does not exist
    #[error("Sales directory not found: {path}")]
    SalesDirectoryNotFound { path: String },

    /// The sales directory contains no sales file
    #[error("No sales files found in {path}")]
    NoSalesFiles { path: String },

    /// Every line of the seller source was rejected (or the file is empty)
    #[error("No valid sellers could be loaded from {path}")]
    NoValidSellers { path: String },

    /// Every line of the product source was rejected (or the file is empty)
    #[error("No valid products could be loaded from {path}")]
    NoValidProducts { path: String },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Delimited parsing error at the reader level
    #[error("Parse error{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A sales file without any record
    #[error("Sales file {file} is empty")]
    EmptySalesFile { file: String },

    /// The first line of a sales file has fewer than two fields
    #[error("Malformed first line in {file}: expected 'DocumentType;DocumentNumber'")]
    MalformedSalesHeader { file: String },

    /// The seller document in the first line of a sales file is not a number
    #[error("Invalid seller document number '{value}' in {file}")]
    InvalidSellerDocument { file: String, value: String },

    /// A report could not be written
    #[error("Failed to write report {path}: {message}")]
    ReportWrite { path: String, message: String },
}

// Conversion from io::Error to ReportError
impl From<std::io::Error> for ReportError {
    fn from(error: std::io::Error) -> Self {
        ReportError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to ReportError
//
// I/O failures stay I/O errors; everything else is a per-line parse error.
impl From<csv::Error> for ReportError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return ReportError::IoError {
                message: error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        ReportError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl ReportError {
    pub fn file_not_found(path: impl std::fmt::Display) -> Self {
        ReportError::FileNotFound {
            path: path.to_string(),
        }
    }

    pub fn source_unreadable(
        path: impl std::fmt::Display,
        message: impl std::fmt::Display,
    ) -> Self {
        ReportError::SourceUnreadable {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    pub fn empty_sales_file(file: &str) -> Self {
        ReportError::EmptySalesFile {
            file: file.to_string(),
        }
    }

    pub fn malformed_sales_header(file: &str) -> Self {
        ReportError::MalformedSalesHeader {
            file: file.to_string(),
        }
    }

    pub fn invalid_seller_document(file: &str, value: &str) -> Self {
        ReportError::InvalidSellerDocument {
            file: file.to_string(),
            value: value.to_string(),
        }
    }

    pub fn report_write(path: impl std::fmt::Display, message: impl std::fmt::Display) -> Self {
        ReportError::ReportWrite {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether the error concerns the input sources, so regenerating them may fix it
    pub fn is_source_problem(&self) -> bool {
        !matches!(
            self,
            ReportError::ReportWrite { .. } | ReportError::IoError { .. }
        )
    }
}
