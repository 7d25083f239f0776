//! Recoverable problems found while reading the delimited sources
//!
//! Parsers never log or print. They return an [`Issue`] describing why a line
//! or pair was skipped (or corrected), and the caller wraps it into a
//! [`Diagnostic`] that carries the file name and line number. Formatting of
//! the location therefore lives here, not in the parsers.

use super::error::ReportError;
use super::seller::DocumentNumber;
use std::fmt;
use thiserror::Error;

/// A recoverable defect in one line or one pair
///
/// Most variants mean "the smallest affected unit was skipped". The
/// `Negative*` variants are corrections: the value was replaced by its
/// absolute value and processing continued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid document number '{value}'")]
    InvalidDocumentNumber { value: String },

    #[error("invalid document type '{value}'")]
    InvalidDocumentType { value: String },

    #[error("invalid unit price '{value}' for product {product}")]
    InvalidPrice { product: String, value: String },

    #[error("negative unit price {value} for product {product}, using its absolute value")]
    NegativePrice { product: String, value: String },

    #[error("odd number of fields ({found}), expected product/quantity pairs")]
    OddFieldCount { found: usize },

    #[error("invalid quantity '{value}' for product {product}")]
    InvalidQuantity { product: String, value: String },

    #[error("negative quantity {value} for product {product}, using its absolute value")]
    NegativeQuantity { product: String, value: i64 },

    #[error("product {product} does not exist in the product registry")]
    UnknownProduct { product: String },

    #[error("seller {document} does not exist in the seller registry, file skipped")]
    UnknownSeller { document: DocumentNumber },

    #[error("arithmetic overflow while aggregating {subject}")]
    ArithmeticOverflow { subject: String },

    #[error("unreadable line: {message}")]
    UnreadableLine { message: String },
}

impl Issue {
    /// Whether the value was normalized rather than skipped
    pub fn is_correction(&self) -> bool {
        matches!(
            self,
            Issue::NegativePrice { .. } | Issue::NegativeQuantity { .. }
        )
    }
}

/// An [`Issue`] located in a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// File name the issue was found in
    pub source: String,

    /// 1-based line number, if the issue belongs to a single line
    pub line: Option<u64>,

    pub issue: Issue,
}

impl Diagnostic {
    pub fn new(source: impl Into<String>, line: Option<u64>, issue: Issue) -> Self {
        Diagnostic {
            source: source.into(),
            line,
            issue,
        }
    }

    /// Diagnostic attached to a specific line
    pub fn at_line(source: impl Into<String>, line: u64, issue: Issue) -> Self {
        Diagnostic::new(source, Some(line), issue)
    }

    /// Diagnostic for a line the reader could not decode
    pub fn unreadable(source: impl Into<String>, error: &ReportError) -> Self {
        let line = match error {
            ReportError::ParseError { line, .. } => *line,
            _ => None,
        };
        Diagnostic::new(
            source,
            line,
            Issue::UnreadableLine {
                message: error.to_string(),
            },
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} line {}: {}", self.source, line, self.issue),
            None => write!(f, "{}: {}", self.source, self.issue),
        }
    }
}
