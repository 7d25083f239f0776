//! Seller-related types for the Sales Report Engine
//!
//! This module defines the SellerRecord structure along with the document
//! identifiers used as the seller's natural key.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Seller document number
///
/// Natural key of the seller registry. Supports 0 to 18,446,744,073,709,551,615.
pub type DocumentNumber = u64;

/// Identity document kinds accepted in the seller source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Citizen ID card (`CC`)
    NationalId,
    /// Foreigner ID card (`CE`)
    ForeignId,
    /// Minor's ID card (`TI`)
    MinorId,
}

impl DocumentType {
    /// The two-letter code used in the delimited files
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::NationalId => "CC",
            DocumentType::ForeignId => "CE",
            DocumentType::MinorId => "TI",
        }
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CC" => Ok(DocumentType::NationalId),
            "CE" => Ok(DocumentType::ForeignId),
            "TI" => Ok(DocumentType::MinorId),
            other => Err(format!("unknown document type '{}'", other)),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A seller and the revenue collected from its sales files
#[derive(Debug, Clone, PartialEq)]
pub struct SellerRecord {
    pub document_type: DocumentType,

    /// Registry key
    pub document_number: DocumentNumber,

    pub first_names: String,

    pub last_names: String,

    /// Sum of `unit_price * quantity` over every resolved pair attributed to
    /// this seller. Only the aggregation engine mutates it.
    pub accumulated_revenue: Decimal,
}

impl SellerRecord {
    /// Create a seller with no revenue yet
    pub fn new(
        document_type: DocumentType,
        document_number: DocumentNumber,
        first_names: impl Into<String>,
        last_names: impl Into<String>,
    ) -> Self {
        SellerRecord {
            document_type,
            document_number,
            first_names: first_names.into(),
            last_names: last_names.into(),
            accumulated_revenue: Decimal::ZERO,
        }
    }
}
