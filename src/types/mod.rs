//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `seller`: Seller records and document identifiers
//! - `product`: Product records
//! - `sale`: Ephemeral sales line contents
//! - `diagnostic`: Recoverable line/pair issues with their location
//! - `error`: Fatal and per-file error types

pub mod diagnostic;
pub mod error;
pub mod product;
pub mod sale;
pub mod seller;

pub use diagnostic::{Diagnostic, Issue};
pub use error::ReportError;
pub use product::{ProductId, ProductRecord};
pub use sale::{SaleItem, SalesTransactionGroup};
pub use seller::{DocumentNumber, DocumentType, SellerRecord};
