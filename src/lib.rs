//! Sales Report Engine Library
//! # Overview
//!
//! This library cross-references `;`-delimited seller, product and per-seller
//! sales files and produces two ranked reports: sellers by revenue and
//! products by units sold.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (SellerRecord, ProductRecord, diagnostics, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`io`] - Source reading, line parsers and report output
//! - [`core`] - Business logic components:
//!   - [`core::seller_registry`] - Sellers and their accumulated revenue
//!   - [`core::product_registry`] - Products and their units sold
//!   - [`core::engine`] - Sales file aggregation
//!   - [`core::report_builder`] - Deterministic report ranking
//! - [`pipeline`] - Batch orchestration against the filesystem
//!
//! # Failure Model
//!
//! Problems are handled at the smallest unit they affect:
//!
//! - **Pair**: unknown product or unparsable quantity; sibling pairs still count
//! - **Line**: wrong field count or unparsable key field
//! - **Sales file**: empty file, malformed first line, unknown seller
//! - **Batch**: missing sources, no valid sellers/products, no sales files
//!
//! Negative prices and quantities are replaced by their absolute value.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use crate::core::{AggregationEngine, ProductRegistry, SalesFileOutcome, SellerRegistry};
pub use pipeline::{run_batch, BatchConfig, BatchSummary};
pub use types::{
    Diagnostic, DocumentNumber, DocumentType, Issue, ProductRecord, ReportError, SellerRecord,
};
