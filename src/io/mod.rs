//! I/O module
//!
//! Handles the delimited input sources and the report output.
//!
//! # Components
//!
//! - `line_reader` - Streaming reader for `;`-delimited source files
//! - `record_format` - Line-level parsers for sellers, products and sales
//! - `report_format` - Report serialization

pub mod line_reader;
pub mod record_format;
pub mod report_format;

pub use line_reader::{LineReader, SourceLine};
pub use record_format::{
    parse_product_line, parse_sales_header, parse_sales_line, parse_seller_line, Parsed,
};
pub use report_format::{format_money, write_product_report, write_seller_report};
