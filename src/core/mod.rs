//! Core business logic module
//!
//! This module contains the aggregation components:
//! - `seller_registry` - Sellers keyed by document number, with accumulated revenue
//! - `product_registry` - Products keyed by id, with units sold
//! - `engine` - Applies sales files to both registries
//! - `report_builder` - Ranks the final registry state into report rows

pub mod engine;
pub mod product_registry;
pub mod report_builder;
pub mod seller_registry;

pub use engine::{AggregationEngine, SalesFileOutcome};
pub use product_registry::ProductRegistry;
pub use report_builder::{
    build_product_report, build_seller_report, ProductReportRow, SellerReportRow,
};
pub use seller_registry::SellerRegistry;
