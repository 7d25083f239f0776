//! Sales-related types for the Sales Report Engine
//!
//! A sales line is never stored: it is parsed into a [`SalesTransactionGroup`]
//! and consumed immediately by the aggregation engine.

use super::product::ProductId;

/// One `(product id, quantity)` pair taken from a sales line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleItem {
    pub product_id: ProductId,

    /// Quantity after normalization (absolute value of the input)
    pub quantity: u64,
}

/// The pairs of one sales line that parsed successfully, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesTransactionGroup {
    pub items: Vec<SaleItem>,
}
