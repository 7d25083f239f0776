//! Product-related types for the Sales Report Engine

use rust_decimal::Decimal;

/// Product identifier, the natural key of the product registry
pub type ProductId = String;

/// A product and the number of units sold across all sales files
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub product_id: ProductId,

    pub display_name: String,

    /// Price per unit, never negative (negative inputs are normalized by the parser)
    pub unit_price: Decimal,

    /// Sum of the quantities of every resolved pair referencing this product
    pub units_sold: u64,
}

impl ProductRecord {
    /// Create a product with no units sold yet
    pub fn new(
        product_id: impl Into<ProductId>,
        display_name: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        ProductRecord {
            product_id: product_id.into(),
            display_name: display_name.into(),
            unit_price,
            units_sold: 0,
        }
    }
}
