//! Report builder
//!
//! Turns the final registry state into the two ranked reports. Ordering is
//! total so that identical inputs always produce identical reports:
//! - sellers: revenue descending, then document number ascending
//! - products: units sold descending, then unit price ascending, then
//!   product id ascending

use crate::core::product_registry::ProductRegistry;
use crate::core::seller_registry::SellerRegistry;
use crate::io::report_format::two_decimals;
use crate::types::{DocumentNumber, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;

/// One row of the seller report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerReportRow {
    #[serde(skip)]
    pub document_number: DocumentNumber,

    pub first_names: String,

    pub last_names: String,

    #[serde(serialize_with = "two_decimals")]
    pub revenue: Decimal,
}

impl SellerReportRow {
    /// First names followed by last names, separated by a space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_names)
    }
}

/// One row of the product report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReportRow {
    #[serde(skip)]
    pub product_id: ProductId,

    pub display_name: String,

    #[serde(serialize_with = "two_decimals")]
    pub unit_price: Decimal,

    pub units_sold: u64,
}

/// Build the seller report rows in ranking order
pub fn build_seller_report(sellers: &SellerRegistry) -> Vec<SellerReportRow> {
    let mut rows: Vec<SellerReportRow> = sellers
        .iter()
        .map(|seller| SellerReportRow {
            document_number: seller.document_number,
            first_names: seller.first_names.clone(),
            last_names: seller.last_names.clone(),
            revenue: seller.accumulated_revenue,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.document_number.cmp(&b.document_number))
    });
    rows
}

/// Build the product report rows in ranking order
pub fn build_product_report(products: &ProductRegistry) -> Vec<ProductReportRow> {
    let mut rows: Vec<ProductReportRow> = products
        .iter()
        .map(|product| ProductReportRow {
            product_id: product.product_id.clone(),
            display_name: product.display_name.clone(),
            unit_price: product.unit_price,
            units_sold: product.units_sold,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.units_sold
            .cmp(&a.units_sold)
            .then_with(|| a.unit_price.cmp(&b.unit_price))
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    rows
}
