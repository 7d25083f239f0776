//! Processing summary
//!
//! Figures reported once the batch has written both reports.

use crate::core::report_builder::{ProductReportRow, SellerReportRow};
use crate::io::format_money;
use rust_decimal::Decimal;
use std::fmt;
use std::path::PathBuf;

/// Counters for the sales files of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesFileTally {
    /// Files discovered in the sales directory
    pub found: usize,
    /// Files applied to the registries
    pub processed: usize,
    /// Files skipped as a whole because their seller is not registered
    pub skipped: usize,
    /// Files rejected with an error
    pub failed: usize,
}

/// Outcome of a successful batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub sellers_loaded: usize,
    pub products_loaded: usize,
    pub sales_files: SalesFileTally,
    /// Line and pair diagnostics across all sources, corrections included
    pub diagnostics: usize,
    pub total_revenue: Decimal,
    pub total_units_sold: u128,
    /// Full name and revenue of the first seller in the report
    pub top_seller: Option<(String, Decimal)>,
    /// Name and units of the first product in the report
    pub top_product: Option<(String, u64)>,
    pub seller_report: PathBuf,
    pub product_report: PathBuf,
}

impl BatchSummary {
    /// Derive the totals from the ranked report rows
    pub fn from_reports(
        sellers: &[SellerReportRow],
        products: &[ProductReportRow],
        sales_files: SalesFileTally,
        diagnostics: usize,
        seller_report: PathBuf,
        product_report: PathBuf,
    ) -> Self {
        BatchSummary {
            sellers_loaded: sellers.len(),
            products_loaded: products.len(),
            sales_files,
            diagnostics,
            total_revenue: sellers
                .iter()
                .fold(Decimal::ZERO, |acc, row| acc.saturating_add(row.revenue)),
            total_units_sold: products.iter().map(|row| u128::from(row.units_sold)).sum(),
            top_seller: sellers
                .first()
                .map(|row| (row.full_name(), row.revenue)),
            top_product: products
                .first()
                .map(|row| (row.display_name.clone(), row.units_sold)),
            seller_report,
            product_report,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing completed")?;
        writeln!(f, "Reports:")?;
        writeln!(f, "  {}", self.seller_report.display())?;
        writeln!(f, "  {}", self.product_report.display())?;
        writeln!(f, "Sellers: {}", self.sellers_loaded)?;
        writeln!(f, "Products: {}", self.products_loaded)?;
        writeln!(
            f,
            "Sales files: {} found, {} processed, {} skipped, {} failed",
            self.sales_files.found,
            self.sales_files.processed,
            self.sales_files.skipped,
            self.sales_files.failed
        )?;
        writeln!(f, "Diagnostics: {}", self.diagnostics)?;
        writeln!(f, "Total revenue: ${}", format_money(self.total_revenue))?;
        write!(f, "Total units sold: {}", self.total_units_sold)?;
        if let Some((name, revenue)) = &self.top_seller {
            write!(f, "\nBest seller: {} (${})", name, format_money(*revenue))?;
        }
        if let Some((name, units)) = &self.top_product {
            write!(f, "\nBest-selling product: {} ({} units)", name, units)?;
        }
        Ok(())
    }
}
