//! Product registry module
//!
//! Maps product ids to product records and tracks the units sold across all
//! sales files. Prices are fixed once the product source is loaded; only the
//! unit counters change afterwards.

use crate::io::record_format::parse_product_line;
use crate::io::SourceLine;
use crate::types::{Diagnostic, Issue, ProductRecord, ReportError, SaleItem};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// In-memory map of product ids to product records
#[derive(Debug, Default)]
pub struct ProductRegistry {
    products: HashMap<String, ProductRecord>,
}

impl ProductRegistry {
    pub fn new() -> Self {
        ProductRegistry {
            products: HashMap::new(),
        }
    }

    /// Build a registry from the lines of a product source
    ///
    /// Malformed lines are skipped; both skips and negative-price corrections
    /// are returned as diagnostics located in `source`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::SourceUnreadable` if the source fails to read
    /// before its end; a partial product list is never returned.
    pub fn from_lines<I>(
        source: &str,
        lines: I,
    ) -> Result<(Self, Vec<Diagnostic>), ReportError>
    where
        I: IntoIterator<Item = Result<SourceLine, ReportError>>,
    {
        let mut registry = ProductRegistry::new();
        let mut diagnostics = Vec::new();

        for line in lines {
            let line = match line {
                Ok(line) => line,
                Err(e @ ReportError::ParseError { .. }) => {
                    diagnostics.push(Diagnostic::unreadable(source, &e));
                    continue;
                }
                Err(e) => return Err(ReportError::source_unreadable(source, e)),
            };

            match parse_product_line(&line.field_refs()) {
                Ok(parsed) => {
                    diagnostics.extend(
                        parsed
                            .notices
                            .into_iter()
                            .map(|issue| Diagnostic::at_line(source, line.number, issue)),
                    );
                    registry.insert(parsed.value);
                }
                Err(issue) => diagnostics.push(Diagnostic::at_line(source, line.number, issue)),
            }
        }

        Ok((registry, diagnostics))
    }

    /// Insert a product, replacing any previous product with the same id
    pub fn insert(&mut self, product: ProductRecord) -> Option<ProductRecord> {
        self.products.insert(product.product_id.clone(), product)
    }

    pub fn get(&self, product_id: &str) -> Option<&ProductRecord> {
        self.products.get(product_id)
    }

    /// Price a sale item without recording it
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - `unit_price * quantity`
    /// * `Err(Issue::UnknownProduct)` - If the product is not registered
    /// * `Err(Issue::ArithmeticOverflow)` - If the amount or the product's
    ///   unit counter would overflow
    pub fn price_sale(&self, item: &SaleItem) -> Result<Decimal, Issue> {
        let product = self
            .get(&item.product_id)
            .ok_or_else(|| Issue::UnknownProduct {
                product: item.product_id.clone(),
            })?;

        let overflow = || Issue::ArithmeticOverflow {
            subject: format!("product {}", item.product_id),
        };

        product
            .units_sold
            .checked_add(item.quantity)
            .ok_or_else(overflow)?;

        product
            .unit_price
            .checked_mul(Decimal::from(item.quantity))
            .ok_or_else(overflow)
    }

    /// Add sold units to a product
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - The product's new unit count
    /// * `Err(Issue)` - If the product is unknown or the counter would
    ///   overflow; the product is left unchanged
    pub fn record_units(&mut self, product_id: &str, quantity: u64) -> Result<u64, Issue> {
        let product = self
            .products
            .get_mut(product_id)
            .ok_or_else(|| Issue::UnknownProduct {
                product: product_id.to_string(),
            })?;

        let units = product
            .units_sold
            .checked_add(quantity)
            .ok_or_else(|| Issue::ArithmeticOverflow {
                subject: format!("product {}", product_id),
            })?;

        product.units_sold = units;
        Ok(units)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::LineReader;
    use rust_decimal_macros::dec;

    fn load(content: &str) -> (ProductRegistry, Vec<Diagnostic>) {
        ProductRegistry::from_lines(
            "productos.txt",
            LineReader::from_reader(content.as_bytes()),
        )
        .unwrap()
    }

    fn item(product_id: &str, quantity: u64) -> SaleItem {
        SaleItem {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_from_lines_loads_products() {
        let (registry, diagnostics) = load("P1;Mouse;10000\nP2;Teclado;85000.50\n");

        assert_eq!(registry.len(), 2);
        assert!(diagnostics.is_empty());
        assert_eq!(registry.get("P2").unwrap().unit_price, dec!(85000.50));
        assert_eq!(registry.get("P2").unwrap().units_sold, 0);
    }

    #[test]
    fn test_from_lines_negative_price_is_corrected_not_skipped() {
        let (registry, diagnostics) = load("P1;Mouse;-10000\n");

        assert_eq!(registry.get("P1").unwrap().unit_price, dec!(10000));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].issue.is_correction());
        assert_eq!(diagnostics[0].line, Some(1));
    }

    #[test]
    fn test_from_lines_skips_malformed_lines() {
        let (registry, diagnostics) = load("P1;Mouse;abc\nP2;Only two\nP3;Cable;5000\n");

        assert_eq!(registry.len(), 1);
        assert!(registry.get("P3").is_some());
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| !d.issue.is_correction()));
    }

    #[test]
    fn test_from_lines_read_failure_is_fatal() {
        let lines = vec![
            Ok(SourceLine {
                number: 1,
                fields: vec!["P1".to_string(), "Mouse".to_string(), "100".to_string()],
            }),
            Err(ReportError::IoError {
                message: "device lost".to_string(),
            }),
        ];

        let result = ProductRegistry::from_lines("productos.txt", lines);

        assert_eq!(
            result.unwrap_err(),
            ReportError::SourceUnreadable {
                path: "productos.txt".to_string(),
                message: "I/O error: device lost".to_string(),
            }
        );
    }

    #[test]
    fn test_from_lines_last_write_wins() {
        let (registry, _) = load("P1;Mouse;100\nP1;Mouse Pro;200\n");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("P1").unwrap().display_name, "Mouse Pro");
        assert_eq!(registry.get("P1").unwrap().unit_price, dec!(200));
    }

    #[test]
    fn test_price_sale_multiplies_price_by_quantity() {
        let (registry, _) = load("P1;Mouse;10000\n");

        assert_eq!(registry.price_sale(&item("P1", 3)).unwrap(), dec!(30000));
        assert_eq!(registry.get("P1").unwrap().units_sold, 0);
    }

    #[test]
    fn test_price_sale_unknown_product() {
        let (registry, _) = load("P1;Mouse;10000\n");

        assert_eq!(
            registry.price_sale(&item("P9", 5)).unwrap_err(),
            Issue::UnknownProduct {
                product: "P9".to_string()
            }
        );
    }

    #[test]
    fn test_price_sale_detects_unit_overflow() {
        let (mut registry, _) = load("P1;Mouse;0\n");
        registry.record_units("P1", u64::MAX).unwrap();

        assert!(matches!(
            registry.price_sale(&item("P1", 1)),
            Err(Issue::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn test_record_units_accumulates() {
        let (mut registry, _) = load("P1;Mouse;10000\n");

        registry.record_units("P1", 3).unwrap();
        let units = registry.record_units("P1", 4).unwrap();

        assert_eq!(units, 7);
        assert_eq!(registry.get("P1").unwrap().units_sold, 7);
    }

    #[test]
    fn test_record_units_overflow_leaves_product_unchanged() {
        let (mut registry, _) = load("P1;Mouse;1\n");
        registry.record_units("P1", u64::MAX).unwrap();

        assert!(registry.record_units("P1", 1).is_err());
        assert_eq!(registry.get("P1").unwrap().units_sold, u64::MAX);
    }
}
