//! Sales aggregation engine
//!
//! This module provides the AggregationEngine that applies sales files to the
//! seller and product registries.
//!
//! The engine enforces the aggregation rules:
//! - A sales file is only applied when its seller is registered
//! - Each line is parsed independently; an odd field count skips the line
//! - Each pair is resolved independently; an unknown product or a bad
//!   quantity skips only that pair
//! - A resolved pair increments the product's units and the line total
//!   together, or not at all
//! - The line total is added to the seller's revenue once the line is done
//!
//! Registries are never extended here: unknown keys are reported, not inserted.

use crate::core::product_registry::ProductRegistry;
use crate::core::seller_registry::SellerRegistry;
use crate::io::record_format::{parse_sales_header, parse_sales_line};
use crate::io::SourceLine;
use crate::types::{Diagnostic, DocumentNumber, Issue, ReportError, SalesTransactionGroup};
use rust_decimal::Decimal;

/// Result of applying one sales file
#[derive(Debug, Clone, PartialEq)]
pub enum SalesFileOutcome {
    /// The seller exists and every valid pair was aggregated
    Applied {
        seller: DocumentNumber,
        /// Lines with an even field count
        lines: usize,
        /// Pairs resolved against the product registry
        pairs: usize,
        /// Revenue added to the seller by this file
        revenue: Decimal,
        diagnostics: Vec<Diagnostic>,
    },

    /// The seller is not registered; nothing in the file was aggregated
    UnknownSeller { diagnostic: Diagnostic },
}

impl SalesFileOutcome {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            SalesFileOutcome::Applied { diagnostics, .. } => diagnostics,
            SalesFileOutcome::UnknownSeller { diagnostic } => std::slice::from_ref(diagnostic),
        }
    }
}

/// Sales aggregation engine
///
/// Owns both registries for the duration of a run. Built from registries that
/// are already loaded, and handed back through [`into_registries`](Self::into_registries)
/// for report building.
#[derive(Debug)]
pub struct AggregationEngine {
    sellers: SellerRegistry,
    products: ProductRegistry,
}

#[derive(Debug, Default)]
struct LineTotals {
    pairs: usize,
    revenue: Decimal,
}

impl AggregationEngine {
    pub fn new(sellers: SellerRegistry, products: ProductRegistry) -> Self {
        AggregationEngine { sellers, products }
    }

    /// Apply one seller's sales file
    ///
    /// # Arguments
    ///
    /// * `source` - File name used in diagnostics and errors
    /// * `lines` - The file's lines; the first one names the seller
    ///
    /// # Returns
    ///
    /// * `Ok(SalesFileOutcome)` - The file was applied, or skipped as a whole
    ///   because its seller is unknown
    /// * `Err(ReportError)` - The file is empty or its first line is unusable;
    ///   no registry was touched
    pub fn apply_sales_file<I>(
        &mut self,
        source: &str,
        lines: I,
    ) -> Result<SalesFileOutcome, ReportError>
    where
        I: IntoIterator<Item = Result<SourceLine, ReportError>>,
    {
        let mut lines = lines.into_iter();

        let header = match lines.next() {
            None => return Err(ReportError::empty_sales_file(source)),
            Some(Err(ReportError::ParseError { .. })) => {
                return Err(ReportError::malformed_sales_header(source))
            }
            Some(Err(e)) => return Err(ReportError::source_unreadable(source, e)),
            Some(Ok(header)) => header,
        };

        // The seller line must be the first line of the file, blank or not
        if header.number != 1 {
            return Err(ReportError::malformed_sales_header(source));
        }

        let seller = parse_sales_header(&header.field_refs()).map_err(|issue| match issue {
            Issue::InvalidDocumentNumber { value } => {
                ReportError::invalid_seller_document(source, &value)
            }
            _ => ReportError::malformed_sales_header(source),
        })?;

        if !self.sellers.contains(seller) {
            return Ok(SalesFileOutcome::UnknownSeller {
                diagnostic: Diagnostic::at_line(
                    source,
                    header.number,
                    Issue::UnknownSeller { document: seller },
                ),
            });
        }

        let mut diagnostics = Vec::new();
        let mut applied_lines = 0;
        let mut applied_pairs = 0;
        let mut file_revenue = Decimal::ZERO;

        for line in lines {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    diagnostics.push(Diagnostic::unreadable(source, &e));
                    continue;
                }
            };

            let parsed = match parse_sales_line(&line.field_refs()) {
                Ok(parsed) => parsed,
                Err(issue) => {
                    diagnostics.push(Diagnostic::at_line(source, line.number, issue));
                    continue;
                }
            };

            let mut issues = parsed.notices;
            let totals = self.apply_group(seller, &parsed.value, &mut issues);

            diagnostics.extend(
                issues
                    .into_iter()
                    .map(|issue| Diagnostic::at_line(source, line.number, issue)),
            );

            applied_lines += 1;
            applied_pairs += totals.pairs;
            file_revenue = file_revenue.saturating_add(totals.revenue);
        }

        Ok(SalesFileOutcome::Applied {
            seller,
            lines: applied_lines,
            pairs: applied_pairs,
            revenue: file_revenue,
            diagnostics,
        })
    }

    /// Aggregate the pairs of one line for a registered seller
    fn apply_group(
        &mut self,
        seller: DocumentNumber,
        group: &SalesTransactionGroup,
        issues: &mut Vec<Issue>,
    ) -> LineTotals {
        let mut totals = LineTotals::default();

        for item in &group.items {
            let amount = match self.products.price_sale(item) {
                Ok(amount) => amount,
                Err(issue) => {
                    issues.push(issue);
                    continue;
                }
            };

            // The seller must be able to take the line total once the line ends
            let Some(line_revenue) = totals
                .revenue
                .checked_add(amount)
                .filter(|revenue| self.sellers.can_absorb(seller, *revenue))
            else {
                issues.push(Issue::ArithmeticOverflow {
                    subject: format!("seller {}", seller),
                });
                continue;
            };

            if let Err(issue) = self.products.record_units(&item.product_id, item.quantity) {
                issues.push(issue);
                continue;
            }

            totals.revenue = line_revenue;
            totals.pairs += 1;
        }

        if totals.pairs > 0 {
            if let Err(issue) = self.sellers.add_revenue(seller, totals.revenue) {
                issues.push(issue);
            }
        }

        totals
    }

    pub fn sellers(&self) -> &SellerRegistry {
        &self.sellers
    }

    pub fn products(&self) -> &ProductRegistry {
        &self.products
    }

    /// Hand the final registries over for report building
    pub fn into_registries(self) -> (SellerRegistry, ProductRegistry) {
        (self.sellers, self.products)
    }
}
