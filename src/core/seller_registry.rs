//! Seller registry module
//!
//! This module provides the `SellerRegistry` which maps document numbers to
//! seller records and carries the revenue accumulated by the aggregation
//! engine.
//!
//! The SellerRegistry is responsible for:
//! - Loading sellers from the seller source (last write wins on duplicates)
//! - Exposing read access for sales-file validation and report building
//! - Accumulating revenue with checked arithmetic

use crate::io::record_format::parse_seller_line;
use crate::io::SourceLine;
use crate::types::{Diagnostic, DocumentNumber, Issue, ReportError, SellerRecord};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// In-memory map of document numbers to seller records
#[derive(Debug, Default)]
pub struct SellerRegistry {
    sellers: HashMap<DocumentNumber, SellerRecord>,
}

impl SellerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        SellerRegistry {
            sellers: HashMap::new(),
        }
    }

    /// Build a registry from the lines of a seller source
    ///
    /// Lines that do not parse are skipped and returned as diagnostics
    /// located in `source`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::SourceUnreadable` if the source fails to read
    /// before its end, so a truncated source never yields a registry.
    pub fn from_lines<I>(
        source: &str,
        lines: I,
    ) -> Result<(Self, Vec<Diagnostic>), ReportError>
    where
        I: IntoIterator<Item = Result<SourceLine, ReportError>>,
    {
        let mut registry = SellerRegistry::new();
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

            match parse_seller_line(&line.field_refs()) {
                Ok(seller) => {
                    registry.insert(seller);
                }
                Err(issue) => diagnostics.push(Diagnostic::at_line(source, line.number, issue)),
            }
        }

        Ok((registry, diagnostics))
    }

    /// Insert a seller, replacing any previous seller with the same document number
    ///
    /// # Returns
    ///
    /// The replaced seller, if there was one
    pub fn insert(&mut self, seller: SellerRecord) -> Option<SellerRecord> {
        self.sellers.insert(seller.document_number, seller)
    }

    pub fn get(&self, document: DocumentNumber) -> Option<&SellerRecord> {
        self.sellers.get(&document)
    }

    pub fn contains(&self, document: DocumentNumber) -> bool {
        self.sellers.contains_key(&document)
    }

    /// Whether `amount` can be added to the seller's revenue without overflow
    ///
    /// Unknown sellers cannot absorb anything.
    pub fn can_absorb(&self, document: DocumentNumber, amount: Decimal) -> bool {
        self.get(document)
            .is_some_and(|seller| seller.accumulated_revenue.checked_add(amount).is_some())
    }

    /// Add revenue to a seller
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The seller's new accumulated revenue
    /// * `Err(Issue)` - If the seller is unknown or the addition would overflow;
    ///   the seller is left unchanged
    pub fn add_revenue(
        &mut self,
        document: DocumentNumber,
        amount: Decimal,
    ) -> Result<Decimal, Issue> {
        let seller = self
            .sellers
            .get_mut(&document)
            .ok_or(Issue::UnknownSeller { document })?;

        let revenue = seller
            .accumulated_revenue
            .checked_add(amount)
            .ok_or_else(|| Issue::ArithmeticOverflow {
                subject: format!("seller {}", document),
            })?;

        seller.accumulated_revenue = revenue;
        Ok(revenue)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SellerRecord> {
        self.sellers.values()
    }

    pub fn len(&self) -> usize {
        self.sellers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sellers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::LineReader;
    use crate::types::DocumentType;
    use rust_decimal_macros::dec;

    fn load(content: &str) -> (SellerRegistry, Vec<Diagnostic>) {
        SellerRegistry::from_lines(
            "vendedores.txt",
            LineReader::from_reader(content.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = SellerRegistry::new();

        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_from_lines_loads_every_well_formed_line() {
        let (registry, diagnostics) = load("CC;1;Ana;Lopez\nCE;2;Luis;Gil\nTI;3;Sofia;Vega\n");

        assert_eq!(registry.len(), 3);
        assert!(diagnostics.is_empty());
        assert_eq!(
            registry.get(2).unwrap().document_type,
            DocumentType::ForeignId
        );
    }

    #[test]
    fn test_from_lines_skips_malformed_lines_with_location() {
        let (registry, diagnostics) = load("CC;1;Ana;Lopez\nCC;abc;Bad;Number\nCC;2;Missing\n");

        assert_eq!(registry.len(), 1);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].line, Some(2));
        assert!(matches!(
            diagnostics[0].issue,
            Issue::InvalidDocumentNumber { .. }
        ));
        assert_eq!(diagnostics[1].line, Some(3));
        assert_eq!(
            diagnostics[1].issue,
            Issue::FieldCount {
                expected: 4,
                found: 3
            }
        );
    }

    /// Reader that serves one seller line, then fails
    struct TruncatedSource {
        served: bool,
    }

    impl std::io::Read for TruncatedSource {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.served {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "device lost",
                ));
            }
            self.served = true;
            let line = b"CC;1;Ana;Lopez\n";
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    #[test]
    fn test_from_lines_read_failure_is_fatal() {
        let result = SellerRegistry::from_lines(
            "vendedores.txt",
            LineReader::from_reader(TruncatedSource { served: false }),
        );

        assert!(matches!(
            result,
            Err(ReportError::SourceUnreadable { ref path, .. }) if path == "vendedores.txt"
        ));
    }

    #[test]
    fn test_from_lines_undecodable_line_is_a_diagnostic() {
        let mut content = b"CC;1;Ana;Lopez\n".to_vec();
        content.extend_from_slice(b"CC;2;\xFF;Gil\n");

        let (registry, diagnostics) = SellerRegistry::from_lines(
            "vendedores.txt",
            LineReader::from_reader(content.as_slice()),
        )
        .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0].issue,
            Issue::UnreadableLine { .. }
        ));
    }

    #[test]
    fn test_from_lines_last_write_wins() {
        let (registry, _) = load("CC;1;Ana;Lopez\nCC;1;Maria;Rojas\n");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(1).unwrap().first_names, "Maria");
    }

    #[test]
    fn test_from_lines_empty_source() {
        let (registry, diagnostics) = load("");

        assert!(registry.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_insert_returns_replaced_seller() {
        let mut registry = SellerRegistry::new();

        assert!(registry
            .insert(SellerRecord::new(DocumentType::NationalId, 1, "Ana", "Lopez"))
            .is_none());
        let replaced = registry
            .insert(SellerRecord::new(DocumentType::NationalId, 1, "Maria", "Rojas"))
            .unwrap();

        assert_eq!(replaced.first_names, "Ana");
    }

    #[test]
    fn test_add_revenue_accumulates() {
        let mut registry = SellerRegistry::new();
        registry.insert(SellerRecord::new(DocumentType::NationalId, 1, "Ana", "Lopez"));

        registry.add_revenue(1, dec!(100.50)).unwrap();
        let total = registry.add_revenue(1, dec!(20.25)).unwrap();

        assert_eq!(total, dec!(120.75));
        assert_eq!(registry.get(1).unwrap().accumulated_revenue, dec!(120.75));
    }

    #[test]
    fn test_add_revenue_unknown_seller() {
        let mut registry = SellerRegistry::new();

        assert_eq!(
            registry.add_revenue(9, Decimal::ONE).unwrap_err(),
            Issue::UnknownSeller { document: 9 }
        );
    }

    #[test]
    fn test_add_revenue_overflow_leaves_seller_unchanged() {
        let mut registry = SellerRegistry::new();
        registry.insert(SellerRecord::new(DocumentType::NationalId, 1, "Ana", "Lopez"));
        registry.add_revenue(1, Decimal::MAX).unwrap();

        assert!(!registry.can_absorb(1, Decimal::MAX));
        let result = registry.add_revenue(1, Decimal::MAX);

        assert!(matches!(result, Err(Issue::ArithmeticOverflow { .. })));
        assert_eq!(registry.get(1).unwrap().accumulated_revenue, Decimal::MAX);
    }

    #[test]
    fn test_can_absorb_unknown_seller_is_false() {
        let registry = SellerRegistry::new();

        assert!(!registry.can_absorb(1, Decimal::ONE));
    }
}
