//! Record parsers for the seller, product and sales sources
//!
//! This module centralizes the line-level format rules, converting the
//! fields of one [`SourceLine`](crate::io::SourceLine) into a domain value or
//! an [`Issue`] explaining why the line has to be skipped.
//!
//! All functions are pure (no I/O, no logging) for easy testing.

use crate::types::{
    DocumentNumber, DocumentType, Issue, ProductRecord, SaleItem, SalesTransactionGroup,
    SellerRecord,
};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fields in a seller line: `DocumentType;DocumentNumber;FirstNames;LastNames`
pub const SELLER_FIELDS: usize = 4;

/// Fields in a product line: `ProductId;DisplayName;UnitPrice`
pub const PRODUCT_FIELDS: usize = 3;

/// Minimum fields in the first line of a sales file: `DocumentType;DocumentNumber`
pub const SALES_HEADER_FIELDS: usize = 2;

/// A successfully parsed value plus the corrections applied while parsing it
///
/// Notices never cause the value to be dropped; they are reported so the
/// caller can surface them as diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub notices: Vec<Issue>,
}

impl<T> Parsed<T> {
    fn clean(value: T) -> Self {
        Parsed {
            value,
            notices: Vec::new(),
        }
    }
}

/// Convert the fields of a seller line into a SellerRecord
///
/// # Returns
///
/// * `Ok(SellerRecord)` with zero revenue
/// * `Err(Issue)` on a wrong field count, an unknown document type or a
///   document number that is not a non-negative integer
pub fn parse_seller_line(fields: &[&str]) -> Result<SellerRecord, Issue> {
    let [document_type, document_number, first_names, last_names] = fields else {
        return Err(Issue::FieldCount {
            expected: SELLER_FIELDS,
            found: fields.len(),
        });
    };

    let document_type =
        DocumentType::from_str(document_type).map_err(|_| Issue::InvalidDocumentType {
            value: document_type.to_string(),
        })?;

    let document_number = parse_document_number(document_number)?;

    Ok(SellerRecord::new(
        document_type,
        document_number,
        *first_names,
        *last_names,
    ))
}

/// Convert the fields of a product line into a ProductRecord
///
/// A negative unit price is replaced by its absolute value and reported as a
/// [`Issue::NegativePrice`] notice.
pub fn parse_product_line(fields: &[&str]) -> Result<Parsed<ProductRecord>, Issue> {
    let [product_id, display_name, unit_price] = fields else {
        return Err(Issue::FieldCount {
            expected: PRODUCT_FIELDS,
            found: fields.len(),
        });
    };

    let price = parse_price(unit_price).ok_or_else(|| Issue::InvalidPrice {
        product: product_id.to_string(),
        value: unit_price.to_string(),
    })?;

    let mut notices = Vec::new();
    if price.is_sign_negative() && !price.is_zero() {
        notices.push(Issue::NegativePrice {
            product: product_id.to_string(),
            value: unit_price.to_string(),
        });
    }

    Ok(Parsed {
        value: ProductRecord::new(*product_id, *display_name, price.abs()),
        notices,
    })
}

/// Extract the seller document number from the first line of a sales file
///
/// Only the document number is validated; the document type is informative.
pub fn parse_sales_header(fields: &[&str]) -> Result<DocumentNumber, Issue> {
    if fields.len() < SALES_HEADER_FIELDS {
        return Err(Issue::FieldCount {
            expected: SALES_HEADER_FIELDS,
            found: fields.len(),
        });
    }
    parse_document_number(fields[1])
}

/// Convert a sales line into its `(product id, quantity)` pairs
///
/// An odd field count rejects the whole line. Inside an even line each pair
/// stands alone: an unparsable quantity drops that pair with an
/// [`Issue::InvalidQuantity`] notice, a negative one is normalized with an
/// [`Issue::NegativeQuantity`] notice.
pub fn parse_sales_line(fields: &[&str]) -> Result<Parsed<SalesTransactionGroup>, Issue> {
    if fields.len() % 2 != 0 {
        return Err(Issue::OddFieldCount {
            found: fields.len(),
        });
    }

    let mut parsed = Parsed::clean(SalesTransactionGroup::default());

    for pair in fields.chunks_exact(2) {
        let (product_id, raw_quantity) = (pair[0], pair[1]);

        let quantity = match raw_quantity.parse::<i64>() {
            Ok(quantity) => quantity,
            Err(_) => {
                parsed.notices.push(Issue::InvalidQuantity {
                    product: product_id.to_string(),
                    value: raw_quantity.to_string(),
                });
                continue;
            }
        };

        if quantity < 0 {
            parsed.notices.push(Issue::NegativeQuantity {
                product: product_id.to_string(),
                value: quantity,
            });
        }

        parsed.value.items.push(SaleItem {
            product_id: product_id.to_string(),
            quantity: quantity.unsigned_abs(),
        });
    }

    Ok(parsed)
}

fn parse_document_number(value: &str) -> Result<DocumentNumber, Issue> {
    value
        .trim()
        .parse::<DocumentNumber>()
        .map_err(|_| Issue::InvalidDocumentNumber {
            value: value.to_string(),
        })
}

/// Plain decimal first, then scientific notation (`1.5e3`)
fn parse_price(value: &str) -> Option<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}
