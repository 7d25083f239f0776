//! Report output format
//!
//! Both reports are `;`-delimited with a fixed Spanish header row, one row
//! per registry entry, currency fields with exactly two decimals.
//!
//! All functions write to a caller-supplied writer for easy testing.

use crate::core::report_builder::{ProductReportRow, SellerReportRow};
use crate::types::ReportError;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::io::Write;

pub const SELLER_REPORT_HEADER: [&str; 3] =
    ["NombresVendedor", "ApellidosVendedor", "TotalRecaudado"];

pub const PRODUCT_REPORT_HEADER: [&str; 3] =
    ["NombreProducto", "PrecioUnitario", "CantidadVendida"];

/// Format a currency amount with exactly two decimals (banker's rounding)
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// serde adapter writing a Decimal through [`format_money`]
pub fn two_decimals<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_money(*value))
}

/// Write the seller report
pub fn write_seller_report(
    rows: &[SellerReportRow],
    output: &mut dyn Write,
) -> Result<(), ReportError> {
    write_report(&SELLER_REPORT_HEADER, rows, output)
}

/// Write the product report
pub fn write_product_report(
    rows: &[ProductReportRow],
    output: &mut dyn Write,
) -> Result<(), ReportError> {
    write_report(&PRODUCT_REPORT_HEADER, rows, output)
}

fn write_report<T: Serialize>(
    header: &[&str],
    rows: &[T],
    output: &mut dyn Write,
) -> Result<(), ReportError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(output);

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
