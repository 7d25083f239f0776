//! Batch orchestrator
//!
//! This module sequences a full run against the filesystem:
//! 1. Verifies that the seller file, product file and sales directory exist
//! 2. Loads the seller and product registries
//! 3. Discovers the sales files and applies each one through the
//!    `AggregationEngine`, isolating per-file failures
//! 4. Builds both reports and writes them into the reports directory
//!
//! # Error Handling
//!
//! Fatal errors are returned immediately and no report is written. Line and
//! pair diagnostics are logged at `warn` level; a rejected sales file is logged
//! at `error` level and counted as failed while the remaining files continue.
//!
//! Both reports are first written under a `.tmp` suffix and only renamed into
//! place once both writes succeeded, so a failed run leaves no report behind.

use crate::core::{
    build_product_report, build_seller_report, AggregationEngine, ProductRegistry,
    SalesFileOutcome, SellerRegistry,
};
use crate::io::{write_product_report, write_seller_report, LineReader};
use crate::pipeline::summary::{BatchSummary, SalesFileTally};
use crate::pipeline::BatchConfig;
use crate::types::{Diagnostic, ReportError};
use log::{error, info, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Run one complete batch
///
/// # Returns
///
/// * `Ok(BatchSummary)` once both reports are written (possibly with
///   recoverable diagnostics or failed sales files)
/// * `Err(ReportError)` on a fatal error
///
/// # Errors
///
/// Returns an error if:
/// - The seller file, product file or sales directory is missing or unreadable
/// - No valid seller or no valid product could be loaded
/// - The sales directory holds no sales file
/// - The reports directory or a report file cannot be written
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary, ReportError> {
    verify_inputs(config)?;

    let mut diagnostics = 0;

    let sellers = load_sellers(&config.sellers_file, &mut diagnostics)?;
    info!("Seller file processed ({} sellers)", sellers.len());

    let products = load_products(&config.products_file, &mut diagnostics)?;
    info!("Product file processed ({} products)", products.len());

    let sales_files = discover_sales_files(&config.sales_dir, &config.sales_extension)?;

    let mut engine = AggregationEngine::new(sellers, products);
    let mut tally = SalesFileTally {
        found: sales_files.len(),
        ..SalesFileTally::default()
    };

    for path in &sales_files {
        let name = display_name(path);
        let result = LineReader::from_path(path)
            .and_then(|lines| engine.apply_sales_file(&name, lines));

        match result {
            Ok(outcome) => {
                diagnostics += log_diagnostics(outcome.diagnostics());
                // A file for an unregistered seller is read without error but
                // contributes nothing, so it is kept apart from `processed`.
                match outcome {
                    SalesFileOutcome::Applied { .. } => tally.processed += 1,
                    SalesFileOutcome::UnknownSeller { .. } => tally.skipped += 1,
                }
            }
            Err(e) => {
                error!("Error processing {}: {}", name, e);
                tally.failed += 1;
            }
        }
    }
    info!(
        "Sales files processed ({} of {} files, {} skipped for unknown seller, {} failed)",
        tally.processed, tally.found, tally.skipped, tally.failed
    );

    let (sellers, products) = engine.into_registries();
    let seller_rows = build_seller_report(&sellers);
    let product_rows = build_product_report(&products);

    fs::create_dir_all(&config.reports_dir).map_err(|e| {
        ReportError::report_write(config.reports_dir.display(), e)
    })?;

    let seller_report = config.seller_report_path();
    let product_report = config.product_report_path();

    let staged_sellers = stage_report(&seller_report, |out| {
        write_seller_report(&seller_rows, out)
    })?;
    let staged_products = stage_report(&product_report, |out| {
        write_product_report(&product_rows, out)
    })
    .map_err(|e| {
        discard(&staged_sellers);
        e
    })?;

    if let Err(e) = publish(&staged_sellers, &seller_report) {
        discard(&staged_sellers);
        discard(&staged_products);
        return Err(e);
    }
    if let Err(e) = publish(&staged_products, &product_report) {
        discard(&staged_products);
        discard(&seller_report);
        return Err(e);
    }
    info!("Seller report written to {}", seller_report.display());
    info!("Product report written to {}", product_report.display());

    Ok(BatchSummary::from_reports(
        &seller_rows,
        &product_rows,
        tally,
        diagnostics,
        seller_report,
        product_report,
    ))
}

fn verify_inputs(config: &BatchConfig) -> Result<(), ReportError> {
    if !config.sellers_file.is_file() {
        return Err(ReportError::file_not_found(config.sellers_file.display()));
    }
    if !config.products_file.is_file() {
        return Err(ReportError::file_not_found(config.products_file.display()));
    }
    if !config.sales_dir.is_dir() {
        return Err(ReportError::SalesDirectoryNotFound {
            path: config.sales_dir.display().to_string(),
        });
    }
    Ok(())
}

fn load_sellers(path: &Path, diagnostics: &mut usize) -> Result<SellerRegistry, ReportError> {
    let source = display_name(path);
    let (registry, issues) = SellerRegistry::from_lines(&source, LineReader::from_path(path)?)
        .map_err(|e| with_full_path(path, e))?;
    *diagnostics += log_diagnostics(&issues);

    if registry.is_empty() {
        return Err(ReportError::NoValidSellers {
            path: path.display().to_string(),
        });
    }
    Ok(registry)
}

fn load_products(path: &Path, diagnostics: &mut usize) -> Result<ProductRegistry, ReportError> {
    let source = display_name(path);
    let (registry, issues) = ProductRegistry::from_lines(&source, LineReader::from_path(path)?)
        .map_err(|e| with_full_path(path, e))?;
    *diagnostics += log_diagnostics(&issues);

    if registry.is_empty() {
        return Err(ReportError::NoValidProducts {
            path: path.display().to_string(),
        });
    }
    Ok(registry)
}

/// List the sales files of a directory, sorted by file name
///
/// Only regular files whose extension matches `extension` (case-insensitive)
/// are sales files.
pub fn discover_sales_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ReportError> {
    let unreadable = |e: std::io::Error| ReportError::source_unreadable(dir.display(), e);
    let entries = fs::read_dir(dir).map_err(unreadable)?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(unreadable)?.path();
        let matches_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

        if matches_extension && path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(ReportError::NoSalesFiles {
            path: dir.display().to_string(),
        });
    }

    files.sort();
    Ok(files)
}

/// Write a report next to its final path, under a `.tmp` suffix
///
/// Nothing is left on disk when writing fails.
fn stage_report<F>(path: &Path, write: F) -> Result<PathBuf, ReportError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), ReportError>,
{
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    let staged = PathBuf::from(staged);

    let file = File::create(&staged).map_err(|e| ReportError::report_write(path.display(), e))?;
    let mut output = BufWriter::new(file);

    let written = write(&mut output)
        .and_then(|()| output.flush().map_err(ReportError::from))
        .map_err(|e| ReportError::report_write(path.display(), e));

    drop(output);
    if written.is_err() {
        discard(&staged);
    }
    written.map(|()| staged)
}

/// Move a staged report to its final path
fn publish(staged: &Path, path: &Path) -> Result<(), ReportError> {
    fs::rename(staged, path).map_err(|e| ReportError::report_write(path.display(), e))
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Could not remove {}: {}", path.display(), e);
    }
}

/// Name the whole path in a source error raised under the file name alone
fn with_full_path(path: &Path, error: ReportError) -> ReportError {
    match error {
        ReportError::SourceUnreadable { message, .. } => {
            ReportError::source_unreadable(path.display(), message)
        }
        other => other,
    }
}

fn log_diagnostics(diagnostics: &[Diagnostic]) -> usize {
    for diagnostic in diagnostics {
        warn!("{}", diagnostic);
    }
    diagnostics.len()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
