//! Sales Report Engine CLI
//!
//! Reads the seller, product and per-seller sales files of the data layout
//! and writes the two ranked reports.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir other_data
//! cargo run -- --sales-dir incoming/ --reports-dir out/
//! RUST_LOG=warn cargo run
//! ```
//!
//! Progress and the final summary are logged at `info` level; every skipped
//! or corrected line is logged at `warn` level.
//!
//! # Exit Codes
//!
//! - 0: Success (reports written, possibly with diagnostics)
//! - 1: Fatal error (missing sources, no valid sellers/products, no sales files, etc.)

use log::info;
use sales_report_engine::cli;
use sales_report_engine::pipeline;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::parse_args();
    let config = args.to_batch_config();

    info!("Processing sales files from {}", config.sales_dir.display());

    match pipeline::run_batch(&config) {
        Ok(summary) => {
            for line in summary.to_string().lines() {
                info!("{}", line);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_source_problem() {
                eprintln!(
                    "Check that the input files exist and follow the expected format; \
                     regenerate the source files if needed."
                );
            }
            process::exit(1);
        }
    }
}
