use crate::pipeline::{BatchConfig, DEFAULT_DATA_DIR, DEFAULT_SALES_EXTENSION};
use clap::Parser;
use std::path::PathBuf;

/// Build seller and product sales reports from delimited source files
#[derive(Parser, Debug)]
#[command(name = "sales-report")]
#[command(about = "Build seller and product sales reports from delimited source files", long_about = None)]
pub struct CliArgs {
    /// Root directory of the standard data layout
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = DEFAULT_DATA_DIR,
        help = "Root of the data layout (vendedores/, productos/, ventas/, reportes/)"
    )]
    pub data_dir: PathBuf,

    /// Seller source file, overriding the data layout
    #[arg(long = "sellers", value_name = "FILE")]
    pub sellers_file: Option<PathBuf>,

    /// Product source file, overriding the data layout
    #[arg(long = "products", value_name = "FILE")]
    pub products_file: Option<PathBuf>,

    /// Directory of per-seller sales files, overriding the data layout
    #[arg(long = "sales-dir", value_name = "DIR")]
    pub sales_dir: Option<PathBuf>,

    /// Output directory for the reports, overriding the data layout
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Extension identifying sales files
    #[arg(
        long = "sales-extension",
        value_name = "EXT",
        default_value = DEFAULT_SALES_EXTENSION,
        help = "Extension of the sales files, without the dot"
    )]
    pub sales_extension: String,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Starts from the layout under `--data-dir` and replaces every location
    /// given explicitly.
    pub fn to_batch_config(&self) -> BatchConfig {
        let defaults = BatchConfig::from_data_dir(&self.data_dir);

        BatchConfig {
            sellers_file: self.sellers_file.clone().unwrap_or(defaults.sellers_file),
            products_file: self.products_file.clone().unwrap_or(defaults.products_file),
            sales_dir: self.sales_dir.clone().unwrap_or(defaults.sales_dir),
            reports_dir: self.reports_dir.clone().unwrap_or(defaults.reports_dir),
            sales_extension: self.sales_extension.trim_start_matches('.').to_string(),
        }
    }
}
