//! Batch pipeline module
//!
//! Wires the registries, the aggregation engine and the report writers to
//! the filesystem. `BatchConfig` describes where the sources live and where
//! the reports go; [`run_batch`] performs a full run.
//!
//! # Default Layout
//!
//! ```text
//! datos/
//! ├── vendedores/vendedores.txt
//! ├── productos/productos.txt
//! ├── ventas/*.txt
//! └── reportes/
//!     ├── reporte_vendedores.csv
//!     └── reporte_productos.csv
//! ```

use std::path::{Path, PathBuf};

pub mod batch;
pub mod summary;

pub use batch::{discover_sales_files, run_batch};
pub use summary::{BatchSummary, SalesFileTally};

pub const DEFAULT_DATA_DIR: &str = "datos";
pub const DEFAULT_SALES_EXTENSION: &str = "txt";
pub const SELLER_REPORT_FILE: &str = "reporte_vendedores.csv";
pub const PRODUCT_REPORT_FILE: &str = "reporte_productos.csv";

/// Locations of the sources and reports for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub sellers_file: PathBuf,
    pub products_file: PathBuf,
    /// Directory holding one sales file per seller
    pub sales_dir: PathBuf,
    pub reports_dir: PathBuf,
    /// Extension that identifies sales files, without the dot
    pub sales_extension: String,
}

impl BatchConfig {
    /// Standard layout rooted at `data_dir`
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let root = data_dir.as_ref();
        BatchConfig {
            sellers_file: root.join("vendedores").join("vendedores.txt"),
            products_file: root.join("productos").join("productos.txt"),
            sales_dir: root.join("ventas"),
            reports_dir: root.join("reportes"),
            sales_extension: DEFAULT_SALES_EXTENSION.to_string(),
        }
    }

    pub fn seller_report_path(&self) -> PathBuf {
        self.reports_dir.join(SELLER_REPORT_FILE)
    }

    pub fn product_report_path(&self) -> PathBuf {
        self.reports_dir.join(PRODUCT_REPORT_FILE)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig::from_data_dir(DEFAULT_DATA_DIR)
    }
}
