//! End-to-end integration tests
//!
//! These tests validate the complete batch pipeline using predefined source
//! fixtures. Each test:
//! 1. Points a `BatchConfig` at a fixture directory
//! 2. Runs the batch, writing the reports into a temporary directory
//! 3. Compares both reports with the expected files of the fixture
//!
//! Each fixture directory under tests/fixtures/ holds `vendedores.txt`,
//! `productos.txt`, a `ventas/` directory and the two expected reports.
//! Fixtures cover:
//! - Happy path scenarios
//! - Unknown products and unknown sellers
//! - Malformed lines, corrections and rejected sales files
//! - Ranking ties

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use sales_report_engine::pipeline::BatchConfig;
    use sales_report_engine::{run_batch, ReportError};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn fixture_config(fixture_name: &str, reports_dir: &Path) -> BatchConfig {
        let fixture_dir = PathBuf::from("tests/fixtures").join(fixture_name);
        BatchConfig {
            sellers_file: fixture_dir.join("vendedores.txt"),
            products_file: fixture_dir.join("productos.txt"),
            sales_dir: fixture_dir.join("ventas"),
            reports_dir: reports_dir.to_path_buf(),
            sales_extension: "txt".to_string(),
        }
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Run a fixture and compare both reports with the expected files
    ///
    /// # Panics
    ///
    /// Panics if the batch fails or either report differs from the expected
    /// file of the fixture.
    fn run_test_fixture(fixture_name: &str) {
        let fixture_dir = PathBuf::from("tests/fixtures").join(fixture_name);
        let expected_sellers = fixture_dir.join("expected_vendedores.csv");
        let expected_products = fixture_dir.join("expected_productos.csv");

        assert!(
            expected_sellers.exists(),
            "Expected file not found: {}",
            expected_sellers.display()
        );
        assert!(
            expected_products.exists(),
            "Expected file not found: {}",
            expected_products.display()
        );

        let reports = TempDir::new().expect("Failed to create temp dir");
        let config = fixture_config(fixture_name, reports.path());

        run_batch(&config).unwrap_or_else(|e| panic!("Batch failed for {}: {}", fixture_name, e));

        for (actual_path, expected_path) in [
            (config.seller_report_path(), expected_sellers),
            (config.product_report_path(), expected_products),
        ] {
            let actual = read_lines(&actual_path);
            let expected = read_lines(&expected_path);
            assert_eq!(
                actual,
                expected,
                "\n\nReport mismatch for fixture: {} ({})\n\nActual:\n{}\n\nExpected:\n{}\n",
                fixture_name,
                actual_path.display(),
                actual.join("\n"),
                expected.join("\n")
            );
        }
    }

    #[rstest]
    #[case("happy_path")]
    #[case("unknown_product")]
    #[case("unknown_seller_file")]
    #[case("malformed_data")]
    #[case("tie_breaking")]
    fn test_fixtures(#[case] fixture: &str) {
        run_test_fixture(fixture);
    }

    #[test]
    fn test_malformed_data_summary() {
        let reports = TempDir::new().unwrap();
        let config = fixture_config("malformed_data", reports.path());

        let summary = run_batch(&config).unwrap();

        assert_eq!(summary.sellers_loaded, 2);
        assert_eq!(summary.products_loaded, 3);
        // readme.md is not a sales file
        assert_eq!(summary.sales_files.found, 4);
        assert_eq!(summary.sales_files.processed, 2);
        assert_eq!(summary.sales_files.skipped, 0);
        assert_eq!(summary.sales_files.failed, 2);
        assert_eq!(summary.total_units_sold, 10);
        assert_eq!(
            summary.top_product,
            Some(("Memoria USB".to_string(), 4))
        );
    }

    #[test]
    fn test_unknown_seller_file_is_skipped() {
        let reports = TempDir::new().unwrap();
        let config = fixture_config("unknown_seller_file", reports.path());

        let summary = run_batch(&config).unwrap();

        assert_eq!(summary.sales_files.found, 2);
        assert_eq!(summary.sales_files.processed, 1);
        assert_eq!(summary.sales_files.skipped, 1);
        assert_eq!(summary.sales_files.failed, 0);
    }

    #[test]
    fn test_reports_directory_is_created() {
        let reports = TempDir::new().unwrap();
        let nested = reports.path().join("nested").join("reportes");
        let config = fixture_config("happy_path", &nested);

        run_batch(&config).unwrap();

        assert!(config.seller_report_path().is_file());
        assert!(config.product_report_path().is_file());
    }

    #[test]
    fn test_seller_file_without_valid_lines_is_fatal() {
        let data = TempDir::new().unwrap();
        fs::write(data.path().join("vendedores.txt"), "CC;abc;Ana;Lopez\n").unwrap();
        fs::write(data.path().join("productos.txt"), "P1;Mouse;10000\n").unwrap();
        fs::create_dir(data.path().join("ventas")).unwrap();
        fs::write(data.path().join("ventas").join("v.txt"), "CC;1\nP1;1\n").unwrap();

        let config = BatchConfig {
            sellers_file: data.path().join("vendedores.txt"),
            products_file: data.path().join("productos.txt"),
            sales_dir: data.path().join("ventas"),
            reports_dir: data.path().join("reportes"),
            sales_extension: "txt".to_string(),
        };

        let result = run_batch(&config);

        assert!(matches!(result, Err(ReportError::NoValidSellers { .. })));
        assert!(!config.seller_report_path().exists());
    }

    #[test]
    fn test_missing_fixture_sales_directory_is_fatal() {
        let reports = TempDir::new().unwrap();
        let mut config = fixture_config("happy_path", reports.path());
        config.sales_dir = PathBuf::from("tests/fixtures/happy_path/missing");

        let result = run_batch(&config);

        assert!(matches!(
            result,
            Err(ReportError::SalesDirectoryNotFound { .. })
        ));
    }
}
