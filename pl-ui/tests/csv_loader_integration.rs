//! Loads the parameter fixture from disk and feeds it into the engine.

use std::path::{Path, PathBuf};

use pl_core::{ForecastConfig, ForecastEngine, ParameterCategory};
use pl_ui::csv_loader::{self, CsvLoadError};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_parameters.csv")
}

#[test]
fn test_load_fixture_file_succeeds() {
    let params =
        csv_loader::load_from_file(&fixture_path()).expect("fixture file should load without error");

    assert_eq!(params.get(ParameterCategory::RevenueIndex, 5), dec!(105.0));
    assert_eq!(params.get(ParameterCategory::RevenueIndex, 6), dec!(110.0));
    assert_eq!(params.get(ParameterCategory::CostRatio, 5), dec!(68.5));
    assert_eq!(params.get(ParameterCategory::CostRatio, 6), dec!(67.0));
    assert_eq!(params.get(ParameterCategory::SgaRatio, 9), dec!(18.0));
}

#[test]
fn test_fixture_drives_planned_rows() {
    let params = csv_loader::load_from_file(&fixture_path()).unwrap();
    let engine = ForecastEngine::new(ForecastConfig::default())
        .unwrap()
        .with_parameters(params);

    // 2024 is index 5, the first planned year.
    let row = engine.row_for_year(2024).unwrap();
    assert_eq!(row.revenue, dec!(882453.6));
    assert_eq!(row.cost, dec!(604480.7160));
    assert_eq!(row.gross_profit, row.revenue - row.cost);

    // Actual years ignore the imported values.
    let actual = engine.row_for_year(2023).unwrap();
    assert_eq!(actual.revenue, dec!(924475.2));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = csv_loader::load_from_file(Path::new("/no/such/parameters.csv"));

    assert!(matches!(result, Err(CsvLoadError::Io(_))));
}
