use dcfview::config::{DataConfig, SourceKind, ValuationConfig};
use dcfview::data::connectors::{FundamentalsSource, RawStatements, StatementBuilder};
use dcfview::data::{fetch_fundamentals, CsvConnector};
use dcfview::engines::valuation::intrinsic_value_per_share;
use dcfview::error::ProviderError;
use dcfview::types::{round2, ValuationInputs};
use dcfview::ui::services::run_valuation;
use dcfview::DcfError;
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn csv_config() -> DataConfig {
    DataConfig {
        source: SourceKind::Csv,
        csv_dir: data_dir(),
        ..DataConfig::default()
    }
}

#[test]
fn test_csv_snapshot() {
    let connector = CsvConnector::new(data_dir());
    let snapshot = fetch_fundamentals(&connector, " acme ", 5).unwrap();

    assert_eq!(snapshot.ticker, "ACME");
    // 2023 lacks operating cash flow, so the five newest complete years are 2024, 2022..2019
    assert_eq!(snapshot.fcf_periods, 5);
    assert!((snapshot.avg_fcf - 830.0).abs() < 1e-9);

    assert_eq!(snapshot.cash.value, 500.0);
    assert_eq!(snapshot.cash.matched.as_deref(), Some("Cash And Cash Equivalents"));
    assert_eq!(snapshot.total_debt.value, 2000.0);
    assert_eq!(snapshot.total_debt.matched.as_deref(), Some("Long Term Debt"));
    assert_eq!(snapshot.net_debt, 1500.0);
    assert_eq!(snapshot.shares_outstanding, Some(1000));
}

#[test]
fn test_missing_line_items_fall_back_to_zero() {
    let connector = CsvConnector::new(data_dir());
    let snapshot = fetch_fundamentals(&connector, "NOSHARES", 5).unwrap();

    assert!(snapshot.cash.is_fallback());
    assert!(snapshot.total_debt.is_fallback());
    assert_eq!(snapshot.net_debt, 0.0);
    assert_eq!(snapshot.shares_outstanding, None);

    let value = intrinsic_value_per_share(&ValuationInputs::new(
        snapshot.avg_fcf,
        snapshot.shares_outstanding,
        snapshot.net_debt,
        0.08,
        0.10,
    ))
    .unwrap();
    assert_eq!(value, 0.0);
}

#[test]
fn test_fetch_error_carries_ticker_and_cause() {
    let connector = CsvConnector::new(data_dir());

    let err = fetch_fundamentals(&connector, "broken", 5).unwrap_err();
    assert_eq!(err.ticker, "BROKEN");
    assert_eq!(err.source_name, "CSV statements");
    assert!(matches!(err.cause, ProviderError::DataNotAvailable(_)));
    assert!(err.to_string().contains("BROKEN"));

    let err = fetch_fundamentals(&connector, "MISSING", 5).unwrap_err();
    assert!(matches!(err.cause, ProviderError::DataNotAvailable(_)));

    let err = fetch_fundamentals(&connector, "   ", 5).unwrap_err();
    assert!(matches!(err.cause, ProviderError::InvalidTicker(_)));
}

#[test]
fn test_run_valuation_end_to_end() {
    let display = run_valuation("ACME", &ValuationConfig::default(), &csv_config()).unwrap();

    let matrix = &display.matrix;
    assert_eq!(matrix.row_labels(), &["6%", "8%", "10%", "12%"]);
    assert_eq!(matrix.column_labels(), &["8%", "9%", "10%", "11%"]);

    let expected = intrinsic_value_per_share(&ValuationInputs::new(830.0, Some(1000), 1500.0, 0.08, 0.10)).unwrap();
    assert_eq!(matrix.get_by_label("8%", "10%"), Some(round2(expected)));
    assert_eq!(matrix.get_by_label("8%", "10%"), Some(12.08));

    let base = display.base_case.expect("middle of the default axes is defined");
    assert_eq!(base.growth_rate, 0.10);
    assert_eq!(base.discount_rate, 0.10);
    assert_eq!(matrix.get_by_label("10%", "10%"), Some(round2(base.breakdown.per_share)));
}

#[test]
fn test_run_valuation_wraps_fetch_failure() {
    let err = run_valuation("MISSING", &ValuationConfig::default(), &csv_config()).unwrap_err();
    match err {
        DcfError::DataFetch(e) => {
            assert_eq!(e.ticker, "MISSING");
            assert_eq!(e.source_name, SourceKind::Csv.display_name());
        }
        other => panic!("expected DataFetch, got {:?}", other),
    }
}

#[test]
fn test_run_valuation_rejects_bad_config() {
    let config = ValuationConfig {
        growth_rates: Vec::new(),
        ..ValuationConfig::default()
    };
    assert!(matches!(
        run_valuation("ACME", &config, &csv_config()),
        Err(DcfError::Configuration(_))
    ));
}

/// Serves fixed statements, whatever the ticker
struct StaticSource(RawStatements);

impl FundamentalsSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_statements(&self, _ticker: &str) -> Result<RawStatements, ProviderError> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_custom_source_and_trailing_window() {
    let mut cashflow = StatementBuilder::new();
    for (year, ocf) in [("2020", 10.0), ("2021", 20.0), ("2022", 30.0)] {
        cashflow.insert(year, "Operating Cash Flow", ocf);
        cashflow.insert(year, "Capital Expenditure", 0.0);
    }
    let mut balance_sheet = StatementBuilder::new();
    balance_sheet.insert("2022", "Cash", 5.0);
    balance_sheet.insert("2022", "Cash And Cash Equivalents", 7.0);
    balance_sheet.insert("2022", "Total Debt", 3.0);
    balance_sheet.insert("2022", "Shares Outstanding", 2.0);

    let source = StaticSource(RawStatements {
        cashflow: cashflow.finish().unwrap(),
        balance_sheet: balance_sheet.finish().unwrap(),
    });

    let snapshot = fetch_fundamentals(&source, "xyz", 2).unwrap();
    assert_eq!(snapshot.avg_fcf, 25.0);
    assert_eq!(snapshot.fcf_periods, 2);
    assert_eq!(snapshot.cash.matched.as_deref(), Some("Cash"));
    assert_eq!(snapshot.net_debt, -2.0);
    assert_eq!(snapshot.shares_outstanding, Some(2));
    assert_eq!(snapshot.source_name, "static");
}
