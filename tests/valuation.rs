use dcfview::engines::valuation::{intrinsic_value_per_share, SensitivityMatrix, SweepBase};
use dcfview::types::{round2, ValuationInputs};
use dcfview::DcfError;

fn inputs(growth_rate: f64, discount_rate: f64) -> ValuationInputs {
    ValuationInputs::new(100.0, Some(10), 0.0, growth_rate, discount_rate)
}

#[test]
fn test_zero_growth_matches_closed_form() {
    let value = intrinsic_value_per_share(&inputs(0.0, 0.10)).unwrap();

    // Five flat flows of 100 discounted at 10%, plus 100 * 1.02 / 0.08 discounted five years
    let annuity = 100.0 * (1.0 - 1.1_f64.powi(-5)) / 0.10;
    let terminal = 1275.0 / 1.1_f64.powi(5);
    let expected = (annuity + terminal) / 10.0;

    assert!((value - expected).abs() < 1e-9);
    assert!((value - 117.0753).abs() < 1e-3, "got {}", value);
}

#[test]
fn test_zero_shares_returns_exactly_zero() {
    let mut i = inputs(0.08, 0.10);
    i.shares_outstanding = Some(0);
    assert_eq!(intrinsic_value_per_share(&i).unwrap(), 0.0);
}

#[test]
fn test_growth_strictly_increases_value() {
    let growth = [-0.02, 0.0, 0.03, 0.06, 0.10, 0.15];
    let values: Vec<f64> = growth
        .iter()
        .map(|&g| intrinsic_value_per_share(&inputs(g, 0.10)).unwrap())
        .collect();

    for pair in values.windows(2) {
        assert!(pair[1] > pair[0], "{:?}", values);
    }
}

#[test]
fn test_discount_strictly_decreases_value() {
    let discount = [0.03, 0.05, 0.08, 0.10, 0.14, 0.20];
    let values: Vec<f64> = discount
        .iter()
        .map(|&r| intrinsic_value_per_share(&inputs(0.05, r)).unwrap())
        .collect();

    for pair in values.windows(2) {
        assert!(pair[1] < pair[0], "{:?}", values);
    }
}

#[test]
fn test_sweep_cell_matches_single_valuation() {
    let base = SweepBase::new(100.0, Some(10), 25.0);
    let matrix = SensitivityMatrix::build(&base, &[0.06, 0.08], &[0.08, 0.09]).unwrap();

    assert_eq!(matrix.num_rows(), 2);
    assert_eq!(matrix.num_columns(), 2);

    for (i, &g) in [0.06, 0.08].iter().enumerate() {
        for (j, &r) in [0.08, 0.09].iter().enumerate() {
            let single = intrinsic_value_per_share(&base.inputs(g, r)).unwrap();
            assert_eq!(matrix.get(i, j), Some(round2(single)));
        }
    }

    let single = intrinsic_value_per_share(&base.inputs(0.06, 0.08)).unwrap();
    assert_eq!(matrix.get_by_label("6%", "8%"), Some(round2(single)));
}

#[test]
fn test_discount_equal_to_terminal_growth_is_surfaced() {
    let i = inputs(0.05, 0.02);
    match intrinsic_value_per_share(&i) {
        Err(DcfError::DegenerateRates { discount_rate, terminal_growth }) => {
            assert_eq!(discount_rate, 0.02);
            assert_eq!(terminal_growth, 0.02);
        }
        other => panic!("expected DegenerateRates, got {:?}", other),
    }

    let matrix = SensitivityMatrix::build(&SweepBase::new(100.0, Some(10), 0.0), &[0.05], &[0.02]).unwrap();
    assert_eq!(matrix.get(0, 0), None);
}

#[test]
fn test_sweep_is_deterministic() {
    let base = SweepBase::new(5_000.0, Some(321), -40.0);
    let a = SensitivityMatrix::build(&base, &[0.06, 0.08, 0.10, 0.12], &[0.08, 0.09, 0.10, 0.11]).unwrap();
    let b = SensitivityMatrix::build(&base, &[0.06, 0.08, 0.10, 0.12], &[0.08, 0.09, 0.10, 0.11]).unwrap();
    assert_eq!(a, b);
}
