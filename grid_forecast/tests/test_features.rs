use grid_forecast::features::{build_lag_rows, lag_rows_from_series, LagFeatures};
use grid_forecast::DemandSeries;
use rstest::rstest;

#[rstest]
#[case(0, 0)]
#[case(3, 0)]
#[case(4, 1)]
#[case(10, 7)]
#[case(365, 362)]
fn test_row_count(#[case] n: usize, #[case] expected: usize) {
    let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
    assert_eq!(build_lag_rows(&values).len(), expected);
}

#[test]
fn test_rows_use_correct_predecessors() {
    let values: Vec<f64> = (0..12).map(|i| 100.0 + (i * i) as f64).collect();
    let rows = build_lag_rows(&values);

    for (offset, row) in rows.iter().enumerate() {
        let i = offset + 3;
        assert_eq!(row.label, values[i]);
        assert_eq!(row.lag_1(), values[i - 1]);
        assert_eq!(row.lag_2(), values[i - 2]);
        assert_eq!(row.lag_3(), values[i - 3]);
    }
}

#[test]
fn test_inference_window_matches_training_convention() {
    let values = [10.0, 20.0, 30.0, 40.0];
    let row = build_lag_rows(&values)[0];
    let features = LagFeatures::from_history(&values[..3]).unwrap();

    assert_eq!(row.features, features);
}

#[test]
fn test_rows_from_series() {
    let start = "2023-01-01".parse().unwrap();
    let series = DemandSeries::from_values("MH", start, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let rows = lag_rows_from_series(&series);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].label, 5.0);
    assert_eq!(rows[1].lag_1(), 4.0);
}
