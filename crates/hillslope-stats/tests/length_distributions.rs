//! Summaries of hillslope length estimates read from disk.

use hillslope_stats::{
    classify_bins, histogram, max_probability_kde, read_length_estimates, summarize, BinClass,
    KdeConfig, StatsError,
};
use test_utils::{assert_approx_eq, temp_test_dir};

const HEADER: &str = "basin_id area LH_hfr r1 r2 r3 r4 r5 r6 LH_sa r7 LH_dd";

fn table_row(basin: usize, hfr: f64, sa: f64, dd: f64) -> String {
    format!(
        "{} 441000 {} 0 0 0 0 0 0 {} 0 {}",
        basin, hfr, sa, dd
    )
}

#[test]
fn test_summaries_from_table() {
    let dir = temp_test_dir();
    let path = dir.path().join("PaperData.txt");

    let mut text = format!("{}\n", HEADER);
    let hfr = [60.0, 70.0, 75.0, 80.0, 85.0, 90.0, 400.0, 1.0];
    for (basin, &value) in hfr.iter().enumerate() {
        text.push_str(&table_row(basin, value, value * 1.5, value * 0.9));
        text.push('\n');
    }
    std::fs::write(&path, text).unwrap();

    let estimates = read_length_estimates(&path).unwrap();
    assert_eq!(estimates.hilltop_flow_routing.len(), 7);
    assert_eq!(estimates.slope_area.len(), 7);
    assert_eq!(estimates.drainage_density.len(), 7);

    let summary = summarize(&estimates.hilltop_flow_routing).unwrap();
    assert_eq!(summary.median, 80.0);
    // deviations 20, 10, 5, 0, 5, 10, 320
    assert_eq!(summary.mad, 10.0);

    let hist = histogram(&estimates.hilltop_flow_routing, 20).unwrap();
    assert_eq!(hist.total(), 7);
    let classes = classify_bins(&hist, summary.median, summary.mad);
    assert_eq!(classes.len(), 20);
    assert_eq!(classes[0], BinClass::Within);
    assert_eq!(classes[19], BinClass::Above);
    assert!(!classes.contains(&BinClass::Below));

    let modes = max_probability_kde(&estimates.hilltop_flow_routing, &KdeConfig::default()).unwrap();
    assert_eq!(modes.len(), 1);
    assert!(modes[0] > 60.0 && modes[0] < 100.0, "mode {}", modes[0]);
}

#[test]
fn test_non_numeric_estimate() {
    let dir = temp_test_dir();
    let path = dir.path().join("PaperData.txt");
    std::fs::write(
        &path,
        format!("{}\n1 441000 NaN? 0 0 0 0 0 0 50 0 60\n", HEADER),
    )
    .unwrap();

    assert!(matches!(
        read_length_estimates(&path),
        Err(StatsError::Format { line: 2, column: 2, .. })
    ));
}

#[test]
fn test_mad_of_symmetric_series() {
    let data: Vec<f64> = (1..=9).map(|i| i as f64 * 10.0).collect();
    let summary = summarize(&data).unwrap();
    assert_approx_eq!(summary.median, 50.0, 1e-12);
    assert_approx_eq!(summary.mad, 20.0, 1e-12);
}
