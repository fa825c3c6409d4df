mod common;

use common::{row, sample_rows};
use leaderboard_terminal::charts::{
    ChartPanel, RATING_BINS, WdlSeries, bin_values, build_rating_histogram, build_wdl_series,
    build_win_rate_series,
};

#[test]
fn histogram_counts_sum_to_finite_values() {
    let mut rows = sample_rows();
    rows[1].rating_mu = f64::NAN;
    rows[3].rating_mu = f64::INFINITY;
    let view: Vec<_> = rows.iter().collect();

    let hist = build_rating_histogram(&view).expect("three finite values");
    assert_eq!(hist.counts.len(), RATING_BINS);
    assert_eq!(hist.labels.len(), RATING_BINS);
    assert_eq!(hist.total(), 3);
}

#[test]
fn all_equal_values_fill_one_bin() {
    let hist = bin_values([1500.0; 7], RATING_BINS).expect("finite values");
    assert_eq!(hist.width, 1.0);
    assert_eq!(hist.counts[0], 7);
    assert_eq!(hist.counts.iter().filter(|c| **c > 0).count(), 1);
    assert_eq!(hist.labels[0], "1500.0–1501.0");
}

#[test]
fn no_finite_values_means_no_chart() {
    assert!(bin_values([f64::NAN, f64::NEG_INFINITY], RATING_BINS).is_none());
    assert!(bin_values(Vec::<f64>::new(), RATING_BINS).is_none());
}

#[test]
fn histogram_edges_span_min_to_max() {
    let hist = bin_values([20.0, 25.0, 30.0], RATING_BINS).unwrap();
    assert_eq!(hist.labels.first().map(String::as_str), Some("20.0–21.0"));
    assert_eq!(hist.labels.last().map(String::as_str), Some("29.0–30.0"));
    assert_eq!(hist.counts[0], 1);
    assert_eq!(hist.counts[5], 1);
    assert_eq!(hist.counts[9], 1);
}

#[test]
fn win_rate_series_is_in_percent() {
    let rows = vec![row(1, "A", 1.0, 0.85), row(2, "B", 2.0, 0.5)];
    let view: Vec<_> = rows.iter().collect();
    let series = build_win_rate_series(&view);
    assert_eq!(series.labels, vec!["A", "B"]);
    assert!((series.percents[0] - 85.0).abs() < 1e-9);
    assert_eq!(series.tooltip(0).as_deref(), Some("85.0%"));
    assert_eq!(series.tooltip(2), None);
}

#[test]
fn wdl_series_follows_view_order() {
    let mut rows = sample_rows();
    rows[0].wins = 9;
    rows[0].draws = 1;
    rows[0].losses = 2;
    let view = vec![&rows[1], &rows[0]];
    let series = build_wdl_series(&view);
    assert_eq!(series.labels, vec!["Bob", "alice"]);
    assert_eq!(series.wins, vec![0, 9]);
    assert_eq!(series.draws, vec![0, 1]);
    assert_eq!(series.losses, vec![0, 2]);
}

#[test]
fn chart_panel_replaces_previous_set() {
    let rows = sample_rows();
    let mut panel = ChartPanel::new();
    assert!(panel.current().is_none());

    let all: Vec<_> = rows.iter().collect();
    panel.rebuild(&all);
    assert_eq!(panel.generation(), 1);
    assert_eq!(panel.current().unwrap().win_rate.labels.len(), 5);

    let first_two: Vec<_> = rows.iter().take(2).collect();
    panel.rebuild(&first_two);
    assert_eq!(panel.generation(), 2);
    assert_eq!(panel.current().unwrap().wdl.labels, vec!["alice", "Bob"]);
}

#[test]
fn wdl_widths_fit_the_bar_space() {
    let series = WdlSeries {
        labels: vec!["huge".to_string(), "even".to_string(), "none".to_string()],
        wins: vec![u32::MAX, 1, 0],
        draws: vec![1, 1, 0],
        losses: vec![u32::MAX, 1, 0],
    };

    let widths = series.bar_widths(40);
    assert_eq!(widths[0], [20, 0, 20]);
    assert_eq!(widths[2], [0, 0, 0]);
    for row in &widths {
        assert!(row.iter().sum::<usize>() <= 40, "{row:?}");
    }

    let small = WdlSeries {
        labels: vec!["a".to_string()],
        wins: vec![1],
        draws: vec![1],
        losses: vec![1],
    };
    assert_eq!(small.bar_widths(8), vec![[3, 2, 3]]);
}
