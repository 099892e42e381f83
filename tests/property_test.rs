//! Property tests for the analysis invariants.

mod common;

use common::make_series;
use proptest::prelude::*;
use volstats::domain::distribution::bin_distribution;
use volstats::domain::percentile::percentile_rank;
use volstats::domain::summary::compute_summary;

proptest! {
    #[test]
    fn mean_lies_between_min_and_max(
        volatilities in prop::collection::vec(0.0f64..1000.0, 1..200)
    ) {
        let series = make_series(&volatilities);
        let summary = compute_summary(&series);

        prop_assert!(summary.min <= summary.max);
        prop_assert!(summary.min - 1e-9 <= summary.mean);
        prop_assert!(summary.mean <= summary.max + 1e-9);
    }

    #[test]
    fn percentile_of_minimum_is_zero(
        volatilities in prop::collection::vec(0.0f64..1000.0, 1..200)
    ) {
        let series = make_series(&volatilities);
        let min = volatilities.iter().cloned().fold(f64::INFINITY, f64::min);

        prop_assert_eq!(percentile_rank(&series, min).unwrap(), 0.0);
    }

    #[test]
    fn percentile_stays_within_bounds(
        volatilities in prop::collection::vec(0.0f64..1000.0, 1..200),
        value in -10.0f64..1010.0
    ) {
        let series = make_series(&volatilities);
        let rank = percentile_rank(&series, value).unwrap();

        prop_assert!((0.0..=100.0).contains(&rank));
    }

    #[test]
    fn bin_counts_conserve_series_length(
        volatilities in prop::collection::vec(0.0f64..1000.0, 1..200),
        bins in 1usize..=20
    ) {
        let series = make_series(&volatilities);
        let histogram = bin_distribution(&series, bins).unwrap();

        prop_assert_eq!(histogram.len(), bins);
        let total: usize = histogram.iter().map(|b| b.count).sum();
        prop_assert_eq!(total, series.len());
    }
}
