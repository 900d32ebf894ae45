//! Property tests for the discounted hazard integrals over curve segmentations.

use credit_core::hazard::{ConstantHazardFunction, HazardFunction};
use credit_core::market_data::{
    DiscountCurve, DiscountRateSeries, FlatRateCurve, PiecewiseFlatCurve, RateSegment,
};
use proptest::prelude::*;

fn relative_gap(a: f64, b: f64) -> f64 {
    (a - b).abs() / a.abs().max(b.abs()).max(1e-300)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Splitting a flat segment at any inner point leaves both integrals unchanged.
    #[test]
    fn split_segment_matches_whole(
        lambda in 1e-4_f64..2.0,
        rate in -0.02_f64..0.15,
        start in 0.0_f64..5.0,
        length in 1e-3_f64..10.0,
        cut in 0.01_f64..0.99,
    ) {
        let end = start + length;
        let mid = start + cut * length;
        let hazard = ConstantHazardFunction::new(lambda).unwrap();

        let whole = DiscountRateSeries::single(rate, start, end).unwrap();
        let split = DiscountRateSeries::new(vec![
            RateSegment::new(rate, start, mid),
            RateSegment::new(rate, mid, end),
        ])
        .unwrap();

        prop_assert!(
            relative_gap(hazard.discounted_cdf(&whole), hazard.discounted_cdf(&split)) < 1e-11
        );
        prop_assert!(
            relative_gap(
                hazard.discounted_accrual_cdf(&whole),
                hazard.discounted_accrual_cdf(&split),
            ) < 1e-10
        );
    }

    /// A piecewise curve with equal rates prices like the flat curve.
    #[test]
    fn piecewise_with_equal_rates_matches_flat(
        lambda in 0.0_f64..1.0,
        rate in 0.0_f64..0.1,
        start in 0.0_f64..2.0,
        length in 0.1_f64..8.0,
    ) {
        let end = start + length;
        let flat = FlatRateCurve::new(rate).unwrap();
        let piecewise =
            PiecewiseFlatCurve::new(&[0.5, 1.0, 2.0, 3.0, 5.0], &[rate; 5]).unwrap();
        let hazard = ConstantHazardFunction::new(lambda).unwrap();

        let flat_series = flat.discount_rate_series(start, end).unwrap();
        let piecewise_series = piecewise.discount_rate_series(start, end).unwrap();
        prop_assert_eq!(piecewise_series.start(), start);
        prop_assert_eq!(piecewise_series.end(), end);

        let a = hazard.discounted_cdf(&flat_series);
        let b = hazard.discounted_cdf(&piecewise_series);
        prop_assert!((a - b).abs() <= 1e-12 * a.abs().max(1.0));
    }

    /// Discounting only shrinks the default integral for non-negative rates.
    #[test]
    fn discounted_cdf_bounded_by_default_probability(
        lambda in 0.0_f64..1.0,
        rate in 0.0_f64..0.2,
        length in 0.0_f64..30.0,
    ) {
        let hazard = ConstantHazardFunction::new(lambda).unwrap();
        let series = DiscountRateSeries::single(rate, 0.0, length).unwrap();

        let value = hazard.discounted_cdf(&series);
        prop_assert!(value >= 0.0);
        prop_assert!(value <= hazard.default_probability(0.0, length) + 1e-15);
    }
}
