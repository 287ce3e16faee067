// File: crates/stoxx-core/tests/volatility.rs
// Purpose: Centered rolling mean/std boundaries, values and properties.

use proptest::prelude::*;
use stoxx_core::VolatilityEstimator;

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + i as f64).collect()
}

#[test]
fn thirty_point_ramp_is_defined_on_indices_10_through_19() {
    let band = VolatilityEstimator::new(20).estimate(&ramp(30));
    assert_eq!(band.len(), 30);
    assert_eq!(band.defined_range(), Some((10, 19)));
    for i in 0..30 {
        assert_eq!(band.mean[i].is_some(), (10..20).contains(&i), "index {i}");
        assert_eq!(band.std[i].is_some(), (10..20).contains(&i), "index {i}");
    }
    // window of index 10 covers 0..=19 -> mean of 100..=119
    assert!((band.mean[10].unwrap() - 109.5).abs() < 1e-12);
    assert!((band.mean[19].unwrap() - 118.5).abs() < 1e-12);
    // sample std of 20 consecutive integers: sqrt(20*21/12) = sqrt(35)
    assert!((band.std[15].unwrap() - 35f64.sqrt()).abs() < 1e-9);
}

#[test]
fn shorter_than_window_is_all_undefined() {
    let band = VolatilityEstimator::new(20).estimate(&ramp(19));
    assert_eq!(band.len(), 19);
    assert!(band.is_undefined());
    assert_eq!(band.defined_range(), None);
}

#[test]
fn length_equal_to_window_defines_only_the_middle() {
    let band = VolatilityEstimator::new(20).estimate(&ramp(20));
    assert_eq!(band.defined_range(), Some((10, 10)));
    assert!((band.mean[10].unwrap() - 109.5).abs() < 1e-12);
}

#[test]
fn odd_window_trims_half_on_both_ends() {
    let band = VolatilityEstimator::new(5).estimate(&ramp(10));
    assert_eq!(band.defined_range(), Some((2, 7)));
    assert!((band.mean[2].unwrap() - 102.0).abs() < 1e-12);
}

#[test]
fn constant_window_has_zero_std_and_exact_mean() {
    let band = VolatilityEstimator::new(4).estimate(&[0.1; 8]);
    for i in 2..6 {
        assert_eq!(band.mean[i], Some(0.1));
        assert_eq!(band.std[i], Some(0.0));
    }
}

#[test]
fn nan_inside_window_makes_position_undefined() {
    let mut values = ramp(12);
    values[6] = f64::NAN;
    let band = VolatilityEstimator::new(4).estimate(&values);
    // window at i covers i-2..=i+1
    for i in 2..10 {
        let touches_nan = (i - 2..=i + 1).contains(&6);
        assert_eq!(band.mean[i].is_none(), touches_nan, "index {i}");
    }
}

#[test]
fn window_of_one_has_mean_but_no_std() {
    let band = VolatilityEstimator::new(1).estimate(&[1.0, 2.0, 3.0]);
    assert_eq!(band.mean, vec![Some(1.0), Some(2.0), Some(3.0)]);
    assert!(band.std.iter().all(Option::is_none));
}

#[test]
fn zero_window_is_all_undefined() {
    let band = VolatilityEstimator::new(0).estimate(&ramp(5));
    assert!(band.is_undefined());
}

#[test]
fn envelope_is_mean_plus_minus_n_std() {
    let band = VolatilityEstimator::new(20).estimate(&ramp(30));
    let env = band.envelope(2.0);
    assert!(env[9].is_none());
    let (lo, hi) = env[12].unwrap();
    let (m, s) = (band.mean[12].unwrap(), band.std[12].unwrap());
    assert!((lo - (m - 2.0 * s)).abs() < 1e-12);
    assert!((hi - (m + 2.0 * s)).abs() < 1e-12);
}

proptest! {
    #[test]
    fn boundaries_and_nonnegative_std(
        values in prop::collection::vec(-1.0e4f64..1.0e4, 0..80),
        window in 2usize..25,
    ) {
        let band = VolatilityEstimator::new(window).estimate(&values);
        let len = values.len();
        let half = window / 2;
        prop_assert_eq!(band.len(), len);
        for i in 0..len {
            let expected = len >= window && i >= half && i < len - half;
            prop_assert_eq!(band.mean[i].is_some(), expected);
            if let Some(s) = band.std[i] {
                prop_assert!(s >= 0.0);
            }
        }
    }

    #[test]
    fn std_zero_iff_window_constant(
        values in prop::collection::vec(prop::sample::select(vec![1.0f64, 2.0]), 6..30),
    ) {
        let band = VolatilityEstimator::new(4).estimate(&values);
        for i in 0..values.len() {
            if let Some(s) = band.std[i] {
                let w = &values[i - 2..i + 2];
                let constant = w.iter().all(|&v| v == w[0]);
                prop_assert_eq!(s == 0.0, constant);
            }
        }
    }
}
