// File: crates/stoxx-core/tests/trend.rs
// Purpose: Polynomial least-squares fits against numeric dates.

mod common;

use proptest::prelude::*;
use stoxx_core::datenum::date_to_num;
use stoxx_core::{AnalysisError, TrendFitter};

use common::{day, linear_bars};

#[test]
fn linear_fit_reproduces_a_line_over_real_dates() {
    let bars = linear_bars(day(2020, 1, 1));
    let xs: Vec<f64> = bars.iter().map(|b| date_to_num(b.date)).collect();
    let ys: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let curve = TrendFitter::new(1).fit(&xs, &ys).unwrap();
    assert_eq!(curve.degree(), 1);
    for (x, y) in xs.iter().zip(&ys) {
        assert!((curve.eval(*x) - y).abs() < 1e-8, "at {x}");
    }
    assert!(curve.residual_sum_of_squares(&xs, &ys) < 1e-12);

    // close = 100 + (x - x0)  =>  c0 = 100 - x0, c1 = 1
    let c = curve.coefficients();
    assert!((c[1] - 1.0).abs() < 1e-9);
    assert!((c[0] - (100.0 - xs[0])).abs() < 1e-6);
}

#[test]
fn cubic_fit_recovers_a_cubic() {
    let xs: Vec<f64> = (0..40).map(|i| 18_000.0 + i as f64).collect();
    let f = |x: f64| {
        let t = x - 18_020.0;
        5.0 - 0.3 * t + 0.02 * t * t + 0.001 * t * t * t
    };
    let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
    let curve = TrendFitter::new(3).fit(&xs, &ys).unwrap();
    for &x in &xs {
        assert!((curve.eval(x) - f(x)).abs() < 1e-7);
    }
    let between = 18_010.5;
    assert!((curve.eval(between) - f(between)).abs() < 1e-7);
}

#[test]
fn non_finite_points_are_skipped() {
    let xs = [0.0, 1.0, 2.0, 3.0, f64::NAN];
    let ys = [1.0, f64::NAN, 5.0, 7.0, 100.0];
    let curve = TrendFitter::new(1).fit(&xs, &ys).unwrap();
    assert!((curve.eval(1.0) - 3.0).abs() < 1e-10);
}

#[test]
fn too_few_points_is_insufficient_length() {
    let err = TrendFitter::new(3).fit(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap_err();
    assert!(matches!(err, AnalysisError::InsufficientSeriesLength { needed: 4, got: 3 }));

    let err = TrendFitter::new(1).fit(&[], &[]).unwrap_err();
    assert!(matches!(err, AnalysisError::InsufficientSeriesLength { needed: 2, got: 0 }));
}

#[test]
fn repeated_x_is_degenerate() {
    let err = TrendFitter::new(1).fit(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]).unwrap_err();
    assert!(matches!(err, AnalysisError::NumericDegeneracy(_)));

    let err = TrendFitter::new(3).fit(&[1.0, 1.0, 2.0, 2.0, 3.0], &[1.0; 5]).unwrap_err();
    assert!(matches!(err, AnalysisError::NumericDegeneracy(_)));
}

#[test]
fn exactly_degree_plus_one_points_interpolates() {
    let xs = [0.0, 1.0, 2.0, 3.0];
    let ys = [1.0, -1.0, 4.0, 2.0];
    let curve = TrendFitter::new(3).fit(&xs, &ys).unwrap();
    for (x, y) in xs.iter().zip(&ys) {
        assert!((curve.eval(*x) - y).abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn cubic_never_fits_worse_than_linear(
        ys in prop::collection::vec(50.0f64..150.0, 8..60),
    ) {
        let xs: Vec<f64> = (0..ys.len()).map(|i| 18_000.0 + i as f64).collect();
        let lin = TrendFitter::new(1).fit(&xs, &ys).unwrap();
        let cub = TrendFitter::new(3).fit(&xs, &ys).unwrap();
        let (r1, r3) = (lin.residual_sum_of_squares(&xs, &ys), cub.residual_sum_of_squares(&xs, &ys));
        prop_assert!(r3 <= r1 + 1e-6 * (1.0 + r1));
    }

    #[test]
    fn linear_fit_passes_through_the_centroid(
        ys in prop::collection::vec(-100.0f64..100.0, 3..40),
    ) {
        let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64 * 2.0).collect();
        let curve = TrendFitter::new(1).fit(&xs, &ys).unwrap();
        let n = ys.len() as f64;
        let (mx, my) = (xs.iter().sum::<f64>() / n, ys.iter().sum::<f64>() / n);
        prop_assert!((curve.eval(mx) - my).abs() < 1e-8);
    }
}
