// File: crates/stoxx-core/src/trend.rs
// Summary: Least-squares polynomial trend of price against numeric date.
//
// x is mapped to t = (x - center) / scale in [-1, 1] before building the
// Vandermonde matrix; raw day numbers (~2e4) cubed would swamp f64 precision.
// The system is solved with Householder QR, never the normal equations.

use crate::error::AnalysisError;

/// Degrees drawn on the analytical view.
pub const TREND_DEGREES: [usize; 2] = [1, 3];

const RANK_TOL: f64 = 1e-12;

/// Fitted polynomial, coefficients ascending in normalized `t`.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendCurve {
    coeffs: Vec<f64>,
    center: f64,
    scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrendFitter {
    degree: usize,
}

impl TrendFitter {
    pub fn new(degree: usize) -> Self { Self { degree } }

    pub fn degree(&self) -> usize { self.degree }

    /// Fit over the pairs where both `x` and `y` are finite.
    pub fn fit(&self, xs: &[f64], ys: &[f64]) -> Result<TrendCurve, AnalysisError> {
        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| (x, y))
            .collect();
        let ncoef = self.degree + 1;
        if points.len() < ncoef {
            return Err(AnalysisError::InsufficientSeriesLength { needed: ncoef, got: points.len() });
        }

        let mut distinct: Vec<f64> = points.iter().map(|p| p.0).collect();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        if distinct.len() < ncoef {
            return Err(AnalysisError::NumericDegeneracy(format!(
                "degree {} fit needs {} distinct x values, got {}",
                self.degree,
                ncoef,
                distinct.len()
            )));
        }

        let (lo, hi) = (distinct[0], distinct[distinct.len() - 1]);
        let center = 0.5 * (lo + hi);
        let scale = if hi > lo { 0.5 * (hi - lo) } else { 1.0 };

        // Column-major Vandermonde matrix in t.
        let m = points.len();
        let mut a = vec![vec![0.0; m]; ncoef];
        let mut b: Vec<f64> = points.iter().map(|p| p.1).collect();
        for (row, &(x, _)) in points.iter().enumerate() {
            let t = (x - center) / scale;
            let mut p = 1.0;
            for col in a.iter_mut() {
                col[row] = p;
                p *= t;
            }
        }

        let coeffs = solve_least_squares(&mut a, &mut b)?;
        Ok(TrendCurve { coeffs, center, scale })
    }
}

// Householder QR in place; `a` is column-major (a[col][row]).
fn solve_least_squares(a: &mut [Vec<f64>], b: &mut [f64]) -> Result<Vec<f64>, AnalysisError> {
    let n = a.len();
    let m = b.len();
    let max_norm = a.iter().map(|c| norm(c)).fold(0.0_f64, f64::max);
    let mut diag = vec![0.0; n];

    for k in 0..n {
        let alpha_norm = norm(&a[k][k..]);
        if alpha_norm <= RANK_TOL * max_norm.max(1.0) {
            return Err(AnalysisError::NumericDegeneracy(format!(
                "design matrix is rank deficient at column {k}"
            )));
        }
        let alpha = if a[k][k] > 0.0 { -alpha_norm } else { alpha_norm };
        // v = x - alpha*e1, stored in a[k][k..]
        a[k][k] -= alpha;
        let vnorm2: f64 = a[k][k..].iter().map(|v| v * v).sum();
        diag[k] = alpha;
        if vnorm2 == 0.0 {
            continue;
        }
        let (head, tail) = a.split_at_mut(k + 1);
        let v = &head[k][k..];
        for col in tail.iter_mut() {
            let dot: f64 = v.iter().zip(&col[k..]).map(|(vi, ci)| vi * ci).sum();
            let f = 2.0 * dot / vnorm2;
            for (ci, vi) in col[k..].iter_mut().zip(v) {
                *ci -= f * vi;
            }
        }
        let dot: f64 = v.iter().zip(&b[k..m]).map(|(vi, bi)| vi * bi).sum();
        let f = 2.0 * dot / vnorm2;
        for (bi, vi) in b[k..m].iter_mut().zip(v) {
            *bi -= f * vi;
        }
    }

    // R has `diag` on its diagonal and a[j][i] (i < j) above it.
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut s = b[i];
        for j in i + 1..n {
            s -= a[j][i] * x[j];
        }
        x[i] = s / diag[i];
    }
    Ok(x)
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

impl TrendCurve {
    pub fn degree(&self) -> usize { self.coeffs.len().saturating_sub(1) }

    pub fn eval(&self, x: f64) -> f64 {
        let t = (x - self.center) / self.scale;
        self.coeffs.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }

    /// Coefficients in raw x, ascending (`c0 + c1*x + ...`).
    pub fn coefficients(&self) -> Vec<f64> {
        // Expand sum_k a_k * ((x - center)/scale)^k.
        let n = self.coeffs.len();
        let mut out = vec![0.0; n];
        // (x - center)^k coefficients, built incrementally.
        let mut power = vec![1.0];
        for (k, &ak) in self.coeffs.iter().enumerate() {
            let f = ak / self.scale.powi(k as i32);
            for (j, p) in power.iter().enumerate() {
                out[j] += f * p;
            }
            let mut next = vec![0.0; power.len() + 1];
            for (j, p) in power.iter().enumerate() {
                next[j + 1] += p;
                next[j] -= self.center * p;
            }
            power = next;
        }
        out
    }

    /// Sum of squared residuals over finite pairs.
    pub fn residual_sum_of_squares(&self, xs: &[f64], ys: &[f64]) -> f64 {
        xs.iter()
            .zip(ys)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| {
                let r = y - self.eval(x);
                r * r
            })
            .sum()
    }
}
