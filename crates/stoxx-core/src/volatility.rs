// File: crates/stoxx-core/src/volatility.rs
// Summary: Centered rolling mean and sample standard deviation of a price series.
//
// For window W the statistic at position i covers i - floor(W/2) ..= i + ceil(W/2) - 1.
// It is defined only when floor(W/2) <= i < len - floor(W/2) and every value in the
// window is finite; everything else is `None`.

pub const DEFAULT_WINDOW: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VolatilityEstimator {
    window: usize,
}

/// Per-position mean and standard deviation, aligned with the input series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VolatilityBand {
    pub mean: Vec<Option<f64>>,
    pub std: Vec<Option<f64>>,
}

impl Default for VolatilityEstimator {
    fn default() -> Self { Self::new(DEFAULT_WINDOW) }
}

impl VolatilityEstimator {
    pub fn new(window: usize) -> Self { Self { window } }

    pub fn window(&self) -> usize { self.window }

    pub fn estimate(&self, values: &[f64]) -> VolatilityBand {
        let len = values.len();
        let mut mean = vec![None; len];
        let mut std = vec![None; len];
        let w = self.window;
        if w == 0 || len < w {
            return VolatilityBand { mean, std };
        }
        let half = w / 2;
        let first = half;
        let last_excl = len - half;
        for i in first..last_excl {
            let start = i - half;
            let slice = &values[start..start + w];
            if slice.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let (m, s) = mean_std(slice);
            mean[i] = Some(m);
            std[i] = s;
        }
        VolatilityBand { mean, std }
    }
}

// Sample std (N - 1). A constant window yields exactly its value and 0.0.
fn mean_std(slice: &[f64]) -> (f64, Option<f64>) {
    let first = slice[0];
    if slice.iter().all(|&v| v == first) {
        let std = (slice.len() > 1).then_some(0.0);
        return (first, std);
    }
    let n = slice.len() as f64;
    let mean = slice.iter().sum::<f64>() / n;
    if slice.len() < 2 {
        return (mean, None);
    }
    let ss: f64 = slice.iter().map(|v| (v - mean) * (v - mean)).sum();
    (mean, Some((ss / (n - 1.0)).sqrt()))
}

impl VolatilityBand {
    pub fn len(&self) -> usize { self.mean.len() }

    pub fn is_empty(&self) -> bool { self.mean.is_empty() }

    /// True when no position has a mean.
    pub fn is_undefined(&self) -> bool { self.mean.iter().all(Option::is_none) }

    /// First and last index (inclusive) carrying a mean.
    pub fn defined_range(&self) -> Option<(usize, usize)> {
        let first = self.mean.iter().position(Option::is_some)?;
        let last = self.mean.iter().rposition(Option::is_some)?;
        Some((first, last))
    }

    /// `(mean - n_std*std, mean + n_std*std)` wherever both are defined.
    pub fn envelope(&self, n_std: f64) -> Vec<Option<(f64, f64)>> {
        self.mean
            .iter()
            .zip(&self.std)
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => Some((m - n_std * s, m + n_std * s)),
                _ => None,
            })
            .collect()
    }
}
