// File: crates/chart-core/src/grid.rs
// Summary: Tick placement for axes and grid lines.

/// "Nice" tick values (1/2/5 x 10^k steps) covering [min, max], roughly `target` of them.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min || target == 0 {
        return Vec::new();
    }
    let raw = (max - min) / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = match raw / mag {
        r if r <= 1.0 => mag,
        r if r <= 2.0 => 2.0 * mag,
        r if r <= 5.0 => 5.0 * mag,
        _ => 10.0 * mag,
    };
    let first = (min / step).ceil() * step;
    let mut out = Vec::new();
    let mut v = first;
    while v <= max + step * 1e-9 {
        out.push(v);
        v += step;
    }
    out
}
