//! Numeric helpers: integration, inverse-CDF sampling, and histogram summaries.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Histogram1D;

/// Composite Simpson integration of `f` over `[a, b]` with `steps` (rounded up to even) panels.
pub fn integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, steps: usize) -> f64 {
    if b <= a {
        return 0.0;
    }
    let n = (steps.max(2) + 1) & !1;
    let h = (b - a) / n as f64;
    let mut acc = f(a) + f(b);
    for i in 1..n {
        let x = a + h * i as f64;
        acc += if i % 2 == 1 { 4.0 * f(x) } else { 2.0 * f(x) };
    }
    acc * h / 3.0
}

/// Normalised cumulative distribution of per-bin weights.
/// Negative weights count as zero; returns `None` when nothing is left to sample.
pub fn cumulative(weights: &[f64]) -> Option<Vec<f64>> {
    let mut cdf = Vec::with_capacity(weights.len());
    let mut total = 0.0;
    for w in weights {
        if w.is_finite() && *w > 0.0 {
            total += w;
        }
        cdf.push(total);
    }
    if !(total.is_finite() && total > 0.0) {
        return None;
    }
    for c in cdf.iter_mut() {
        *c /= total;
    }
    Some(cdf)
}

/// Draw a bin index from a normalised cumulative distribution.
pub fn sample_index<R: Rng + ?Sized>(cdf: &[f64], rng: &mut R) -> usize {
    let r: f64 = rng.random();
    cdf.partition_point(|c| *c <= r).min(cdf.len().saturating_sub(1))
}

/// Summary statistics for a 1-D histogram, as shown in a stats box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub name: String,
    pub entries: u64,
    pub integral: f64,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub maximum: f64,
}

/// Compute the stats-box summary of a histogram.
pub fn summarize(h: &Histogram1D) -> Summary {
    Summary {
        name: h.name().to_string(),
        entries: h.entries(),
        integral: h.integral(),
        mean: h.mean(),
        std_dev: h.std_dev(),
        maximum: h.max_content(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn simpson_is_exact_for_cubics() {
        let v = integrate(|x| x * x * x - x, 0.0, 2.0, 4);
        assert!((v - 2.0).abs() < 1e-12);
        assert_eq!(integrate(|x| x, 1.0, 1.0, 10), 0.0);
    }

    #[test]
    fn cumulative_skips_negative_and_empty() {
        let cdf = cumulative(&[1.0, -3.0, 3.0]).unwrap();
        assert_eq!(cdf, vec![0.25, 0.25, 1.0]);
        assert!(cumulative(&[0.0, -1.0]).is_none());
        assert!(cumulative(&[]).is_none());
    }

    #[test]
    fn sampling_never_picks_zero_weight_bins() {
        let cdf = cumulative(&[0.0, 2.0, 0.0, 1.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let i = sample_index(&cdf, &mut rng);
            assert!(i == 1 || i == 3, "picked empty bin {i}");
        }
    }
}
