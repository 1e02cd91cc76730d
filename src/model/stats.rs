//! Per-document font statistics.

use serde::{Deserialize, Serialize};

/// Font size statistics used as heading thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontStats {
    /// Mean font size
    pub avg: f32,
    /// 75th percentile (nearest rank)
    pub q75: f32,
    /// 90th percentile (nearest rank)
    pub q90: f32,
}

impl FontStats {
    /// Statistics used when a document has no extractable text.
    pub const DEFAULT: FontStats = FontStats {
        avg: 12.0,
        q75: 14.0,
        q90: 16.0,
    };

    /// Compute statistics from font size samples.
    ///
    /// Percentiles use nearest rank: the element at `floor(n * p)` of the
    /// ascending sample. Returns `fallback` for an empty sample.
    pub fn from_samples(mut sizes: Vec<f32>, q75: f64, q90: f64, fallback: FontStats) -> Self {
        if sizes.is_empty() {
            return fallback;
        }

        sizes.sort_by(f32::total_cmp);
        let n = sizes.len();
        let sum: f64 = sizes.iter().map(|&s| s as f64).sum();

        Self {
            avg: (sum / n as f64) as f32,
            q75: sizes[nearest_rank(n, q75)],
            q90: sizes[nearest_rank(n, q90)],
        }
    }
}

impl Default for FontStats {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn nearest_rank(n: usize, p: f64) -> usize {
    ((n as f64 * p).floor() as usize).min(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample_uses_fallback() {
        let stats = FontStats::from_samples(vec![], 0.75, 0.9, FontStats::DEFAULT);
        assert_eq!(stats, FontStats::DEFAULT);
    }

    #[test]
    fn test_nearest_rank_percentiles() {
        // 10 samples: q75 -> index 7, q90 -> index 9
        let sizes = vec![10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 24.0];
        let stats = FontStats::from_samples(sizes, 0.75, 0.9, FontStats::DEFAULT);
        assert_eq!(stats.q75, 14.0);
        assert_eq!(stats.q90, 24.0);
        assert!((stats.avg - 12.6).abs() < 1e-4);
    }

    #[test]
    fn test_single_sample() {
        let stats = FontStats::from_samples(vec![11.0], 0.75, 0.9, FontStats::DEFAULT);
        assert_eq!(stats.avg, 11.0);
        assert_eq!(stats.q75, 11.0);
        assert_eq!(stats.q90, 11.0);
    }

    #[test]
    fn test_unsorted_input() {
        let stats = FontStats::from_samples(vec![18.0, 9.0, 12.0, 12.0], 0.75, 0.9, FontStats::DEFAULT);
        assert_eq!(stats.q75, 18.0);
        assert_eq!(stats.q90, 18.0);
        assert!(stats.avg <= stats.q75 && stats.q75 <= stats.q90);
    }
}
