//! Statistics Calculator Module
//! Box-plot statistics, histogram binning, Gaussian smoothing and series summaries.

use statrs::statistics::Statistics;

/// Whisker reach as a multiple of the inter-quartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Maximum number of histogram bins.
pub const MAX_HISTOGRAM_BINS: usize = 10;

/// Gaussian kernel half-width in sigmas.
const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Largest smoothing sigma; wider kernels only approach the series mean.
pub const MAX_SMOOTHING_SIGMA: f64 = 1000.0;

/// Five-number summary plus outliers for a box-and-whisker chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
    pub mean: f64,
}

/// One histogram bin, `[start, end)` except the last which is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Descriptive statistics shown under the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn summarize(values: &[f64]) -> Option<SeriesSummary> {
        if values.is_empty() {
            return None;
        }

        let sorted = Self::sorted(values);
        let n = values.len();
        let std = if n > 1 { values.iter().std_dev() } else { 0.0 };

        Some(SeriesSummary {
            count: n,
            mean: values.iter().mean(),
            std,
            min: sorted[0],
            max: sorted[n - 1],
            median: Self::percentile(&sorted, 50.0),
        })
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Box statistics with whiskers at the most extreme points within 1.5 IQR of the box.
    pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }

        let sorted = Self::sorted(values);
        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .map_or(q1, |v| v.min(q1));
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .map_or(q3, |v| v.max(q3));

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Some(BoxStats {
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            whisker_low,
            whisker_high,
            outliers,
            mean: values.iter().mean(),
        })
    }

    /// Number of bins used for a series of `len` values.
    pub fn histogram_bin_count(len: usize) -> usize {
        len.min(MAX_HISTOGRAM_BINS)
    }

    /// Uniform-width bins over `[min, max]`; a flat series spans `[v - 0.5, v + 0.5]`.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        // scale before subtracting so extreme spans stay finite
        let n = bins as f64;
        let width = hi / n - lo / n;
        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v / n - lo / n) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + i as f64 * width,
                end: if i + 1 == bins {
                    hi
                } else {
                    lo + (i + 1) as f64 * width
                },
                count,
            })
            .collect()
    }

    /// 1-D Gaussian filter with `reflect` boundary handling.
    ///
    /// Sigma is capped at [`MAX_SMOOTHING_SIGMA`] to bound the kernel size.
    pub fn gaussian_smooth(values: &[f64], sigma: f64) -> Vec<f64> {
        if values.is_empty() || !(sigma > 0.0) {
            return values.to_vec();
        }

        let sigma = sigma.min(MAX_SMOOTHING_SIGMA);
        let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as usize;
        let mut weights: Vec<f64> = (0..=2 * radius)
            .map(|k| {
                let x = k as f64 - radius as f64;
                (-0.5 * (x / sigma).powi(2)).exp()
            })
            .collect();
        let total: f64 = weights.iter().sum();
        weights.iter_mut().for_each(|w| *w /= total);

        let n = values.len() as isize;
        (0..n)
            .map(|i| {
                weights
                    .iter()
                    .enumerate()
                    .map(|(k, w)| {
                        let j = Self::reflect_index(i + k as isize - radius as isize, n);
                        w * values[j]
                    })
                    .sum::<f64>()
            })
            .collect()
    }

    /// Map an out-of-range index back into `0..n` by mirroring: `d c b a | a b c d | d c b a`.
    fn reflect_index(i: isize, n: isize) -> usize {
        let period = 2 * n;
        let m = i.rem_euclid(period);
        (if m < n { m } else { period - 1 - m }) as usize
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }
}
