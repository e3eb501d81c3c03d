use serde::Deserialize;

use super::summary::{describe, quantile, Summary};
use crate::data::filter::FilteredView;

/// Upper bound for the automatic bin rule.
const MAX_AUTO_BINS: usize = 100;

/// 1 / sqrt(2π)
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinCount {
    /// Larger of the Sturges and Freedman–Diaconis counts.
    Auto,
    Fixed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistogramSettings {
    pub bins: BinCount,
    /// Grid resolution of the density overlay.
    pub density_points: usize,
}

impl Default for HistogramSettings {
    fn default() -> Self {
        Self {
            bins: BinCount::Auto,
            density_points: 200,
        }
    }
}

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Exam score distribution: bars, a density curve in count units, and the
/// descriptive statistics of the same values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramFigure {
    pub bins: Vec<HistogramBin>,
    pub density: Vec<[f64; 2]>,
    pub summary: Option<Summary>,
}

/// Histogram of Exam_Score over the view, with a Gaussian KDE overlay.
///
/// Empty views give an empty figure; a single distinct value gives one bin
/// and no curve.
pub fn histogram(view: &FilteredView<'_>, settings: &HistogramSettings) -> HistogramFigure {
    let values = view.numeric_values(view.dataset().exam_score_index());
    let Some(summary) = describe(&values) else {
        return HistogramFigure::default();
    };

    if summary.max - summary.min <= 0.0 {
        return HistogramFigure {
            bins: vec![HistogramBin {
                start: summary.min - 0.5,
                end: summary.max + 0.5,
                count: values.len(),
            }],
            density: Vec::new(),
            summary: Some(summary),
        };
    }

    let n_bins = match settings.bins {
        BinCount::Fixed(n) => n.max(1),
        BinCount::Auto => auto_bin_count(&values, &summary),
    };
    let bin_width = (summary.max - summary.min) / n_bins as f64;

    let mut counts = vec![0usize; n_bins];
    for &v in &values {
        // Last bin is closed on the right.
        let idx = (((v - summary.min) / bin_width).floor() as usize).min(n_bins - 1);
        counts[idx] += 1;
    }
    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: summary.min + i as f64 * bin_width,
            end: summary.min + (i + 1) as f64 * bin_width,
            count,
        })
        .collect();

    let scale = values.len() as f64 * bin_width;
    let density = kde(&values, &summary, settings.density_points)
        .into_iter()
        .map(|[x, y]| [x, y * scale])
        .collect();

    HistogramFigure {
        bins,
        density,
        summary: Some(summary),
    }
}

fn auto_bin_count(values: &[f64], summary: &Summary) -> usize {
    let n = values.len() as f64;
    let range = summary.max - summary.min;
    let sturges = (n.log2().ceil() as usize) + 1;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
    let fd_width = 2.0 * iqr * n.powf(-1.0 / 3.0);
    let fd = if fd_width > 0.0 {
        (range / fd_width).ceil() as usize
    } else {
        0
    };

    sturges.max(fd).clamp(1, MAX_AUTO_BINS)
}

/// Gaussian kernel density over `[min, max]` with Scott's bandwidth.
/// Returns no points when the bandwidth is undefined.
fn kde(values: &[f64], summary: &Summary, points: usize) -> Vec<[f64; 2]> {
    let n = values.len();
    if n < 2 || summary.std_dev <= 0.0 || points < 2 {
        return Vec::new();
    }
    let bandwidth = summary.std_dev * (n as f64).powf(-0.2);
    let step = (summary.max - summary.min) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = summary.min + i as f64 * step;
            let sum: f64 = values
                .iter()
                .map(|&v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum();
            [x, sum * INV_SQRT_2PI / (n as f64 * bandwidth)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::five_students;
    use crate::data::filter::{filter, FilterState, SchoolFilter};
    use crate::data::model::Dataset;

    fn full(ds: &Dataset) -> FilteredView<'_> {
        filter(ds, &FilterState::new(0.0, 100.0, SchoolFilter::All))
    }

    #[test]
    fn counts_cover_every_value() {
        let ds = five_students();
        let fig = histogram(&full(&ds), &HistogramSettings::default());
        let total: usize = fig.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 5);
        assert_eq!(fig.bins.first().unwrap().start, 60.0);
        assert!((fig.bins.last().unwrap().end - 95.0).abs() < 1e-9);
        assert!(fig.bins.last().unwrap().count >= 1);
    }

    #[test]
    fn fixed_bins_are_respected() {
        let ds = five_students();
        let settings = HistogramSettings {
            bins: BinCount::Fixed(7),
            ..Default::default()
        };
        let fig = histogram(&full(&ds), &settings);
        assert_eq!(fig.bins.len(), 7);
        assert!(fig.bins.iter().all(|b| (b.width() - 5.0).abs() < 1e-9));
    }

    #[test]
    fn density_overlay_has_positive_mass() {
        let ds = five_students();
        let settings = HistogramSettings::default();
        let fig = histogram(&full(&ds), &settings);
        assert_eq!(fig.density.len(), settings.density_points);
        assert!(fig.density.iter().all(|p| p[1] > 0.0));
        assert_eq!(fig.density[0][0], 60.0);
    }

    #[test]
    fn empty_view_is_an_empty_figure() {
        let ds = five_students();
        let view = filter(&ds, &FilterState::new(0.0, 10.0, SchoolFilter::All));
        let fig = histogram(&view, &HistogramSettings::default());
        assert!(fig.bins.is_empty());
        assert!(fig.density.is_empty());
        assert!(fig.summary.is_none());
    }

    #[test]
    fn single_value_gives_one_bin_and_no_curve() {
        let ds = five_students();
        let view = filter(&ds, &FilterState::new(95.0, 95.0, SchoolFilter::All));
        let fig = histogram(&view, &HistogramSettings::default());
        assert_eq!(fig.bins.len(), 1);
        assert_eq!(fig.bins[0].count, 1);
        assert!(fig.density.is_empty());
    }

    #[test]
    fn auto_rule_grows_with_sample_size() {
        let few: Vec<f64> = (0..8).map(f64::from).collect();
        let many: Vec<f64> = (0..1000).map(|i| f64::from(i % 100)).collect();
        let a = auto_bin_count(&few, &describe(&few).unwrap());
        let b = auto_bin_count(&many, &describe(&many).unwrap());
        assert!(a < b);
        assert!(b <= MAX_AUTO_BINS);
    }
}
