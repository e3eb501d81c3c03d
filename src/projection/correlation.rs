use crate::data::filter::FilteredView;

/// Fixed colour scale of the heat map.
pub const CORRELATION_RANGE: (f64, f64) = (-1.0, 1.0);

/// Square, symmetric matrix of Pearson coefficients.  Undefined cells are NaN.
#[derive(Debug, Clone, Default)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size() + col]
    }
}

/// Pairwise Pearson correlation over every numeric column of the view,
/// Exam_Score included.  Each pair uses the rows where both cells are present.
pub fn corr_matrix(view: &FilteredView<'_>) -> CorrelationMatrix {
    let dataset = view.dataset();
    let columns: Vec<String> = dataset.numeric_columns().to_vec();
    let indices: Vec<usize> = columns
        .iter()
        .filter_map(|c| dataset.column_index(c))
        .collect();

    // Column-major copy of the view, `None` for missing cells.
    let data: Vec<Vec<Option<f64>>> = indices
        .iter()
        .map(|&idx| view.records().map(|r| r.get(idx).as_f64()).collect())
        .collect();

    let n = columns.len();
    let mut values = vec![f64::NAN; n * n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&data[i], &data[j]);
            // The diagonal is exactly 1 wherever it is defined.
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    CorrelationMatrix { columns, values }
}

/// Pearson coefficient over the complete pairs of `x` and `y`.
///
/// NaN with fewer than two pairs or when either side is constant.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(CORRELATION_RANGE.0, CORRELATION_RANGE.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterState, FilteredView, SchoolFilter};
    use crate::data::model::Dataset;

    fn dataset() -> Dataset {
        let header = ["Hours_Studied", "School_Type", "Gender", "Sleep_Hours", "Tutoring_Sessions", "Exam_Score"];
        let rows = [
            ["10", "Public", "Male", "9", "1", "60"],
            ["20", "Public", "Female", "8", "1", "70"],
            ["30", "Private", "Male", "7", "1", "80"],
            ["40", "Private", "Female", "6", "1", "90"],
        ];
        Dataset::from_text_rows(
            header.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn covers_all_numeric_columns() {
        let ds = dataset();
        let m = corr_matrix(&FilteredView::all(&ds));
        assert_eq!(
            m.columns,
            vec!["Hours_Studied", "Sleep_Hours", "Tutoring_Sessions", "Exam_Score"]
        );
    }

    #[test]
    fn perfect_correlations_and_unit_diagonal() {
        let ds = dataset();
        let m = corr_matrix(&FilteredView::all(&ds));
        assert!((m.get(0, 3) - 1.0).abs() < 1e-12);
        assert!((m.get(1, 3) + 1.0).abs() < 1e-12);
        for i in [0, 1, 3] {
            assert_eq!(m.get(i, i), 1.0);
        }
    }

    #[test]
    fn matrix_is_symmetric() {
        let ds = dataset();
        let m = corr_matrix(&FilteredView::all(&ds));
        for i in 0..m.size() {
            for j in 0..m.size() {
                let (a, b) = (m.get(i, j), m.get(j, i));
                assert!(a == b || (a.is_nan() && b.is_nan()));
            }
        }
    }

    #[test]
    fn constant_column_is_nan() {
        let ds = dataset();
        let m = corr_matrix(&FilteredView::all(&ds));
        assert!(m.get(2, 2).is_nan());
        assert!(m.get(2, 0).is_nan());
    }

    #[test]
    fn fewer_than_two_rows_is_all_nan() {
        let ds = dataset();
        let one = filter(&ds, &FilterState::new(90.0, 100.0, SchoolFilter::All));
        let m = corr_matrix(&one);
        assert_eq!(m.size(), 4);
        assert!((0..4).all(|i| (0..4).all(|j| m.get(i, j).is_nan())));

        let none = filter(&ds, &FilterState::new(0.0, 1.0, SchoolFilter::All));
        assert!(corr_matrix(&none).get(0, 0).is_nan());
    }

    #[test]
    fn pearson_uses_complete_pairs_only() {
        let x = [Some(1.0), Some(2.0), None, Some(3.0)];
        let y = [Some(2.0), Some(4.0), Some(100.0), Some(6.0)];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }
}
