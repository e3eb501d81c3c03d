/// Projections: pure functions from a [`FilteredView`] (plus the widget's own
/// selector) to something displayable.
///
/// ```text
///   FilteredView ──┬── table          → DataTable
///                  ├── summary        → mean-by-gender text, descriptive stats
///                  ├── histogram      → bins + density overlay
///                  ├── scatter        → (variable, Exam_Score) points
///                  ├── countplot      → one bar per observed category
///                  └── correlation    → Pearson matrix over numeric columns
/// ```
///
/// None of them touch application state; empty views produce empty figures.
///
/// [`FilteredView`]: crate::data::filter::FilteredView

pub mod correlation;
pub mod countplot;
pub mod histogram;
pub mod scatter;
pub mod summary;
pub mod table;

pub use correlation::{corr_matrix, CorrelationMatrix};
pub use countplot::{countplot, CountFigure};
pub use histogram::{histogram, HistogramFigure, HistogramSettings};
pub use scatter::{scatter, ScatterFigure};
pub use summary::{mean_by_gender, Gender};
pub use table::{table, DataTable};
