use std::fmt;

use super::model::{Dataset, Record};

/// Label of the "no school filter" choice.
pub const ALL_SCHOOLS: &str = "Tous";

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

// ---------------------------------------------------------------------------
// Filter predicate: school type + exam score range
// ---------------------------------------------------------------------------

/// School-type part of the global filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SchoolFilter {
    #[default]
    All,
    Only(String),
}

impl SchoolFilter {
    /// Parse a selector label; `"Tous"` means every school.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_SCHOOLS {
            SchoolFilter::All
        } else {
            SchoolFilter::Only(label.to_string())
        }
    }
}

impl fmt::Display for SchoolFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchoolFilter::All => write!(f, "{ALL_SCHOOLS}"),
            SchoolFilter::Only(s) => write!(f, "{s}"),
        }
    }
}

/// The two global filters.  Bounds always satisfy
/// `SCORE_MIN <= score_min <= score_max <= SCORE_MAX`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    score_min: f64,
    score_max: f64,
    pub school_type: SchoolFilter,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(50.0, 100.0, SchoolFilter::All)
    }
}

impl FilterState {
    /// Bounds are clamped into `[0, 100]` and put in order.
    pub fn new(score_min: f64, score_max: f64, school_type: SchoolFilter) -> Self {
        let mut state = Self {
            score_min: SCORE_MIN,
            score_max: SCORE_MAX,
            school_type,
        };
        state.set_score_range(score_min, score_max);
        state
    }

    pub fn score_min(&self) -> f64 {
        self.score_min
    }

    pub fn score_max(&self) -> f64 {
        self.score_max
    }

    pub fn set_score_range(&mut self, a: f64, b: f64) {
        let clamp = |v: f64| if v.is_nan() { SCORE_MIN } else { v.clamp(SCORE_MIN, SCORE_MAX) };
        let (a, b) = (clamp(a), clamp(b));
        self.score_min = a.min(b);
        self.score_max = a.max(b);
    }

    /// Whether one row passes both predicates.
    pub fn accepts(&self, dataset: &Dataset, record: &Record) -> bool {
        let school_ok = match &self.school_type {
            SchoolFilter::All => true,
            SchoolFilter::Only(school) => record.get(dataset.school_type_index()).matches_label(school),
        };
        school_ok
            && record
                .get(dataset.exam_score_index())
                .as_f64()
                .is_some_and(|score| score >= self.score_min && score <= self.score_max)
    }
}

/// Choices for the school selector: `"Tous"` then every school type seen.
pub fn school_type_choices(dataset: &Dataset) -> Vec<String> {
    std::iter::once(ALL_SCHOOLS.to_string())
        .chain(
            dataset
                .distinct_values(dataset.school_type_index())
                .iter()
                .map(|v| v.to_string()),
        )
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – borrowed subset of the dataset
// ---------------------------------------------------------------------------

/// Rows of a dataset passing a [`FilterState`], by index, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl PartialEq for FilteredView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.indices == other.indices
    }
}

impl<'a> FilteredView<'a> {
    /// View over every row.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records()[i])
    }

    /// Non-null numeric values of one column over the view.
    pub fn numeric_values(&self, column: usize) -> Vec<f64> {
        self.records().filter_map(|r| r.get(column).as_f64()).collect()
    }
}

/// Return the rows passing both global filters.
///
/// An empty result is a valid view, not an error.
pub fn filter<'a>(dataset: &'a Dataset, state: &FilterState) -> FilteredView<'a> {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| state.accepts(dataset, record))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}
