use std::fmt;
use std::str::FromStr;

use crate::data::filter::FilteredView;
use crate::error::{InvalidSelector, Selector};

/// Shown instead of a mean when the selected gender has no rows in the view.
pub const NO_DATA_FOR_GENDER: &str = "Pas de données pour le genre sélectionné.";

// ---------------------------------------------------------------------------
// Gender selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// The value as written in the Gender column.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    fn plural_noun(self) -> &'static str {
        match self {
            Gender::Male => "hommes",
            Gender::Female => "femmes",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = InvalidSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| InvalidSelector::new(Selector::Gender, s))
    }
}

// ---------------------------------------------------------------------------
// Grouped mean
// ---------------------------------------------------------------------------

/// Average exam score of one gender over the view, as a sentence.
///
/// An empty subset yields [`NO_DATA_FOR_GENDER`], never a NaN.
pub fn mean_by_gender(view: &FilteredView<'_>, gender: Gender) -> String {
    let dataset = view.dataset();
    let gender_idx = dataset.gender_index();
    let score_idx = dataset.exam_score_index();

    let (sum, count) = view
        .records()
        .filter(|r| r.get(gender_idx).matches_label(gender.label()))
        .filter_map(|r| r.get(score_idx).as_f64())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

    if count == 0 {
        return NO_DATA_FOR_GENDER.to_string();
    }
    let mean = sum / count as f64;
    format!(
        "La moyenne de l'exam_score pour les {} est {mean:.2}",
        gender.plural_noun()
    )
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; 0 for a single value.
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

pub fn describe(values: &[f64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std_dev = if n > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    } else {
        0.0
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(Summary {
        count: n,
        mean,
        std_dev,
        min: sorted[0],
        median: quantile(&sorted, 0.5),
        max: sorted[n - 1],
    })
}

/// Linear-interpolated quantile of already sorted, non-empty data.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
