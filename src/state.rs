use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::filter::{filter, school_type_choices, FilterState, FilteredView, SchoolFilter};
use crate::data::model::Dataset;
use crate::error::{InvalidSelector, Selector};
use crate::projection::{
    corr_matrix, countplot, histogram, mean_by_gender, scatter, table, CorrelationMatrix,
    CountFigure, DataTable, Gender, HistogramFigure, HistogramSettings, ScatterFigure,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// Every setter recomputes the outputs that depend on the value it changes:
/// the global filter feeds every output, each selector feeds only its own.
pub struct AppState {
    dataset: Arc<Dataset>,
    histogram_settings: HistogramSettings,

    /// Global filters.
    filter: FilterState,

    /// Per-widget selectors.
    gender: Gender,
    correlation_variable: String,
    category_variable: String,

    /// Choices offered by the school selector.
    pub school_choices: Vec<String>,

    /// Outputs, rebuilt on every dependency change.
    pub visible_rows: usize,
    pub table: DataTable,
    pub gender_text: String,
    pub histogram: HistogramFigure,
    pub scatter: ScatterFigure,
    pub countplot: CountFigure,
    pub correlation: CorrelationMatrix,

    /// Last rejected selector, shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the initial state and compute every output once.
    pub fn new(dataset: Arc<Dataset>, config: &DashboardConfig) -> Self {
        let (lo, hi) = config.default_score_range;
        let correlation_variable = dataset
            .numeric_eligible_columns()
            .first()
            .cloned()
            .unwrap_or_default();
        let category_variable = dataset
            .categorical_columns()
            .first()
            .cloned()
            .unwrap_or_default();

        let mut state = Self {
            school_choices: school_type_choices(&dataset),
            dataset,
            histogram_settings: config.histogram,
            filter: FilterState::new(lo, hi, SchoolFilter::All),
            gender: Gender::default(),
            correlation_variable,
            category_variable,
            visible_rows: 0,
            table: DataTable::default(),
            gender_text: String::new(),
            histogram: HistogramFigure::default(),
            scatter: ScatterFigure::default(),
            countplot: CountFigure::default(),
            correlation: CorrelationMatrix::default(),
            status_message: None,
        };
        state.refresh_all();
        state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn correlation_variable(&self) -> &str {
        &self.correlation_variable
    }

    pub fn category_variable(&self) -> &str {
        &self.category_variable
    }

    fn view(&self) -> FilteredView<'_> {
        filter(&self.dataset, &self.filter)
    }

    // -- Global filters --

    pub fn set_score_range(&mut self, a: f64, b: f64) {
        let mut next = self.filter.clone();
        next.set_score_range(a, b);
        if next != self.filter {
            self.filter = next;
            self.refresh_all();
        }
    }

    pub fn set_school_type(&mut self, label: &str) -> Result<(), InvalidSelector> {
        if !self.school_choices.iter().any(|c| c == label) {
            return Err(self.reject(InvalidSelector::new(Selector::SchoolType, label)));
        }
        let school = SchoolFilter::from_label(label);
        if school != self.filter.school_type {
            self.filter.school_type = school;
            self.refresh_all();
        }
        Ok(())
    }

    // -- Selectors --

    pub fn set_gender(&mut self, label: &str) -> Result<(), InvalidSelector> {
        let gender = label.parse::<Gender>().map_err(|e| self.reject(e))?;
        let text = mean_by_gender(&self.view(), gender);
        self.gender = gender;
        self.gender_text = text;
        self.status_message = None;
        Ok(())
    }

    pub fn set_correlation_variable(&mut self, variable: &str) -> Result<(), InvalidSelector> {
        let result = scatter(&self.view(), variable);
        let figure = result.map_err(|e| self.reject(e))?;
        self.correlation_variable = variable.to_string();
        self.scatter = figure;
        self.status_message = None;
        Ok(())
    }

    pub fn set_category_variable(&mut self, category: &str) -> Result<(), InvalidSelector> {
        let result = countplot(&self.view(), category);
        let figure = result.map_err(|e| self.reject(e))?;
        self.category_variable = category.to_string();
        self.countplot = figure;
        self.status_message = None;
        Ok(())
    }

    /// Record a rejected selector; the displayed outputs stay as they were.
    fn reject(&mut self, err: InvalidSelector) -> InvalidSelector {
        log::warn!("Rejected selector: {err}");
        self.status_message = Some(format!("Sélection invalide : {err}"));
        err
    }

    /// Recompute every output from the dataset and the current selections.
    pub fn refresh_all(&mut self) {
        let view = filter(&self.dataset, &self.filter);
        log::debug!(
            "Filter {}..={} / {} keeps {} of {} rows",
            self.filter.score_min(),
            self.filter.score_max(),
            self.filter.school_type,
            view.len(),
            self.dataset.len()
        );

        let visible_rows = view.len();
        let data_table = table(&view);
        let gender_text = mean_by_gender(&view, self.gender);
        let distribution = histogram(&view, &self.histogram_settings);
        let correlation = corr_matrix(&view);
        let scatter_result = scatter(&view, &self.correlation_variable);
        let count_result = countplot(&view, &self.category_variable);
        drop(view);

        self.visible_rows = visible_rows;
        self.table = data_table;
        self.gender_text = gender_text;
        self.histogram = distribution;
        self.correlation = correlation;
        // Selectors were validated when set; these only fail on a dataset
        // with no eligible column at all.
        match scatter_result {
            Ok(fig) => self.scatter = fig,
            Err(e) => log::debug!("Scatter left unchanged: {e}"),
        }
        match count_result {
            Ok(fig) => self.countplot = fig,
            Err(e) => log::debug!("Count plot left unchanged: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::summary::NO_DATA_FOR_GENDER;

    fn dataset() -> Arc<Dataset> {
        let header = [
            "Hours_Studied", "Attendance", "Gender", "School_Type", "Motivation_Level",
            "Physical_Activity", "Exam_Score",
        ];
        let rows = [
            ["10", "80", "Male", "Public", "Low", "3", "60"],
            ["15", "85", "Female", "Public", "High", "2", "70"],
            ["20", "90", "Male", "Private", "Medium", "4", "80"],
            ["25", "95", "Female", "Private", "High", "1", "90"],
            ["30", "99", "Male", "Private", "Low", "5", "95"],
        ];
        let ds = Dataset::from_text_rows(
            header.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap();
        Arc::new(ds)
    }

    fn state() -> AppState {
        AppState::new(dataset(), &DashboardConfig::default())
    }

    #[test]
    fn initial_selection_uses_defaults() {
        let s = state();
        assert_eq!(s.filter_state().score_min(), 50.0);
        assert_eq!(s.correlation_variable(), "Hours_Studied");
        assert_eq!(s.category_variable(), "Gender");
        assert_eq!(s.school_choices, vec!["Tous", "Public", "Private"]);
        assert_eq!(s.visible_rows, 5);
        assert_eq!(s.scatter.points.len(), 5);
    }

    #[test]
    fn filter_change_refreshes_every_output() {
        let mut s = state();
        s.set_school_type("Public").unwrap();
        assert_eq!(s.visible_rows, 2);
        assert_eq!(s.table.row_count(), 2);
        assert_eq!(s.scatter.points.len(), 2);
        assert_eq!(s.countplot.bars.len(), 2);
        assert_eq!(s.histogram.summary.unwrap().count, 2);
        assert!(s.gender_text.ends_with("60.00"));
    }

    #[test]
    fn empty_view_renders_everything() {
        let mut s = state();
        s.set_score_range(0.0, 10.0);
        assert_eq!(s.visible_rows, 0);
        assert_eq!(s.table.row_count(), 0);
        assert!(s.histogram.bins.is_empty());
        assert!(s.scatter.points.is_empty());
        assert!(s.countplot.bars.is_empty());
        assert!(s.correlation.get(0, 0).is_nan());
        assert_eq!(s.gender_text, NO_DATA_FOR_GENDER);
    }

    #[test]
    fn invalid_correlation_variable_keeps_previous_figure() {
        let mut s = state();
        s.set_correlation_variable("Attendance").unwrap();
        let before = s.scatter.clone();

        // Physical_Activity is numeric but one of the two rightmost.
        let err = s.set_correlation_variable("Physical_Activity").unwrap_err();
        assert_eq!(err.selector, Selector::CorrelationVariable);
        assert_eq!(s.scatter, before);
        assert_eq!(s.correlation_variable(), "Attendance");
        assert!(s.status_message.is_some());

        s.set_correlation_variable("Hours_Studied").unwrap();
        assert!(s.status_message.is_none());
    }

    #[test]
    fn invalid_category_and_gender_are_rejected() {
        let mut s = state();
        let before = s.countplot.clone();
        assert!(s.set_category_variable("Exam_Score").is_err());
        assert_eq!(s.countplot, before);

        let text = s.gender_text.clone();
        assert!(s.set_gender("Unknown").is_err());
        assert_eq!(s.gender_text, text);
        assert_eq!(s.gender(), Gender::Male);

        assert!(s.set_school_type("Charter").is_err());
        assert_eq!(s.visible_rows, 5);
    }

    #[test]
    fn selector_change_only_touches_its_output() {
        let mut s = state();
        s.set_category_variable("Motivation_Level").unwrap();
        assert_eq!(s.countplot.category, "Motivation_Level");
        assert_eq!(s.countplot.bars.len(), 3);

        s.set_gender("Female").unwrap();
        assert_eq!(
            s.gender_text,
            "La moyenne de l'exam_score pour les femmes est 80.00"
        );
    }

    #[test]
    fn latest_filter_wins() {
        let mut s = state();
        s.set_score_range(0.0, 75.0);
        s.set_score_range(85.0, 100.0);
        assert_eq!(s.visible_rows, 2);
    }
}
