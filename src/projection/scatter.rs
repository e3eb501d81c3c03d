use crate::data::filter::FilteredView;
use crate::error::{InvalidSelector, Selector};

/// Point opacity, so overlapping students show up as darker areas.
pub const SCATTER_ALPHA: f32 = 0.7;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterFigure {
    /// Column on the x axis; y is always Exam_Score.
    pub variable: String,
    pub points: Vec<[f64; 2]>,
}

/// One `[variable, Exam_Score]` point per row where both are present.
///
/// `variable` must be one of the dataset's numeric-eligible columns.
pub fn scatter(view: &FilteredView<'_>, variable: &str) -> Result<ScatterFigure, InvalidSelector> {
    let dataset = view.dataset();
    if !dataset.numeric_eligible_columns().iter().any(|c| c == variable) {
        return Err(InvalidSelector::new(Selector::CorrelationVariable, variable));
    }
    let x_idx = dataset
        .column_index(variable)
        .ok_or_else(|| InvalidSelector::new(Selector::CorrelationVariable, variable))?;
    let y_idx = dataset.exam_score_index();

    let points = view
        .records()
        .filter_map(|r| Some([r.get(x_idx).as_f64()?, r.get(y_idx).as_f64()?]))
        .collect();

    Ok(ScatterFigure {
        variable: variable.to_string(),
        points,
    })
}
