use indexmap::IndexMap;

use crate::data::filter::FilteredView;
use crate::data::model::{CellValue, ColumnKind};
use crate::error::{InvalidSelector, Selector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBar {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountFigure {
    pub category: String,
    pub bars: Vec<CategoryBar>,
}

/// Count rows per value of a categorical column.
///
/// Only values present in the view get a bar, in order of first appearance;
/// missing cells are not counted.
pub fn countplot(view: &FilteredView<'_>, category: &str) -> Result<CountFigure, InvalidSelector> {
    let dataset = view.dataset();
    let idx = dataset
        .column_index(category)
        .filter(|_| dataset.column_kind(category) == Some(ColumnKind::Categorical))
        .ok_or_else(|| InvalidSelector::new(Selector::CategoryVariable, category))?;

    let mut counts: IndexMap<&CellValue, usize> = IndexMap::new();
    for record in view.records() {
        let value = record.get(idx);
        if !value.is_null() {
            *counts.entry(value).or_default() += 1;
        }
    }

    let bars = counts
        .into_iter()
        .map(|(value, count)| CategoryBar {
            label: value.to_string(),
            count,
        })
        .collect();

    Ok(CountFigure {
        category: category.to_string(),
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::five_students;
    use crate::data::filter::{filter, FilterState, FilteredView, SchoolFilter};
    use crate::data::model::Dataset;

    fn labels(fig: &CountFigure) -> Vec<(&str, usize)> {
        fig.bars.iter().map(|b| (b.label.as_str(), b.count)).collect()
    }

    #[test]
    fn counts_in_first_appearance_order() {
        let ds = five_students();
        let fig = countplot(&FilteredView::all(&ds), "School_Type").unwrap();
        assert_eq!(labels(&fig), vec![("Public", 2), ("Private", 3)]);
    }

    #[test]
    fn absent_categories_get_no_bar() {
        let ds = five_students();
        let view = filter(&ds, &FilterState::new(0.0, 100.0, SchoolFilter::Only("Private".into())));
        let fig = countplot(&view, "School_Type").unwrap();
        assert_eq!(labels(&fig), vec![("Private", 3)]);
        assert!(fig.bars.iter().all(|b| b.count > 0));
    }

    #[test]
    fn missing_cells_are_not_counted() {
        let ds = Dataset::from_text_rows(
            vec!["School_Type".into(), "Gender".into(), "Motivation_Level".into(), "Exam_Score".into()],
            vec![
                vec!["Public".into(), "Male".into(), "Low".into(), "60".into()],
                vec!["Public".into(), "Male".into(), "".into(), "61".into()],
                vec!["Public".into(), "Male".into(), "High".into(), "62".into()],
                vec!["Public".into(), "Male".into(), "Low".into(), "63".into()],
            ],
        )
        .unwrap();
        let fig = countplot(&FilteredView::all(&ds), "Motivation_Level").unwrap();
        assert_eq!(labels(&fig), vec![("Low", 2), ("High", 1)]);
    }

    #[test]
    fn numeric_or_unknown_column_is_rejected() {
        let ds = five_students();
        let view = FilteredView::all(&ds);
        assert!(countplot(&view, "Exam_Score").is_err());
        let err = countplot(&view, "Favourite_Colour").unwrap_err();
        assert_eq!(err.selector, Selector::CategoryVariable);
    }

    #[test]
    fn empty_view_has_no_bars() {
        let ds = five_students();
        let view = filter(&ds, &FilterState::new(0.0, 1.0, SchoolFilter::All));
        assert!(countplot(&view, "Gender").unwrap().bars.is_empty());
    }
}
