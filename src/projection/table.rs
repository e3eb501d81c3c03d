use crate::data::filter::FilteredView;

/// The filtered rows as display strings, every column in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Pass the view through unchanged: no aggregation, no reordering.
pub fn table(view: &FilteredView<'_>) -> DataTable {
    let header = view
        .dataset()
        .columns()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    let rows = view
        .records()
        .map(|r| r.cells().iter().map(|c| c.to_string()).collect())
        .collect();
    DataTable { header, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::five_students;
    use crate::data::filter::{filter, FilterState, SchoolFilter};

    #[test]
    fn passes_rows_through_in_order() {
        let ds = five_students();
        let view = filter(&ds, &FilterState::new(75.0, 100.0, SchoolFilter::All));
        let t = table(&view);
        assert_eq!(t.header, vec!["School_Type", "Gender", "Exam_Score"]);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.rows[0], vec!["Private", "Male", "80"]);
        assert_eq!(t.rows[2], vec!["Private", "Male", "95"]);
    }

    #[test]
    fn empty_view_keeps_header() {
        let ds = five_students();
        let view = filter(&ds, &FilterState::new(0.0, 10.0, SchoolFilter::All));
        let t = table(&view);
        assert_eq!(t.row_count(), 0);
        assert_eq!(t.header.len(), 3);
    }
}
