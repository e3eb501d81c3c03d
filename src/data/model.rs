use std::collections::HashMap;
use std::fmt;

use indexmap::IndexSet;

use crate::error::LoadError;

/// Column holding the school type, used by the global school filter.
pub const SCHOOL_TYPE: &str = "School_Type";
/// Column holding the student gender, used by the grouped-mean text.
pub const GENDER: &str = "Gender";
/// The outcome variable.
pub const EXAM_SCORE: &str = "Exam_Score";

/// Cell texts read as missing values, matching what data-frame tools treat as NA.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Used as a map key downstream so `CellValue` must be `Ord` and `Hash`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in ordered sets --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Numeric interpretation of the cell; booleans count as 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Whether the cell shows as `label` in a selector list.
    pub fn matches_label(&self, label: &str) -> bool {
        match self {
            CellValue::Text(s) => s == label,
            CellValue::Null => false,
            other => other.to_string() == label,
        }
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Categorical,
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// One student: a cell per column, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    cells: Vec<CellValue>,
}

impl Record {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn get(&self, column: usize) -> &CellValue {
        &self.cells[column]
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with the column lists computed at load time.
///
/// Nothing hands out mutable access: once built, the dataset stays as loaded
/// for the life of the process.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<ColumnSpec>,
    records: Vec<Record>,
    positions: HashMap<String, usize>,
    categorical: Vec<String>,
    numeric: Vec<String>,
    school_type_idx: usize,
    gender_idx: usize,
    exam_score_idx: usize,
}

impl Dataset {
    /// Build a dataset from typed columns and rows, checking the schema.
    pub fn new(columns: Vec<ColumnSpec>, records: Vec<Record>) -> Result<Self, LoadError> {
        if columns.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut positions = HashMap::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            if positions.insert(col.name.clone(), i).is_some() {
                return Err(LoadError::DuplicateColumn(col.name.clone()));
            }
        }

        for (row, record) in records.iter().enumerate() {
            if record.cells.len() != columns.len() {
                return Err(LoadError::Malformed {
                    row,
                    message: format!(
                        "expected {} fields, found {}",
                        columns.len(),
                        record.cells.len()
                    ),
                });
            }
        }

        let position_of = |name: &str| {
            positions
                .get(name)
                .copied()
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        let school_type_idx = position_of(SCHOOL_TYPE)?;
        let gender_idx = position_of(GENDER)?;
        let exam_score_idx = position_of(EXAM_SCORE)?;
        if columns[exam_score_idx].kind != ColumnKind::Numeric {
            return Err(LoadError::NotNumeric(EXAM_SCORE.to_string()));
        }

        let names_of = |kind: ColumnKind| -> Vec<String> {
            columns
                .iter()
                .filter(|c| c.kind == kind)
                .map(|c| c.name.clone())
                .collect()
        };
        let categorical = names_of(ColumnKind::Categorical);
        let numeric = names_of(ColumnKind::Numeric);

        Ok(Dataset {
            columns,
            records,
            positions,
            categorical,
            numeric,
            school_type_idx,
            gender_idx,
            exam_score_idx,
        })
    }

    /// Build a dataset from raw cell texts, inferring each column's kind.
    pub fn from_text_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, LoadError> {
        if headers.is_empty() {
            return Err(LoadError::Empty);
        }
        for (row, fields) in rows.iter().enumerate() {
            if fields.len() != headers.len() {
                return Err(LoadError::Malformed {
                    row,
                    message: format!(
                        "expected {} fields, found {}",
                        headers.len(),
                        fields.len()
                    ),
                });
            }
        }

        let mut columns = Vec::with_capacity(headers.len());
        let mut typed: Vec<Vec<CellValue>> = Vec::with_capacity(headers.len());
        for (col, name) in headers.into_iter().enumerate() {
            let texts: Vec<&str> = rows.iter().map(|r| r[col].trim()).collect();
            let (kind, cells) = infer_column(&texts);
            columns.push(ColumnSpec::new(name.trim(), kind));
            typed.push(cells);
        }

        // Transpose column-major cells back into records.
        let n_rows = rows.len();
        let mut column_iters: Vec<_> = typed.into_iter().map(|c| c.into_iter()).collect();
        let records = (0..n_rows)
            .map(|_| {
                Record::new(
                    column_iters
                        .iter_mut()
                        .map(|it| it.next().unwrap_or(CellValue::Null))
                        .collect(),
                )
            })
            .collect();

        Dataset::new(columns, records)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.column_index(name).map(|i| self.columns[i].kind)
    }

    /// All text-valued columns, in schema order.
    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical
    }

    /// All numeric columns, in schema order, the outcome included.
    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric
    }

    /// Numeric columns offered as scatter variables: every numeric column
    /// except the two rightmost ones.
    pub fn numeric_eligible_columns(&self) -> &[String] {
        let keep = self.numeric.len().saturating_sub(2);
        &self.numeric[..keep]
    }

    pub fn school_type_index(&self) -> usize {
        self.school_type_idx
    }

    pub fn gender_index(&self) -> usize {
        self.gender_idx
    }

    pub fn exam_score_index(&self) -> usize {
        self.exam_score_idx
    }

    /// Distinct non-null values of a column, in order of first appearance.
    pub fn distinct_values(&self, column: usize) -> Vec<CellValue> {
        let set: IndexSet<&CellValue> = self
            .records
            .iter()
            .map(|r| r.get(column))
            .filter(|v| !v.is_null())
            .collect();
        set.into_iter().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// Kind inference
// ---------------------------------------------------------------------------

fn is_na(s: &str) -> bool {
    NA_TOKENS.contains(&s)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "true" | "TRUE" => Some(true),
        "False" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Decide a column's kind from all of its cell texts and convert the cells.
///
/// Integers survive only without missing cells; a gap widens the column to
/// float. Boolean literals make a numeric column only when no cell is missing.
fn infer_column(texts: &[&str]) -> (ColumnKind, Vec<CellValue>) {
    let has_null = texts.iter().any(|s| is_na(s));
    let present = || texts.iter().copied().filter(|s| !is_na(s));

    if !has_null && present().all(|s| s.parse::<i64>().is_ok()) {
        let cells = texts
            .iter()
            .map(|s| s.parse::<i64>().map_or(CellValue::Null, CellValue::Integer))
            .collect();
        return (ColumnKind::Numeric, cells);
    }

    if present().all(|s| s.parse::<f64>().is_ok()) {
        let cells = texts
            .iter()
            .map(|s| {
                if is_na(s) {
                    CellValue::Null
                } else {
                    s.parse::<f64>().map_or(CellValue::Null, CellValue::Float)
                }
            })
            .collect();
        return (ColumnKind::Numeric, cells);
    }

    if !has_null && present().all(|s| parse_bool(s).is_some()) {
        let cells = texts
            .iter()
            .map(|s| parse_bool(s).map_or(CellValue::Null, CellValue::Bool))
            .collect();
        return (ColumnKind::Numeric, cells);
    }

    let cells = texts
        .iter()
        .map(|s| {
            if is_na(s) {
                CellValue::Null
            } else {
                CellValue::Text(s.to_string())
            }
        })
        .collect();
    (ColumnKind::Categorical, cells)
}
