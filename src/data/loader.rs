use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, ColumnKind, ColumnSpec, Dataset, Record};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the student table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header row, one student per line
/// * `.json`         – `[{ "Gender": "Male", "Exam_Score": 67, ... }, ...]`
/// * `.parquet`      – one column per attribute
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    log::debug!(
        "categorical: {:?}, numeric: {:?}",
        dataset.categorical_columns(),
        dataset.numeric_columns()
    );
    Ok(dataset)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

/// Header row with column names, then one record per line.  Every cell is
/// read as text; column kinds are inferred once all rows are in.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::Empty);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    Dataset::from_text_rows(headers, rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the usual data-frame export):
///
/// ```json
/// [
///   { "Hours_Studied": 23, "Gender": "Male", "School_Type": "Public", "Exam_Score": 67 },
///   ...
/// ]
/// ```
///
/// Column order follows the keys of the first object.
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root.as_array().ok_or(LoadError::Malformed {
        row: 0,
        message: "expected a top-level JSON array".to_string(),
    })?;

    let headers: Vec<String> = match records.first().and_then(|r| r.as_object()) {
        Some(obj) => obj.keys().cloned().collect(),
        None if records.is_empty() => return Err(LoadError::Empty),
        None => {
            return Err(LoadError::Malformed {
                row: 0,
                message: "not a JSON object".to_string(),
            })
        }
    };

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::Malformed {
            row: i,
            message: "not a JSON object".to_string(),
        })?;
        rows.push(
            headers
                .iter()
                .map(|key| obj.get(key).map(json_to_text).unwrap_or_default())
                .collect(),
        );
    }

    Dataset::from_text_rows(headers, rows)
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Bool(true) => "True".to_string(),
        JsonValue::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file.  Column kinds come from the Arrow schema: integer,
/// float and boolean columns are numeric, everything else is categorical.
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(io_error(path))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let columns: Vec<ColumnSpec> = schema
        .fields()
        .iter()
        .map(|f| ColumnSpec::new(f.name().clone(), arrow_kind(f.data_type())))
        .collect();

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let converted: Vec<Vec<CellValue>> = batch
            .columns()
            .iter()
            .map(column_cells)
            .collect::<Result<_, _>>()?;

        for row in 0..batch.num_rows() {
            records.push(Record::new(
                converted.iter().map(|col| col[row].clone()).collect(),
            ));
        }
    }

    Dataset::new(columns, records)
}

// -- Parquet / Arrow helpers --

fn arrow_kind(data_type: &DataType) -> ColumnKind {
    if data_type.is_numeric() || *data_type == DataType::Boolean || *data_type == DataType::Null {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Convert one Arrow column into cells, casting through a common type.
fn column_cells(col: &Arc<dyn Array>) -> Result<Vec<CellValue>, LoadError> {
    let data_type = col.data_type();
    let cells = if data_type.is_integer() {
        let ints = cast(col, &DataType::Int64)?;
        let ints = ints.as_primitive::<Int64Type>();
        (0..ints.len())
            .map(|i| {
                if ints.is_null(i) {
                    CellValue::Null
                } else {
                    CellValue::Integer(ints.value(i))
                }
            })
            .collect()
    } else if data_type.is_floating() || *data_type == DataType::Null {
        let floats = cast(col, &DataType::Float64)?;
        let floats = floats.as_primitive::<Float64Type>();
        (0..floats.len())
            .map(|i| {
                if floats.is_null(i) || floats.value(i).is_nan() {
                    CellValue::Null
                } else {
                    CellValue::Float(floats.value(i))
                }
            })
            .collect()
    } else if *data_type == DataType::Boolean {
        let bools = col.as_boolean();
        (0..bools.len())
            .map(|i| {
                if bools.is_null(i) {
                    CellValue::Null
                } else {
                    CellValue::Bool(bools.value(i))
                }
            })
            .collect()
    } else if data_type.is_numeric() {
        // Decimals and other numeric encodings.
        let floats = cast(col, &DataType::Float64)?;
        let floats = floats.as_primitive::<Float64Type>();
        (0..floats.len())
            .map(|i| {
                if floats.is_null(i) {
                    CellValue::Null
                } else {
                    CellValue::Float(floats.value(i))
                }
            })
            .collect()
    } else {
        let texts = cast(col, &DataType::Utf8)?;
        let texts = texts.as_string::<i32>();
        (0..texts.len())
            .map(|i| {
                if texts.is_null(i) {
                    CellValue::Null
                } else {
                    CellValue::Text(texts.value(i).to_string())
                }
            })
            .collect()
    };
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    /// Helper to create a temporary file with the given suffix and content.
    fn create_test_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    const CSV: &str = "Hours_Studied,Attendance,Gender,School_Type,Physical_Activity,Exam_Score\n\
                       23,84,Male,Public,3,67\n\
                       19,64,Female,Private,4,61\n\
                       24,98,Male,Public,4,74\n";

    #[test]
    fn loads_csv_and_discovers_columns() {
        let file = create_test_file(".csv", CSV);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.categorical_columns(), &["Gender", "School_Type"]);
        assert_eq!(ds.numeric_eligible_columns(), &["Hours_Studied", "Attendance"]);
    }

    #[test]
    fn loads_tsv() {
        let file = create_test_file(".tsv", &CSV.replace(',', "\t"));
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.columns().len(), 6);
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let file = create_test_file(".csv", "School_Type,Gender,Exam_Score\n");
        let ds = load_file(file.path()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn ragged_row_is_malformed() {
        let file = create_test_file(".csv", "School_Type,Gender,Exam_Score\nPublic,Male\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { row: 0, .. }));
    }

    #[test]
    fn missing_required_column_fails() {
        let file = create_test_file(".csv", "School_Type,Exam_Score\nPublic,60\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(c) if c == "Gender"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = create_test_file(".xlsx", CSV);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(e) if e == "xlsx"));
    }

    #[test]
    fn loads_json_records_in_key_order() {
        let file = create_test_file(
            ".json",
            r#"[
                {"Sleep_Hours": 7, "School_Type": "Public", "Gender": "Male", "Tutoring_Sessions": 0, "Exam_Score": 67},
                {"Sleep_Hours": 8, "School_Type": "Private", "Gender": "Female", "Tutoring_Sessions": 2, "Exam_Score": null}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(
            ds.numeric_columns(),
            &["Sleep_Hours", "Tutoring_Sessions", "Exam_Score"]
        );
        assert!(ds.records()[1].get(ds.exam_score_index()).is_null());
    }

    #[test]
    fn loads_parquet_with_arrow_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Hours_Studied", DataType::Int64, false),
            Field::new("Gender", DataType::Utf8, false),
            Field::new("School_Type", DataType::Utf8, true),
            Field::new("Exam_Score", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![10, 20])),
                Arc::new(StringArray::from(vec!["Male", "Female"])),
                Arc::new(StringArray::from(vec![Some("Public"), None])),
                Arc::new(Float64Array::from(vec![61.0, 75.0])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.categorical_columns(), &["Gender", "School_Type"]);
        assert_eq!(ds.records()[0].get(0), &CellValue::Integer(10));
        assert!(ds.records()[1].get(ds.school_type_index()).is_null());
    }
}
