//! CSV loading
//!
//! [`load_csv`] reads a whole file asynchronously and parses it into a
//! [`Dataset`]. The read is single-shot: it either yields every row or a
//! [`LoadError`], never partial results.
//!
//! Every column is read as text. Header names go through the chosen
//! [`ColumnNaming`]; cells are trimmed, and empty cells are left out of the
//! record so that they count as missing. Rows with fewer cells than the
//! header are padded with missing cells; rows with more are an error.
//! Columns listed in
//! [`LoadOptions::numeric_fields`] are coerced to numbers, with unparsable
//! text becoming NaN.

use std::{
    collections::HashSet,
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
};

use arrow_array::{Array as _, RecordBatch, cast::AsArray as _};
use arrow_csv::{ReaderBuilder, reader::Format};
use arrow_schema::{ArrowError, DataType, Field, Schema};

use crate::{
    naming::ColumnNaming,
    record::{Dataset, Record, Value},
};

/// Rows sampled to discover the header; only column names are used.
const SCHEMA_SAMPLE_ROWS: usize = 1;
const INLINE_PATH: &str = "<inline>";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("failed to parse CSV in {}", path.display())]
    Csv { path: PathBuf, source: ArrowError },
    #[display("missing CSV header in {}", path.display())]
    MissingHeader { path: PathBuf },
}

/// Settings for one load.
///
/// # Examples
///
/// ```
/// use cardiostat_analysis::{load::LoadOptions, naming::ColumnNaming};
///
/// let options = LoadOptions::new()
///     .with_naming(ColumnNaming::Snake)
///     .with_numeric_fields(["Age", "BMI"]);
/// assert!(options.is_numeric("age"));
/// assert!(!options.is_numeric("gender"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub naming: ColumnNaming,
    /// Fields coerced to numbers. Names are matched after applying `naming`.
    pub numeric_fields: Vec<String>,
}

impl LoadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_naming(mut self, naming: ColumnNaming) -> Self {
        self.naming = naming;
        self
    }

    #[must_use]
    pub fn with_numeric_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn is_numeric(&self, field: &str) -> bool {
        self.numeric_fields
            .iter()
            .any(|numeric| self.naming.apply(numeric) == field)
    }
}

/// Reads and parses the CSV file at `path`.
///
/// # Examples
///
/// ```no_run
/// # async fn run() -> Result<(), cardiostat_analysis::load::LoadError> {
/// use cardiostat_analysis::load::{LoadOptions, load_csv};
///
/// let options = LoadOptions::new().with_numeric_fields(["Age", "Cholesterol Level"]);
/// let dataset = load_csv("heart_disease.csv", &options).await?;
/// println!("{} records", dataset.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_csv<P>(path: P, options: &LoadOptions) -> Result<Dataset, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    let dataset = parse_csv(&bytes, path, options)?;
    tracing::info!(
        path = %path.display(),
        records = dataset.len(),
        columns = dataset.columns().len(),
        "loaded CSV"
    );
    Ok(dataset)
}

/// Parses CSV text already in memory.
///
/// # Examples
///
/// ```
/// use cardiostat_analysis::load::{LoadOptions, parse_csv_str};
///
/// let csv = "Gender,Age\nFemale,42\nMale,\n";
/// let dataset = parse_csv_str(csv, &LoadOptions::new().with_numeric_fields(["Age"])).unwrap();
///
/// assert_eq!(dataset.columns(), ["Gender", "Age"]);
/// assert_eq!(dataset.records()[0].number("Age"), Some(42.0));
/// assert!(dataset.records()[1].is_missing("Age"));
/// ```
pub fn parse_csv_str(csv: &str, options: &LoadOptions) -> Result<Dataset, LoadError> {
    parse_csv(csv.as_bytes(), Path::new(INLINE_PATH), options)
}

fn parse_csv(bytes: &[u8], path: &Path, options: &LoadOptions) -> Result<Dataset, LoadError> {
    let csv_error = |source| LoadError::Csv {
        path: path.to_owned(),
        source,
    };

    let (inferred, _) = Format::default()
        .with_header(true)
        .with_truncated_rows(true)
        .infer_schema(Cursor::new(bytes), Some(SCHEMA_SAMPLE_ROWS))
        .map_err(csv_error)?;
    if inferred.fields().is_empty() {
        return Err(LoadError::MissingHeader {
            path: path.to_owned(),
        });
    }

    // Read every column as text; typing happens per field below.
    let schema = Schema::new(
        inferred
            .fields()
            .iter()
            .map(|field| Field::new(field.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );
    let columns = schema
        .fields()
        .iter()
        .map(|field| options.naming.apply(field.name()))
        .collect::<Vec<_>>();
    let numeric = columns
        .iter()
        .map(|column| options.is_numeric(column))
        .collect::<Vec<_>>();

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_header(true)
        .with_truncated_rows(true)
        .build(Cursor::new(bytes))
        .map_err(csv_error)?;
    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error)?;

    let mut records = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    for batch in &batches {
        append_records(batch, &columns, &numeric, &mut records).map_err(csv_error)?;
    }

    let declared = options
        .numeric_fields
        .iter()
        .map(|field| options.naming.apply(field))
        .collect::<HashSet<_>>();
    for field in declared.iter().filter(|field| !columns.contains(field)) {
        tracing::warn!(field = %field, path = %path.display(), "numeric field not found in header");
    }

    Ok(Dataset::new(columns, records))
}

fn append_records(
    batch: &RecordBatch,
    columns: &[String],
    numeric: &[bool],
    records: &mut Vec<Record>,
) -> Result<(), ArrowError> {
    let arrays = batch
        .columns()
        .iter()
        .map(|array| {
            array.as_string_opt::<i32>().ok_or_else(|| {
                ArrowError::SchemaError(format!("expected a text column, found {}", array.data_type()))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for row in 0..batch.num_rows() {
        let record = arrays
            .iter()
            .zip(columns)
            .zip(numeric)
            .filter_map(|((array, column), &is_numeric)| {
                if array.is_null(row) {
                    return None;
                }
                let text = array.value(row).trim();
                if text.is_empty() {
                    return None;
                }
                let value = if is_numeric {
                    Value::parse_number(text)
                } else {
                    Value::from(text)
                };
                Some((column.as_str(), value))
            })
            .collect::<Record>();
        records.push(record);
    }
    Ok(())
}
