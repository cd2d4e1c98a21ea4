//! Dataset profiling: descriptive statistics for an in-memory [`DataSet`].
//!
//! [`profile_dataset`] is a pure function built on a polars [`polars::prelude::DataFrame`] view of
//! the dataset. Empty datasets (no rows and/or no columns) produce an empty-but-valid
//! [`SummaryReport`], and statistics that are undefined for a column are reported as `None`
//! (`null` in JSON).
//!
//! ```rust
//! use dataset_summary::profiling::profile_dataset;
//! use dataset_summary::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("a", DataType::Int64),
//!     Field::new("b", DataType::Int64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::Int64(3)],
//!         vec![Value::Int64(2), Value::Int64(2)],
//!         vec![Value::Int64(3), Value::Int64(1)],
//!     ],
//! );
//!
//! let report = profile_dataset(&ds)?;
//! assert_eq!(report.shape.rows, 3);
//! assert_eq!(report.correlations.len(), 1);
//! assert!((report.correlations[0].corr + 1.0).abs() < 1e-12);
//! # Ok::<(), dataset_summary::AnalysisError>(())
//! ```

pub mod categorical;
pub mod correlation;
pub mod frame;
pub mod numeric;
pub mod report;

use polars::prelude::{DataFrame, DataType as PolarsDataType, IntoLazy, UniqueKeepStrategy};

use crate::error::AnalysisResult;
use crate::types::{ColumnKind, DataSet, DataType, Value};

pub use report::{
    CategoricalSummary, CorrelationPair, DuplicateReport, MissingCount, MissingReport,
    NumericSummary, OrderedMap, Shape, SummaryReport, TopValue,
};

/// Number of leading rows included in the report sample.
pub const SAMPLE_ROWS: usize = 5;

/// Build the summary report for `dataset`.
pub fn profile_dataset(dataset: &DataSet) -> AnalysisResult<SummaryReport> {
    let rows = dataset.row_count();
    let columns = dataset.column_count();
    let fields = &dataset.schema.fields;

    let mut report = SummaryReport {
        shape: Shape { rows, columns },
        columns: dataset.schema.field_names().map(str::to_owned).collect(),
        dtypes: fields
            .iter()
            .map(|f| (f.name.clone(), f.data_type.tag().to_string()))
            .collect(),
        memory_usage_bytes: memory_usage(dataset),
        missing: MissingReport {
            per_column: OrderedMap::new(),
            total_missing_cells: 0,
            missing_cells_pct: 0.0,
        },
        duplicates: DuplicateReport { row_duplicates: 0 },
        numeric_summary: OrderedMap::new(),
        categorical_summary: OrderedMap::new(),
        correlations: Vec::new(),
        sample: Vec::new(),
    };
    if rows == 0 || columns == 0 {
        return Ok(report);
    }

    let df = frame::to_frame(dataset)?;
    let mut numeric_columns = Vec::new();
    for (field, column) in fields.iter().zip(df.columns()) {
        let series = column.as_materialized_series();
        match field.data_type.kind() {
            ColumnKind::Numeric => {
                let values = series.cast(&PolarsDataType::Float64)?.f64()?.clone();
                report
                    .numeric_summary
                    .insert(field.name.clone(), numeric::summarize(&values)?);
                numeric_columns.push((field.name.as_str(), values));
            }
            ColumnKind::Categorical => {
                report
                    .categorical_summary
                    .insert(field.name.clone(), categorical::summarize(series, rows)?);
            }
            ColumnKind::Other => {}
        }
    }

    report.missing = missing_report(&df);
    report.duplicates.row_duplicates = count_duplicate_rows(&df)?;
    report.correlations = correlation::strong_pairs(&numeric_columns)?;
    report.sample = sample_rows(dataset);

    tracing::debug!(
        rows,
        columns,
        numeric = report.numeric_summary.len(),
        categorical = report.categorical_summary.len(),
        correlations = report.correlations.len(),
        duplicates = report.duplicates.row_duplicates,
        "profiled dataset"
    );
    Ok(report)
}

/// Estimated in-memory footprint in bytes.
///
/// Fixed-width columns cost their value width per row. Text columns cost one [`Value`] slot per
/// row plus the UTF-8 length of every string.
pub fn memory_usage(dataset: &DataSet) -> usize {
    let rows = dataset.row_count();
    dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| match field.data_type {
            DataType::Int64 => rows * size_of::<i64>(),
            DataType::Float64 => rows * size_of::<f64>(),
            DataType::Bool => rows * size_of::<bool>(),
            DataType::Utf8 => {
                let text: usize = dataset
                    .column(idx)
                    .map(|v| match v {
                        Value::Utf8(s) => s.len(),
                        _ => 0,
                    })
                    .sum();
                rows * size_of::<Value>() + text
            }
        })
        .sum()
}

/// Missing cells per column. `df` has at least one row and one column.
fn missing_report(df: &DataFrame) -> MissingReport {
    let rows = df.height();
    let per_column: OrderedMap<MissingCount> = df
        .columns()
        .iter()
        .map(|column| {
            let count = column.null_count();
            let pct = 100.0 * count as f64 / rows as f64;
            (column.name().to_string(), MissingCount { count, pct })
        })
        .collect();
    let total_missing_cells: usize = per_column.values().map(|m| m.count).sum();

    MissingReport {
        per_column,
        total_missing_cells,
        missing_cells_pct: 100.0 * total_missing_cells as f64 / (rows * df.width()) as f64,
    }
}

/// Rows equal (in every column) to an earlier row. First occurrences are not counted.
fn count_duplicate_rows(df: &DataFrame) -> AnalysisResult<usize> {
    let distinct = df
        .clone()
        .lazy()
        .unique(None, UniqueKeepStrategy::First)
        .collect()?
        .height();
    Ok(df.height() - distinct)
}

fn sample_rows(dataset: &DataSet) -> Vec<serde_json::Map<String, serde_json::Value>> {
    dataset
        .rows
        .iter()
        .take(SAMPLE_ROWS)
        .map(|row| {
            dataset
                .schema
                .field_names()
                .zip(row)
                .map(|(name, value)| (name.to_string(), value.to_json()))
                .collect()
        })
        .collect()
}
