//! Conversion from [`DataSet`] into a polars [`DataFrame`].
//!
//! Numeric and boolean columns map onto native polars dtypes. Text columns may hold cells of
//! several kinds (a JSON column with `1`, `"1"` and `true`), so each cell is stored as its JSON
//! text: `1` and `"1"` stay distinct when grouped or hashed.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PlSmallStr, PolarsResult, Series};

use crate::types::{DataSet, DataType, Value};

/// Build a frame with one column per schema field, in schema order.
pub fn to_frame(dataset: &DataSet) -> PolarsResult<DataFrame> {
    let columns = (0..dataset.column_count())
        .map(|idx| to_column(dataset, idx))
        .collect();
    DataFrame::new_infer_height(columns)
}

fn to_column(dataset: &DataSet, idx: usize) -> Column {
    let field = &dataset.schema.fields[idx];
    let name = PlSmallStr::from(field.name.as_str());
    let cells = dataset.column(idx);

    let series = match field.data_type {
        DataType::Int64 => {
            let values: Vec<Option<i64>> = cells
                .map(|v| match v {
                    Value::Int64(i) => Some(*i),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
        DataType::Float64 => {
            let values: Vec<Option<f64>> = cells
                .map(|v| v.as_f64().filter(|x| !x.is_nan()).map(unsigned_zero))
                .collect();
            Series::new(name, values)
        }
        DataType::Bool => {
            let values: Vec<Option<bool>> = cells
                .map(|v| match v {
                    Value::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
        DataType::Utf8 => {
            let values: Vec<Option<String>> = cells.map(typed_key).collect();
            Series::new(name, values)
        }
    };
    series.into_column()
}

/// `-0.0` and `0.0` are the same value for grouping.
fn unsigned_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

/// JSON text of a cell, `None` when missing.
pub fn typed_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_json().to_string()),
    }
}

/// Human-readable form of a [`typed_key`]: strings lose their quotes, other kinds keep their
/// JSON text.
pub fn display_key(key: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(key) {
        Ok(serde_json::Value::String(s)) => s,
        _ => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, Schema};

    #[test]
    fn text_keys_keep_cell_kinds_apart() {
        let int = typed_key(&Value::Int64(1)).unwrap();
        let text = typed_key(&Value::Utf8("1".to_string())).unwrap();
        assert_ne!(int, text);
        assert_eq!(display_key(&int), "1");
        assert_eq!(display_key(&text), "1");
        assert_eq!(display_key(&typed_key(&Value::Bool(true)).unwrap()), "true");
        assert_eq!(typed_key(&Value::Null), None);
    }

    #[test]
    fn frame_mirrors_schema() {
        let schema = Schema::new(vec![
            Field::new("n", DataType::Int64),
            Field::new("f", DataType::Float64),
            Field::new("s", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Float64(-0.0), Value::Utf8("a".to_string())],
                vec![Value::Null, Value::Float64(2.5), Value::Null],
            ],
        );
        let frame = to_frame(&ds).unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.width(), 3);
        let nulls: Vec<usize> = frame.columns().iter().map(|c| c.null_count()).collect();
        assert_eq!(nulls, vec![1, 0, 1]);
        let f = frame.column("f").unwrap().as_materialized_series().f64().unwrap().clone();
        assert!(f.get(0).unwrap().is_sign_positive());
    }
}
