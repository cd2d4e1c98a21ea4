//! JSON records ingestion.
//!
//! Input is an ordered list of row objects, usually wrapped as `{"records": [...]}`. Columns are the
//! union of keys across records in first-appearance order; a key absent from a record is a missing
//! cell in that row.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

use super::csv::transpose;

/// Request body accepted by the records endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsPayload {
    /// Row objects, in row order.
    pub records: Vec<serde_json::Value>,
}

/// Ingest a `{"records": [...]}` document from an in-memory string.
pub fn ingest_records_from_str(input: &str) -> IngestionResult<DataSet> {
    let payload: RecordsPayload = serde_json::from_str(input)?;
    ingest_records(&payload.records)
}

/// Ingest a list of JSON row objects into a [`DataSet`].
///
/// Every element must be a JSON object. Column types are inferred from non-null cells:
/// all integers give [`DataType::Int64`], any mix of numbers gives [`DataType::Float64`], all
/// booleans give [`DataType::Bool`], and anything else (strings, mixed kinds, nested values) gives
/// [`DataType::Utf8`]. Nested arrays/objects are kept as their compact JSON text.
pub fn ingest_records(records: &[serde_json::Value]) -> IngestionResult<DataSet> {
    let mut names: Vec<String> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut objects = Vec::with_capacity(records.len());

    for (idx0, record) in records.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = record.as_object().ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!("record {row_num} is not a json object"),
        })?;
        for key in obj.keys() {
            if !positions.contains_key(key.as_str()) {
                positions.insert(key.as_str(), names.len());
                names.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let mut fields = Vec::with_capacity(names.len());
    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let cells: Vec<Option<&serde_json::Value>> = objects
            .iter()
            .map(|obj| obj.get(&name).filter(|v| !v.is_null()))
            .collect();
        let data_type = infer_column_type(cells.iter().flatten().copied());
        columns.push(
            cells
                .into_iter()
                .map(|cell| cell.map_or(Value::Null, |v| convert_json_value(v, data_type)))
                .collect::<Vec<_>>(),
        );
        fields.push(Field::new(name, data_type));
    }

    Ok(DataSet::new(
        Schema::new(fields),
        transpose(columns, objects.len()),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonKind {
    Int,
    Float,
    Bool,
    Str,
    Nested,
}

fn kind_of(v: &serde_json::Value) -> JsonKind {
    match v {
        serde_json::Value::Number(n) if n.as_i64().is_some() => JsonKind::Int,
        serde_json::Value::Number(_) => JsonKind::Float,
        serde_json::Value::Bool(_) => JsonKind::Bool,
        serde_json::Value::String(_) => JsonKind::Str,
        _ => JsonKind::Nested,
    }
}

fn infer_column_type<'a>(cells: impl Iterator<Item = &'a serde_json::Value>) -> DataType {
    let mut kinds = cells.map(kind_of).peekable();
    let Some(&first) = kinds.peek() else {
        return DataType::Utf8;
    };

    let mut numeric = matches!(first, JsonKind::Int | JsonKind::Float);
    let mut all_int = first == JsonKind::Int;
    let mut all_bool = first == JsonKind::Bool;
    for kind in kinds {
        numeric &= matches!(kind, JsonKind::Int | JsonKind::Float);
        all_int &= kind == JsonKind::Int;
        all_bool &= kind == JsonKind::Bool;
    }

    if all_int {
        DataType::Int64
    } else if numeric {
        DataType::Float64
    } else if all_bool {
        DataType::Bool
    } else {
        DataType::Utf8
    }
}

fn convert_json_value(v: &serde_json::Value, data_type: DataType) -> Value {
    match (data_type, v) {
        (DataType::Int64, serde_json::Value::Number(n)) => {
            n.as_i64().map_or(Value::Null, Value::Int64)
        }
        (DataType::Float64, serde_json::Value::Number(n)) => {
            n.as_f64().map_or(Value::Null, Value::Float64)
        }
        // Object columns keep each cell's own kind.
        (_, serde_json::Value::Number(n)) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => n.as_f64().map_or(Value::Null, Value::Float64),
        },
        (_, serde_json::Value::Bool(b)) => Value::Bool(*b),
        (_, serde_json::Value::String(s)) => Value::Utf8(s.clone()),
        (_, serde_json::Value::Null) => Value::Null,
        (_, nested) => Value::Utf8(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_and_floats_widen_to_float() {
        let ds = ingest_records(&[json!({"x": 1}), json!({"x": 2.5})]).unwrap();
        assert_eq!(ds.schema.fields[0].data_type, DataType::Float64);
        assert_eq!(ds.rows[0][0], Value::Float64(1.0));
    }

    #[test]
    fn mixed_kinds_become_object_and_keep_cell_values() {
        let ds = ingest_records(&[json!({"x": 1}), json!({"x": "a"}), json!({"x": true})]).unwrap();
        assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
        assert_eq!(
            ds.rows.iter().map(|r| r[0].clone()).collect::<Vec<_>>(),
            vec![Value::Int64(1), Value::Utf8("a".to_string()), Value::Bool(true)]
        );
    }

    #[test]
    fn nested_values_are_kept_as_json_text() {
        let ds = ingest_records(&[json!({"tags": ["a", "b"]})]).unwrap();
        assert_eq!(ds.rows[0][0], Value::Utf8(r#"["a","b"]"#.to_string()));
    }

    #[test]
    fn all_null_column_is_object() {
        let ds = ingest_records(&[json!({"x": null}), json!({})]).unwrap();
        assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
        assert_eq!(ds.rows, vec![vec![Value::Null], vec![Value::Null]]);
    }
}
