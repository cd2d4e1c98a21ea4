//! Delimited text (CSV/TSV) ingestion with schema inference.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Cell texts that are read as missing values.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Ingest a delimited file into an in-memory [`DataSet`].
pub fn ingest_delimited_from_path(path: impl AsRef<Path>, delimiter: u8) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest delimited bytes (an uploaded file body) into an in-memory [`DataSet`].
pub fn ingest_delimited_from_bytes(bytes: &[u8], delimiter: u8) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(bytes);
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
///
/// Rules:
///
/// - The first record is the header row; repeated names become `name.1`, `name.2`, ...
/// - Every record must have as many fields as the header (unless the reader is `flexible`, in
///   which case short rows are padded with missing values).
/// - Each column's [`DataType`] is inferred from its non-missing cells: integer, then float,
///   then boolean, falling back to text. Columns with no values are text.
pub fn ingest_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<DataSet> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "no columns to parse from input".to_string(),
        });
    }
    let names = dedupe_column_names(headers.iter());

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    let width = names.len();
    let cell = |record: &csv::StringRecord, idx: usize| -> Option<String> {
        let trimmed = record.get(idx).unwrap_or("").trim();
        if is_na(trimmed) {
            None
        } else {
            Some(trimmed.to_owned())
        }
    };

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(records.len()); width];
    for record in &records {
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(cell(record, idx));
        }
    }
    let records_len = records.len();
    drop(records);

    let mut fields = Vec::with_capacity(width);
    let mut typed_columns = Vec::with_capacity(width);
    for (name, raw) in names.into_iter().zip(columns) {
        let data_type = infer_column_type(raw.iter().filter_map(|c| c.as_deref()));
        typed_columns.push(
            raw.into_iter()
                .map(|c| match c {
                    Some(text) => parse_typed_value(text, data_type),
                    None => Value::Null,
                })
                .collect::<Vec<_>>(),
        );
        fields.push(Field::new(name, data_type));
    }

    Ok(DataSet::new(
        Schema::new(fields),
        transpose(typed_columns, records_len),
    ))
}

/// Turn column-major cells into row-major rows. `row_count` is explicit so a dataset with rows but
/// no columns keeps its rows.
pub(crate) fn transpose(columns: Vec<Vec<Value>>, row_count: usize) -> Vec<Vec<Value>> {
    let mut rows: Vec<Vec<Value>> = (0..row_count)
        .map(|_| Vec::with_capacity(columns.len()))
        .collect();
    for column in columns {
        for (row, value) in rows.iter_mut().zip(column) {
            row.push(value);
        }
    }
    rows
}

fn is_na(trimmed: &str) -> bool {
    NA_TOKENS.contains(&trimmed)
}

fn dedupe_column_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<&'a str, usize> = HashMap::new();
    let mut out = Vec::new();

    for name in names {
        let mut candidate = name.to_owned();
        if used.contains(&candidate) {
            let n = suffixes.entry(name).or_insert(0);
            loop {
                *n += 1;
                candidate = format!("{name}.{n}");
                if !used.contains(&candidate) {
                    break;
                }
            }
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> DataType {
    let mut seen_any = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;

    for text in cells {
        seen_any = true;
        if all_int && text.parse::<i64>().is_err() {
            all_int = false;
        }
        if all_float && text.parse::<f64>().is_err() {
            all_float = false;
        }
        if all_bool && parse_bool(text).is_none() {
            all_bool = false;
        }
        if !all_int && !all_float && !all_bool {
            break;
        }
    }

    match (seen_any, all_int, all_float, all_bool) {
        (false, ..) => DataType::Utf8,
        (true, true, _, _) => DataType::Int64,
        (true, false, true, _) => DataType::Float64,
        (true, false, false, true) => DataType::Bool,
        _ => DataType::Utf8,
    }
}

fn parse_typed_value(text: String, data_type: DataType) -> Value {
    match data_type {
        DataType::Int64 => match text.parse::<i64>() {
            Ok(v) => Value::Int64(v),
            Err(_) => Value::Utf8(text),
        },
        DataType::Float64 => match text.parse::<f64>() {
            // Spellings such as "NAN" parse as NaN; they are missing values too.
            Ok(v) if v.is_nan() => Value::Null,
            Ok(v) => Value::Float64(v),
            Err(_) => Value::Utf8(text),
        },
        DataType::Bool => match parse_bool(&text) {
            Some(v) => Value::Bool(v),
            None => Value::Utf8(text),
        },
        DataType::Utf8 => Value::Utf8(text),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
