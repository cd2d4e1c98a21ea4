//! Value-frequency summaries for text columns.

use polars::prelude::*;

use super::frame::display_key;
use super::report::{CategoricalSummary, TopValue};

/// Number of most frequent values reported per column.
pub const TOP_VALUES: usize = 5;

const VALUE: &str = "value";
const COUNT: &str = "count";

/// Summarize a text column by value frequency.
///
/// `keys` holds one typed key per row (see [`super::frame::typed_key`]), null for missing cells.
/// Missing cells are counted as their own value (`value: null`) but not as a distinct value.
/// Values with equal counts keep the order in which they first appear.
pub fn summarize(keys: &Series, rows: usize) -> PolarsResult<CategoricalSummary> {
    let keys = keys.clone().with_name(VALUE.into());
    let counts = DataFrame::new_infer_height(vec![keys.into_column()])?
        .lazy()
        .group_by_stable([col(VALUE)])
        .agg([len().alias(COUNT)])
        .sort(
            [COUNT],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let values = counts.column(VALUE)?.as_materialized_series().str()?;
    let totals = counts
        .column(COUNT)?
        .as_materialized_series()
        .cast(&DataType::UInt64)?;
    let totals = totals.u64()?;

    let unique = values.len() - values.null_count();
    let denom = rows.max(1) as f64;
    let top_values = values
        .into_iter()
        .zip(totals.into_iter())
        .take(TOP_VALUES)
        .map(|(value, count)| {
            let count = count.unwrap_or(0) as usize;
            TopValue {
                value: value.map(display_key),
                count,
                pct: 100.0 * count as f64 / denom,
            }
        })
        .collect();

    Ok(CategoricalSummary { unique, top_values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiling::frame::typed_key;
    use crate::types::Value;

    fn keys(values: &[Value]) -> Series {
        let keys: Vec<Option<String>> = values.iter().map(typed_key).collect();
        Series::new("c".into(), keys)
    }

    fn s(v: &str) -> Value {
        Value::Utf8(v.to_string())
    }

    #[test]
    fn counts_missing_as_null_value_but_not_as_unique() {
        let values = [s("a"), Value::Null, s("a"), Value::Null, Value::Null];
        let summary = summarize(&keys(&values), values.len()).unwrap();
        assert_eq!(summary.unique, 1);
        assert_eq!(summary.top_values[0].value, None);
        assert_eq!(summary.top_values[0].count, 3);
        assert_eq!(summary.top_values[0].pct, 60.0);
        assert_eq!(summary.top_values[1].value.as_deref(), Some("a"));
    }

    #[test]
    fn keeps_first_appearance_order_for_ties_and_truncates() {
        let values: Vec<Value> = ["f", "e", "d", "c", "b", "a", "a"].iter().map(|v| s(v)).collect();
        let summary = summarize(&keys(&values), values.len()).unwrap();
        let names: Vec<_> = summary
            .top_values
            .iter()
            .map(|t| t.value.clone().unwrap_or_default())
            .collect();
        assert_eq!(summary.unique, 6);
        assert_eq!(names, vec!["a", "f", "e", "d", "c"]);
    }

    #[test]
    fn values_of_different_kinds_are_distinct() {
        let values = [Value::Int64(1), s("1"), Value::Bool(true), s("true"), s("1")];
        let summary = summarize(&keys(&values), values.len()).unwrap();
        assert_eq!(summary.unique, 4);
        let top: Vec<(Option<&str>, usize)> = summary
            .top_values
            .iter()
            .map(|t| (t.value.as_deref(), t.count))
            .collect();
        assert_eq!(
            top,
            vec![(Some("1"), 2), (Some("1"), 1), (Some("true"), 1), (Some("true"), 1)]
        );
    }
}
