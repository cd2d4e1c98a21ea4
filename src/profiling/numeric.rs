//! Numeric column statistics.

use polars::prelude::*;

use super::report::NumericSummary;

/// Summarize a numeric column. Missing cells are nulls and are skipped.
///
/// Standard deviation is the sample (n-1) estimate. It is `None` with fewer than two values; a
/// constant series of two or more values reports exactly `0.0`. Quartiles interpolate linearly
/// between closest ranks.
pub fn summarize(values: &Float64Chunked) -> PolarsResult<NumericSummary> {
    let count = values.len() - values.null_count();
    let min = values.min();
    let max = values.max();

    let std = match count {
        0 | 1 => None,
        _ if min == max => Some(0.0),
        _ => values.std(1),
    };

    Ok(NumericSummary {
        count: count as f64,
        mean: values.mean().and_then(finite),
        std: std.and_then(finite),
        min: min.and_then(finite),
        p25: values.quantile(0.25, QuantileMethod::Linear)?.and_then(finite),
        p50: values.quantile(0.50, QuantileMethod::Linear)?.and_then(finite),
        p75: values.quantile(0.75, QuantileMethod::Linear)?.and_then(finite),
        max: max.and_then(finite),
    })
}

/// Drops NaN and infinities so they report as `null`.
pub(crate) fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
