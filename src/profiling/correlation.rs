//! Pairwise Pearson correlation between numeric columns.

use polars::prelude::cov::pearson_corr;
use polars::prelude::*;

use super::report::CorrelationPair;

/// Pairs with a smaller absolute coefficient are not reported.
pub const MIN_ABS_CORRELATION: f64 = 0.5;
/// Upper bound on reported pairs.
pub const MAX_CORRELATION_PAIRS: usize = 20;

/// Pearson coefficient over rows where both values are present.
///
/// Returns `None` when the coefficient is undefined: fewer than two paired rows, or either side
/// has zero variance.
pub fn pearson(x: &Float64Chunked, y: &Float64Chunked) -> PolarsResult<Option<f64>> {
    let both = &x.is_not_null() & &y.is_not_null();
    let x = x.filter(&both)?;
    let y = y.filter(&both)?;
    if x.len() < 2 {
        return Ok(None);
    }

    Ok(pearson_corr(&x, &y)
        .filter(|r| r.is_finite())
        .map(|r| r.clamp(-1.0, 1.0)))
}

/// Strong correlations among `columns` (name, values), strongest first.
///
/// Every unordered pair is visited once with the earlier column as `col_a`. Undefined
/// coefficients are skipped, pairs below [`MIN_ABS_CORRELATION`] are dropped, and the list is
/// truncated to [`MAX_CORRELATION_PAIRS`]. Equal strengths keep column-pair order.
pub fn strong_pairs(columns: &[(&str, Float64Chunked)]) -> PolarsResult<Vec<CorrelationPair>> {
    if columns.len() < 2 {
        return Ok(Vec::new());
    }

    let mut pairs = Vec::new();
    for (i, (name_a, values_a)) in columns.iter().enumerate() {
        for (name_b, values_b) in &columns[i + 1..] {
            let Some(corr) = pearson(values_a, values_b)? else {
                continue;
            };
            if corr.abs() >= MIN_ABS_CORRELATION {
                pairs.push(CorrelationPair {
                    col_a: name_a.to_string(),
                    col_b: name_b.to_string(),
                    corr,
                });
            }
        }
    }

    pairs.sort_by(|a, b| b.corr.abs().total_cmp(&a.corr.abs()));
    pairs.truncate(MAX_CORRELATION_PAIRS);
    Ok(pairs)
}
