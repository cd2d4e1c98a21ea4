//! Serializable summary report types.
//!
//! Field names are the JSON keys returned by the HTTP API.

use serde::{Serialize, Serializer};

/// A map that serializes its entries in insertion order.
///
/// Report maps are keyed by column name and follow the dataset's column order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Callers insert each key once.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        self.0.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Descriptive statistics summary of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub shape: Shape,
    pub columns: Vec<String>,
    /// Column name to dtype tag (`int64`, `float64`, `bool`, `object`).
    pub dtypes: OrderedMap<String>,
    pub memory_usage_bytes: usize,
    pub missing: MissingReport,
    pub duplicates: DuplicateReport,
    pub numeric_summary: OrderedMap<NumericSummary>,
    pub categorical_summary: OrderedMap<CategoricalSummary>,
    pub correlations: Vec<CorrelationPair>,
    /// Leading rows as column name to JSON value objects.
    pub sample: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingReport {
    pub per_column: OrderedMap<MissingCount>,
    pub total_missing_cells: usize,
    pub missing_cells_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissingCount {
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    pub row_duplicates: usize,
}

/// Statistics for one numeric column, computed over its non-missing values.
///
/// `None` serializes as `null` and marks a statistic that is undefined for the column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: f64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    /// Distinct non-missing values.
    pub unique: usize,
    pub top_values: Vec<TopValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopValue {
    /// `None` stands for missing cells.
    pub value: Option<String>,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPair {
    pub col_a: String,
    pub col_b: String,
    pub corr: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_map_serializes_in_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"zeta":1,"alpha":2}"#);
        assert_eq!(map.get("alpha"), Some(&2));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn numeric_summary_uses_percentile_keys_and_nulls() {
        let summary = NumericSummary {
            count: 1.0,
            mean: Some(2.0),
            std: None,
            min: Some(2.0),
            p25: Some(2.0),
            p50: Some(2.0),
            p75: Some(2.0),
            max: Some(2.0),
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["std"], serde_json::Value::Null);
        assert_eq!(json["25%"], serde_json::json!(2.0));
        assert_eq!(json["50%"], serde_json::json!(2.0));
    }
}
