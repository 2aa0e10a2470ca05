//! Descriptive statistics over nutrient columns
//!
//! Reporting only; the rule engine never calls into this module.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::types::NutrientColumn;

/// Modal values, in order of first appearance.
pub type Modes = SmallVec<[f64; 4]>;

/// Arithmetic mean. Empty input gives 0.0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (n - 1 denominator) and standard deviation.
///
/// Fewer than two samples gives (0.0, 0.0).
pub fn variance_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.len() < 2 {
        return (0.0, 0.0);
    }

    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    let variance = sum_sq / (values.len() - 1) as f64;

    (variance, variance.sqrt())
}

/// Most frequent values.
///
/// Returns `None` for empty input, and when every value is equally frequent
/// with as many modal values as samples (no real mode).
pub fn mode(values: &[f64]) -> Option<Modes> {
    if values.is_empty() {
        return None;
    }

    // Keyed on bit pattern; -0.0 folds into 0.0 so they count together
    let mut counts: FxHashMap<u64, usize> = FxHashMap::default();
    let mut first_seen: Vec<f64> = Vec::new();
    for &v in values {
        let v = if v == 0.0 { 0.0 } else { v };
        let count = counts.entry(v.to_bits()).or_insert(0);
        if *count == 0 {
            first_seen.push(v);
        }
        *count += 1;
    }

    let max_count = counts.values().copied().max().unwrap_or(0);
    let modes: Modes = first_seen
        .into_iter()
        .filter(|v| counts.get(&v.to_bits()) == Some(&max_count))
        .collect();

    if modes.len() == values.len() {
        None
    } else {
        Some(modes)
    }
}

/// One row of the statistics table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: NutrientColumn,
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub mode: Option<Vec<f64>>,
}

/// Summarize a column's values.
pub fn summarize(column: NutrientColumn, values: &[f64]) -> ColumnSummary {
    let (variance, std_dev) = variance_and_std_dev(values);
    ColumnSummary {
        column,
        count: values.len(),
        mean: mean(values),
        variance,
        std_dev,
        mode: mode(values).map(|m| m.into_vec()),
    }
}
