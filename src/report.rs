//! Reports over the stored foods
//!
//! - CSV export of every stored row
//! - Per-nutrient descriptive statistics

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::seed::foods_to_frame;
use crate::statistics::{summarize, ColumnSummary};
use crate::store::NutrientStore;
use crate::types::NutrientColumn;

pub const REPORT_NAME_HEADER: &str = "Nome_Alimento";

/// Write every stored food to `path`. Returns the number of rows written.
pub fn export_csv<S: NutrientStore>(store: &S, path: &Path) -> Result<usize> {
    let rows = store.all_rows().with_context(|| "Failed to read foods for export")?;
    let mut df = foods_to_frame(&rows, REPORT_NAME_HEADER, NutrientColumn::report_header)?;

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create report file: {:?}", path))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("Failed to write report file: {:?}", path))?;

    tracing::info!(path = %path.display(), rows = rows.len(), "report exported");
    Ok(rows.len())
}

/// Statistics for each of the five nutrient columns.
pub fn nutrient_summaries<S: NutrientStore>(store: &S) -> Result<Vec<ColumnSummary>> {
    NutrientColumn::ALL
        .iter()
        .map(|&column| {
            let values = store
                .column_values(column)
                .with_context(|| format!("Failed to read column '{}'", column))?;
            Ok(summarize(column, &values))
        })
        .collect()
}
