//! Seed data: the built-in food list and its CSV file
//!
//! The seed CSV is created on first run and imported on every start;
//! names already in the database are skipped by the store.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::store::FoodDatabase;
use crate::types::{FoodRecord, NutrientColumn, NutrientProfile};

pub const NAME_COLUMN: &str = "nome_alimento";

/// Per 100g: sodium (mg), saturated fat, fiber, protein, carbohydrate (g).
const DEFAULT_FOODS: [(&str, [f64; 5]); 50] = [
    ("Bacon Frito", [1500.0, 15.0, 0.0, 37.0, 0.0]),
    ("Salgadinho Queijo", [850.0, 6.0, 1.0, 10.0, 55.0]),
    ("Queijo Mussarela", [718.0, 11.2, 0.0, 24.0, 1.0]),
    ("Mortadela", [1200.0, 10.3, 0.0, 14.0, 1.0]),
    ("Azeite de Oliva", [2.0, 14.0, 0.0, 0.0, 0.0]),
    ("Pao Integral", [450.0, 0.7, 6.9, 9.0, 45.0]),
    ("Iogurte Natural Integral", [60.0, 4.5, 0.0, 4.5, 6.0]),
    ("Biscoito Maizena", [150.0, 3.0, 1.0, 7.0, 75.0]),
    ("Amendoim Torrado", [5.0, 7.0, 9.0, 25.0, 16.0]),
    ("Salmao Grelhado", [46.0, 3.1, 0.0, 20.0, 0.0]),
    ("Banana Prata", [1.0, 0.1, 2.0, 1.3, 27.0]),
    ("Feijao Cozido", [235.0, 0.3, 8.5, 9.0, 14.0]),
    ("Peito de Frango", [95.0, 1.2, 0.0, 31.0, 0.0]),
    ("Brocolis Cozido", [10.0, 0.2, 3.0, 2.8, 6.0]),
    ("Arroz Branco Cozido", [1.0, 0.1, 1.0, 2.5, 28.0]),
    ("Refrigerante Cola", [10.0, 0.0, 0.0, 0.0, 38.0]),
    ("Leite Integral", [45.0, 2.0, 0.0, 3.2, 4.7]),
    ("Batata Doce", [15.0, 0.1, 2.6, 1.6, 20.0]),
    ("Chocolate ao Leite", [75.0, 10.0, 2.0, 7.0, 55.0]),
    ("Cenoura Cozida", [35.0, 0.1, 2.6, 0.6, 9.0]),
    ("Hamburguer Industrial", [600.0, 7.0, 1.0, 18.0, 15.0]),
    ("Gelatina", [50.0, 0.0, 0.0, 1.5, 15.0]),
    ("Pao Frances", [550.0, 0.5, 1.5, 8.0, 55.0]),
    ("Mel", [4.0, 0.0, 0.0, 0.1, 82.0]),
    ("Manga", [2.0, 0.1, 1.6, 0.8, 15.0]),
    ("Pipoca (Oleo e Sal)", [300.0, 2.5, 12.0, 11.0, 65.0]),
    ("Bolo Simples", [250.0, 4.0, 0.5, 5.0, 40.0]),
    ("Atum em Oleo (Drenado)", [380.0, 1.5, 0.0, 25.0, 0.0]),
    ("Ovo Cozido", [133.0, 3.7, 0.0, 13.0, 0.6]),
    ("Lentilha Cozida", [200.0, 0.1, 7.9, 9.0, 20.0]),
    ("Abacaxi", [1.0, 0.0, 1.4, 0.5, 13.0]),
    ("Abacate", [10.0, 2.0, 6.7, 2.0, 8.5]),
    ("Alface", [1.0, 0.0, 2.0, 1.2, 3.0]),
    ("Aveia", [7.0, 1.4, 10.6, 17.0, 66.0]),
    ("Beterraba Cozida", [70.0, 0.1, 2.8, 1.6, 10.0]),
    ("Cebola Cozida", [4.0, 0.0, 1.7, 1.1, 7.0]),
    ("Cerveja Lager", [10.0, 0.0, 0.0, 0.5, 3.5]),
    ("Champignon", [5.0, 0.1, 1.0, 3.0, 3.5]),
    ("Couve Flor", [30.0, 0.1, 2.0, 1.9, 5.0]),
    ("Doce de Leite", [90.0, 4.5, 0.0, 6.0, 56.0]),
    ("Goiaba", [2.0, 0.1, 5.4, 2.5, 14.0]),
    ("Hamburguer Caseiro", [90.0, 4.0, 0.5, 25.0, 0.0]),
    ("Kiwi", [3.0, 0.1, 3.0, 1.1, 15.0]),
    ("Maionese Industrial", [750.0, 6.0, 0.0, 0.5, 0.5]),
    ("Mandioca Cozida", [5.0, 0.1, 1.8, 1.0, 30.0]),
    ("Milho Cozido", [15.0, 0.6, 2.4, 3.2, 21.0]),
    ("Nescau", [300.0, 1.5, 1.0, 5.0, 80.0]),
    ("Ostra Crua", [300.0, 1.0, 0.0, 9.0, 4.0]),
    ("Pera", [1.0, 0.1, 3.1, 0.4, 15.0]),
    ("Tofu", [7.0, 0.8, 0.5, 10.0, 1.9]),
];

/// The built-in food dataset.
pub fn default_foods() -> Vec<FoodRecord> {
    DEFAULT_FOODS
        .iter()
        .map(|(name, v)| FoodRecord::new(*name, NutrientProfile::new(v[0], v[1], v[2], v[3], v[4])))
        .collect()
}

/// Build a frame of foods: a name column then the five nutrients, with
/// headers chosen by the caller.
pub fn foods_to_frame(
    foods: &[FoodRecord],
    name_header: &str,
    header_for: fn(&NutrientColumn) -> &'static str,
) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(6);
    columns.push(Column::new(
        name_header.into(),
        foods.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
    ));
    for nutrient in NutrientColumn::ALL {
        columns.push(Column::new(
            header_for(&nutrient).into(),
            foods.iter().map(|f| f.profile.get(nutrient)).collect::<Vec<f64>>(),
        ));
    }

    DataFrame::new(columns).with_context(|| "Failed to build food frame")
}

/// Write the default dataset to `path` unless the file already exists.
///
/// Returns `true` when the file was created.
pub fn ensure_seed_file(path: &Path) -> Result<bool> {
    if path.exists() {
        tracing::info!(path = %path.display(), "seed file already exists");
        return Ok(false);
    }

    let mut df = foods_to_frame(&default_foods(), NAME_COLUMN, NutrientColumn::column_name)?;
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create seed file: {:?}", path))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("Failed to write seed file: {:?}", path))?;

    tracing::info!(path = %path.display(), foods = df.height(), "seed file created");
    Ok(true)
}

/// Rows read from a seed file.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub rows: Vec<FoodRecord>,
    /// Malformed rows that were left out.
    pub skipped: usize,
}

/// Fields in a well-formed seed row: name then the five nutrients.
const SEED_FIELDS: usize = 6;

/// Read a seed CSV. Malformed rows are logged and skipped.
///
/// The first line is a header. Each following row must hold exactly
/// [`SEED_FIELDS`] fields: name, sodium, saturated fat, fiber, protein,
/// carbohydrate. An empty file yields an empty report.
pub fn load_seed_file(path: &Path) -> Result<SeedReport> {
    // One spare column so over-long rows can be detected; every column as
    // text so one bad cell cannot fail the whole read
    let schema: Schema = (0..=SEED_FIELDS)
        .map(|i| (PlSmallStr::from(format!("field_{}", i)), DataType::String))
        .collect();

    let read = CsvReadOptions::default()
        .with_has_header(false)
        .with_schema(Some(Arc::new(schema)))
        .map_parse_options(|opts| opts.with_truncate_ragged_lines(true))
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish();

    let df = match read {
        Ok(df) => df,
        Err(PolarsError::NoData(_)) => {
            tracing::warn!(path = %path.display(), "seed file is empty, nothing to import");
            return Ok(SeedReport::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load seed CSV: {}", path.display()))
        }
    };

    if df.height() <= 1 {
        tracing::warn!(path = %path.display(), "seed file has no data rows");
        return Ok(SeedReport::default());
    }

    let columns = df.get_columns();
    let names = columns[0]
        .str()
        .with_context(|| "Name column is not text")?;
    let values = columns[1..SEED_FIELDS]
        .iter()
        .map(|c| c.str().with_context(|| format!("Column '{}' is not text", c.name())))
        .collect::<Result<Vec<_>>>()?;
    let overflow = columns[SEED_FIELDS]
        .str()
        .with_context(|| "Overflow column is not text")?;

    let mut report = SeedReport::default();
    // Row 0 is the header
    for idx in 1..df.height() {
        let line = idx + 1;

        if overflow.get(idx).is_some() {
            tracing::warn!(line, "skipping seed row with more than {} fields", SEED_FIELDS);
            report.skipped += 1;
            continue;
        }

        let name = names.get(idx).map(str::trim).unwrap_or("");
        if name.is_empty() {
            tracing::warn!(line, "skipping seed row without a name");
            report.skipped += 1;
            continue;
        }

        let parsed: Option<Vec<f64>> = values
            .iter()
            .map(|col| col.get(idx).and_then(|cell| cell.trim().parse::<f64>().ok()))
            .collect();

        let Some(v) = parsed else {
            tracing::warn!(line, name, "skipping seed row with missing or non-numeric values");
            report.skipped += 1;
            continue;
        };

        let profile = NutrientProfile::new(v[0], v[1], v[2], v[3], v[4]);
        if !profile.is_valid() {
            tracing::warn!(line, name, "skipping seed row with negative or non-finite values");
            report.skipped += 1;
            continue;
        }

        report.rows.push(FoodRecord::new(name, profile));
    }

    Ok(report)
}

/// Counts from importing a seed file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

/// Load a seed file and insert every valid row.
pub fn import_into(db: &FoodDatabase, path: &Path) -> Result<ImportSummary> {
    tracing::info!(path = %path.display(), "reading seed file");
    let report = load_seed_file(path)?;

    let mut summary = ImportSummary {
        skipped: report.skipped,
        ..Default::default()
    };
    for food in &report.rows {
        let inserted = db
            .insert_food(food)
            .with_context(|| format!("Failed to insert food '{}'", food.name))?;
        if inserted {
            summary.inserted += 1;
        } else {
            summary.duplicates += 1;
        }
    }

    tracing::info!(
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        skipped = summary.skipped,
        "seed import finished"
    );
    Ok(summary)
}
