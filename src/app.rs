//! Application start-up
//!
//! Order: open database → schema → rules → seed file → seed import.

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::seed::{ensure_seed_file, import_into, ImportSummary};
use crate::store::FoodDatabase;

/// Prepare a database for use: schema, rules and seed foods.
pub fn prepare(db: &FoodDatabase, config: &AppConfig) -> Result<ImportSummary> {
    db.create_schema().with_context(|| "Failed to create schema")?;
    db.seed_rules().with_context(|| "Failed to seed rules")?;
    ensure_seed_file(&config.seed_csv)?;
    import_into(db, &config.seed_csv)
}

/// Open the configured database and prepare it.
pub fn bootstrap(config: &AppConfig) -> Result<FoodDatabase> {
    let db = FoodDatabase::open(&config.db_path)
        .with_context(|| format!("Failed to open database: {:?}", config.db_path))?;
    prepare(&db, config)?;
    Ok(db)
}
