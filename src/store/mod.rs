//! Storage collaborators
//!
//! The engine consumes two capabilities: nutrient lookup and rule
//! description lookup. `FoodDatabase` provides both over DuckDB.

pub mod database;

pub use database::{FoodDatabase, CANONICAL_RULES};

use crate::types::{FoodRecord, NutrientColumn, NutrientProfile, RiskTier};

/// Storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] duckdb::Error),

    /// For stores not backed by DuckDB, e.g. a remote or closed backend.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Food nutrient data keyed by food name.
pub trait NutrientStore {
    /// Profile for an exact (case-sensitive) food name.
    fn lookup(&self, food_name: &str) -> Result<Option<NutrientProfile>, StoreError>;

    /// All food names, sorted.
    fn all_names(&self) -> Result<Vec<String>, StoreError>;

    /// Every stored value of one nutrient column.
    fn column_values(&self, column: NutrientColumn) -> Result<Vec<f64>, StoreError>;

    /// Every stored food with its profile.
    fn all_rows(&self) -> Result<Vec<FoodRecord>, StoreError>;
}

/// Stored rule descriptions.
pub trait RuleStore {
    /// First description in `tier` whose lowercased text contains `fragment`.
    fn find_description(
        &self,
        tier: RiskTier,
        fragment: &str,
    ) -> Result<Option<String>, StoreError>;
}

impl<T: NutrientStore + ?Sized> NutrientStore for &T {
    fn lookup(&self, food_name: &str) -> Result<Option<NutrientProfile>, StoreError> {
        (**self).lookup(food_name)
    }

    fn all_names(&self) -> Result<Vec<String>, StoreError> {
        (**self).all_names()
    }

    fn column_values(&self, column: NutrientColumn) -> Result<Vec<f64>, StoreError> {
        (**self).column_values(column)
    }

    fn all_rows(&self) -> Result<Vec<FoodRecord>, StoreError> {
        (**self).all_rows()
    }
}

impl<T: RuleStore + ?Sized> RuleStore for &T {
    fn find_description(
        &self,
        tier: RiskTier,
        fragment: &str,
    ) -> Result<Option<String>, StoreError> {
        (**self).find_description(tier, fragment)
    }
}
