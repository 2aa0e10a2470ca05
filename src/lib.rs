//! Nutritional Risk Agent
//!
//! Classifies foods into risk tiers from five nutrient values per 100g.
//!
//! - `engine/`: threshold flags, ordered rule table, description resolver
//! - `statistics`: mean, sample variance/std dev, mode
//! - `store/`: DuckDB storage for foods and rule descriptions
//! - `seed`, `report`: CSV seed import and report export (Polars)
//! - `agent`: lookup → classify → describe pipeline
//! - `menu`: interactive terminal front end

pub mod agent;
pub mod app;
pub mod config;
pub mod engine;
pub mod menu;
pub mod report;
pub mod seed;
pub mod statistics;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use agent::RiskAgent;
pub use config::{AppConfig, RiskThresholds};
pub use engine::{DescriptionOutcome, RuleDescriptionResolver, RuleEngine, Verdict};
pub use store::{FoodDatabase, NutrientStore, RuleStore, StoreError};
pub use types::{ClassificationResult, FoodRecord, NutrientColumn, NutrientProfile, RiskTier};
