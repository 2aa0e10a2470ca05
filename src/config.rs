//! Configuration
//!
//! - `RiskThresholds`: the five nutrient cut-offs used by the rule engine,
//!   optionally loaded from a JSON file.
//! - `AppConfig`: file locations and display flags read from the environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Nutrient cut-offs (per 100g). Comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Sodium above this is high (mg).
    pub sodium_high: f64,
    /// Saturated fat above this is high (g).
    pub fat_high: f64,
    /// Fiber below this is low (g).
    pub fiber_low: f64,
    /// Protein above this is high (g).
    pub protein_high: f64,
    /// Carbohydrate above this is high (g).
    pub carb_high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            sodium_high: 400.0,
            fat_high: 5.0,
            fiber_low: 3.0,
            protein_high: 10.0,
            carb_high: 30.0,
        }
    }
}

impl RiskThresholds {
    /// Load thresholds from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read thresholds file: {:?}", path))?;

        let thresholds: RiskThresholds = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse thresholds JSON: {:?}", path))?;

        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("sodium_high", self.sodium_high),
            ("fat_high", self.fat_high),
            ("fiber_low", self.fiber_low),
            ("protein_high", self.protein_high),
            ("carb_high", self.carb_high),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("Threshold '{}' must be a non-negative number, got {}", name, value);
            }
        }
        Ok(())
    }
}

pub const DEFAULT_DB_PATH: &str = "agente_nutricional.duckdb";
pub const DEFAULT_SEED_CSV: &str = "dados_alimentos.csv";
pub const DEFAULT_REPORT_CSV: &str = "relatorio_nutricional.csv";

/// Runtime settings for the terminal application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub seed_csv: PathBuf,
    pub report_csv: PathBuf,
    pub thresholds_path: Option<PathBuf>,
    pub clear_screen: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            seed_csv: PathBuf::from(DEFAULT_SEED_CSV),
            report_csv: PathBuf::from(DEFAULT_REPORT_CSV),
            thresholds_path: None,
            clear_screen: true,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    ///
    /// Keys: `NUTRI_DB_PATH`, `NUTRI_SEED_CSV`, `NUTRI_REPORT_CSV`,
    /// `NUTRI_THRESHOLDS`, `NUTRI_CLEAR_SCREEN`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            db_path: non_empty("NUTRI_DB_PATH").map(PathBuf::from).unwrap_or(defaults.db_path),
            seed_csv: non_empty("NUTRI_SEED_CSV").map(PathBuf::from).unwrap_or(defaults.seed_csv),
            report_csv: non_empty("NUTRI_REPORT_CSV")
                .map(PathBuf::from)
                .unwrap_or(defaults.report_csv),
            thresholds_path: non_empty("NUTRI_THRESHOLDS").map(PathBuf::from),
            clear_screen: non_empty("NUTRI_CLEAR_SCREEN")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(defaults.clear_screen),
        }
    }

    /// Thresholds from the configured file, or the defaults.
    pub fn load_thresholds(&self) -> Result<RiskThresholds> {
        match &self.thresholds_path {
            Some(path) => RiskThresholds::load(path),
            None => Ok(RiskThresholds::default()),
        }
    }
}
