//! Shared data types for risk classification.
//!
//! Nutrient values are always per 100g:
//! - sodium in mg
//! - saturated fat, fiber, protein, carbohydrate in g

use std::fmt;

// ============================================================================
// Nutrient Profile
// ============================================================================

/// The five measured values that drive classification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutrientProfile {
    pub sodium: f64,
    pub saturated_fat: f64,
    pub fiber: f64,
    pub protein: f64,
    pub carbohydrate: f64,
}

impl NutrientProfile {
    pub fn new(
        sodium: f64,
        saturated_fat: f64,
        fiber: f64,
        protein: f64,
        carbohydrate: f64,
    ) -> Self {
        Self {
            sodium,
            saturated_fat,
            fiber,
            protein,
            carbohydrate,
        }
    }

    /// Value stored under the given column.
    pub fn get(&self, column: NutrientColumn) -> f64 {
        match column {
            NutrientColumn::Sodium => self.sodium,
            NutrientColumn::SaturatedFat => self.saturated_fat,
            NutrientColumn::Fiber => self.fiber,
            NutrientColumn::Protein => self.protein,
            NutrientColumn::Carbohydrate => self.carbohydrate,
        }
    }

    /// Every value is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        NutrientColumn::ALL
            .iter()
            .all(|&c| self.get(c).is_finite() && self.get(c) >= 0.0)
    }
}

/// A stored food: its name plus nutrient profile.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecord {
    pub name: String,
    pub profile: NutrientProfile,
}

impl FoodRecord {
    pub fn new(name: impl Into<String>, profile: NutrientProfile) -> Self {
        Self {
            name: name.into(),
            profile,
        }
    }
}

// ============================================================================
// Nutrient Columns
// ============================================================================

/// Closed set of nutrient columns in the `alimentos` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientColumn {
    Sodium,
    SaturatedFat,
    Fiber,
    Protein,
    Carbohydrate,
}

impl NutrientColumn {
    pub const ALL: [NutrientColumn; 5] = [
        NutrientColumn::Sodium,
        NutrientColumn::SaturatedFat,
        NutrientColumn::Fiber,
        NutrientColumn::Protein,
        NutrientColumn::Carbohydrate,
    ];

    /// Column name in the database and seed CSV.
    pub fn column_name(&self) -> &'static str {
        match self {
            NutrientColumn::Sodium => "sodio",
            NutrientColumn::SaturatedFat => "gordura_saturada",
            NutrientColumn::Fiber => "fibra",
            NutrientColumn::Protein => "proteina",
            NutrientColumn::Carbohydrate => "carboidrato",
        }
    }

    /// Header used in the exported report.
    pub fn report_header(&self) -> &'static str {
        match self {
            NutrientColumn::Sodium => "Sodio",
            NutrientColumn::SaturatedFat => "Gordura_Saturada",
            NutrientColumn::Fiber => "Fibra",
            NutrientColumn::Protein => "Proteina",
            NutrientColumn::Carbohydrate => "Carboidrato",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            NutrientColumn::Sodium => "mg",
            _ => "g",
        }
    }
}

impl fmt::Display for NutrientColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ============================================================================
// Risk Tier
// ============================================================================

/// Output classification. `Gray` means the food was not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskTier {
    Red,
    Yellow,
    Green,
    Gray,
}

impl RiskTier {
    /// Tier code as stored in the `regras` table and shown to the user.
    pub fn code(&self) -> &'static str {
        match self {
            RiskTier::Red => "VERMELHO",
            RiskTier::Yellow => "AMARELO",
            RiskTier::Green => "VERDE",
            RiskTier::Gray => "CINZA",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Classification Result
// ============================================================================

pub const NOT_FOUND_LABEL: &str = "Não Encontrado";
pub const NOT_FOUND_DESCRIPTION: &str = "Dados do alimento não encontrados no sistema.";

/// Outcome of analysing one food, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub tier: RiskTier,
    pub label: String,
    pub description: String,
    pub profile: NutrientProfile,
}

impl ClassificationResult {
    /// Result for a food absent from the store: gray tier, zeroed values.
    pub fn not_found() -> Self {
        Self {
            tier: RiskTier::Gray,
            label: NOT_FOUND_LABEL.to_string(),
            description: NOT_FOUND_DESCRIPTION.to_string(),
            profile: NutrientProfile::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_and_units() {
        let names: Vec<_> = NutrientColumn::ALL.iter().map(|c| c.column_name()).collect();
        assert_eq!(names, vec!["sodio", "gordura_saturada", "fibra", "proteina", "carboidrato"]);
        assert_eq!(NutrientColumn::Sodium.unit(), "mg");
        assert_eq!(NutrientColumn::Fiber.unit(), "g");
    }

    #[test]
    fn test_tier_codes() {
        assert_eq!(RiskTier::Red.to_string(), "VERMELHO");
        assert_eq!(RiskTier::Gray.code(), "CINZA");
    }

    #[test]
    fn test_not_found_is_zeroed() {
        let result = ClassificationResult::not_found();
        assert_eq!(result.tier, RiskTier::Gray);
        assert_eq!(result.label, "Não Encontrado");
        assert_eq!(result.profile, NutrientProfile::default());
    }

    #[test]
    fn test_profile_validity() {
        assert!(NutrientProfile::new(0.0, 0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!NutrientProfile::new(-1.0, 0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!NutrientProfile::new(1.0, f64::NAN, 0.0, 0.0, 0.0).is_valid());
    }
}
