//! Boolean risk flags derived from a nutrient profile.

use crate::config::RiskThresholds;
use crate::types::NutrientProfile;

/// Five threshold comparisons. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RiskFlags {
    pub sodium_high: bool,
    pub fat_high: bool,
    pub fiber_low: bool,
    pub protein_high: bool,
    pub carb_high: bool,
}

impl RiskFlags {
    pub fn evaluate(profile: &NutrientProfile, thresholds: &RiskThresholds) -> Self {
        Self {
            sodium_high: profile.sodium > thresholds.sodium_high,
            fat_high: profile.saturated_fat > thresholds.fat_high,
            fiber_low: profile.fiber < thresholds.fiber_low,
            protein_high: profile.protein > thresholds.protein_high,
            carb_high: profile.carbohydrate > thresholds.carb_high,
        }
    }

    /// Decode from the low five bits of `bits`, in field order.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            sodium_high: bits & 0b00001 != 0,
            fat_high: bits & 0b00010 != 0,
            fiber_low: bits & 0b00100 != 0,
            protein_high: bits & 0b01000 != 0,
            carb_high: bits & 0b10000 != 0,
        }
    }

    /// All 32 flag combinations.
    pub fn all_combinations() -> impl Iterator<Item = RiskFlags> {
        (0u8..32).map(Self::from_bits)
    }

    /// No sodium, fat or carbohydrate flag is raised.
    pub fn critical_factors_controlled(&self) -> bool {
        !self.sodium_high && !self.fat_high && !self.carb_high
    }
}
