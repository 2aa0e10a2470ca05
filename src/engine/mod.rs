//! Risk classification engine
//!
//! - `flags`: threshold comparisons over a nutrient profile
//! - `rules`: ordered first-match-wins rule table
//! - `resolver`: turns a rule's lookup key into stored description text

pub mod flags;
pub mod resolver;
pub mod rules;

pub use flags::RiskFlags;
pub use resolver::{normalize_key, DescriptionOutcome, RuleDescriptionResolver};
pub use rules::{first_match, Rule, RULES};

use crate::config::RiskThresholds;
use crate::types::{NutrientProfile, RiskTier};

/// Decision for one profile: tier, label and description lookup key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub tier: RiskTier,
    pub label: &'static str,
    pub lookup_key: &'static str,
    pub rule_number: u8,
    pub flags: RiskFlags,
}

/// Classifies nutrient profiles against a fixed set of thresholds.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    thresholds: RiskThresholds,
}

impl RuleEngine {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Classify a profile. Pure: identical input gives identical output.
    pub fn classify(&self, profile: &NutrientProfile) -> Verdict {
        let flags = RiskFlags::evaluate(profile, &self.thresholds);
        let rule = first_match(&flags);

        tracing::debug!(rule = rule.number, tier = %rule.tier, ?flags, "rule matched");

        Verdict {
            tier: rule.tier,
            label: rule.label,
            lookup_key: rule.lookup_key,
            rule_number: rule.number,
            flags,
        }
    }
}
