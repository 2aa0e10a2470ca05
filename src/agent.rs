//! Risk Agent - coordinates lookup, classification and description
//!
//! Pipeline per request:
//! 1. Look up the food's nutrient profile
//! 2. Missing food short-circuits to the gray tier
//! 3. Classify with the rule engine
//! 4. Resolve the matched rule's description

use crate::engine::{RuleDescriptionResolver, RuleEngine};
use crate::store::{NutrientStore, RuleStore, StoreError};
use crate::types::{ClassificationResult, NutrientProfile};

pub struct RiskAgent<S, R> {
    engine: RuleEngine,
    nutrients: S,
    resolver: RuleDescriptionResolver<R>,
}

impl<S: NutrientStore, R: RuleStore> RiskAgent<S, R> {
    pub fn new(engine: RuleEngine, nutrients: S, rules: R) -> Self {
        Self {
            engine,
            nutrients,
            resolver: RuleDescriptionResolver::new(rules),
        }
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn nutrients(&self) -> &S {
        &self.nutrients
    }

    /// Analyze a stored food by exact name.
    ///
    /// An unknown name is not an error: it yields the gray "not found"
    /// result. Only a failing nutrient lookup returns `Err`.
    pub fn analyze(&self, food_name: &str) -> Result<ClassificationResult, StoreError> {
        match self.nutrients.lookup(food_name)? {
            Some(profile) => Ok(self.analyze_profile(&profile)),
            None => {
                tracing::info!(food = food_name, "food not found");
                Ok(ClassificationResult::not_found())
            }
        }
    }

    /// Classify a profile and attach its rule description.
    pub fn analyze_profile(&self, profile: &NutrientProfile) -> ClassificationResult {
        let verdict = self.engine.classify(profile);
        let description = self.resolver.resolve(verdict.tier, verdict.lookup_key);

        ClassificationResult {
            tier: verdict.tier,
            label: verdict.label.to_string(),
            description: description.into_text(),
            profile: *profile,
        }
    }
}
