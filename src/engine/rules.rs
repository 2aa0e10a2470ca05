//! Ordered classification rules.
//!
//! Rules are evaluated top-down and the first match wins. The final rule
//! matches everything, so evaluation always yields exactly one rule.

use std::fmt;

use super::flags::RiskFlags;
use crate::types::RiskTier;

/// Lookup key that is not literal rule text; the resolver retries it as
/// [`ENERGY_FALLBACK_KEY`].
pub const EMPTY_ENERGY_KEY: &str = "muita energia";
pub const ENERGY_FALLBACK_KEY: &str = "energia";

/// One entry of the rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Position in evaluation order, starting at 1.
    pub number: u8,
    pub tier: RiskTier,
    pub label: &'static str,
    pub lookup_key: &'static str,
    predicate: fn(&RiskFlags) -> bool,
}

impl Rule {
    pub fn matches(&self, flags: &RiskFlags) -> bool {
        (self.predicate)(flags)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("number", &self.number)
            .field("tier", &self.tier)
            .field("label", &self.label)
            .field("lookup_key", &self.lookup_key)
            .finish()
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Rule {}

pub static RULES: [Rule; 9] = [
    // Red: multiple critical factors
    Rule {
        number: 1,
        tier: RiskTier::Red,
        label: "Risco Crítico (Múltiplos Fatores)",
        lookup_key: "Alto Sódio e Alta Gordura Saturada",
        predicate: |f| f.sodium_high && f.fat_high,
    },
    Rule {
        number: 2,
        tier: RiskTier::Red,
        label: "Risco Crítico (Sódio e Carboidratos)",
        lookup_key: "Alto Sódio e Alto Carboidrato com Baixa Fibra",
        predicate: |f| f.sodium_high && f.carb_high && f.fiber_low,
    },
    Rule {
        number: 3,
        tier: RiskTier::Red,
        label: "Risco Crítico (Gordura e Carboidratos)",
        lookup_key: "Alta Gordura Saturada e Alto Carboidrato com Baixa Fibra",
        predicate: |f| f.fat_high && f.carb_high && f.fiber_low,
    },
    // Yellow: carbohydrate-driven or a single factor
    Rule {
        number: 4,
        tier: RiskTier::Yellow,
        label: "Risco Moderado (Carboidratos Sem Benefício)",
        lookup_key: EMPTY_ENERGY_KEY,
        predicate: |f| f.carb_high && f.fiber_low && !f.protein_high,
    },
    Rule {
        number: 5,
        tier: RiskTier::Yellow,
        label: "Risco Moderado (Alto Carboidrato Compensado)",
        lookup_key: "parcialmente compensado",
        predicate: |f| f.carb_high && (!f.fiber_low || f.protein_high),
    },
    Rule {
        number: 6,
        tier: RiskTier::Yellow,
        label: "Risco Moderado (Fator Isolado)",
        lookup_key: "Apresenta um fator de risco isolado",
        predicate: |f| {
            (f.sodium_high && !f.fat_high && !f.carb_high && !f.fiber_low)
                || (f.fat_high && !f.sodium_high && !f.carb_high && !f.fiber_low)
        },
    },
    // Green
    Rule {
        number: 7,
        tier: RiskTier::Green,
        label: "Risco Baixo (Perfil Ideal)",
        lookup_key: "Fibra OU Proteína alta",
        predicate: |f| f.critical_factors_controlled() && (f.fiber_low || f.protein_high),
    },
    Rule {
        number: 8,
        tier: RiskTier::Green,
        label: "Risco Baixo (Fatores Controlados)",
        lookup_key: "Todos os fatores críticos",
        predicate: |f| f.critical_factors_controlled(),
    },
    // Reached by a lone sodium or fat flag combined with low fiber
    Rule {
        number: 9,
        tier: RiskTier::Green,
        label: "Risco Baixo (Outros Fatores)",
        lookup_key: "Todos os fatores críticos",
        predicate: |_| true,
    },
];

/// First rule in table order whose predicate holds.
pub fn first_match(flags: &RiskFlags) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| rule.matches(flags))
        .unwrap_or(&RULES[RULES.len() - 1])
}
