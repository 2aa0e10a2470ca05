//! Rule description lookup
//!
//! Maps a verdict's lookup key to the stored description text. Lookup
//! failures never propagate: they become a [`DescriptionOutcome`] variant
//! whose text is shown in place of the description.

use std::fmt;

use super::rules::{EMPTY_ENERGY_KEY, ENERGY_FALLBACK_KEY};
use crate::store::RuleStore;
use crate::types::RiskTier;

/// Lowercase, drop `: . ( ) ,` and trim.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ':' | '.' | '(' | ')' | ','))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Result of resolving a description.
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionOutcome {
    Found(String),
    /// No stored rule text contains the key for this tier.
    NotDescribed { tier: RiskTier, key: String },
    /// The rule store failed while searching.
    StoreFailure { message: String },
}

impl DescriptionOutcome {
    /// Text shown to the user.
    pub fn into_text(self) -> String {
        match self {
            DescriptionOutcome::Found(text) => text,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for DescriptionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptionOutcome::Found(text) => f.write_str(text),
            DescriptionOutcome::NotDescribed { tier, key } => write!(
                f,
                "[ERRO] Descrição da regra '{}' não encontrada no DB para o risco {}",
                key, tier
            ),
            DescriptionOutcome::StoreFailure { message } => {
                write!(f, "[ERRO INTERNO NO DB] Falha ao consultar: {}", message)
            }
        }
    }
}

/// Looks up rule descriptions in a [`RuleStore`].
pub struct RuleDescriptionResolver<R> {
    store: R,
}

impl<R: RuleStore> RuleDescriptionResolver<R> {
    pub fn new(store: R) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    /// Find the description for `lookup_key` within `tier`.
    ///
    /// The sentinel key "muita energia" is retried as "energia" when the
    /// first search finds nothing.
    pub fn resolve(&self, tier: RiskTier, lookup_key: &str) -> DescriptionOutcome {
        match self.search(tier, lookup_key) {
            Ok(Some(text)) => DescriptionOutcome::Found(text),
            Ok(None) => {
                tracing::warn!(%tier, key = lookup_key, "rule description not found");
                DescriptionOutcome::NotDescribed {
                    tier,
                    key: lookup_key.to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(%tier, key = lookup_key, error = %e, "rule store failure");
                DescriptionOutcome::StoreFailure {
                    message: e.to_string(),
                }
            }
        }
    }

    fn search(
        &self,
        tier: RiskTier,
        lookup_key: &str,
    ) -> Result<Option<String>, crate::store::StoreError> {
        let found = self.store.find_description(tier, &normalize_key(lookup_key))?;
        if found.is_some() || lookup_key != EMPTY_ENERGY_KEY {
            return Ok(found);
        }

        tracing::debug!(%tier, "retrying description lookup with fallback key");
        self.store.find_description(tier, &normalize_key(ENERGY_FALLBACK_KEY))
    }
}
