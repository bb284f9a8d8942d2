use crate::catalog::store::Catalog;
use crate::core::condition::{ConditionDefinition, DiseaseMatch};
use crate::matching::selection::SymptomSelection;

/// Default minimum number of matching symptoms for a condition to be reported
pub const DEFAULT_MIN_MATCH_COUNT: usize = 1;

/// Configuration for the matching engine
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Conditions with fewer matching symptoms are dropped. Values below 1
    /// are treated as 1: a condition with no matching symptom is never reported.
    pub min_match_count: usize,
    /// Maximum number of ranked results to return
    pub limit: Option<usize>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_match_count: DEFAULT_MIN_MATCH_COUNT,
            limit: None,
        }
    }
}

/// The main matching engine
pub struct MatchingEngine<'a> {
    catalog: &'a Catalog,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(catalog: &'a Catalog, config: MatchingConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Rank the catalog's conditions against a selection.
    ///
    /// Each condition scores the number of selected symptoms in its trigger
    /// set. Conditions below the minimum are dropped and the rest are sorted
    /// by score, descending. The sort is stable, so conditions with equal
    /// scores keep their catalog definition order.
    pub fn find_matches(&self, selection: &SymptomSelection) -> Vec<DiseaseMatch> {
        let min_count = self.config.min_match_count.max(1);

        let mut results: Vec<DiseaseMatch> = self
            .catalog
            .conditions
            .iter()
            .map(|condition| DiseaseMatch::new(condition, match_count(condition, selection)))
            .filter(|m| m.match_count >= min_count)
            .collect();

        // Stable: ties keep definition order
        results.sort_by(|a, b| b.match_count.cmp(&a.match_count));

        if let Some(limit) = self.config.limit {
            results.truncate(limit);
        }

        tracing::debug!(
            selected = selection.len(),
            matched = results.len(),
            "Ranked conditions"
        );

        results
    }
}

/// Number of selected symptoms whose name is in the condition's trigger set
pub fn match_count(condition: &ConditionDefinition, selection: &SymptomSelection) -> usize {
    selection
        .iter()
        .filter(|s| condition.is_triggered_by(&s.name))
        .count()
}
