use serde::Serialize;

use crate::core::symptom::Symptom;

use super::store::Catalog;

/// Outcome of a free-text symptom search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResults<'a> {
    /// No search term entered
    Idle,
    /// A term was entered but nothing matched it
    NoMatches { term: String },
    /// Matching symptoms in catalog order
    Found { symptoms: Vec<&'a Symptom> },
}

impl SearchResults<'_> {
    /// Matching symptoms, empty unless the search found something
    pub fn symptoms(&self) -> &[&Symptom] {
        match self {
            Self::Found { symptoms } => symptoms,
            Self::Idle | Self::NoMatches { .. } => &[],
        }
    }
}

/// Finds symptoms by free-text search over names and category labels
pub struct SymptomFinder<'a> {
    catalog: &'a Catalog,
}

impl<'a> SymptomFinder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Case-insensitive substring search on symptom name or raw category
    /// label. A blank term is [`SearchResults::Idle`], never an empty hit list.
    pub fn search(&self, term: &str) -> SearchResults<'a> {
        let term = term.trim();
        if term.is_empty() {
            return SearchResults::Idle;
        }

        let needle = term.to_lowercase();
        let symptoms: Vec<&Symptom> = self
            .catalog
            .symptoms
            .iter()
            .filter(|s| s.matches_search(&needle))
            .collect();

        if symptoms.is_empty() {
            SearchResults::NoMatches {
                term: term.to_string(),
            }
        } else {
            SearchResults::Found { symptoms }
        }
    }
}

impl Catalog {
    /// Convenience wrapper around [`SymptomFinder::search`]
    pub fn search(&self, term: &str) -> SearchResults<'_> {
        SymptomFinder::new(self).search(term)
    }
}
