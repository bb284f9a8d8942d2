use serde::{Deserialize, Serialize};

use crate::core::types::{SymptomCategory, SymptomId};

/// A single symptom in the catalog.
///
/// Every symptom carries a prime assigned by the catalog author. Primes are
/// unique across the catalog, so the product of the primes of any subset of
/// symptoms identifies that subset exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    /// Unique identifier
    pub id: SymptomId,

    /// Display name, unique within the catalog
    pub name: String,

    /// Prime number tagging this symptom
    pub prime: u64,

    /// Category label as written in the catalog (may be an alias such as
    /// "Respiratory/Allergy")
    pub category: String,

    // === Resolved on load ===
    /// Browsing group the category label folds into
    #[serde(skip)]
    pub group: SymptomCategory,
}

impl Symptom {
    pub fn new(id: u32, name: impl Into<String>, prime: u64, category: impl Into<String>) -> Self {
        let category = category.into();
        let group = SymptomCategory::classify(&category);
        Self {
            id: SymptomId::new(id),
            name: name.into(),
            prime,
            category,
            group,
        }
    }

    /// Re-derive the browsing group from the category label
    pub fn resolve_group(&mut self) {
        self.group = SymptomCategory::classify(&self.category);
    }

    /// Case-insensitive substring match on name or raw category label.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}
