use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::condition::ConditionDefinition;
use crate::core::symptom::Symptom;
use crate::core::types::{SymptomCategory, SymptomId};
use crate::utils::validation::{compute_signature, is_prime};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate symptom id {0}")]
    DuplicateSymptomId(SymptomId),

    #[error("Duplicate symptom name '{0}'")]
    DuplicateSymptomName(String),

    #[error("Prime {prime} of '{symptom}' is already assigned to '{existing}'")]
    DuplicatePrime {
        prime: u64,
        symptom: String,
        existing: String,
    },

    #[error("Symptom '{symptom}' is tagged with {value}, which is not prime")]
    NotPrime { symptom: String, value: u64 },

    #[error("Duplicate condition name '{0}'")]
    DuplicateCondition(String),

    #[error("Condition '{0}' has no trigger symptoms")]
    EmptyTriggers(String),

    #[error("Condition '{condition}' references unknown symptom '{symptom}'")]
    UnknownTriggerSymptom { condition: String, symptom: String },

    #[error("Condition '{condition}' lists trigger symptom '{symptom}' more than once")]
    DuplicateTrigger { condition: String, symptom: String },

    #[error("Signature quotient of condition '{0}' does not fit in 64 bits")]
    SignatureOverflow(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub symptoms: Vec<Symptom>,
    pub conditions: Vec<ConditionDefinition>,
}

/// Symptoms belonging to one browsing category, as indices into
/// [`Catalog::symptoms`]
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category: SymptomCategory,
    indices: Vec<usize>,
}

impl CategoryGroup {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// The symptom catalog and condition definitions, with indexes
#[derive(Debug)]
pub struct Catalog {
    /// All symptoms in catalog order
    pub symptoms: Vec<Symptom>,

    /// Condition definitions in definition order (this order breaks ranking ties)
    pub conditions: Vec<ConditionDefinition>,

    /// Index: symptom ID -> index in symptoms vec
    id_to_index: HashMap<SymptomId, usize>,

    /// Index: lowercase symptom name -> index in symptoms vec
    name_to_index: HashMap<String, usize>,

    /// Index: prime -> index in symptoms vec
    prime_to_index: HashMap<u64, usize>,

    /// One group per category, in browsing order
    groups: Vec<CategoryGroup>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            symptoms: Vec::new(),
            conditions: Vec::new(),
            id_to_index: HashMap::new(),
            name_to_index: HashMap::new(),
            prime_to_index: HashMap::new(),
            groups: SymptomCategory::ALL
                .into_iter()
                .map(|category| CategoryGroup {
                    category,
                    indices: Vec::new(),
                })
                .collect(),
        }
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/symptom_catalog.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        let mut catalog = Self::new();
        for symptom in data.symptoms {
            catalog.add_symptom(symptom)?;
        }
        for condition in data.conditions {
            catalog.add_condition(condition)?;
        }

        tracing::debug!(
            symptoms = catalog.symptoms.len(),
            conditions = catalog.conditions.len(),
            "Loaded catalog"
        );

        Ok(catalog)
    }

    /// Add a symptom, enforcing unique id, unique name and unique prime
    pub fn add_symptom(&mut self, mut symptom: Symptom) -> Result<(), CatalogError> {
        if self.id_to_index.contains_key(&symptom.id) {
            return Err(CatalogError::DuplicateSymptomId(symptom.id));
        }

        let name_key = symptom.name.to_lowercase();
        if self.name_to_index.contains_key(&name_key) {
            return Err(CatalogError::DuplicateSymptomName(symptom.name));
        }

        if !is_prime(symptom.prime) {
            return Err(CatalogError::NotPrime {
                symptom: symptom.name,
                value: symptom.prime,
            });
        }

        if let Some(&existing) = self.prime_to_index.get(&symptom.prime) {
            return Err(CatalogError::DuplicatePrime {
                prime: symptom.prime,
                symptom: symptom.name,
                existing: self.symptoms[existing].name.clone(),
            });
        }

        symptom.resolve_group();

        let index = self.symptoms.len();
        self.id_to_index.insert(symptom.id, index);
        self.name_to_index.insert(name_key, index);
        self.prime_to_index.insert(symptom.prime, index);
        if let Some(group) = self.groups.iter_mut().find(|g| g.category == symptom.group) {
            group.indices.push(index);
        }

        self.symptoms.push(symptom);
        Ok(())
    }

    /// Add a condition, deriving its signature quotient from its trigger
    /// symptoms. Every trigger must already be in the catalog.
    pub fn add_condition(&mut self, mut condition: ConditionDefinition) -> Result<(), CatalogError> {
        if self.conditions.iter().any(|c| c.name == condition.name) {
            return Err(CatalogError::DuplicateCondition(condition.name));
        }

        if condition.trigger_symptoms.is_empty() {
            return Err(CatalogError::EmptyTriggers(condition.name));
        }

        let mut primes = Vec::with_capacity(condition.trigger_symptoms.len());
        for trigger in &condition.trigger_symptoms {
            // Trigger names must match catalog names exactly
            let Some(symptom) = self.find_by_name(trigger).filter(|s| s.name == *trigger) else {
                return Err(CatalogError::UnknownTriggerSymptom {
                    condition: condition.name.clone(),
                    symptom: trigger.clone(),
                });
            };
            if primes.contains(&symptom.prime) {
                return Err(CatalogError::DuplicateTrigger {
                    condition: condition.name.clone(),
                    symptom: trigger.clone(),
                });
            }
            primes.push(symptom.prime);
        }

        condition.signature_quotient = compute_signature(primes)
            .ok_or_else(|| CatalogError::SignatureOverflow(condition.name.clone()))?;

        self.conditions.push(condition);
        Ok(())
    }

    /// Get a symptom by ID
    pub fn get(&self, id: SymptomId) -> Option<&Symptom> {
        self.id_to_index.get(&id).map(|&idx| &self.symptoms[idx])
    }

    /// Get a symptom by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&Symptom> {
        self.name_to_index
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.symptoms[idx])
    }

    /// Get the symptom tagged with a prime
    pub fn find_by_prime(&self, prime: u64) -> Option<&Symptom> {
        self.prime_to_index
            .get(&prime)
            .map(|&idx| &self.symptoms[idx])
    }

    /// Resolve a user reference that is either a numeric id or a name
    pub fn resolve(&self, reference: &str) -> Option<&Symptom> {
        let reference = reference.trim();
        reference
            .parse::<u32>()
            .ok()
            .and_then(|id| self.get(SymptomId::new(id)))
            .or_else(|| self.find_by_name(reference))
    }

    /// Category groups in browsing order, empty groups included
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Symptoms of one group, in catalog order
    pub fn group_symptoms<'a>(
        &'a self,
        group: &'a CategoryGroup,
    ) -> impl Iterator<Item = &'a Symptom> + 'a {
        group.indices.iter().map(move |&idx| &self.symptoms[idx])
    }

    /// Symptoms of one category, in catalog order
    pub fn symptoms_in(&self, category: SymptomCategory) -> Vec<&Symptom> {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| self.group_symptoms(g).collect())
            .unwrap_or_default()
    }

    /// Get a condition by name
    pub fn condition(&self, name: &str) -> Option<&ConditionDefinition> {
        self.conditions.iter().find(|c| c.name == name)
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            symptoms: self.symptoms.clone(),
            conditions: self.conditions.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of symptoms in catalog
    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    /// Check if catalog has no symptoms
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = Catalog::load_embedded().unwrap();
        assert_eq!(catalog.len(), 40);
        assert_eq!(catalog.conditions.len(), 3);
    }

    #[test]
    fn test_embedded_primes_unique_and_prime() {
        let catalog = Catalog::load_embedded().unwrap();
        let mut primes: Vec<u64> = catalog.symptoms.iter().map(|s| s.prime).collect();
        primes.sort_unstable();
        primes.dedup();
        assert_eq!(primes.len(), catalog.len());
        assert!(primes.iter().all(|&p| is_prime(p)));
    }

    #[test]
    fn test_signature_quotients_derived() {
        let catalog = Catalog::load_embedded().unwrap();

        let cold = catalog.condition("Common Cold").unwrap();
        assert_eq!(cold.signature_quotient, 2 * 3 * 5 * 7 * 11);

        let flu = catalog.condition("Influenza").unwrap();
        assert_eq!(flu.signature_quotient, 13 * 2 * 3 * 5 * 17 * 11 * 19 * 23);

        let allergies = catalog.condition("Seasonal Allergies").unwrap();
        assert_eq!(allergies.signature_quotient, 5 * 7 * 29 * 2);
    }

    #[test]
    fn test_catalog_get_by_id() {
        let catalog = Catalog::load_embedded().unwrap();

        let cough = catalog.get(SymptomId::new(25)).unwrap();
        assert_eq!(cough.name, "Cough");
        assert_eq!(cough.prime, 2);
        assert!(catalog.get(SymptomId::new(999)).is_none());
    }

    #[test]
    fn test_find_by_name_and_prime() {
        let catalog = Catalog::load_embedded().unwrap();

        assert_eq!(catalog.find_by_name("itchy EYES").unwrap().prime, 29);
        assert_eq!(catalog.find_by_prime(173).unwrap().name, "Pain in groin/pelvis");
        assert!(catalog.find_by_name("Hiccups").is_none());
    }

    #[test]
    fn test_resolve_id_or_name() {
        let catalog = Catalog::load_embedded().unwrap();

        assert_eq!(catalog.resolve("25").unwrap().name, "Cough");
        assert_eq!(catalog.resolve(" sneezing ").unwrap().id, SymptomId::new(26));
        assert!(catalog.resolve("0").is_none());
    }

    #[test]
    fn test_groups_fold_aliases() {
        let catalog = Catalog::load_embedded().unwrap();

        let respiratory: Vec<&str> = catalog
            .symptoms_in(SymptomCategory::Respiratory)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            respiratory,
            vec!["Cough", "Sneezing", "Runny nose", "Difficulty breathing"]
        );

        let sensory = catalog.symptoms_in(SymptomCategory::Sensory);
        assert!(sensory.iter().any(|s| s.name == "Itchy eyes"));

        let musculoskeletal = catalog.symptoms_in(SymptomCategory::Musculoskeletal);
        assert!(musculoskeletal.iter().any(|s| s.name == "Malformed great toe"));
    }

    #[test]
    fn test_unknown_labels_land_in_other() {
        let catalog = Catalog::load_embedded().unwrap();

        let other: Vec<&str> = catalog
            .symptoms_in(SymptomCategory::Other)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(other, vec!["Pain", "Autonomic dysfunction"]);
    }

    #[test]
    fn test_groups_cover_every_symptom_once() {
        let catalog = Catalog::load_embedded().unwrap();

        let grouped: usize = catalog.groups().iter().map(CategoryGroup::len).sum();
        assert_eq!(grouped, catalog.len());
        assert_eq!(catalog.groups().len(), SymptomCategory::ALL.len());
        assert_eq!(catalog.groups()[0].category, SymptomCategory::Systemic);
    }

    #[test]
    fn test_catalog_to_json_round_trips() {
        let catalog = Catalog::load_embedded().unwrap();
        let json = catalog.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"created_at\""));
        assert!(json.contains("Seasonal Allergies"));

        let reloaded = Catalog::from_json(&json).unwrap();
        assert_eq!(reloaded.len(), catalog.len());
        assert_eq!(reloaded.conditions, catalog.conditions);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = Catalog::new();
        catalog.add_symptom(Symptom::new(1, "Cough", 2, "Respiratory")).unwrap();
        let err = catalog
            .add_symptom(Symptom::new(1, "Fever", 13, "Systemic"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSymptomId(_)));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_prime_rejected() {
        let mut catalog = Catalog::new();
        catalog.add_symptom(Symptom::new(1, "Cough", 2, "Respiratory")).unwrap();
        let err = catalog
            .add_symptom(Symptom::new(2, "Fever", 2, "Systemic"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePrime { prime: 2, .. }));
    }

    #[test]
    fn test_composite_prime_rejected() {
        let mut catalog = Catalog::new();
        let err = catalog
            .add_symptom(Symptom::new(1, "Cough", 15, "Respiratory"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotPrime { value: 15, .. }));
    }

    #[test]
    fn test_unknown_trigger_rejected() {
        let mut catalog = Catalog::new();
        catalog.add_symptom(Symptom::new(1, "Cough", 2, "Respiratory")).unwrap();

        let condition = ConditionDefinition::new("Croup", "Pediatrics", &["Cough", "Stridor"], "See GP");
        let err = catalog.add_condition(condition).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownTriggerSymptom { ref symptom, .. } if symptom == "Stridor"
        ));
        assert!(catalog.conditions.is_empty());
    }

    #[test]
    fn test_empty_triggers_rejected() {
        let mut catalog = Catalog::new();
        let condition = ConditionDefinition::new("Nothing", "None", &[], "None");
        assert!(matches!(
            catalog.add_condition(condition),
            Err(CatalogError::EmptyTriggers(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_bad_catalog() {
        let json = r#"{
            "version": "1.0.0",
            "symptoms": [
                {"id": 1, "name": "Cough", "prime": 2, "category": "Respiratory"},
                {"id": 2, "name": "cough", "prime": 3, "category": "Respiratory"}
            ],
            "conditions": []
        }"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateSymptomName(_))
        ));

        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CatalogError::ParseError(_))
        ));
    }
}
