use serde::{Deserialize, Serialize};

/// A condition the matcher can report.
///
/// `signature_quotient` is never read from catalog files: it is derived on
/// load as the product of the primes of `trigger_symptoms`, so the two
/// representations of the same symptom set cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    /// Display name
    pub name: String,

    /// Clinical category (e.g. "Allergy/Immunology")
    pub category: String,

    /// Names of the catalog symptoms that count towards this condition
    pub trigger_symptoms: Vec<String>,

    /// Suggested action text
    pub action: String,

    // === Derived on load ===
    /// Product of the primes of `trigger_symptoms`
    #[serde(default, skip_deserializing)]
    pub signature_quotient: u64,
}

impl ConditionDefinition {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        trigger_symptoms: &[&str],
        action: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            trigger_symptoms: trigger_symptoms.iter().map(|s| (*s).to_string()).collect(),
            action: action.into(),
            signature_quotient: 0,
        }
    }

    /// Whether a symptom name belongs to this condition's trigger set
    #[must_use]
    pub fn is_triggered_by(&self, symptom_name: &str) -> bool {
        self.trigger_symptoms.iter().any(|t| t == symptom_name)
    }
}

/// One ranked entry of an analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseMatch {
    pub name: String,
    pub category: String,
    /// Number of selected symptoms in the condition's trigger set
    pub match_count: usize,
    pub signature_quotient: u64,
    pub action: String,
}

impl DiseaseMatch {
    pub fn new(condition: &ConditionDefinition, match_count: usize) -> Self {
        Self {
            name: condition.name.clone(),
            category: condition.category.clone(),
            match_count,
            signature_quotient: condition.signature_quotient,
            action: condition.action.clone(),
        }
    }
}
