use serde::Serialize;

use crate::core::symptom::Symptom;
use crate::core::types::SymptomId;
use crate::utils::validation::prime_product;

/// Symptoms picked by the user: insertion-ordered, unique by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymptomSelection {
    symptoms: Vec<Symptom>,
}

impl SymptomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symptom. Returns `false` (and changes nothing) if a symptom
    /// with the same id is already selected.
    pub fn add(&mut self, symptom: &Symptom) -> bool {
        if self.contains(symptom.id) {
            return false;
        }
        self.symptoms.push(symptom.clone());
        true
    }

    /// Remove a symptom by id. Returns `false` if it was not selected.
    pub fn remove(&mut self, id: SymptomId) -> bool {
        let before = self.symptoms.len();
        self.symptoms.retain(|s| s.id != id);
        self.symptoms.len() != before
    }

    pub fn contains(&self, id: SymptomId) -> bool {
        self.symptoms.iter().any(|s| s.id == id)
    }

    pub fn clear(&mut self) {
        self.symptoms.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symptom> {
        self.symptoms.iter()
    }

    pub fn as_slice(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn names(&self) -> Vec<&str> {
        self.symptoms.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Product of the selected primes; `None` if it overflows `u128`
    pub fn prime_product(&self) -> Option<u128> {
        prime_product(self.symptoms.iter().map(|s| s.prime))
    }
}

impl<'a> IntoIterator for &'a SymptomSelection {
    type Item = &'a Symptom;
    type IntoIter = std::slice::Iter<'a, Symptom>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cough() -> Symptom {
        Symptom::new(25, "Cough", 2, "Respiratory")
    }

    fn fever() -> Symptom {
        Symptom::new(1, "Fever", 13, "Systemic")
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut selection = SymptomSelection::new();
        assert!(selection.add(&cough()));
        assert!(selection.add(&fever()));
        let snapshot = selection.clone();

        assert!(!selection.add(&cough()));
        assert_eq!(selection, snapshot);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut selection = SymptomSelection::new();
        selection.add(&fever());
        selection.add(&cough());
        assert_eq!(selection.names(), vec!["Fever", "Cough"]);
    }

    #[test]
    fn test_remove_unselected_is_noop() {
        let mut selection = SymptomSelection::new();
        selection.add(&cough());
        let snapshot = selection.clone();

        assert!(!selection.remove(SymptomId::new(1)));
        assert_eq!(selection, snapshot);

        assert!(selection.remove(SymptomId::new(25)));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_prime_product() {
        let mut selection = SymptomSelection::new();
        assert_eq!(selection.prime_product(), Some(1));

        selection.add(&cough());
        selection.add(&fever());
        assert_eq!(selection.prime_product(), Some(26));
    }
}
