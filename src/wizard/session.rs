use serde::Serialize;
use thiserror::Error;

use crate::core::condition::DiseaseMatch;
use crate::core::patient::{FieldErrors, PatientForm, PatientInfo};
use crate::core::symptom::Symptom;
use crate::core::types::{Step, SymptomId};
use crate::matching::engine::MatchingEngine;
use crate::matching::selection::SymptomSelection;

/// A wizard action, used to report rejected transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SubmitPatientInfo,
    AddSymptom,
    RemoveSymptom,
    Analyze,
    NewCheck,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubmitPatientInfo => write!(f, "submit patient information"),
            Self::AddSymptom => write!(f, "add a symptom"),
            Self::RemoveSymptom => write!(f, "remove a symptom"),
            Self::Analyze => write!(f, "analyze symptoms"),
            Self::NewCheck => write!(f, "start a new symptom check"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WizardError {
    #[error("Invalid patient information")]
    InvalidPatientInfo(#[from] FieldErrors),

    #[error("Cannot {action} during the {step} step")]
    InvalidTransition { action: Action, step: Step },

    #[error("Select at least one symptom before analyzing")]
    EmptySelection,
}

/// Session state. Each variant carries exactly the data its step needs, so
/// a symptom or results step without patient information cannot exist.
#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    PatientInfo,
    Symptoms {
        patient: PatientInfo,
        selection: SymptomSelection,
    },
    Results {
        patient: PatientInfo,
        selection: SymptomSelection,
        results: Vec<DiseaseMatch>,
    },
}

/// Transient state of one wizard run.
///
/// Every transition either applies completely or is rejected without
/// touching the session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: State,
}

/// Serializable view of a session
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub step: Step,
    pub patient: Option<PatientInfo>,
    pub selected_symptoms: &'a [Symptom],
    pub results: Option<&'a [DiseaseMatch]>,
}

impl Session {
    /// A fresh session at the patient information step
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        match self.state {
            State::PatientInfo => Step::PatientInfo,
            State::Symptoms { .. } => Step::Symptoms,
            State::Results { .. } => Step::Results,
        }
    }

    pub fn patient(&self) -> Option<PatientInfo> {
        match &self.state {
            State::PatientInfo => None,
            State::Symptoms { patient, .. } | State::Results { patient, .. } => Some(*patient),
        }
    }

    pub fn selection(&self) -> Option<&SymptomSelection> {
        match &self.state {
            State::PatientInfo => None,
            State::Symptoms { selection, .. } | State::Results { selection, .. } => Some(selection),
        }
    }

    pub fn results(&self) -> Option<&[DiseaseMatch]> {
        match &self.state {
            State::Results { results, .. } => Some(results),
            State::PatientInfo | State::Symptoms { .. } => None,
        }
    }

    /// Whether the analyze action is available
    pub fn can_analyze(&self) -> bool {
        matches!(&self.state, State::Symptoms { selection, .. } if !selection.is_empty())
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            step: self.step(),
            patient: self.patient(),
            selected_symptoms: self
                .selection()
                .map(SymptomSelection::as_slice)
                .unwrap_or_default(),
            results: self.results(),
        }
    }

    /// `PatientInfo -> Symptoms`. Rejected with field messages if the form
    /// is invalid, in which case the session stays at patient information.
    pub fn submit_patient_info(&mut self, form: &PatientForm) -> Result<PatientInfo, WizardError> {
        self.require(Step::PatientInfo, Action::SubmitPatientInfo)?;

        let patient = form.validate().map_err(|errors| {
            tracing::debug!(?errors, "Rejected patient information");
            errors
        })?;

        self.state = State::Symptoms {
            patient,
            selection: SymptomSelection::new(),
        };
        tracing::debug!(age = patient.age(), sex = %patient.sex(), "Patient information accepted");
        Ok(patient)
    }

    /// Add a symptom to the selection. Returns `false` if it was already
    /// selected.
    pub fn add_symptom(&mut self, symptom: &Symptom) -> Result<bool, WizardError> {
        let selection = self.selection_mut(Action::AddSymptom)?;
        let added = selection.add(symptom);
        tracing::debug!(symptom = %symptom.name, added, "Add symptom");
        Ok(added)
    }

    /// Remove a symptom from the selection. Returns `false` if it was not
    /// selected.
    pub fn remove_symptom(&mut self, id: SymptomId) -> Result<bool, WizardError> {
        let selection = self.selection_mut(Action::RemoveSymptom)?;
        let removed = selection.remove(id);
        tracing::debug!(%id, removed, "Remove symptom");
        Ok(removed)
    }

    /// `Symptoms -> Results`: rank conditions against the selection and
    /// store the results.
    pub fn analyze(&mut self, engine: &MatchingEngine<'_>) -> Result<&[DiseaseMatch], WizardError> {
        let State::Symptoms { selection, .. } = &self.state else {
            return Err(self.invalid(Action::Analyze));
        };
        if selection.is_empty() {
            return Err(WizardError::EmptySelection);
        }

        let results = engine.find_matches(selection);
        tracing::debug!(matches = results.len(), "Analysis complete");

        self.state = match std::mem::take(&mut self.state) {
            State::Symptoms { patient, selection } => State::Results {
                patient,
                selection,
                results,
            },
            other => other,
        };

        Ok(self.results().unwrap_or_default())
    }

    /// `Symptoms | Results -> Symptoms`: clear selection and results, keep
    /// patient information.
    pub fn new_check(&mut self) -> Result<(), WizardError> {
        let patient = self
            .patient()
            .ok_or_else(|| self.invalid(Action::NewCheck))?;

        self.state = State::Symptoms {
            patient,
            selection: SymptomSelection::new(),
        };
        tracing::debug!("Started new symptom check");
        Ok(())
    }

    /// Any step `-> PatientInfo`: discard everything
    pub fn reset(&mut self) {
        self.state = State::PatientInfo;
        tracing::debug!("Session reset");
    }

    fn selection_mut(&mut self, action: Action) -> Result<&mut SymptomSelection, WizardError> {
        let step = self.step();
        match &mut self.state {
            State::Symptoms { selection, .. } => Ok(selection),
            State::PatientInfo | State::Results { .. } => {
                Err(WizardError::InvalidTransition { action, step })
            }
        }
    }

    fn require(&self, step: Step, action: Action) -> Result<(), WizardError> {
        if self.step() == step {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: Action) -> WizardError {
        WizardError::InvalidTransition {
            action,
            step: self.step(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::Catalog;
    use crate::core::types::Sex;

    fn at_symptoms() -> Session {
        let mut session = Session::new();
        session
            .submit_patient_info(&PatientForm::new("35", "M"))
            .unwrap();
        session
    }

    #[test]
    fn test_new_session_starts_empty() {
        let session = Session::new();
        assert_eq!(session.step(), Step::PatientInfo);
        assert!(session.patient().is_none());
        assert!(session.selection().is_none());
        assert!(session.results().is_none());
        assert!(!session.can_analyze());
    }

    #[test]
    fn test_submit_valid_patient_info() {
        let mut session = Session::new();
        let info = session
            .submit_patient_info(&PatientForm::new("120", "Other"))
            .unwrap();

        assert_eq!(session.step(), Step::Symptoms);
        assert_eq!(info.age(), 120);
        assert_eq!(session.patient().unwrap().sex(), Sex::Other);
        assert!(session.selection().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_patient_info_leaves_state() {
        let mut session = Session::new();
        let err = session
            .submit_patient_info(&PatientForm::new("130", ""))
            .unwrap_err();

        let WizardError::InvalidPatientInfo(errors) = &err else {
            panic!("expected field errors, got {err:?}");
        };
        assert!(errors.age.is_some());
        assert!(errors.sex.is_some());
        assert_eq!(session.step(), Step::PatientInfo);
        assert!(session.patient().is_none());
    }

    #[test]
    fn test_patient_info_cannot_be_resubmitted() {
        let mut session = at_symptoms();
        let err = session
            .submit_patient_info(&PatientForm::new("50", "F"))
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::InvalidTransition {
                action: Action::SubmitPatientInfo,
                step: Step::Symptoms
            }
        );
        assert_eq!(session.patient().unwrap().age(), 35);
    }

    #[test]
    fn test_symptoms_require_symptom_step() {
        let catalog = Catalog::load_embedded().unwrap();
        let cough = catalog.find_by_name("Cough").unwrap();

        let mut session = Session::new();
        assert!(matches!(
            session.add_symptom(cough),
            Err(WizardError::InvalidTransition { .. })
        ));
        assert!(matches!(
            session.remove_symptom(cough.id),
            Err(WizardError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_add_and_remove_symptoms() {
        let catalog = Catalog::load_embedded().unwrap();
        let cough = catalog.find_by_name("Cough").unwrap();

        let mut session = at_symptoms();
        assert!(!session.can_analyze());
        assert!(session.add_symptom(cough).unwrap());
        assert!(!session.add_symptom(cough).unwrap());
        assert_eq!(session.selection().unwrap().len(), 1);
        assert!(session.can_analyze());

        assert!(!session.remove_symptom(SymptomId::new(1)).unwrap());
        assert!(session.remove_symptom(cough.id).unwrap());
        assert!(!session.can_analyze());
    }

    #[test]
    fn test_analyze_requires_selection() {
        let catalog = Catalog::load_embedded().unwrap();
        let engine = MatchingEngine::new(&catalog);

        let mut session = at_symptoms();
        assert_eq!(session.analyze(&engine), Err(WizardError::EmptySelection));
        assert_eq!(session.step(), Step::Symptoms);

        let mut fresh = Session::new();
        assert!(matches!(
            fresh.analyze(&engine),
            Err(WizardError::InvalidTransition {
                action: Action::Analyze,
                step: Step::PatientInfo
            })
        ));
    }

    #[test]
    fn test_analyze_stores_results() {
        let catalog = Catalog::load_embedded().unwrap();
        let engine = MatchingEngine::new(&catalog);

        let mut session = at_symptoms();
        session
            .add_symptom(catalog.find_by_name("Itchy eyes").unwrap())
            .unwrap();

        let results = session.analyze(&engine).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Seasonal Allergies");

        assert_eq!(session.step(), Step::Results);
        assert_eq!(session.selection().unwrap().names(), vec!["Itchy eyes"]);
        assert!(!session.can_analyze());

        // Selection is frozen once analyzed
        assert!(session
            .add_symptom(catalog.find_by_name("Cough").unwrap())
            .is_err());
    }

    #[test]
    fn test_new_check_keeps_patient() {
        let catalog = Catalog::load_embedded().unwrap();
        let engine = MatchingEngine::new(&catalog);

        let mut session = at_symptoms();
        session
            .add_symptom(catalog.find_by_name("Cough").unwrap())
            .unwrap();
        session.analyze(&engine).unwrap();

        session.new_check().unwrap();
        assert_eq!(session.step(), Step::Symptoms);
        assert_eq!(session.patient().unwrap().age(), 35);
        assert!(session.selection().unwrap().is_empty());
        assert!(session.results().is_none());
    }

    #[test]
    fn test_new_check_from_symptoms_clears_selection() {
        let catalog = Catalog::load_embedded().unwrap();
        let mut session = at_symptoms();
        session
            .add_symptom(catalog.find_by_name("Fever").unwrap())
            .unwrap();

        session.new_check().unwrap();
        assert!(session.selection().unwrap().is_empty());
    }

    #[test]
    fn test_new_check_rejected_before_patient_info() {
        let mut session = Session::new();
        assert_eq!(
            session.new_check(),
            Err(WizardError::InvalidTransition {
                action: Action::NewCheck,
                step: Step::PatientInfo
            })
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let catalog = Catalog::load_embedded().unwrap();
        let engine = MatchingEngine::new(&catalog);

        let mut session = at_symptoms();
        session
            .add_symptom(catalog.find_by_name("Cough").unwrap())
            .unwrap();
        session.analyze(&engine).unwrap();

        session.reset();
        assert_eq!(session.step(), Step::PatientInfo);
        assert!(session.patient().is_none());
        assert!(session.selection().is_none());
        assert!(session.results().is_none());
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = at_symptoms();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["step"], "symptoms");
        assert_eq!(json["patient"]["age"], 35);
        assert_eq!(json["patient"]["sex"], "Male");
        assert!(json["results"].is_null());
    }
}
