use serde::Serialize;

use crate::core::condition::DiseaseMatch;
use crate::core::patient::PatientInfo;
use crate::matching::selection::SymptomSelection;
use crate::report::graph::VisualizationGraph;
use crate::report::palette::color_for;
use crate::report::{format_thousands, percent_encode};
use crate::utils::validation::divides;
use crate::wizard::Session;

/// Search engine queried by the "Learn more" link
pub const LEARN_MORE_BASE_URL: &str = "https://www.google.com/search?q=";

/// Web search URL for a condition
#[must_use]
pub fn learn_more_url(condition_name: &str) -> String {
    format!(
        "{LEARN_MORE_BASE_URL}{}",
        percent_encode(&format!("{condition_name} medical condition"))
    )
}

/// "1 symptom match" / "N symptom matches"
#[must_use]
pub fn match_label(count: usize) -> String {
    if count == 1 {
        "1 symptom match".to_string()
    } else {
        format!("{count} symptom matches")
    }
}

/// Patient and symptom summary shown above the results
#[derive(Debug, Clone, Serialize)]
pub struct PatientSummary {
    pub age: u8,
    pub sex: String,
    pub selected_count: usize,
    pub symptoms: Vec<String>,
    /// Product of the selected primes with thousands separators, or `None`
    /// when it is too large to compute
    pub prime_product: Option<String>,
}

/// One ranked condition, ready to display
#[derive(Debug, Clone, Serialize)]
pub struct MatchCard {
    pub rank: usize,
    pub name: String,
    pub category: String,
    pub match_count: usize,
    pub match_label: String,
    /// Selected symptoms whose prime divides the signature quotient
    pub matched_symptoms: Vec<String>,
    pub signature_quotient: u64,
    pub signature_display: String,
    pub action: String,
    pub color: &'static str,
    pub learn_more_url: String,
}

/// Everything the results step displays
#[derive(Debug, Clone, Serialize)]
pub struct ResultsReport {
    pub patient: PatientSummary,
    pub matches: Vec<MatchCard>,
    pub graph: Option<VisualizationGraph>,
}

impl ResultsReport {
    pub fn build(
        patient: PatientInfo,
        selection: &SymptomSelection,
        results: &[DiseaseMatch],
    ) -> Self {
        let summary = PatientSummary {
            age: patient.age(),
            sex: patient.sex().to_string(),
            selected_count: selection.len(),
            symptoms: selection.names().into_iter().map(str::to_string).collect(),
            prime_product: selection.prime_product().map(format_thousands),
        };

        let matches = results
            .iter()
            .enumerate()
            .map(|(i, m)| MatchCard {
                rank: i + 1,
                name: m.name.clone(),
                category: m.category.clone(),
                match_count: m.match_count,
                match_label: match_label(m.match_count),
                matched_symptoms: selection
                    .iter()
                    .filter(|s| divides(m.signature_quotient, s.prime))
                    .map(|s| s.name.clone())
                    .collect(),
                signature_quotient: m.signature_quotient,
                signature_display: format_thousands(u128::from(m.signature_quotient)),
                action: m.action.clone(),
                color: color_for(&m.category),
                learn_more_url: learn_more_url(&m.name),
            })
            .collect();

        Self {
            patient: summary,
            matches,
            graph: VisualizationGraph::layout(selection.as_slice(), results),
        }
    }

    /// Build the report for a session at the results step
    pub fn from_session(session: &Session) -> Option<Self> {
        let patient = session.patient()?;
        let selection = session.selection()?;
        let results = session.results()?;
        Some(Self::build(patient, selection, results))
    }

    /// `false` is the explicit "no matches" state
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::Catalog;
    use crate::core::patient::PatientForm;
    use crate::matching::engine::MatchingEngine;

    fn results_session(catalog: &Catalog, names: &[&str]) -> Session {
        let mut session = Session::new();
        session
            .submit_patient_info(&PatientForm::new("29", "F"))
            .unwrap();
        for name in names {
            session
                .add_symptom(catalog.find_by_name(name).unwrap())
                .unwrap();
        }
        session.analyze(&MatchingEngine::new(catalog)).unwrap();
        session
    }

    #[test]
    fn test_learn_more_url() {
        assert_eq!(
            learn_more_url("Common Cold"),
            "https://www.google.com/search?q=Common%20Cold%20medical%20condition"
        );
    }

    #[test]
    fn test_match_label_pluralization() {
        assert_eq!(match_label(1), "1 symptom match");
        assert_eq!(match_label(3), "3 symptom matches");
    }

    #[test]
    fn test_report_for_common_cold() {
        let catalog = Catalog::load_embedded().unwrap();
        let session = results_session(
            &catalog,
            &["Cough", "Sore throat", "Runny nose", "Sneezing", "Fatigue"],
        );
        let report = ResultsReport::from_session(&session).unwrap();

        assert!(report.has_matches());
        assert_eq!(report.patient.age, 29);
        assert_eq!(report.patient.sex, "Female");
        assert_eq!(report.patient.selected_count, 5);
        assert_eq!(report.patient.prime_product.as_deref(), Some("2,310"));

        let top = &report.matches[0];
        assert_eq!(top.rank, 1);
        assert_eq!(top.name, "Common Cold");
        assert_eq!(top.match_label, "5 symptom matches");
        assert_eq!(top.signature_display, "2,310");
        assert_eq!(top.color, "#f8cecc");
        assert_eq!(top.matched_symptoms.len(), 5);

        let flu = &report.matches[1];
        assert_eq!(flu.signature_display, "31,870,410");
        assert_eq!(
            flu.matched_symptoms,
            vec!["Cough", "Sore throat", "Runny nose", "Fatigue"]
        );
        assert!(report.graph.is_some());
    }

    #[test]
    fn test_report_without_matches() {
        let catalog = Catalog::load_embedded().unwrap();
        let session = results_session(&catalog, &["Confusion", "Memory loss"]);
        let report = ResultsReport::from_session(&session).unwrap();

        assert!(!report.has_matches());
        assert!(report.graph.is_none());
        assert_eq!(report.patient.symptoms, vec!["Confusion", "Memory loss"]);
    }

    #[test]
    fn test_no_report_before_results() {
        let session = Session::new();
        assert!(ResultsReport::from_session(&session).is_none());
    }
}
