use serde::{Deserialize, Serialize};

/// Unique identifier for a symptom in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomId(pub u32);

impl SymptomId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SymptomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Browsing group a symptom is filed under.
///
/// Catalog entries carry a free-form category label; labels are folded into
/// one of these groups once, when the catalog is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCategory {
    Systemic,
    Respiratory,
    Neurological,
    Gastrointestinal,
    Musculoskeletal,
    Ent,
    Sensory,
    Psychological,
    Cardiovascular,
    Urogenital,
    /// Catch-all for labels outside the known set
    #[default]
    Other,
}

/// Labels that are folded into a parent category
const CATEGORY_ALIASES: &[(&str, SymptomCategory)] = &[
    ("Respiratory/Allergy", SymptomCategory::Respiratory),
    ("Musculoskeletal/Genetic", SymptomCategory::Musculoskeletal),
    ("Sensory/Allergy", SymptomCategory::Sensory),
];

impl SymptomCategory {
    /// All categories in browsing order; `Other` is always last
    pub const ALL: [SymptomCategory; 11] = [
        Self::Systemic,
        Self::Respiratory,
        Self::Neurological,
        Self::Gastrointestinal,
        Self::Musculoskeletal,
        Self::Ent,
        Self::Sensory,
        Self::Psychological,
        Self::Cardiovascular,
        Self::Urogenital,
        Self::Other,
    ];

    /// Display label, also the canonical catalog label for the category
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Systemic => "Systemic",
            Self::Respiratory => "Respiratory",
            Self::Neurological => "Neurological",
            Self::Gastrointestinal => "Gastrointestinal",
            Self::Musculoskeletal => "Musculoskeletal",
            Self::Ent => "ENT",
            Self::Sensory => "Sensory",
            Self::Psychological => "Psychological",
            Self::Cardiovascular => "Cardiovascular",
            Self::Urogenital => "Urogenital",
            Self::Other => "Other",
        }
    }

    /// Resolve a catalog category label to its browsing group.
    ///
    /// Matching is exact: a label is either a canonical category name, a
    /// known alias, or it lands in [`SymptomCategory::Other`].
    #[must_use]
    pub fn classify(label: &str) -> Self {
        if let Some(&(_, category)) = CATEGORY_ALIASES.iter().find(|(alias, _)| *alias == label) {
            return category;
        }

        Self::ALL
            .into_iter()
            .filter(|c| *c != Self::Other)
            .find(|c| c.label() == label)
            .unwrap_or(Self::Other)
    }

    /// Parse a user-supplied category name (case-insensitive, canonical names only)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for SymptomCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Biological sex as collected on the patient form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    /// Form code submitted by the select box
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "Other",
        }
    }

    /// Parse a form code or full name, case-insensitively
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Some(Self::Male),
            "f" | "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PatientInfo,
    Symptoms,
    Results,
}

impl Step {
    /// 1-based position in the wizard progress indicator
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::PatientInfo => 1,
            Self::Symptoms => 2,
            Self::Results => 3,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::PatientInfo => "Patient Information",
            Self::Symptoms => "Select Symptoms",
            Self::Results => "Analysis Results",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
