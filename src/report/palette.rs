//! Category display colors.

/// Fallback for keys with no assigned color
pub const DEFAULT_COLOR: &str = "#f5f5f5";

const COLORS: &[(&str, &str)] = &[
    // Condition categories
    ("Infectious Disease/Primary Care", "#f8cecc"),
    ("Allergy/Immunology", "#fad7ac"),
    ("Neurology", "#d0e0fc"),
    ("Metabolic/Genetic", "#d5e8d4"),
    ("Musculoskeletal/Genetic", "#fff2cc"),
    ("Gastroenterology", "#f8d7f8"),
    ("Urology", "#e1d5e7"),
    // Symptom categories
    ("Systemic", "#c4e3f3"),
    ("Respiratory", "#d9edf7"),
    ("Neurological", "#dff0d8"),
    ("Gastrointestinal", "#fcf8e3"),
    ("Musculoskeletal", "#f2dede"),
    ("ENT", "#e8f5e9"),
    ("Sensory", "#fff9c4"),
    ("Psychological", "#f3e5f5"),
    ("Cardiovascular", "#ffebee"),
    ("Urogenital", "#e0f7fa"),
    ("Other", "#f5f5f5"),
];

/// Color for a category key, or [`DEFAULT_COLOR`] for unknown keys
#[must_use]
pub fn color_for(key: &str) -> &'static str {
    COLORS
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(DEFAULT_COLOR, |&(_, color)| color)
}
