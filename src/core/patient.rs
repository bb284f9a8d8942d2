use serde::{Deserialize, Serialize};

use crate::core::types::Sex;

/// Oldest age accepted on the patient form
pub const MAX_AGE: u8 = 120;

pub const AGE_REQUIRED: &str = "Age is required";
pub const AGE_OUT_OF_RANGE: &str = "Please enter a valid age between 0 and 120";
pub const SEX_REQUIRED: &str = "Biological sex is required";
pub const SEX_INVALID: &str = "Please select a valid biological sex";

/// Validated patient information for one session.
///
/// Only obtainable through [`PatientForm::validate`], so an instance always
/// holds an age in `0..=120` and one of the three sex values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatientInfo {
    age: u8,
    sex: Sex,
}

impl PatientInfo {
    #[must_use]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[must_use]
    pub fn sex(&self) -> Sex {
        self.sex
    }
}

/// Raw patient form input, exactly as typed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientForm {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub sex: String,
}

/// Field-level validation messages, one per invalid field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid patient information")]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.sex.is_none()
    }

    /// All messages in field order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.age.iter().chain(self.sex.iter()).map(String::as_str)
    }
}

impl PatientForm {
    pub fn new(age: impl Into<String>, sex: impl Into<String>) -> Self {
        Self {
            age: age.into(),
            sex: sex.into(),
        }
    }

    /// Validate both fields, collecting every failure.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] with a message for each invalid field.
    pub fn validate(&self) -> Result<PatientInfo, FieldErrors> {
        let age = parse_age(&self.age);
        let sex = parse_sex(&self.sex);

        match (age, sex) {
            (Ok(age), Ok(sex)) => Ok(PatientInfo { age, sex }),
            (age, sex) => Err(FieldErrors {
                age: age.err().map(str::to_string),
                sex: sex.err().map(str::to_string),
            }),
        }
    }
}

fn parse_age(raw: &str) -> Result<u8, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AGE_REQUIRED);
    }

    // Reject fractions and anything non-numeric; parse wide so large
    // values report as out of range rather than as garbage
    match trimmed.parse::<i64>() {
        Ok(age) if (0..=i64::from(MAX_AGE)).contains(&age) => {
            u8::try_from(age).map_err(|_| AGE_OUT_OF_RANGE)
        }
        _ => Err(AGE_OUT_OF_RANGE),
    }
}

fn parse_sex(raw: &str) -> Result<Sex, &'static str> {
    if raw.trim().is_empty() {
        return Err(SEX_REQUIRED);
    }
    Sex::parse(raw).ok_or(SEX_INVALID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let info = PatientForm::new("42", "F").validate().unwrap();
        assert_eq!(info.age(), 42);
        assert_eq!(info.sex(), Sex::Female);
    }

    #[test]
    fn test_age_bounds_inclusive() {
        assert_eq!(PatientForm::new("0", "M").validate().unwrap().age(), 0);
        assert_eq!(PatientForm::new("120", "M").validate().unwrap().age(), 120);
        assert_eq!(PatientForm::new(" 7 ", "M").validate().unwrap().age(), 7);
    }

    #[test]
    fn test_missing_age() {
        let errors = PatientForm::new("", "M").validate().unwrap_err();
        assert_eq!(errors.age.as_deref(), Some(AGE_REQUIRED));
        assert!(errors.sex.is_none());
    }

    #[test]
    fn test_invalid_ages() {
        for age in ["-1", "121", "abc", "25.5", "99999999999999999999"] {
            let errors = PatientForm::new(age, "Other").validate().unwrap_err();
            assert_eq!(errors.age.as_deref(), Some(AGE_OUT_OF_RANGE), "age {age:?}");
        }
    }

    #[test]
    fn test_missing_and_invalid_sex() {
        let errors = PatientForm::new("30", "").validate().unwrap_err();
        assert_eq!(errors.sex.as_deref(), Some(SEX_REQUIRED));
        assert!(errors.age.is_none());

        let errors = PatientForm::new("30", "unknown").validate().unwrap_err();
        assert_eq!(errors.sex.as_deref(), Some(SEX_INVALID));
    }

    #[test]
    fn test_both_fields_reported() {
        let errors = PatientForm::default().validate().unwrap_err();
        assert_eq!(errors.messages().count(), 2);
        assert!(!errors.is_empty());
    }
}
