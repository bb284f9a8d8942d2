//! Core data types for symptom matching.
//!
//! - [`Symptom`](symptom::Symptom): a catalog symptom with its unique prime
//! - [`ConditionDefinition`](condition::ConditionDefinition): a condition and its trigger symptoms
//! - [`DiseaseMatch`](condition::DiseaseMatch): a ranked analysis result
//! - [`PatientForm`](patient::PatientForm) / [`PatientInfo`](patient::PatientInfo): raw and validated patient input
//! - [`SymptomId`](types::SymptomId), [`SymptomCategory`](types::SymptomCategory), [`Sex`](types::Sex), [`Step`](types::Step)
//!
//! ## Prime signatures
//!
//! Each symptom is tagged with a distinct prime. By uniqueness of prime
//! factorization the product of a set of symptom primes identifies that set:
//!
//! | Condition   | Triggers                                   | Signature |
//! |-------------|--------------------------------------------|-----------|
//! | Common Cold | Cough, Sore throat, Runny nose, Sneezing, Fatigue | 2·3·5·7·11 = 2310 |
//!
//! A symptom contributes to a condition exactly when its prime divides the
//! condition's signature quotient.

pub mod condition;
pub mod patient;
pub mod symptom;
pub mod types;
