//! # symptom-checker
//!
//! A library for matching patient symptoms against condition definitions
//! using prime signatures.
//!
//! Every symptom in the catalog is tagged with a unique prime. Every condition
//! carries a signature quotient: the product of the primes of its trigger
//! symptoms. A symptom contributes to a condition exactly when its prime
//! divides that quotient, and conditions are ranked by how many selected
//! symptoms they share.
//!
//! ## Features
//!
//! - **Embedded catalog**: 40 symptoms and their conditions, validated at build time
//! - **Symptom search**: Case-insensitive search over names and categories
//! - **Stable ranking**: Ties keep the catalog's condition order
//! - **Three-step wizard**: Patient information, symptom selection, results
//! - **Visualization**: Symptom/condition node-link diagram rendered as SVG
//!
//! ## Example
//!
//! ```rust
//! use symptom_checker::{Catalog, MatchingEngine, PatientForm, Session};
//!
//! let catalog = Catalog::load_embedded().unwrap();
//! let engine = MatchingEngine::new(&catalog);
//!
//! let mut session = Session::new();
//! session.submit_patient_info(&PatientForm::new("35", "M")).unwrap();
//! for name in ["Cough", "Sore throat", "Sneezing"] {
//!     session.add_symptom(catalog.find_by_name(name).unwrap()).unwrap();
//! }
//!
//! let results = session.analyze(&engine).unwrap();
//! assert_eq!(results[0].name, "Common Cold");
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Symptom catalog storage, indexing, and search
//! - [`core`]: Core data types for symptoms, conditions, and patients
//! - [`matching`]: Symptom selection and the matching engine
//! - [`wizard`]: Session state machine
//! - [`report`]: Result summaries and the visualization
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for the browser wizard

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod report;
pub mod utils;
pub mod web;
pub mod wizard;

// Re-export commonly used types for convenience
pub use catalog::store::Catalog;
pub use core::condition::{ConditionDefinition, DiseaseMatch};
pub use core::patient::{FieldErrors, PatientForm, PatientInfo};
pub use core::symptom::Symptom;
pub use core::types::*;
pub use matching::engine::{MatchingConfig, MatchingEngine};
pub use matching::selection::SymptomSelection;
pub use wizard::{Session, WizardError};
