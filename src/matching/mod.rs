//! Symptom-to-condition matching.
//!
//! - [`SymptomSelection`]: the user's picks, ordered and unique by id
//! - [`MatchingEngine`]: ranks conditions against a selection
//!
//! ## Matching Algorithm
//!
//! For every condition the engine counts how many selected symptoms are in
//! its trigger set. Conditions with no matching symptom are dropped and the
//! rest are ranked by count, descending. Ranking uses a stable sort: two
//! conditions with the same count appear in catalog definition order.
//!
//! Patient age and sex are collected by the wizard but do not influence
//! matching.
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_checker::{Catalog, MatchingEngine, SymptomSelection};
//!
//! let catalog = Catalog::load_embedded().unwrap();
//! let mut selection = SymptomSelection::new();
//! selection.add(catalog.find_by_name("Itchy eyes").unwrap());
//!
//! let engine = MatchingEngine::new(&catalog);
//! for m in engine.find_matches(&selection) {
//!     println!("{}: {} match(es)", m.name, m.match_count);
//! }
//! ```

pub mod engine;
pub mod selection;

pub use engine::{MatchingConfig, MatchingEngine};
pub use selection::SymptomSelection;
