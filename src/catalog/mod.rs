//! Symptom catalog storage and indexing.
//!
//! The catalog holds every selectable symptom, each tagged with a unique
//! prime, and the condition definitions matched against them. An embedded
//! catalog is compiled into the binary, but custom catalogs can also be
//! loaded from JSON files.
//!
//! Loading enforces the catalog invariants: unique ids, names and primes,
//! primes that really are prime, and condition triggers that name known
//! symptoms. Each condition's signature quotient is derived from its
//! triggers at load time rather than read from the file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_checker::Catalog;
//!
//! let catalog = Catalog::load_embedded().unwrap();
//!
//! for group in catalog.groups() {
//!     println!("{} ({})", group.category, group.len());
//! }
//!
//! let fever = catalog.find_by_name("fever").unwrap();
//! assert_eq!(fever.prime, 13);
//! ```

pub mod index;
pub mod store;
