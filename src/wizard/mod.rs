//! The three-step wizard: patient information, symptom selection, results.
//!
//! ```text
//!              submit(info)            analyze
//! PatientInfo ─────────────▶ Symptoms ─────────▶ Results
//!      ▲                      ▲   │  ▲               │
//!      │                      │   └──┘ new_check     │
//!      │                      └──────────────────────┘ new_check
//!      └──────────────── reset (from any step)
//! ```
//!
//! A [`Session`] is held in memory only and discarded on reset.

pub mod session;

pub use session::{Action, Session, SessionSnapshot, WizardError};
