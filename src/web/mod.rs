//! Web server for the browser-based symptom wizard.
//!
//! Each wizard step is rendered server-side as HTML. Forms post to the
//! server, which applies the transition to the session and redirects back
//! to `/` (POST/redirect/GET). The server holds one in-memory session and
//! persists nothing.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! symptom-checker serve
//!
//! # Custom port and auto-open browser
//! symptom-checker serve --port 3000 --open
//! ```
//!
//! ## Routes
//!
//! - `GET /` - Current wizard step (`?q=` searches symptoms)
//! - `POST /patient` - Submit age and biological sex
//! - `POST /symptoms/add`, `POST /symptoms/remove` - Edit the selection
//! - `POST /analyze` - Rank conditions against the selection
//! - `POST /new-check` - Keep patient info, clear symptoms and results
//! - `POST /reset` - Discard the session
//! - `GET /api/catalog` - Symptom catalog and condition definitions
//! - `GET /api/session` - Current session as JSON

pub mod pages;
pub mod server;
