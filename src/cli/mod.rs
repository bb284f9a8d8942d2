//! Command-line interface for symptom-checker.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **check**: Run one symptom check non-interactively and print ranked conditions
//! - **catalog**: List, search, or export the symptom catalog
//! - **serve**: Start the browser wizard
//!
//! ## Usage
//!
//! ```text
//! # Rank conditions for a patient
//! symptom-checker check --age 35 --sex M --symptom Cough --symptom "Sore throat"
//!
//! # JSON output for scripting
//! symptom-checker check --age 35 --sex F -s Fever -s Chills --format json
//!
//! # Browse the catalog
//! symptom-checker catalog list --category Respiratory
//! symptom-checker catalog search pain
//!
//! # Start web UI
//! symptom-checker serve --port 8080 --open
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::store::{Catalog, CatalogError};

pub mod catalog;
pub mod check;

#[derive(Parser)]
#[command(name = "symptom-checker")]
#[command(version)]
#[command(about = "Match symptoms to conditions using prime signatures")]
#[command(
    long_about = "symptom-checker walks through a three-step check: patient information, symptom selection, and ranked results.\n\nEvery symptom carries a unique prime and every condition a signature quotient, the product of its symptoms' primes. Conditions are ranked by how many selected symptoms they share.\n\nThis tool is for informational and demonstrational purposes only. It is not a substitute for professional medical advice."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank conditions for a patient and a set of symptoms
    Check(check::CheckArgs),

    /// Browse the symptom catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Maximum number of conditions to show
    #[arg(short = 'n', long)]
    pub max_matches: Option<usize>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load a custom catalog if a path is given, otherwise the embedded one
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => Catalog::load_from_file(path),
        None => Catalog::load_embedded(),
    }
}
