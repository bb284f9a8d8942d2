use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::index::SearchResults;
use crate::cli::{load_catalog, OutputFormat};
use crate::core::symptom::Symptom;
use crate::core::types::SymptomCategory;
use crate::report::format_thousands;
use crate::utils::validation::validate_search_term;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List symptoms grouped by category
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only list one category (e.g., "Respiratory")
        #[arg(long)]
        category: Option<String>,
    },

    /// Search symptoms by name or category
    Search {
        /// Search term (case-insensitive)
        #[arg(required = true)]
        term: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List condition definitions and their signature quotients
    Conditions {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, an argument is
/// invalid, or the export cannot be written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, category } => {
            run_list(catalog, category.as_deref(), format, verbose)
        }
        CatalogCommands::Search { term, catalog } => run_search(&term, catalog, format),
        CatalogCommands::Conditions { catalog } => run_conditions(catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    category_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} symptoms", catalog.len());
    }

    let category = category_filter
        .map(|name| {
            SymptomCategory::parse(name).ok_or_else(|| {
                let valid: Vec<&str> = SymptomCategory::ALL.iter().map(|c| c.label()).collect();
                anyhow::anyhow!(
                    "Unknown category '{name}'. Valid categories: {}",
                    valid.join(", ")
                )
            })
        })
        .transpose()?;

    let groups: Vec<_> = catalog
        .groups()
        .iter()
        .filter(|g| category.map_or(!g.is_empty(), |c| g.category == c))
        .collect();

    match format {
        OutputFormat::Text => {
            let name_width = catalog
                .symptoms
                .iter()
                .map(|s| s.name.len())
                .max()
                .unwrap_or(4)
                .max(4);

            println!("Symptom Catalog ({} symptoms)\n", catalog.len());
            for group in groups {
                println!("{} ({})", group.category, group.len());
                for s in catalog.group_symptoms(group) {
                    if verbose {
                        println!(
                            "  {:>4}  {:<name_w$}  {:>4}  {}",
                            s.id.0,
                            s.name,
                            s.prime,
                            s.category,
                            name_w = name_width
                        );
                    } else {
                        println!(
                            "  {:>4}  {:<name_w$}  {:>4}",
                            s.id.0,
                            s.name,
                            s.prime,
                            name_w = name_width
                        );
                    }
                }
                println!();
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = groups
                .iter()
                .map(|g| {
                    serde_json::json!({
                        "category": g.category.label(),
                        "symptoms": catalog.group_symptoms(g).collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            print_symptom_tsv_header();
            for group in groups {
                for s in catalog.group_symptoms(group) {
                    print_symptom_tsv(s);
                }
            }
        }
    }

    Ok(())
}

fn run_search(
    term: &str,
    catalog_path: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let term = validate_search_term(term)?;
    let catalog = load_catalog(catalog_path.as_deref())?;
    let results = catalog.search(term);

    match format {
        OutputFormat::Text => match &results {
            SearchResults::Idle => println!("Enter a search term to find symptoms."),
            SearchResults::NoMatches { term } => println!("No symptoms found matching \"{term}\""),
            SearchResults::Found { symptoms } => {
                println!("{} symptoms matching \"{term}\"\n", symptoms.len());
                for s in symptoms {
                    println!("  {:>4}  {} [{}] (prime {})", s.id.0, s.name, s.category, s.prime);
                }
            }
        },
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Tsv => {
            print_symptom_tsv_header();
            for s in results.symptoms() {
                print_symptom_tsv(s);
            }
        }
    }

    Ok(())
}

fn run_conditions(catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    match format {
        OutputFormat::Text => {
            println!("Conditions ({})\n", catalog.conditions.len());
            for c in &catalog.conditions {
                println!("{} [{}]", c.name, c.category);
                println!("  Symptoms: {}", c.trigger_symptoms.join(", "));
                println!("  SQF:      {}", format_thousands(u128::from(c.signature_quotient)));
                println!("  Action:   {}", c.action);
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&catalog.conditions)?);
        }
        OutputFormat::Tsv => {
            println!("name\tcategory\tsignature_quotient\ttrigger_symptoms\taction");
            for c in &catalog.conditions {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    c.name,
                    c.category,
                    c.signature_quotient,
                    c.trigger_symptoms.join(","),
                    c.action
                );
            }
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} symptoms and {} conditions to {}",
        catalog.len(),
        catalog.conditions.len(),
        output.display()
    );

    Ok(())
}

fn print_symptom_tsv_header() {
    println!("id\tname\tprime\tcategory\tgroup");
}

fn print_symptom_tsv(s: &Symptom) {
    println!(
        "{}\t{}\t{}\t{}\t{}",
        s.id,
        s.name,
        s.prime,
        s.category,
        s.group.label()
    );
}
