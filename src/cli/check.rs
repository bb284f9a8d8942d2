use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_catalog, OutputFormat};
use crate::core::patient::PatientForm;
use crate::matching::engine::{MatchingConfig, MatchingEngine, DEFAULT_MIN_MATCH_COUNT};
use crate::report::summary::ResultsReport;
use crate::utils::validation::check_selection_limit;
use crate::wizard::{Session, WizardError};

#[derive(Args)]
pub struct CheckArgs {
    /// Patient age in years (0-120)
    #[arg(long, required = true, allow_hyphen_values = true)]
    pub age: String,

    /// Biological sex: M, F, or Other
    #[arg(long, required = true)]
    pub sex: String,

    /// Symptom name or ID; repeat for several symptoms
    #[arg(short, long = "symptom", required = true, num_args = 1..)]
    pub symptoms: Vec<String>,

    /// Number of conditions to show
    #[arg(short = 'n', long)]
    pub max_matches: Option<usize>,

    /// Only show conditions matching at least this many symptoms
    #[arg(long, default_value_t = DEFAULT_MIN_MATCH_COUNT)]
    pub min_matches: usize,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Execute check subcommand
///
/// # Errors
///
/// Returns an error if the patient information is invalid, a symptom is
/// unknown, or the catalog cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    check_selection_limit(args.symptoms.len())?;

    let catalog = load_catalog(args.catalog.as_deref())?;
    if verbose {
        eprintln!(
            "Loaded catalog with {} symptoms and {} conditions",
            catalog.len(),
            catalog.conditions.len()
        );
    }

    let mut session = Session::new();
    session
        .submit_patient_info(&PatientForm::new(args.age.as_str(), args.sex.as_str()))
        .map_err(|err| match err {
            WizardError::InvalidPatientInfo(errors) => {
                anyhow::anyhow!(errors.messages().collect::<Vec<_>>().join("; "))
            }
            other => other.into(),
        })?;

    for reference in &args.symptoms {
        let symptom = catalog
            .resolve(reference)
            .ok_or_else(|| anyhow::anyhow!("Unknown symptom: '{reference}'"))?;
        if !session.add_symptom(symptom)? && verbose {
            eprintln!("Ignoring duplicate symptom: {}", symptom.name);
        }
    }

    let engine = MatchingEngine::with_config(
        &catalog,
        MatchingConfig {
            min_match_count: args.min_matches,
            limit: args.max_matches,
        },
    );
    session.analyze(&engine)?;

    let report = ResultsReport::from_session(&session)
        .ok_or_else(|| anyhow::anyhow!("Session has no results after analysis"))?;

    match format {
        OutputFormat::Text => print_text(&report, verbose),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Tsv => print_tsv(&report),
    }

    Ok(())
}

fn print_text(report: &ResultsReport, verbose: bool) {
    let patient = &report.patient;
    println!("Patient: age {}, {}", patient.age, patient.sex);
    println!(
        "Symptoms ({}): {}",
        patient.selected_count,
        patient.symptoms.join(", ")
    );
    if verbose {
        println!(
            "Prime product: {}",
            patient.prime_product.as_deref().unwrap_or("too large to display")
        );
    }
    println!();

    if !report.has_matches() {
        println!("No matching conditions found.");
        return;
    }

    println!("Potential Conditions\n");
    for card in &report.matches {
        println!("#{} {} ({})", card.rank, card.name, card.match_label);
        println!("   Category: {}", card.category);
        println!("   Matched:  {}", card.matched_symptoms.join(", "));
        println!("   SQF:      {}", card.signature_display);
        println!("   Action:   {}", card.action);
        if verbose {
            println!("   Learn more: {}", card.learn_more_url);
        }
        println!();
    }

    println!("These results are for informational purposes only and are not a diagnosis.");
}

fn print_json(report: &ResultsReport) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "patient": report.patient,
        "matches": report.matches,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(report: &ResultsReport) {
    println!("rank\tname\tcategory\tmatch_count\tsignature_quotient\tmatched_symptoms\taction");
    for card in &report.matches {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            card.rank,
            card.name,
            card.category,
            card.match_count,
            card.signature_quotient,
            card.matched_symptoms.join(","),
            card.action
        );
    }
}
