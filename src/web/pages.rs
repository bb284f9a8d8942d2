//! Server-side HTML for each wizard step.

use std::fmt::Write as _;

use crate::catalog::index::SearchResults;
use crate::catalog::store::Catalog;
use crate::core::patient::{FieldErrors, PatientForm};
use crate::core::types::{Sex, Step};
use crate::matching::selection::SymptomSelection;
use crate::report::palette::color_for;
use crate::report::summary::ResultsReport;
use crate::report::{escape_html, format_thousands, percent_encode};
use crate::utils::validation::ValidationError;

const DISCLAIMER: &str = "This tool is for informational and demonstrational purposes ONLY. \
It is not a substitute for professional medical advice, diagnosis, or treatment. \
If you think you may have a medical emergency, call 911 immediately.";

/// Wrap a step body in the page chrome: header, disclaimer, progress indicator
pub fn layout(step: Step, body: &str) -> String {
    let mut progress = String::new();
    for s in [Step::PatientInfo, Step::Symptoms, Step::Results] {
        let class = if s == step {
            "step current"
        } else if s.number() < step.number() {
            "step done"
        } else {
            "step"
        };
        let _ = write!(progress, r#"<span class="{class}">{}</span>"#, s.number());
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Symptom Checker</title>
<link rel="stylesheet" href="/static/css/styles.css">
</head>
<body>
<header><h1>Symptom Checker</h1></header>
<main>
<section class="disclaimer">
<h3>Medical Disclaimer</h3>
<p>{DISCLAIMER}</p>
</section>
<nav class="progress">{progress}<span class="step-title">{title}</span></nav>
{body}
</main>
</body>
</html>
"#,
        title = step.title(),
    )
}

/// Step 1: patient information form, re-filled with the submitted values
/// and any field messages after a rejected submission
pub fn patient_page(form: &PatientForm, errors: Option<&FieldErrors>) -> String {
    let age_error = errors.and_then(|e| e.age.as_deref());
    let sex_error = errors.and_then(|e| e.sex.as_deref());

    let mut options = String::from(r#"<option value="">Select biological sex</option>"#);
    let current = Sex::parse(&form.sex);
    for sex in [Sex::Male, Sex::Female, Sex::Other] {
        let selected = if current == Some(sex) { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{}"{selected}>{sex}</option>"#,
            sex.code()
        );
    }

    let body = format!(
        r#"<section class="patient">
<h2>Patient Information</h2>
<form method="post" action="/patient">
<label for="age">Age</label>
<input id="age" name="age" type="text" inputmode="numeric" placeholder="Enter age (0-120)" value="{age}">
{age_error}
<label for="sex">Biological Sex</label>
<select id="sex" name="sex">{options}</select>
{sex_error}
<button type="submit">Continue</button>
</form>
</section>"#,
        age = escape_html(&form.age),
        age_error = field_error(age_error),
        sex_error = field_error(sex_error),
    );
    layout(Step::PatientInfo, &body)
}

fn field_error(message: Option<&str>) -> String {
    message
        .map(|m| format!(r#"<p class="field-error">{}</p>"#, escape_html(m)))
        .unwrap_or_default()
}

/// Step 2: search, category browser, and the current selection
pub fn symptoms_page(
    catalog: &Catalog,
    selection: &SymptomSelection,
    term: &str,
    search: Result<SearchResults<'_>, ValidationError>,
) -> String {
    let mut body = String::from(r#"<section class="symptoms"><h2>Select Symptoms</h2>"#);

    let _ = write!(
        body,
        r#"<form method="get" action="/" class="search">
<input name="q" type="search" placeholder="Search symptoms..." value="{}">
<button type="submit">Search</button>
</form>"#,
        escape_html(term)
    );

    match search {
        Err(err) => {
            let _ = write!(body, r#"<p class="field-error">{}</p>"#, escape_html(&err.to_string()));
        }
        Ok(SearchResults::Idle) => {}
        Ok(SearchResults::NoMatches { term }) => {
            let _ = write!(
                body,
                r#"<p class="empty">No symptoms found matching "{}"</p>"#,
                escape_html(&term)
            );
        }
        Ok(SearchResults::Found { symptoms }) => {
            body.push_str(r#"<ul class="search-results">"#);
            for symptom in symptoms {
                body.push_str(&symptom_button(
                    symptom.id.0,
                    &symptom.name,
                    &symptom.category,
                    selection.contains(symptom.id),
                    term,
                ));
            }
            body.push_str("</ul>");
        }
    }

    body.push_str(r#"<h3>Browse by Category</h3><div class="categories">"#);
    for group in catalog.groups() {
        if group.is_empty() {
            continue;
        }
        let _ = write!(
            body,
            r#"<details style="border-color: {color}"><summary>{label} ({count})</summary><ul>"#,
            color = color_for(group.category.label()),
            label = group.category,
            count = group.len(),
        );
        for symptom in catalog.group_symptoms(group) {
            body.push_str(&symptom_button(
                symptom.id.0,
                &symptom.name,
                &symptom.category,
                selection.contains(symptom.id),
                term,
            ));
        }
        body.push_str("</ul></details>");
    }
    body.push_str("</div>");

    body.push_str(r#"<h3>Selected Symptoms</h3>"#);
    if selection.is_empty() {
        body.push_str(r#"<p class="empty">No symptoms selected yet</p>"#);
    } else {
        body.push_str(r#"<ul class="selected">"#);
        for symptom in selection {
            let _ = write!(
                body,
                r#"<li>{name} <span class="prime">(Prime: {prime})</span>
<form method="post" action="/symptoms/remove" class="inline">
<input type="hidden" name="symptom_id" value="{id}">
<input type="hidden" name="q" value="{q}">
<button type="submit" aria-label="Remove {name}">&times;</button>
</form></li>"#,
                name = escape_html(&symptom.name),
                prime = symptom.prime,
                id = symptom.id,
                q = escape_html(term),
            );
        }
        body.push_str("</ul>");
    }

    let product = selection
        .prime_product()
        .map_or_else(|| "too large to display".to_string(), format_thousands);
    let _ = write!(
        body,
        r#"<p class="totals">Total selected: {count}<br>Prime product: {product}</p>"#,
        count = selection.len(),
    );

    let disabled = if selection.is_empty() { " disabled" } else { "" };
    let _ = write!(
        body,
        r#"<div class="actions">
<form method="post" action="/reset" class="inline"><button type="submit" class="secondary">Back to Patient Info</button></form>
<form method="post" action="/analyze" class="inline"><button type="submit"{disabled}>Analyze Symptoms</button></form>
</div></section>"#
    );

    layout(Step::Symptoms, &body)
}

fn symptom_button(id: u32, name: &str, category: &str, selected: bool, term: &str) -> String {
    let (action, marker, class) = if selected {
        ("/symptoms/remove", "&#10003;", "symptom selected")
    } else {
        ("/symptoms/add", "+", "symptom")
    };
    format!(
        r#"<li><form method="post" action="{action}" class="inline">
<input type="hidden" name="symptom_id" value="{id}">
<input type="hidden" name="q" value="{q}">
<button type="submit" class="{class}" title="{category}">{marker} {name}</button>
</form></li>"#,
        q = escape_html(term),
        category = escape_html(category),
        name = escape_html(name),
    )
}

/// Step 3: patient summary, ranked conditions and the visualization
pub fn results_page(report: &ResultsReport) -> String {
    let patient = &report.patient;
    let symptoms = patient
        .symptoms
        .iter()
        .map(|s| escape_html(s))
        .collect::<Vec<_>>()
        .join(", ");
    let product = patient
        .prime_product
        .as_deref()
        .unwrap_or("too large to display");

    let mut body = format!(
        r#"<section class="results">
<h2>Analysis Results</h2>
<div class="summary">
<h3>Patient &amp; Symptom Summary</h3>
<p><strong>Age:</strong> {age}<br>
<strong>Biological Sex:</strong> {sex}<br>
<strong>Symptoms:</strong> {count}<br>
<strong>Selected Symptoms:</strong> {symptoms}<br>
<strong>Prime product:</strong> {product}</p>
</div>"#,
        age = patient.age,
        sex = escape_html(&patient.sex),
        count = patient.selected_count,
    );

    if report.has_matches() {
        body.push_str(r#"<h3>Potential Conditions</h3><ol class="matches">"#);
        for card in &report.matches {
            let _ = write!(
                body,
                r#"<li class="match" style="border-left-color: {color}">
<h4>{name} <span class="badge">{label}</span></h4>
<p><strong>Category:</strong> {category}</p>
<p><strong>Matched Symptoms:</strong> {matched}</p>
<p><strong>SQF (Symptom Quotient Factorization):</strong> {sqf}</p>
<div class="action"><strong>Suggested Action</strong><p>{action}</p></div>
<a href="{url}" target="_blank" rel="noopener noreferrer">Learn more</a>
</li>"#,
                color = card.color,
                name = escape_html(&card.name),
                label = card.match_label,
                category = escape_html(&card.category),
                matched = card
                    .matched_symptoms
                    .iter()
                    .map(|s| escape_html(s))
                    .collect::<Vec<_>>()
                    .join(", "),
                sqf = card.signature_display,
                action = escape_html(&card.action),
                url = escape_html(&card.learn_more_url),
            );
        }
        body.push_str("</ol>");
    } else {
        body.push_str(
            r#"<div class="no-matches">
<h3>No Matches Found</h3>
<p>Based on the symptoms provided, no matching conditions were found in our database.</p>
<form method="post" action="/new-check" class="inline"><button type="submit">Try Different Symptoms</button></form>
</div>"#,
        );
    }

    body.push_str(r#"<div class="visualization"><h3>Visualization</h3>"#);
    match &report.graph {
        Some(graph) => {
            body.push_str(&graph.to_svg());
            body.push_str(
                "<p>This visualization shows connections between symptoms (left) and potential \
conditions (right). Lines indicate which symptoms contribute to each condition's SQF \
(Symptom Quotient Factorization).</p>",
            );
        }
        None => body.push_str(r#"<p class="empty">No data available for visualization.</p>"#),
    }
    body.push_str("</div>");

    body.push_str(
        r#"<section class="note"><h3>Important Note</h3>
<p>These results are for informational purposes only and should not be considered a diagnosis.
Always consult with a qualified healthcare professional.</p></section>
<div class="actions">
<form method="post" action="/new-check" class="inline"><button type="submit">New Symptom Check</button></form>
<form method="post" action="/reset" class="inline"><button type="submit" class="secondary">Start Over</button></form>
</div></section>"#,
    );

    layout(Step::Results, &body)
}

/// Location to return to after a symptom form, keeping the active search
pub fn symptoms_location(term: Option<&str>) -> String {
    match term.map(str::trim).filter(|t| !t.is_empty()) {
        Some(term) => format!("/?q={}", percent_encode(term)),
        None => "/".to_string(),
    }
}
