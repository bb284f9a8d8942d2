use axum::http::header;
use axum::{
    extract::{DefaultBodyLimit, Form, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::Catalog;
use crate::cli::{load_catalog, ServeArgs};
use crate::core::patient::PatientForm;
use crate::core::types::{Step, SymptomId};
use crate::matching::engine::{MatchingConfig, MatchingEngine};
use crate::report::summary::ResultsReport;
use crate::utils::validation::{check_selection_limit, validate_search_term};
use crate::web::pages;
use crate::wizard::{Session, WizardError};

/// Request body limit; every form here is a handful of short fields
pub const MAX_BODY_SIZE: usize = 16 * 1024;

/// Shared application state
pub struct AppState {
    pub catalog: Catalog,
    pub config: MatchingConfig,
    /// The single wizard session of this server instance
    pub session: Mutex<Session>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: MatchingConfig) -> Self {
        Self {
            catalog,
            config,
            session: Mutex::new(Session::new()),
        }
    }

    /// Lock the session. A poisoned lock still holds a consistent session
    /// because every transition is applied in a single assignment.
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn error_response(status: StatusCode, error_type: &str, user_message: &str) -> Response {
    (
        status,
        Json(create_safe_error_response(error_type, user_message, None)),
    )
        .into_response()
}

/// Query string of the main page
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Symptom search term
    #[serde(default)]
    pub q: Option<String>,
}

/// Body of the add/remove symptom forms
#[derive(Debug, Deserialize)]
pub struct SymptomForm {
    pub symptom_id: u32,
    /// Search term to restore after the redirect
    #[serde(default)]
    pub q: Option<String>,
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
///
/// Rate limiting is keyed on the peer address and is added by the server
/// itself, so the router can be driven directly in tests.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/patient", post(patient_handler))
        .route("/symptoms/add", post(add_symptom_handler))
        .route("/symptoms/remove", post(remove_symptom_handler))
        .route("/analyze", post(analyze_handler))
        .route("/new-check", post(new_check_handler))
        .route("/reset", post(reset_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/session", get(session_handler))
        .route("/static/css/styles.css", get(styles_css_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("no-referrer"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let config = MatchingConfig {
        limit: args.max_matches,
        ..MatchingConfig::default()
    };
    let state = Arc::new(AppState::new(catalog, config));

    // IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit configuration"))?;

    let app = create_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting symptom-checker web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn see_other(location: &str) -> Response {
    Redirect::to(location).into_response()
}

/// Transition errors from a stale page are answered by sending the browser
/// back to whatever step the session is really on
fn wizard_error_response(err: &WizardError) -> Response {
    tracing::debug!("Rejected wizard action: {err}");
    see_other("/")
}

/// Main page: renders the current step
async fn index_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let session = state.session();
    let html = match session.step() {
        Step::PatientInfo => pages::patient_page(&PatientForm::default(), None),
        Step::Symptoms => {
            let raw = query.q.as_deref().unwrap_or_default();
            let search = validate_search_term(raw).map(|term| state.catalog.search(term));
            let term = search.as_ref().map_or("", |_| raw.trim());
            match session.selection() {
                Some(selection) => pages::symptoms_page(&state.catalog, selection, term, search),
                None => return see_other("/"),
            }
        }
        Step::Results => match ResultsReport::from_session(&session) {
            Some(report) => pages::results_page(&report),
            None => return see_other("/"),
        },
    };
    Html(html).into_response()
}

async fn patient_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PatientForm>,
) -> Response {
    let mut session = state.session();
    match session.submit_patient_info(&form) {
        Ok(_) => see_other("/"),
        Err(WizardError::InvalidPatientInfo(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::patient_page(&form, Some(&errors))),
        )
            .into_response(),
        Err(err) => wizard_error_response(&err),
    }
}

async fn add_symptom_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SymptomForm>,
) -> Response {
    let Some(symptom) = state.catalog.get(SymptomId::new(form.symptom_id)) else {
        return error_response(StatusCode::BAD_REQUEST, "unknown_symptom", "Unknown symptom");
    };

    let mut session = state.session();
    let selected = session.selection().map_or(0, |s| s.len());
    if let Err(err) = check_selection_limit(selected + 1) {
        return error_response(StatusCode::BAD_REQUEST, "too_many_symptoms", &err.to_string());
    }

    match session.add_symptom(symptom) {
        Ok(_) => see_other(&pages::symptoms_location(form.q.as_deref())),
        Err(err) => wizard_error_response(&err),
    }
}

async fn remove_symptom_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SymptomForm>,
) -> Response {
    let mut session = state.session();
    match session.remove_symptom(SymptomId::new(form.symptom_id)) {
        Ok(_) => see_other(&pages::symptoms_location(form.q.as_deref())),
        Err(err) => wizard_error_response(&err),
    }
}

async fn analyze_handler(State(state): State<Arc<AppState>>) -> Response {
    let engine = MatchingEngine::with_config(&state.catalog, state.config.clone());
    let mut session = state.session();
    match session.analyze(&engine) {
        Ok(_) => see_other("/"),
        Err(err) => wizard_error_response(&err),
    }
}

async fn new_check_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session();
    match session.new_check() {
        Ok(()) => see_other("/"),
        Err(err) => wizard_error_response(&err),
    }
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Response {
    state.session().reset();
    see_other("/")
}

/// Return the symptom catalog and condition definitions
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let symptoms: Vec<serde_json::Value> = state
        .catalog
        .symptoms
        .iter()
        .map(|s| {
            serde_json::json!({
                "id": s.id,
                "name": s.name,
                "prime": s.prime,
                "category": s.category,
                "group": s.group.label(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": symptoms.len(),
        "symptoms": symptoms,
        "conditions": state.catalog.conditions,
    }))
}

/// Return the current session as JSON
async fn session_handler(State(state): State<Arc<AppState>>) -> Response {
    let session = state.session();
    match serde_json::to_value(session.snapshot()) {
        Ok(value) => Json(value).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(create_safe_error_response(
                "serialization_error",
                "Failed to read session",
                Some(&e.to_string()),
            )),
        )
            .into_response(),
    }
}

/// Static CSS handler
async fn styles_css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("static/css/styles.css"),
    )
}
