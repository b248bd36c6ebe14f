// src/api.rs
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::analyzer::SentimentAnalyzer;
use crate::boundary;
use crate::lexicon::entries_from_json;
use crate::report::{generate_report, Report};
use crate::result::SentimentResult;
use crate::splitter::SplitResult;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SentimentAnalyzer>,
    /// Upper bound per scoring job; the core itself has no cancellation.
    pub timeout: Duration,
}

impl AppState {
    pub fn new(analyzer: SentimentAnalyzer) -> Self {
        let timeout = Duration::from_millis(analyzer.config().server.request_timeout_ms);
        Self {
            analyzer: Arc::new(analyzer),
            timeout,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .route("/split", post(split))
        .route("/report", post(report))
        .route("/dispatch", post(dispatch))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

// Malformed or mistyped bodies keep the `{success: false, error}` shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(boundary::failure(self.message))).into_response()
    }
}

// Scoring is CPU-bound and collaborator calls are opaque, so run it on the blocking
// pool and stop waiting after `state.timeout`.
async fn run_blocking<T, F>(state: &AppState, job: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&SentimentAnalyzer) -> T + Send + 'static,
{
    let analyzer = state.analyzer.clone();
    let handle = tokio::task::spawn_blocking(move || job(&analyzer));
    match tokio::time::timeout(state.timeout, handle).await {
        Ok(Ok(v)) => Ok(v),
        Ok(Err(e)) => {
            warn!(error = %e, "scoring task failed");
            Err(ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Scoring failed: {e}"),
            })
        }
        Err(_) => {
            warn!(timeout_ms = state.timeout.as_millis() as u64, "scoring timed out");
            Err(ApiError {
                status: StatusCode::GATEWAY_TIMEOUT,
                message: "Scoring timed out".to_string(),
            })
        }
    }
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    text: String,
    #[serde(default)]
    lexicon: Option<Value>,
}

#[derive(serde::Deserialize)]
struct SplitReq {
    text: String,
}

#[derive(serde::Deserialize)]
struct ReportReq {
    feedbacks: Vec<String>,
    #[serde(default)]
    lexicon: Option<Value>,
}

fn with_custom(analyzer: &SentimentAnalyzer, lexicon: Option<&Value>) -> Option<SentimentAnalyzer> {
    let entries = entries_from_json(lexicon?);
    (!entries.is_empty()).then(|| analyzer.with_lexicon(&entries))
}

async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeReq>, JsonRejection>,
) -> Result<Json<SentimentResult>, ApiError> {
    let Json(body) = body?;
    let result = run_blocking(&state, move |a| match with_custom(a, body.lexicon.as_ref()) {
        Some(custom) => custom.analyze(&body.text),
        None => a.analyze(&body.text),
    })
    .await?;
    Ok(Json(result))
}

async fn split(
    State(state): State<AppState>,
    body: Result<Json<SplitReq>, JsonRejection>,
) -> Result<Json<SplitResult>, ApiError> {
    let Json(body) = body?;
    let parts = run_blocking(&state, move |a| a.split(&body.text)).await?;
    Ok(Json(parts))
}

async fn report(
    State(state): State<AppState>,
    body: Result<Json<ReportReq>, JsonRejection>,
) -> Result<Json<Report>, ApiError> {
    let Json(body) = body?;
    let report = run_blocking(&state, move |a| match with_custom(a, body.lexicon.as_ref()) {
        Some(custom) => generate_report(&custom, &body.feedbacks),
        None => generate_report(a, &body.feedbacks),
    })
    .await?;
    Ok(Json(report))
}

// Same contract as the stdin boundary: always 200, failures carry `success: false`.
async fn dispatch(State(state): State<AppState>, body: String) -> Json<Value> {
    match run_blocking(&state, move |a| boundary::dispatch(a, &body)).await {
        Ok(v) => Json(v),
        Err(e) => Json(boundary::failure(e.message)),
    }
}
