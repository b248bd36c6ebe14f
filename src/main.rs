//! Feedback sentiment service binary.
//! Serves the HTTP API, or with `--stdin` answers one JSON request read from stdin.

use std::io::Read;

use feedback_sentiment::{
    api::{self, AppState},
    boundary,
    config::AnalyzerConfig,
    lexicon::LexiconStore,
    metrics::Metrics,
    SentimentAnalyzer,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("feedback_sentiment=info,warn"));

    // stdout is reserved for the JSON response in --stdin mode
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

fn run_stdin(analyzer: &SentimentAnalyzer) -> anyhow::Result<()> {
    let mut input = String::new();
    let response = match std::io::stdin().read_to_string(&mut input) {
        Ok(_) => boundary::dispatch(analyzer, &input),
        Err(e) => boundary::failure(format!("Failed to read stdin: {e}")),
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AnalyzerConfig::from_toml()?;
    let lexicon = LexiconStore::from_env();
    info!(terms = lexicon.len(), "lexicon ready");
    let analyzer = SentimentAnalyzer::new(lexicon, config.clone());

    if std::env::args().any(|a| a == "--stdin") {
        return run_stdin(&analyzer);
    }

    let mut app = api::router(AppState::new(analyzer));
    match Metrics::init(config.server.request_timeout_ms) {
        Ok(metrics) => app = app.merge(metrics.router()),
        Err(e) => warn!(error = %e, "metrics disabled"),
    }

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    info!(addr = %config.server.bind_addr, "feedback sentiment service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
