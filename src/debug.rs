// src/debug.rs
//! Anonymized dev logging. Raw comment text never reaches the logs: events carry a
//! short SHA-256 prefix of the text instead.

use tracing::info;

use crate::result::SentimentResult;
use crate::scorer::TermMatch;

pub const ENV_DEV_LOG: &str = "SENTIMENT_DEV_LOG";
pub const ENV_RUNTIME_ENV: &str = "SENTIMENT_ENV";

// Dev logging gate: SENTIMENT_DEV_LOG=1 AND dev env (debug build or SENTIMENT_ENV in {local,development,dev})
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var(ENV_RUNTIME_ENV)
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// First 6 bytes of SHA-256 as 12 lowercase hex chars.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}

/// One event per analyzed comment, only when dev logging is on.
pub fn dev_log_analysis(text: &str, result: &SentimentResult, matches: &[TermMatch]) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(text);
    let terms: Vec<&str> = matches.iter().map(|m| m.term.as_str()).collect();
    let terms_short = truncate_vec(&terms, 5);
    let language = result.language.as_ref().map(|l| l.code.as_str()).unwrap_or("-");
    info!(
        target: "feedback_sentiment",
        %id,
        sentiment = result.label.as_str(),
        method = result.method.as_str(),
        confidence = result.confidence,
        total = result.total_score,
        language,
        degraded = result.is_degraded(),
        terms = ?terms_short
    );
}
