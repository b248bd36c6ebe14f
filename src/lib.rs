// src/lib.rs
// Public library surface for the binary, integration tests and embedding callers.

pub mod analyzer;
pub mod api;
pub mod blend;
pub mod boundary;
pub mod classifier;
pub mod config;
pub mod debug;
pub mod language;
pub mod lexicon;
pub mod metrics;
pub mod normalize;
pub mod polarity;
pub mod report;
pub mod result;
pub mod scorer;
pub mod splitter;
pub mod text;

use once_cell::sync::Lazy;

// ---- Re-exports for stable public API ----
pub use crate::analyzer::SentimentAnalyzer;
pub use crate::api::router;
pub use crate::lexicon::{LexiconStore, RawLexiconEntry};
pub use crate::result::{Label, Method, SentimentResult};
pub use crate::splitter::SplitResult;

// Built on first use from config/lexicon env; shared read-only afterwards.
static DEFAULT_ANALYZER: Lazy<SentimentAnalyzer> = Lazy::new(SentimentAnalyzer::from_env);

/// Process-wide default analyzer.
pub fn default_analyzer() -> &'static SentimentAnalyzer {
    &DEFAULT_ANALYZER
}

/// Analyze one comment. Custom lexicon entries apply to this call only.
pub fn analyze_sentiment(text: &str, lexicon: Option<&[RawLexiconEntry]>) -> SentimentResult {
    match lexicon {
        Some(entries) if !entries.is_empty() => DEFAULT_ANALYZER.with_lexicon(entries).analyze(text),
        _ => DEFAULT_ANALYZER.analyze(text),
    }
}

/// Split one comment into positive/negative/neutral sentence groups.
pub fn split_comment(text: &str) -> SplitResult {
    DEFAULT_ANALYZER.split(text)
}
