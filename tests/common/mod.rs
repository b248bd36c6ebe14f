// tests/common/mod.rs
//
// Stub collaborators that pin language and polarity behavior, so scenario tests do
// not depend on what the real detector/analyzer decide for short comments.
#![allow(dead_code)]

use std::sync::Arc;

use feedback_sentiment::{
    config::AnalyzerConfig,
    language::LanguageIdentifier,
    lexicon::LexiconStore,
    polarity::{PolarityAnalyzer, PolarityReading},
    SentimentAnalyzer,
};

pub struct FixedLanguage(pub &'static str, pub f64);

impl LanguageIdentifier for FixedLanguage {
    fn identify(&self, _text: &str) -> anyhow::Result<(String, f64)> {
        Ok((self.0.to_string(), self.1))
    }
    fn name(&self) -> &'static str {
        "fixed"
    }
}

pub struct FailingLanguage;

impl LanguageIdentifier for FailingLanguage {
    fn identify(&self, _text: &str) -> anyhow::Result<(String, f64)> {
        anyhow::bail!("identifier unavailable")
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

pub struct FixedPolarity(pub f64);

impl PolarityAnalyzer for FixedPolarity {
    fn analyze(&self, _text: &str) -> anyhow::Result<PolarityReading> {
        Ok(PolarityReading {
            polarity: self.0,
            subjectivity: 0.5,
        })
    }
    fn name(&self) -> &'static str {
        "fixed"
    }
}

pub struct FailingPolarity;

impl PolarityAnalyzer for FailingPolarity {
    fn analyze(&self, _text: &str) -> anyhow::Result<PolarityReading> {
        anyhow::bail!("polarity backend offline")
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

pub fn analyzer_with(
    language: impl LanguageIdentifier + 'static,
    polarity: impl PolarityAnalyzer + 'static,
) -> SentimentAnalyzer {
    SentimentAnalyzer::with_collaborators(
        Arc::new(LexiconStore::defaults()),
        Arc::new(AnalyzerConfig::default()),
        Arc::new(language),
        Arc::new(polarity),
    )
}

/// Reliable Tagalog: everything goes through the lexicon path.
pub fn tagalog() -> SentimentAnalyzer {
    analyzer_with(FixedLanguage("tl", 0.99), FixedPolarity(0.0))
}

/// Unreliable language: everything goes through the blending policy.
pub fn ambiguous(polarity: f64) -> SentimentAnalyzer {
    analyzer_with(FixedLanguage("tl", 0.3), FixedPolarity(polarity))
}

/// Reliable English with a fixed polarity reading.
pub fn english(polarity: f64) -> SentimentAnalyzer {
    analyzer_with(FixedLanguage("en", 0.99), FixedPolarity(polarity))
}
