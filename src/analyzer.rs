// src/analyzer.rs
//! Language-aware orchestration: normalize, identify, then route to the English
//! polarity path, the Tagalog lexicon path, or the blending policy.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::blend::BlendingPolicy;
use crate::classifier::SentimentClassifier;
use crate::config::AnalyzerConfig;
use crate::debug::dev_log_analysis;
use crate::language::{LanguageAdapter, LanguageIdentifier, WhatlangIdentifier};
use crate::lexicon::{LexiconStore, RawLexiconEntry};
use crate::metrics;
use crate::normalize;
use crate::polarity::{analyze_english, PolarityAnalyzer, VaderAnalyzer};
use crate::result::{Method, SentimentResult};
use crate::scorer::{LexicalScore, LexicalScorer};
use crate::splitter::{self, SplitResult};

pub const ENGLISH: &str = "en";
pub const TAGALOG: &str = "tl";

/// Cheap to clone: the lexicon, config and collaborators are shared.
#[derive(Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<LexiconStore>,
    config: Arc<AnalyzerConfig>,
    language: LanguageAdapter,
    polarity: Arc<dyn PolarityAnalyzer>,
}

impl std::fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentAnalyzer")
            .field("terms", &self.lexicon.len())
            .field("language", &self.language)
            .field("polarity", &self.polarity.name())
            .finish()
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new(LexiconStore::defaults(), AnalyzerConfig::default())
    }
}

impl SentimentAnalyzer {
    /// `whatlang` for identification, VADER for polarity.
    pub fn new(lexicon: LexiconStore, config: AnalyzerConfig) -> Self {
        Self::with_collaborators(
            Arc::new(lexicon),
            Arc::new(config),
            Arc::new(WhatlangIdentifier),
            Arc::new(VaderAnalyzer),
        )
    }

    pub fn with_collaborators(
        lexicon: Arc<LexiconStore>,
        config: Arc<AnalyzerConfig>,
        identifier: Arc<dyn LanguageIdentifier>,
        polarity: Arc<dyn PolarityAnalyzer>,
    ) -> Self {
        let language = LanguageAdapter::new(identifier, config.language.reliability_threshold);
        Self {
            lexicon,
            config,
            language,
            polarity,
        }
    }

    /// Config from TOML/env and lexicon from `SENTIMENT_LEXICON_PATH`, both with
    /// fallbacks to defaults.
    pub fn from_env() -> Self {
        Self::new(LexiconStore::from_env(), AnalyzerConfig::from_env_or_default())
    }

    /// Same collaborators and config over a lexicon extended with `entries`.
    /// The receiver's lexicon is left untouched.
    pub fn with_lexicon(&self, entries: &[RawLexiconEntry]) -> Self {
        let lexicon = LexiconStore::clone(&self.lexicon).merge(entries);
        Self {
            lexicon: Arc::new(lexicon),
            ..self.clone()
        }
    }

    pub fn lexicon(&self) -> &LexiconStore {
        &self.lexicon
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn scorer(&self) -> LexicalScorer<'_> {
        LexicalScorer::new(&self.lexicon, &self.config.scorer)
    }

    pub fn classifier(&self) -> SentimentClassifier<'_> {
        SentimentClassifier::new(&self.config.classifier)
    }

    /// Always returns a usable result; collaborator failures surface as `degraded`.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            let result = SentimentResult::empty(Method::EmptyText);
            metrics::record_analysis(&result);
            return result;
        }

        let removal = normalize::strip_report(text);
        if removal.cleaned_text.is_empty() {
            let result = SentimentResult::empty(Method::EmptyAfterEmojiRemoval).with_emoji_removal(removal);
            metrics::record_analysis(&result);
            return result;
        }

        let cleaned = removal.cleaned_text.clone();
        let signal = self.language.identify(&cleaned);
        debug!(
            language = %signal.code,
            confidence = signal.confidence,
            reliable = signal.reliable,
            "language identified"
        );

        let (result, matches) = if signal.reliable && signal.is(ENGLISH) {
            (analyze_english(self.polarity.as_ref(), &cleaned, &self.config.english), Vec::new())
        } else if signal.reliable && signal.is(TAGALOG) {
            let score = self.scorer().score(&cleaned);
            (self.classifier().classify_score(&score), score.matches)
        } else {
            let score = self.scorer().score(&cleaned);
            (self.blend(&score, &cleaned), score.matches)
        };

        let result = result.with_language(signal).with_emoji_removal(removal);
        if let Some(d) = &result.degraded {
            warn!(method = result.method.as_str(), reason = %d.reason, "sentiment analysis degraded");
        }
        metrics::record_analysis(&result);
        dev_log_analysis(text, &result, &matches);
        result
    }

    fn blend(&self, score: &LexicalScore, cleaned: &str) -> SentimentResult {
        let lexical = self.classifier().classify_score(score);
        let external = analyze_english(self.polarity.as_ref(), cleaned, &self.config.english);
        BlendingPolicy::new(&self.lexicon, &self.config.blend).blend(
            lexical,
            external,
            score.neutral_indicators,
            cleaned,
        )
    }

    /// Sentence groups of the normalized text.
    pub fn split(&self, text: &str) -> SplitResult {
        let cleaned = normalize::normalize(text);
        splitter::split(&self.scorer(), &cleaned, self.config.splitter.balance_threshold)
    }
}
