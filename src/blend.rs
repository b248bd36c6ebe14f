// src/blend.rs
//! Blending policy for text whose language is ambiguous or unreliable: decides between
//! the lexical result and the general-purpose polarity result.

use crate::config::BlendConfig;
use crate::lexicon::LexiconStore;
use crate::result::{Label, Method, SentimentResult};
use crate::text;

#[derive(Debug, Clone, Copy)]
pub struct BlendingPolicy<'a> {
    lexicon: &'a LexiconStore,
    config: &'a BlendConfig,
}

impl<'a> BlendingPolicy<'a> {
    pub fn new(lexicon: &'a LexiconStore, config: &'a BlendConfig) -> Self {
        Self { lexicon, config }
    }

    /// Rules in order, first match wins:
    /// 1. neutral cues present and the lexical result is already neutral
    /// 2. strong lexical total
    /// 3. contrast marker with any lexical score forces neutral
    /// 4. the more confident side, with a blended label when the lexicon also leans
    pub fn blend(
        &self,
        lexical: SentimentResult,
        external: SentimentResult,
        neutral_count: usize,
        text: &str,
    ) -> SentimentResult {
        let c = self.config;

        if neutral_count >= 1 && lexical.label == Label::Neutral {
            return lexical;
        }
        if lexical.total_score.abs() >= c.strong_total {
            return lexical;
        }
        if self.has_contrast(text) && (lexical.positive_score != 0.0 || lexical.negative_score != 0.0) {
            return SentimentResult {
                label: Label::Neutral,
                confidence: c.contrast_confidence,
                method: Method::ContrastNeutral,
                ..lexical
            };
        }

        // a failed analyzer only contributes its reason
        if let Some(d) = &external.degraded {
            return SentimentResult {
                degraded: Some(d.clone()),
                ..lexical
            };
        }
        if external.confidence <= lexical.confidence {
            return lexical;
        }
        if lexical.total_score.abs() > c.override_total {
            let polarity = external.polarity.map_or(0.0, |p| p.polarity);
            let combined = polarity + lexical.total_score;
            let label = if combined > 0.0 {
                Label::Positive
            } else if combined < 0.0 {
                Label::Negative
            } else {
                Label::Neutral
            };
            return SentimentResult {
                label,
                confidence: (external.confidence + lexical.confidence) / 2.0,
                method: Method::Blended,
                polarity: external.polarity,
                ..lexical
            };
        }
        // keep the lexical accumulators for observability
        SentimentResult {
            positive_score: lexical.positive_score,
            negative_score: lexical.negative_score,
            total_score: lexical.total_score,
            sentence_summary: lexical.sentence_summary,
            ..external
        }
    }

    fn has_contrast(&self, text: &str) -> bool {
        let tokens = text::tokenize(text);
        self.lexicon.contrast().occurs(text, &tokens)
    }
}
