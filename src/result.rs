// src/result.rs
//! Result types shared by every analysis path.

use serde::{Deserialize, Serialize, Serializer};

use crate::language::LanguageSignal;
use crate::normalize::EmojiRemoval;
use crate::polarity::PolarityReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
        }
    }
}

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    EmptyText,
    EmptyAfterEmojiRemoval,
    TagalogLexicon,
    EnglishPolarity,
    Blended,
    ContrastNeutral,
    Fallback,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::EmptyText => "empty_text",
            Method::EmptyAfterEmojiRemoval => "empty_after_emoji_removal",
            Method::TagalogLexicon => "tagalog_lexicon",
            Method::EnglishPolarity => "english_polarity",
            Method::Blended => "blended",
            Method::ContrastNeutral => "contrast_neutral",
            Method::Fallback => "fallback",
        }
    }
}

/// Per-sentence lexical breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentenceAnalysis {
    pub positive_score: f64,
    pub negative_score: f64,
    pub is_constructive: bool,
    pub balance: f64,
}

impl SentenceAnalysis {
    pub fn new(positive_score: f64, negative_score: f64, is_constructive: bool) -> Self {
        Self {
            positive_score,
            negative_score,
            is_constructive,
            balance: positive_score - negative_score,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceSummary {
    pub total_sentences: usize,
    pub positive_sentences: usize,
    pub negative_sentences: usize,
    pub neutral_sentences: usize,
    pub constructive_sentences: usize,
}

impl SentenceSummary {
    /// Sentences leaning past `lean` (strictly) count as positive/negative.
    pub fn from_sentences(sentences: &[SentenceAnalysis], lean: f64) -> Self {
        let positive = sentences.iter().filter(|s| s.balance > lean).count();
        let negative = sentences.iter().filter(|s| s.balance < -lean).count();
        Self {
            total_sentences: sentences.len(),
            positive_sentences: positive,
            negative_sentences: negative,
            neutral_sentences: sentences.len() - positive - negative,
            constructive_sentences: sentences.iter().filter(|s| s.is_constructive).count(),
        }
    }

    /// Both a positive- and a negative-leaning sentence, or any constructive one.
    pub fn has_mixed_signals(&self) -> bool {
        (self.positive_sentences > 0 && self.negative_sentences > 0) || self.constructive_sentences > 0
    }
}

/// Why a result is less trustworthy than usual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degradation {
    pub reason: String,
}

fn round2<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64((v * 100.0).round() / 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    #[serde(rename = "sentiment")]
    pub label: Label,
    #[serde(serialize_with = "round2")]
    pub confidence: f64,
    #[serde(serialize_with = "round2")]
    pub positive_score: f64,
    #[serde(serialize_with = "round2")]
    pub negative_score: f64,
    #[serde(serialize_with = "round2")]
    pub total_score: f64,
    pub method: Method,
    #[serde(default)]
    pub sentence_summary: SentenceSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageSignal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<PolarityReading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_removal: Option<EmojiRemoval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degraded: Option<Degradation>,
}

impl SentimentResult {
    pub fn new(label: Label, confidence: f64, method: Method) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
            positive_score: 0.0,
            negative_score: 0.0,
            total_score: 0.0,
            method,
            sentence_summary: SentenceSummary::default(),
            language: None,
            polarity: None,
            emoji_removal: None,
            degraded: None,
        }
    }

    /// Neutral, zero confidence: nothing to score.
    pub fn empty(method: Method) -> Self {
        Self::new(Label::Neutral, 0.0, method)
    }

    /// Neutral result standing in for a failed collaborator.
    pub fn fallback(reason: impl Into<String>, confidence: f64) -> Self {
        Self::new(Label::Neutral, confidence, Method::Fallback).degraded(reason)
    }

    pub fn with_scores(mut self, positive: f64, negative: f64) -> Self {
        self.positive_score = positive;
        self.negative_score = negative;
        self.total_score = positive - negative;
        self
    }

    pub fn with_summary(mut self, summary: SentenceSummary) -> Self {
        self.sentence_summary = summary;
        self
    }

    pub fn with_language(mut self, signal: LanguageSignal) -> Self {
        self.language = Some(signal);
        self
    }

    pub fn with_polarity(mut self, reading: PolarityReading) -> Self {
        self.polarity = Some(reading);
        self
    }

    pub fn with_emoji_removal(mut self, removal: EmojiRemoval) -> Self {
        self.emoji_removal = Some(removal);
        self
    }

    pub fn degraded(mut self, reason: impl Into<String>) -> Self {
        self.degraded = Some(Degradation {
            reason: reason.into(),
        });
        self
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_wire_names_and_rounds_scores() {
        let r = SentimentResult::new(Label::Positive, 0.8333, Method::TagalogLexicon)
            .with_scores(2.0 / 3.0, 0.0);
        let v = serde_json::to_value(&r).expect("json");
        assert_eq!(v["sentiment"], "positive");
        assert_eq!(v["method"], "tagalog_lexicon");
        assert_eq!(v["confidence"], 0.83);
        assert_eq!(v["positive_score"], 0.67);
        assert!(v.get("degraded").is_none());
    }

    #[test]
    fn summary_buckets_by_lean() {
        let s = SentenceSummary::from_sentences(
            &[
                SentenceAnalysis::new(2.0, 0.0, false),
                SentenceAnalysis::new(0.0, 2.0, false),
                SentenceAnalysis::new(0.4, 0.0, true),
            ],
            0.5,
        );
        assert_eq!(s.total_sentences, 3);
        assert_eq!(s.positive_sentences, 1);
        assert_eq!(s.negative_sentences, 1);
        assert_eq!(s.neutral_sentences, 1);
        assert_eq!(s.constructive_sentences, 1);
        assert!(s.has_mixed_signals());
    }

    #[test]
    fn fallback_is_degraded_neutral() {
        let r = SentimentResult::fallback("polarity analyzer failed", 0.5);
        assert_eq!(r.label, Label::Neutral);
        assert_eq!(r.method, Method::Fallback);
        assert!(r.is_degraded());
    }
}
