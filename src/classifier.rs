// src/classifier.rs
//! Turns lexical accumulators into a label and confidence.
//!
//! Order matters: explicit neutral cues first, then mixed or constructive feedback,
//! and only then the raw score balance.

use crate::config::ClassifierConfig;
use crate::result::{Label, Method, SentenceSummary, SentimentResult};
use crate::scorer::LexicalScore;

#[derive(Debug, Clone, Copy)]
pub struct SentimentClassifier<'a> {
    config: &'a ClassifierConfig,
}

impl<'a> SentimentClassifier<'a> {
    pub fn new(config: &'a ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn classify(
        &self,
        positive: f64,
        negative: f64,
        summary: SentenceSummary,
        neutral_count: usize,
    ) -> SentimentResult {
        let c = self.config;
        let result = |label, confidence| {
            SentimentResult::new(label, confidence, Method::TagalogLexicon)
                .with_scores(positive, negative)
                .with_summary(summary)
        };

        if neutral_count >= 1 && positive < c.neutral_cutoff && negative < c.neutral_cutoff {
            return result(Label::Neutral, c.neutral_confidence);
        }

        let opposing = summary.positive_sentences > 0 && summary.negative_sentences > 0;
        if opposing
            || summary.constructive_sentences >= c.constructive_min
            || (negative >= c.significant_negative && summary.has_mixed_signals())
        {
            return result(Label::Neutral, c.mixed_confidence);
        }

        let total = positive - negative;
        let scaled = |t: f64| (c.base_confidence + t.abs() / c.confidence_divisor).min(c.max_confidence);
        if total >= c.polarity_threshold {
            result(Label::Positive, scaled(total))
        } else if total <= -c.polarity_threshold {
            result(Label::Negative, scaled(total))
        } else {
            result(Label::Neutral, c.undecided_confidence)
        }
    }

    /// Classify a full scorer output, bucketing sentences by `sentence_lean`.
    pub fn classify_score(&self, score: &LexicalScore) -> SentimentResult {
        self.classify(
            score.positive_score,
            score.negative_score,
            score.summary(self.config.sentence_lean),
            score.neutral_indicators,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::SentenceAnalysis;

    fn summary(sentences: &[SentenceAnalysis]) -> SentenceSummary {
        SentenceSummary::from_sentences(sentences, 0.5)
    }

    #[test]
    fn neutral_cues_win_on_weak_scores() {
        let cfg = ClassifierConfig::default();
        let r = SentimentClassifier::new(&cfg).classify(0.9, 0.0, SentenceSummary::default(), 1);
        assert_eq!(r.label, Label::Neutral);
        assert_eq!(r.confidence, 0.75);

        // a strong score overrides the cue
        let r = SentimentClassifier::new(&cfg).classify(2.0, 0.0, SentenceSummary::default(), 1);
        assert_eq!(r.label, Label::Positive);
    }

    #[test]
    fn opposing_sentences_force_neutral() {
        let cfg = ClassifierConfig::default();
        let s = summary(&[
            SentenceAnalysis::new(3.0, 0.0, false),
            SentenceAnalysis::new(0.0, 1.0, false),
        ]);
        let r = SentimentClassifier::new(&cfg).classify(3.0, 1.0, s, 0);
        assert_eq!(r.label, Label::Neutral);
        assert_eq!(r.confidence, 0.8);
        assert_eq!(r.total_score, 2.0);
    }

    #[test]
    fn constructive_with_significant_negative_is_neutral() {
        let cfg = ClassifierConfig::default();
        let s = summary(&[SentenceAnalysis::new(2.5, 1.0, true)]);
        let r = SentimentClassifier::new(&cfg).classify(2.5, 1.0, s, 0);
        assert_eq!(r.label, Label::Neutral);

        // constructive alone, with a small negative, still reads as positive
        let s = summary(&[SentenceAnalysis::new(2.5, 0.5, true)]);
        let r = SentimentClassifier::new(&cfg).classify(2.5, 0.5, s, 0);
        assert_eq!(r.label, Label::Positive);
    }

    #[test]
    fn two_constructive_sentences_force_neutral() {
        let cfg = ClassifierConfig::default();
        let cls = SentimentClassifier::new(&cfg);
        let s = summary(&[
            SentenceAnalysis::new(1.5, 0.0, true),
            SentenceAnalysis::new(1.0, 0.5, true),
        ]);
        assert_eq!(s.negative_sentences, 0);
        let r = cls.classify(2.5, 0.5, s, 0);
        assert_eq!(r.label, Label::Neutral);
        assert_eq!(r.confidence, 0.8);

        // a single constructive sentence is not enough on its own
        let s = summary(&[
            SentenceAnalysis::new(1.5, 0.0, true),
            SentenceAnalysis::new(1.0, 0.5, false),
        ]);
        let r = cls.classify(2.5, 0.5, s, 0);
        assert_eq!(r.label, Label::Positive);
        assert!((r.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn balance_decides_with_capped_confidence() {
        let cfg = ClassifierConfig::default();
        let cls = SentimentClassifier::new(&cfg);
        let r = cls.classify(2.0, 0.0, SentenceSummary::default(), 0);
        assert_eq!(r.label, Label::Positive);
        assert!((r.confidence - 0.8).abs() < 1e-9);

        let r = cls.classify(0.0, 9.0, SentenceSummary::default(), 0);
        assert_eq!(r.label, Label::Negative);
        assert_eq!(r.confidence, 0.95);

        let r = cls.classify(0.6, 0.0, SentenceSummary::default(), 0);
        assert_eq!(r.label, Label::Neutral);
        assert_eq!(r.confidence, 0.65);
    }

    #[test]
    fn nothing_scored_is_neutral() {
        let cfg = ClassifierConfig::default();
        let r = SentimentClassifier::new(&cfg).classify(0.0, 0.0, SentenceSummary::default(), 0);
        assert_eq!(r.label, Label::Neutral);
        assert_eq!(r.method, Method::TagalogLexicon);
    }
}
