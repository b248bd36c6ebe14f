// src/polarity.rs
//! General-purpose polarity analyzer seam and the English scoring path built on it.

use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use vader_sentiment::SentimentIntensityAnalyzer;

use crate::config::EnglishConfig;
use crate::normalize::{count_emoticons, NEGATIVE_EMOTICONS, POSITIVE_EMOTICONS};
use crate::result::{Label, Method, SentimentResult};

/// `polarity` in [-1, 1], `subjectivity` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityReading {
    pub polarity: f64,
    pub subjectivity: f64,
}

pub trait PolarityAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> anyhow::Result<PolarityReading>;
    fn name(&self) -> &'static str;
}

/// VADER: compound score as polarity, `1 - neu` as subjectivity.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderAnalyzer;

impl PolarityAnalyzer for VaderAnalyzer {
    fn analyze(&self, text: &str) -> anyhow::Result<PolarityReading> {
        // the analyzer indexes into its own tables and can panic on odd input
        let scores = catch_unwind(AssertUnwindSafe(|| {
            let analyzer = SentimentIntensityAnalyzer::new();
            let scores = analyzer.polarity_scores(text);
            (scores.get("compound").copied(), scores.get("neu").copied())
        }))
        .map_err(|_| anyhow::anyhow!("vader panicked while scoring"))?;

        let (Some(compound), Some(neu)) = scores else {
            anyhow::bail!("vader returned no compound/neu scores");
        };
        if !compound.is_finite() || !neu.is_finite() {
            anyhow::bail!("vader returned non-finite scores");
        }
        Ok(PolarityReading {
            polarity: compound.clamp(-1.0, 1.0),
            subjectivity: (1.0 - neu).clamp(0.0, 1.0),
        })
    }

    fn name(&self) -> &'static str {
        "vader"
    }
}

/// Turn a reading into a result. Emoticons still present in `text` nudge the polarity
/// by `emoticon_boost` each (per distinct emoticon present).
pub fn classify_english(reading: PolarityReading, text: &str, cfg: &EnglishConfig) -> SentimentResult {
    let present = |list: &[&str]| list.iter().filter(|e| count_emoticons(text, &[**e]) > 0).count() as f64;
    let boost = cfg.emoticon_boost * (present(POSITIVE_EMOTICONS) - present(NEGATIVE_EMOTICONS));
    let polarity = (reading.polarity + boost).clamp(-1.0, 1.0);

    let label = if polarity > cfg.label_threshold {
        Label::Positive
    } else if polarity < -cfg.label_threshold {
        Label::Negative
    } else {
        Label::Neutral
    };
    let confidence = ((polarity.abs() + cfg.confidence_offset) * cfg.confidence_gain).min(1.0);

    SentimentResult::new(label, confidence, Method::EnglishPolarity).with_polarity(PolarityReading {
        polarity,
        subjectivity: reading.subjectivity,
    })
}

/// Run the analyzer; a failure becomes a degraded neutral `fallback` result.
pub fn analyze_english(analyzer: &dyn PolarityAnalyzer, text: &str, cfg: &EnglishConfig) -> SentimentResult {
    match analyzer.analyze(text) {
        Ok(reading) => classify_english(reading, text, cfg),
        Err(e) => SentimentResult::fallback(
            format!("{} analyzer failed: {}", analyzer.name(), e),
            cfg.fallback_confidence,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(p: f64) -> PolarityReading {
        PolarityReading {
            polarity: p,
            subjectivity: 0.5,
        }
    }

    #[test]
    fn labels_follow_threshold() {
        let cfg = EnglishConfig::default();
        assert_eq!(classify_english(reading(0.5), "great", &cfg).label, Label::Positive);
        assert_eq!(classify_english(reading(-0.5), "awful", &cfg).label, Label::Negative);
        assert_eq!(classify_english(reading(0.15), "meh", &cfg).label, Label::Neutral);
    }

    #[test]
    fn confidence_formula_caps_at_one() {
        let cfg = EnglishConfig::default();
        let r = classify_english(reading(0.5), "good", &cfg);
        assert!((r.confidence - 0.84).abs() < 1e-9);
        let r = classify_english(reading(1.0), "best ever", &cfg);
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn emoticons_nudge_polarity() {
        let cfg = EnglishConfig::default();
        let r = classify_english(reading(0.1), "fine :)", &cfg);
        assert_eq!(r.label, Label::Positive);
        let p = r.polarity.map(|p| p.polarity).unwrap_or_default();
        assert!((p - 0.25).abs() < 1e-9);
    }

    struct Failing;

    impl PolarityAnalyzer for Failing {
        fn analyze(&self, _text: &str) -> anyhow::Result<PolarityReading> {
            anyhow::bail!("offline")
        }
        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn failure_degrades_to_fallback() {
        let r = analyze_english(&Failing, "The talk was great", &EnglishConfig::default());
        assert_eq!(r.method, Method::Fallback);
        assert_eq!(r.label, Label::Neutral);
        assert_eq!(r.confidence, 0.5);
        assert!(r.degraded.as_ref().is_some_and(|d| d.reason.contains("offline")));
    }

    #[test]
    fn vader_reads_clear_english() {
        let r = VaderAnalyzer.analyze("The workshop was great and really helpful!").expect("vader");
        assert!(r.polarity > 0.3);
        let r = VaderAnalyzer.analyze("The sound was terrible and the talk was boring.").expect("vader");
        assert!(r.polarity < -0.3);
    }
}
