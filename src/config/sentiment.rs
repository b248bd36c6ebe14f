// src/config/sentiment.rs
//! Tunable thresholds for every stage of the analyzer, loaded from TOML.
//!
//! All sections are optional; a missing key keeps its default. Out-of-range
//! values are reset to defaults instead of failing the load.

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::{info, warn};

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/sentiment.toml";
pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_RELIABILITY_THRESHOLD: &str = "SENTIMENT_RELIABILITY_THRESHOLD";
pub const ENV_BIND_ADDR: &str = "SENTIMENT_BIND_ADDR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub language: LanguageConfig,
    pub scorer: ScorerConfig,
    pub classifier: ClassifierConfig,
    pub blend: BlendConfig,
    pub english: EnglishConfig,
    pub splitter: SplitterConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// A language signal is reliable when confidence is strictly above this.
    pub reliability_threshold: f64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            reliability_threshold: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub intensifier_multiplier: f64,
    pub diminisher_multiplier: f64,
    /// Tokens inspected before a word for intensifiers/diminishers.
    pub modifier_window: usize,
    /// Tokens inspected before a word for negation markers.
    pub negation_window: usize,
    /// Characters inspected before a phrase for negation markers.
    pub phrase_negation_chars: usize,
    /// Scale applied to a negated phrase before it lands in the opposite accumulator.
    pub phrase_negation_factor: f64,
    /// Added per emoticon occurrence in the scored text.
    pub emoticon_weight: f64,
    pub stemming: bool,
    /// Only tokens longer than this (in chars) are stemmed.
    pub min_stem_token_chars: usize,
    pub min_root_chars: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            intensifier_multiplier: 2.0,
            diminisher_multiplier: 0.5,
            modifier_window: 2,
            negation_window: 2,
            phrase_negation_chars: 20,
            phrase_negation_factor: 0.8,
            emoticon_weight: 0.5,
            stemming: true,
            min_stem_token_chars: 4,
            min_root_chars: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Both accumulators must stay below this for neutral cues to decide.
    pub neutral_cutoff: f64,
    pub neutral_confidence: f64,
    /// |balance| above this makes a sentence positive- or negative-leaning.
    pub sentence_lean: f64,
    pub constructive_min: usize,
    pub significant_negative: f64,
    pub mixed_confidence: f64,
    pub polarity_threshold: f64,
    pub base_confidence: f64,
    pub confidence_divisor: f64,
    pub max_confidence: f64,
    pub undecided_confidence: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            neutral_cutoff: 1.0,
            neutral_confidence: 0.75,
            sentence_lean: 0.5,
            constructive_min: 2,
            significant_negative: 1.0,
            mixed_confidence: 0.8,
            polarity_threshold: 0.7,
            base_confidence: 0.6,
            confidence_divisor: 10.0,
            max_confidence: 0.95,
            undecided_confidence: 0.65,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    /// |lexical total| at or above this trusts the lexicon outright.
    pub strong_total: f64,
    pub contrast_confidence: f64,
    /// |lexical total| above this lets the blended label override the external one.
    pub override_total: f64,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            strong_total: 2.0,
            contrast_confidence: 0.8,
            override_total: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnglishConfig {
    pub label_threshold: f64,
    pub emoticon_boost: f64,
    pub confidence_offset: f64,
    pub confidence_gain: f64,
    /// Confidence reported when the polarity analyzer fails.
    pub fallback_confidence: f64,
}

impl Default for EnglishConfig {
    fn default() -> Self {
        Self {
            label_threshold: 0.15,
            emoticon_boost: 0.15,
            confidence_offset: 0.2,
            confidence_gain: 1.2,
            fallback_confidence: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    pub balance_threshold: f64,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            balance_threshold: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Upper bound for one scoring job, collaborator calls included.
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            request_timeout_ms: 5_000,
        }
    }
}

// parse optional float env and clamp to <0.0..=1.0>
fn parse_unit_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

fn unit_or(v: f64, default: f64) -> f64 {
    if v.is_finite() && (0.0..=1.0).contains(&v) {
        v
    } else {
        default
    }
}

fn positive_or(v: f64, default: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        default
    }
}

impl AnalyzerConfig {
    /// Load from `SENTIMENT_CONFIG_PATH` or `config/sentiment.toml`. A missing file means
    /// defaults; an unreadable or invalid one is an error. Env overrides apply last.
    pub fn from_toml() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                anyhow::anyhow!("Failed to read sentiment config at {}: {}", path.display(), e)
            })?;
            Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid sentiment config at {}: {}", path.display(), e))?
        } else {
            info!(path = %path.display(), "sentiment config not found, using defaults");
            Self::default()
        };

        if let Some(t) = parse_unit_env(std::env::var(ENV_RELIABILITY_THRESHOLD).ok()) {
            cfg.language.reliability_threshold = t;
        }
        if let Ok(addr) = std::env::var(ENV_BIND_ADDR) {
            if !addr.trim().is_empty() {
                cfg.server.bind_addr = addr.trim().to_string();
            }
        }
        Ok(cfg)
    }

    /// Like `from_toml`, but never fails: errors are logged and defaults returned.
    pub fn from_env_or_default() -> Self {
        Self::from_toml().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default sentiment config");
            Self::default()
        })
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let mut cfg: AnalyzerConfig = toml::from_str(toml_str)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Reset values that would break an invariant (probabilities outside [0,1],
    /// non-positive multipliers) back to their defaults.
    pub fn sanitize(&mut self) {
        let d = AnalyzerConfig::default();

        self.language.reliability_threshold =
            unit_or(self.language.reliability_threshold, d.language.reliability_threshold);

        let s = &mut self.scorer;
        s.intensifier_multiplier = positive_or(s.intensifier_multiplier, d.scorer.intensifier_multiplier);
        s.diminisher_multiplier = positive_or(s.diminisher_multiplier, d.scorer.diminisher_multiplier);
        s.phrase_negation_factor = positive_or(s.phrase_negation_factor, d.scorer.phrase_negation_factor);
        if !s.emoticon_weight.is_finite() || s.emoticon_weight < 0.0 {
            s.emoticon_weight = d.scorer.emoticon_weight;
        }

        let c = &mut self.classifier;
        c.neutral_confidence = unit_or(c.neutral_confidence, d.classifier.neutral_confidence);
        c.mixed_confidence = unit_or(c.mixed_confidence, d.classifier.mixed_confidence);
        c.base_confidence = unit_or(c.base_confidence, d.classifier.base_confidence);
        c.max_confidence = unit_or(c.max_confidence, d.classifier.max_confidence);
        c.undecided_confidence = unit_or(c.undecided_confidence, d.classifier.undecided_confidence);
        c.confidence_divisor = positive_or(c.confidence_divisor, d.classifier.confidence_divisor);
        if c.base_confidence > c.max_confidence {
            // keep min(base + x, max) monotone
            std::mem::swap(&mut c.base_confidence, &mut c.max_confidence);
        }

        self.blend.contrast_confidence =
            unit_or(self.blend.contrast_confidence, d.blend.contrast_confidence);

        let e = &mut self.english;
        e.fallback_confidence = unit_or(e.fallback_confidence, d.english.fallback_confidence);
        e.confidence_gain = positive_or(e.confidence_gain, d.english.confidence_gain);

        if self.server.request_timeout_ms == 0 {
            self.server.request_timeout_ms = d.server.request_timeout_ms;
        }
    }
}
