// src/language.rs
//! Language identification adapter. The identifier itself is a pluggable trait object;
//! the adapter turns whatever it returns (or fails with) into a `LanguageSignal`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use whatlang::Lang;

pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Per-text identification outcome. Never cached: it depends on the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSignal {
    pub code: String,
    pub confidence: f64,
    pub reliable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LanguageSignal {
    pub fn unknown(error: Option<String>) -> Self {
        Self {
            code: UNKNOWN_LANGUAGE.to_string(),
            confidence: 0.0,
            reliable: false,
            error,
        }
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }
}

/// External language identifier: `(code, confidence in [0,1])` or an error.
pub trait LanguageIdentifier: Send + Sync {
    fn identify(&self, text: &str) -> anyhow::Result<(String, f64)>;
    /// Identifier name for diagnostics.
    fn name(&self) -> &'static str;
}

/// `whatlang` trigram detector with two-letter codes for the languages we route on.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangIdentifier;

impl LanguageIdentifier for WhatlangIdentifier {
    fn identify(&self, text: &str) -> anyhow::Result<(String, f64)> {
        let info = whatlang::detect(text)
            .ok_or_else(|| anyhow::anyhow!("no language detected"))?;
        let code = match info.lang() {
            Lang::Eng => "en",
            Lang::Tgl => "tl",
            other => other.code(),
        };
        Ok((code.to_string(), info.confidence()))
    }

    fn name(&self) -> &'static str {
        "whatlang"
    }
}

#[derive(Clone)]
pub struct LanguageAdapter {
    inner: Arc<dyn LanguageIdentifier>,
    reliability_threshold: f64,
}

impl std::fmt::Debug for LanguageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageAdapter")
            .field("identifier", &self.inner.name())
            .field("reliability_threshold", &self.reliability_threshold)
            .finish()
    }
}

impl LanguageAdapter {
    pub fn new(inner: Arc<dyn LanguageIdentifier>, reliability_threshold: f64) -> Self {
        Self {
            inner,
            reliability_threshold,
        }
    }

    pub fn whatlang(reliability_threshold: f64) -> Self {
        Self::new(Arc::new(WhatlangIdentifier), reliability_threshold)
    }

    /// Never fails: blank text, detector errors and out-of-range confidences all
    /// collapse to `unknown / 0.0 / unreliable`.
    pub fn identify(&self, text: &str) -> LanguageSignal {
        if text.trim().is_empty() {
            return LanguageSignal::unknown(Some("empty text".to_string()));
        }
        match self.inner.identify(text) {
            Ok((code, confidence)) if confidence.is_finite() && !code.trim().is_empty() => {
                let confidence = confidence.clamp(0.0, 1.0);
                LanguageSignal {
                    code: code.trim().to_ascii_lowercase(),
                    confidence,
                    reliable: confidence > self.reliability_threshold,
                    error: None,
                }
            }
            Ok((code, confidence)) => {
                debug!(identifier = self.inner.name(), %code, confidence, "discarding unusable language reading");
                LanguageSignal::unknown(Some("unusable identifier output".to_string()))
            }
            Err(e) => {
                debug!(identifier = self.inner.name(), error = %e, "language identification failed");
                LanguageSignal::unknown(Some(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, f64);

    impl LanguageIdentifier for Fixed {
        fn identify(&self, _text: &str) -> anyhow::Result<(String, f64)> {
            Ok((self.0.to_string(), self.1))
        }
        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct Broken;

    impl LanguageIdentifier for Broken {
        fn identify(&self, _text: &str) -> anyhow::Result<(String, f64)> {
            anyhow::bail!("model not loaded")
        }
        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn reliability_is_strictly_above_threshold() {
        let at = LanguageAdapter::new(Arc::new(Fixed("tl", 0.7)), 0.7).identify("Salamat po");
        assert!(!at.reliable);
        let above = LanguageAdapter::new(Arc::new(Fixed("TL", 0.71)), 0.7).identify("Salamat po");
        assert!(above.reliable);
        assert_eq!(above.code, "tl");
    }

    #[test]
    fn failures_become_unknown() {
        let s = LanguageAdapter::new(Arc::new(Broken), 0.7).identify("anything");
        assert_eq!(s.code, UNKNOWN_LANGUAGE);
        assert_eq!(s.confidence, 0.0);
        assert!(!s.reliable);
        assert!(s.error.as_deref().is_some_and(|e| e.contains("model not loaded")));

        let s = LanguageAdapter::new(Arc::new(Fixed("en", f64::NAN)), 0.7).identify("x");
        assert_eq!(s.code, UNKNOWN_LANGUAGE);

        let s = LanguageAdapter::whatlang(0.7).identify("   ");
        assert!(!s.reliable);
    }

    #[test]
    fn whatlang_maps_english_to_two_letter_code() {
        let s = LanguageAdapter::whatlang(0.0).identify(
            "The speakers were well prepared and the venue was comfortable for everyone who attended.",
        );
        assert_eq!(s.code, "en");
        assert!(s.confidence > 0.0);
    }
}
