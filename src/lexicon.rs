// src/lexicon.rs
//! Lexicon store: signed word/phrase weights for Tagalog and English plus the marker
//! sets (neutral cues, negations, intensifiers, diminishers, constructive and contrast
//! markers) the scorer consults.
//!
//! A store is immutable once built. `merge` consumes a store and returns a new one, so
//! caller-supplied entries never leak into the shared defaults.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::text::{term_key, TermSet};

pub const ENV_LEXICON_PATH: &str = "SENTIMENT_LEXICON_PATH";

static DEFAULT_STORE: Lazy<LexiconStore> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    match LexiconStore::from_json_str(raw) {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "embedded lexicon unreadable, starting from an empty store");
            LexiconStore::default()
        }
    }
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn opposite(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexiconLanguage {
    #[serde(rename = "tl")]
    Tagalog,
    #[serde(rename = "en")]
    English,
}

impl LexiconLanguage {
    fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "tl" | "tagalog" | "fil" | "filipino" => Some(Self::Tagalog),
            "en" | "english" => Some(Self::English),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Word,
    Phrase,
}

/// One weighted term. `weight` is signed: the sign is the polarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub term: String,
    pub weight: f64,
    pub language: LexiconLanguage,
    pub kind: TermKind,
}

impl LexiconEntry {
    pub fn polarity(&self) -> Polarity {
        if self.weight < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.weight.abs()
    }
}

/// A phrase ready for token-sequence matching.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseEntry {
    pub tokens: Vec<String>,
    pub entry: LexiconEntry,
}

/// Caller-facing record shape:
/// `{word, sentiment: positive|negative|neutral, weight, language: tl|en, isPhrase}`.
/// Every field is optional at the type level; validation happens on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLexiconEntry {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, rename = "isPhrase", alias = "is_phrase")]
    pub is_phrase: Option<bool>,
}

impl RawLexiconEntry {
    pub fn new(word: &str, sentiment: &str, weight: f64) -> Self {
        Self {
            word: Some(word.to_string()),
            sentiment: Some(sentiment.to_string()),
            weight: Some(weight),
            ..Self::default()
        }
    }

    pub fn language(mut self, code: &str) -> Self {
        self.language = Some(code.to_string());
        self
    }

    pub fn phrase(mut self) -> Self {
        self.is_phrase = Some(true);
        self
    }

    fn validate(&self) -> Result<Validated, &'static str> {
        let word = self.word.as_deref().ok_or("missing word")?;
        let term = term_key(word);
        if term.is_empty() {
            return Err("blank word");
        }
        let sentiment = self
            .sentiment
            .as_deref()
            .ok_or("missing sentiment")?
            .trim()
            .to_ascii_lowercase();
        let polarity = match sentiment.as_str() {
            "positive" => Polarity::Positive,
            "negative" => Polarity::Negative,
            "neutral" => return Ok(Validated::Neutral(term)),
            _ => return Err("unknown sentiment"),
        };
        let weight = self.weight.ok_or("missing weight")?;
        if !weight.is_finite() || weight == 0.0 {
            return Err("weight must be finite and non-zero");
        }
        let language = match self.language.as_deref() {
            None => LexiconLanguage::Tagalog,
            Some(code) => LexiconLanguage::parse(code).ok_or("unknown language")?,
        };
        let kind = if self.is_phrase == Some(true) || term.contains(' ') {
            TermKind::Phrase
        } else {
            TermKind::Word
        };
        let weight = match polarity {
            Polarity::Positive => weight.abs(),
            Polarity::Negative => -weight.abs(),
        };
        Ok(Validated::Polar(LexiconEntry {
            term,
            weight,
            language,
            kind,
        }))
    }
}

enum Validated {
    Polar(LexiconEntry),
    Neutral(String),
}

/// Decode a JSON array of records one item at a time; items of the wrong shape are
/// skipped instead of failing the whole payload. A non-array value yields nothing.
pub fn entries_from_json(value: &Value) -> Vec<RawLexiconEntry> {
    let Some(items) = value.as_array() else {
        debug!("custom lexicon payload is not an array, ignoring");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<RawLexiconEntry>(item.clone()) {
            Ok(raw) => Some(raw),
            Err(e) => {
                debug!(error = %e, "skipping lexicon record with wrong field types");
                None
            }
        })
        .collect()
}

/// On-disk document: weighted records plus marker sets. Missing sets are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LexiconDocument {
    entries: Value,
    neutral: Vec<String>,
    negations: Vec<String>,
    intensifiers: Vec<String>,
    diminishers: Vec<String>,
    constructive: Vec<String>,
    contrast: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LexiconStore {
    positive_words: HashMap<String, LexiconEntry>,
    negative_words: HashMap<String, LexiconEntry>,
    positive_phrases: HashMap<String, LexiconEntry>,
    negative_phrases: HashMap<String, LexiconEntry>,
    // Both polarities, longest first (token count, then chars, then term).
    phrases: Vec<PhraseEntry>,
    neutral: TermSet,
    negations: TermSet,
    intensifiers: TermSet,
    diminishers: TermSet,
    constructive: TermSet,
    contrast: TermSet,
}

impl LexiconStore {
    /// Defaults, optionally extended with caller records.
    pub fn build(custom: Option<&[RawLexiconEntry]>) -> Self {
        let store = Self::defaults();
        match custom {
            Some(entries) if !entries.is_empty() => store.merge(entries),
            _ => store,
        }
    }

    /// A fresh copy of the embedded default lexicon.
    pub fn defaults() -> Self {
        DEFAULT_STORE.clone()
    }

    /// Add or overwrite by term. A term that switches polarity (or kind) leaves its old
    /// table; a `neutral` record moves the term out of the polarity tables entirely.
    pub fn merge(mut self, entries: &[RawLexiconEntry]) -> Self {
        let mut merged = 0usize;
        for raw in entries {
            match raw.validate() {
                Ok(Validated::Polar(entry)) => {
                    self.insert(entry);
                    merged += 1;
                }
                Ok(Validated::Neutral(term)) => {
                    self.remove(&term);
                    self.neutral.insert(&term);
                    merged += 1;
                }
                Err(reason) => {
                    debug!(reason, word = ?raw.word, "skipping malformed lexicon entry");
                }
            }
        }
        self.rebuild_phrases();
        debug!(
            merged,
            skipped = entries.len() - merged,
            "lexicon merge finished"
        );
        self
    }

    /// Parse a full lexicon document (records plus marker sets) into a new store.
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let doc: LexiconDocument = serde_json::from_str(raw)?;
        Ok(Self::default().merge_document(doc))
    }

    /// Defaults extended by a custom file: either a bare array of records or a
    /// document with `entries` and optional marker sets.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read lexicon at {}: {}", path.display(), e)
        })?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid lexicon JSON at {}: {}", path.display(), e))?;

        let store = if value.is_array() {
            Self::defaults().merge(&entries_from_json(&value))
        } else {
            let doc: LexiconDocument = serde_json::from_value(value)?;
            Self::defaults().merge_document(doc)
        };
        info!(path = %path.display(), terms = store.len(), "custom lexicon loaded");
        Ok(store)
    }

    /// `SENTIMENT_LEXICON_PATH` if set and readable, otherwise defaults.
    pub fn from_env() -> Self {
        match std::env::var(ENV_LEXICON_PATH) {
            Ok(path) if !path.trim().is_empty() => {
                Self::load_file(Path::new(path.trim())).unwrap_or_else(|e| {
                    warn!(error = %e, "custom lexicon unusable, using defaults");
                    Self::defaults()
                })
            }
            _ => Self::defaults(),
        }
    }

    fn merge_document(mut self, doc: LexiconDocument) -> Self {
        let marker_sets = [
            (&mut self.neutral, &doc.neutral),
            (&mut self.negations, &doc.negations),
            (&mut self.intensifiers, &doc.intensifiers),
            (&mut self.diminishers, &doc.diminishers),
            (&mut self.constructive, &doc.constructive),
            (&mut self.contrast, &doc.contrast),
        ];
        for (set, terms) in marker_sets {
            for t in terms {
                set.insert(t);
            }
        }
        self.merge(&entries_from_json(&doc.entries))
    }

    fn table_mut(&mut self, polarity: Polarity, kind: TermKind) -> &mut HashMap<String, LexiconEntry> {
        match (polarity, kind) {
            (Polarity::Positive, TermKind::Word) => &mut self.positive_words,
            (Polarity::Negative, TermKind::Word) => &mut self.negative_words,
            (Polarity::Positive, TermKind::Phrase) => &mut self.positive_phrases,
            (Polarity::Negative, TermKind::Phrase) => &mut self.negative_phrases,
        }
    }

    fn remove(&mut self, term: &str) {
        for table in [
            &mut self.positive_words,
            &mut self.negative_words,
            &mut self.positive_phrases,
            &mut self.negative_phrases,
        ] {
            table.remove(term);
        }
    }

    fn insert(&mut self, entry: LexiconEntry) {
        self.remove(&entry.term);
        let (polarity, kind) = (entry.polarity(), entry.kind);
        self.table_mut(polarity, kind).insert(entry.term.clone(), entry);
    }

    fn rebuild_phrases(&mut self) {
        let mut phrases: Vec<PhraseEntry> = self
            .positive_phrases
            .values()
            .chain(self.negative_phrases.values())
            .map(|e| PhraseEntry {
                tokens: e.term.split(' ').map(str::to_string).collect(),
                entry: e.clone(),
            })
            .collect();
        phrases.sort_by(|a, b| {
            b.tokens
                .len()
                .cmp(&a.tokens.len())
                .then_with(|| b.entry.term.chars().count().cmp(&a.entry.term.chars().count()))
                .then_with(|| a.entry.term.cmp(&b.entry.term))
        });
        self.phrases = phrases;
    }

    /// Single-word lookup (already case-folded).
    pub fn word(&self, term: &str) -> Option<&LexiconEntry> {
        self.positive_words
            .get(term)
            .or_else(|| self.negative_words.get(term))
    }

    /// Any table, words or phrases.
    pub fn lookup(&self, term: &str) -> Option<&LexiconEntry> {
        let key = term_key(term);
        self.word(&key)
            .or_else(|| self.positive_phrases.get(&key))
            .or_else(|| self.negative_phrases.get(&key))
    }

    pub fn phrases(&self) -> &[PhraseEntry] {
        &self.phrases
    }

    pub fn neutral(&self) -> &TermSet {
        &self.neutral
    }

    pub fn negations(&self) -> &TermSet {
        &self.negations
    }

    pub fn intensifiers(&self) -> &TermSet {
        &self.intensifiers
    }

    pub fn diminishers(&self) -> &TermSet {
        &self.diminishers
    }

    pub fn constructive(&self) -> &TermSet {
        &self.constructive
    }

    pub fn contrast(&self) -> &TermSet {
        &self.contrast
    }

    /// True when `token` is a single-token negation, intensifier or diminisher.
    pub fn is_marker(&self, token: &str) -> bool {
        self.negations.contains(token)
            || self.intensifiers.contains(token)
            || self.diminishers.contains(token)
    }

    /// Number of weighted terms across all four tables.
    pub fn len(&self) -> usize {
        self.positive_words.len()
            + self.negative_words.len()
            + self.positive_phrases.len()
            + self.negative_phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
