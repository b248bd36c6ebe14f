// src/scorer.rs
//! Lexical scorer: phrase and word matching with negation flipping, intensifier and
//! diminisher scaling and Tagalog affix stripping, plus a per-sentence breakdown.
//!
//! Matching runs on tokens, never on raw substrings. Phrases are scanned longest first
//! and claim their tokens, so a word inside a matched phrase is never counted again.

use serde::{Deserialize, Serialize};

use crate::config::ScorerConfig;
use crate::lexicon::{LexiconEntry, LexiconStore, Polarity};
use crate::normalize::{count_emoticons, NEGATIVE_EMOTICONS, POSITIVE_EMOTICONS};
use crate::result::{SentenceAnalysis, SentenceSummary};
use crate::text::{self, sequence_at, TermSet, Token};

// Longest first; only the first matching prefix/suffix is stripped.
const PREFIXES: &[&str] = &[
    "makapag", "nakapag", "napaka", "nakaka", "pinaka", "pinag", "ipag", "mag", "nag", "pag", "ma",
    "na", "pa", "ka", "um",
];
const SUFFIXES: &[&str] = &["han", "hin", "an", "in"];

/// How a lexicon term was found in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchForm {
    Raw,
    Stem,
    Phrase,
    Emoticon,
}

/// One contribution to an accumulator. `polarity` is the side that was credited,
/// after any negation flip; `weight` is the credited amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermMatch {
    pub term: String,
    pub polarity: Polarity,
    pub weight: f64,
    pub form: MatchForm,
    pub negated: bool,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexicalScore {
    pub positive_score: f64,
    pub negative_score: f64,
    pub sentences: Vec<SentenceAnalysis>,
    /// Distinct neutral cues present (word-boundary matched).
    pub neutral_indicators: usize,
    pub matches: Vec<TermMatch>,
}

impl LexicalScore {
    pub fn total(&self) -> f64 {
        self.positive_score - self.negative_score
    }

    pub fn summary(&self, lean: f64) -> SentenceSummary {
        SentenceSummary::from_sentences(&self.sentences, lean)
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    positive: f64,
    negative: f64,
    matches: Vec<TermMatch>,
}

impl Accumulator {
    fn credit(&mut self, m: TermMatch) {
        match m.polarity {
            Polarity::Positive => self.positive += m.weight,
            Polarity::Negative => self.negative += m.weight,
        }
        self.matches.push(m);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LexicalScorer<'a> {
    lexicon: &'a LexiconStore,
    config: &'a ScorerConfig,
}

impl<'a> LexicalScorer<'a> {
    pub fn new(lexicon: &'a LexiconStore, config: &'a ScorerConfig) -> Self {
        Self { lexicon, config }
    }

    /// Whole-text accumulators plus an independent pass per sentence.
    pub fn score(&self, text: &str) -> LexicalScore {
        let tokens = text::tokenize(text);
        let acc = self.accumulate(text, &tokens);
        LexicalScore {
            positive_score: acc.positive,
            negative_score: acc.negative,
            sentences: text::sentences(text)
                .iter()
                .map(|s| self.analyze_sentence(s))
                .collect(),
            neutral_indicators: self.lexicon.neutral().count_distinct(text, &tokens),
            matches: acc.matches,
        }
    }

    /// Score one sentence on its own and flag constructive/contrast markers.
    pub fn analyze_sentence(&self, sentence: &str) -> SentenceAnalysis {
        let tokens = text::tokenize(sentence);
        let acc = self.accumulate(sentence, &tokens);
        let is_constructive = self.lexicon.constructive().occurs(sentence, &tokens)
            || self.lexicon.contrast().occurs(sentence, &tokens);
        SentenceAnalysis::new(acc.positive, acc.negative, is_constructive)
    }

    fn accumulate(&self, text: &str, tokens: &[Token]) -> Accumulator {
        let mut acc = Accumulator::default();
        let mut claimed = vec![false; tokens.len()];

        self.match_phrases(text, tokens, &mut claimed, &mut acc);

        for (i, tok) in tokens.iter().enumerate() {
            if claimed[i] || self.lexicon.is_marker(&tok.text) {
                continue;
            }
            let Some((entry, form)) = self.lookup(&tok.text) else {
                continue;
            };
            let multiplier = self.multiplier(text, tokens, i, &claimed);
            let negated = self
                .nearest(self.lexicon.negations(), text, tokens, i, self.config.negation_window, &claimed)
                .is_some();
            let polarity = if negated {
                entry.polarity().opposite()
            } else {
                entry.polarity()
            };
            acc.credit(TermMatch {
                term: entry.term.clone(),
                polarity,
                weight: entry.magnitude() * multiplier,
                form,
                negated,
                multiplier,
            });
        }

        self.match_emoticons(text, &mut acc);
        acc
    }

    // Claim every phrase span first, then judge negation against the final claims so a
    // negation inside one phrase never flips another.
    fn match_phrases(&self, text: &str, tokens: &[Token], claimed: &mut [bool], acc: &mut Accumulator) {
        let mut hits = Vec::new();
        for phrase in self.lexicon.phrases() {
            let n = phrase.tokens.len();
            if n == 0 || n > tokens.len() {
                continue;
            }
            let mut start = 0;
            while start + n <= tokens.len() {
                let free = claimed[start..start + n].iter().all(|c| !c);
                if !(free && sequence_at(text, tokens, start, &phrase.tokens)) {
                    start += 1;
                    continue;
                }
                claimed[start..start + n].iter_mut().for_each(|c| *c = true);
                hits.push((phrase, start));
                start += n;
            }
        }

        for (phrase, start) in hits {
            let negated = self.phrase_negated(text, tokens, start, claimed);
            let (polarity, weight) = if negated {
                (
                    phrase.entry.polarity().opposite(),
                    phrase.entry.magnitude() * self.config.phrase_negation_factor,
                )
            } else {
                (phrase.entry.polarity(), phrase.entry.magnitude())
            };
            acc.credit(TermMatch {
                term: phrase.entry.term.clone(),
                polarity,
                weight,
                form: MatchForm::Phrase,
                negated,
                multiplier: 1.0,
            });
        }
    }

    // An unclaimed negation lying wholly inside the `phrase_negation_chars` characters
    // before the phrase's first token.
    fn phrase_negated(&self, text: &str, tokens: &[Token], start: usize, claimed: &[bool]) -> bool {
        let window = self.config.phrase_negation_chars;
        if window == 0 || start == 0 {
            return false;
        }
        let phrase_start = tokens[start].start;
        let lo_byte = text[..phrase_start]
            .char_indices()
            .rev()
            .nth(window - 1)
            .map_or(0, |(i, _)| i);
        let lo = tokens[..start]
            .iter()
            .position(|t| t.start >= lo_byte)
            .unwrap_or(start);
        self.lexicon
            .negations()
            .occurs_within(text, tokens, lo, start, claimed)
    }

    /// Raw form first, then affix-stripped roots. One table per token.
    fn lookup(&self, token: &str) -> Option<(&'a LexiconEntry, MatchForm)> {
        if let Some(e) = self.lexicon.word(token) {
            return Some((e, MatchForm::Raw));
        }
        if !self.config.stemming || token.chars().count() <= self.config.min_stem_token_chars {
            return None;
        }
        stem_candidates(token, self.config.min_root_chars)
            .iter()
            .find_map(|root| self.lexicon.word(root))
            .map(|e| (e, MatchForm::Stem))
    }

    fn multiplier(&self, text: &str, tokens: &[Token], i: usize, claimed: &[bool]) -> f64 {
        let w = self.config.modifier_window;
        let up = self.nearest(self.lexicon.intensifiers(), text, tokens, i, w, claimed);
        let down = self.nearest(self.lexicon.diminishers(), text, tokens, i, w, claimed);
        match (up, down) {
            (Some(u), Some(d)) if d < u => self.config.diminisher_multiplier,
            (Some(_), _) => self.config.intensifier_multiplier,
            (None, Some(_)) => self.config.diminisher_multiplier,
            (None, None) => 1.0,
        }
    }

    // Distance to the closest marker ending within `window` tokens before `i`.
    // Markers sitting on phrase-claimed tokens were already consumed by that phrase.
    fn nearest(
        &self,
        set: &TermSet,
        text: &str,
        tokens: &[Token],
        i: usize,
        window: usize,
        claimed: &[bool],
    ) -> Option<usize> {
        (1..=window.min(i)).find(|k| !claimed[i - k] && set.ends_at(text, tokens, i - k))
    }

    fn match_emoticons(&self, text: &str, acc: &mut Accumulator) {
        let weight = self.config.emoticon_weight;
        if weight == 0.0 {
            return;
        }
        for (list, polarity) in [
            (POSITIVE_EMOTICONS, Polarity::Positive),
            (NEGATIVE_EMOTICONS, Polarity::Negative),
        ] {
            for emo in list {
                let n = count_emoticons(text, &[*emo]);
                if n > 0 {
                    acc.credit(TermMatch {
                        term: (*emo).to_string(),
                        polarity,
                        weight: weight * n as f64,
                        form: MatchForm::Emoticon,
                        negated: false,
                        multiplier: 1.0,
                    });
                }
            }
        }
    }
}

/// Candidate roots for a Tagalog-inflected token: prefix stripped, suffix stripped,
/// then both. Roots shorter than `min_root` chars are dropped.
pub fn stem_candidates(token: &str, min_root: usize) -> Vec<String> {
    let long_enough = |s: &str| s.chars().count() >= min_root;
    let strip_prefix = |s: &str| -> Option<String> {
        PREFIXES
            .iter()
            .find_map(|p| s.strip_prefix(p))
            .filter(|r| long_enough(r))
            .map(str::to_string)
    };
    let strip_suffix = |s: &str| -> Option<String> {
        SUFFIXES
            .iter()
            .find_map(|x| s.strip_suffix(x))
            .filter(|r| long_enough(r))
            .map(str::to_string)
    };

    let mut out = Vec::with_capacity(3);
    let prefixed = strip_prefix(token);
    if let Some(r) = &prefixed {
        out.push(r.clone());
    }
    if let Some(r) = strip_suffix(token) {
        out.push(r);
    }
    if let Some(r) = prefixed.as_deref().and_then(strip_suffix) {
        out.push(r);
    }
    out.dedup();
    out
}
