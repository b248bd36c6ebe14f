// src/text.rs
//! Text primitives shared by the scorer and the splitter: a case-folding tokenizer with
//! byte spans, whitespace-contiguous term sequences, and sentence segmentation.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use regex::Regex;

// \w covers Unicode letters/digits; hyphen and apostrophe compounds stay one token
// ("well-organized", "don't").
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?u)\w+(?:['’-]\w+)*").expect("tokenizer regex"));

/// Sentence-terminal punctuation used by every segmentation in the crate.
pub const SENTENCE_TERMINALS: [char; 3] = ['.', '!', '?'];

/// A single case-folded token with its byte span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub index: usize, // 0-based token index in the sequence
}

/// Unicode-friendly tokenizer. Token text is lowercased; spans point into `input`.
pub fn tokenize(input: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(input)
        .enumerate()
        .map(|(i, m)| Token {
            text: m.as_str().to_lowercase().replace('’', "'"),
            start: m.start(),
            end: m.end(),
            index: i,
        })
        .collect()
}

/// Canonical lookup key for a lexicon term: folded tokens joined by single spaces.
/// Returns an empty string when the term has no word characters.
pub fn term_key(term: &str) -> String {
    tokenize(term)
        .into_iter()
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when only whitespace separates `tokens[from..from + len]` in `text`.
pub fn contiguous(text: &str, tokens: &[Token], from: usize, len: usize) -> bool {
    if len < 2 {
        return true;
    }
    tokens[from..from + len]
        .windows(2)
        .all(|pair| text[pair[0].end..pair[1].start].chars().all(char::is_whitespace))
}

/// True when `seq` matches the tokens starting at `start` as a contiguous run.
pub fn sequence_at(text: &str, tokens: &[Token], start: usize, seq: &[String]) -> bool {
    if seq.is_empty() || start + seq.len() > tokens.len() {
        return false;
    }
    seq.iter()
        .zip(&tokens[start..start + seq.len()])
        .all(|(want, tok)| *want == tok.text)
        && contiguous(text, tokens, start, seq.len())
}

/// Split into trimmed, non-empty sentences on `.`, `!` and `?`.
/// Text without terminals yields one sentence; blank text yields none.
pub fn sentences(text: &str) -> Vec<String> {
    text.split(|c: char| SENTENCE_TERMINALS.contains(&c))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A set of single- or multi-word marker terms matched on token boundaries.
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    terms: Vec<Vec<String>>,
    keys: HashSet<String>,
}

impl TermSet {
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for t in terms {
            set.insert(t.as_ref());
        }
        set
    }

    /// Adds a term; blank or duplicate terms are ignored.
    pub fn insert(&mut self, term: &str) -> bool {
        let key = term_key(term);
        if key.is_empty() || self.keys.contains(&key) {
            return false;
        }
        self.terms
            .push(key.split(' ').map(str::to_string).collect());
        self.keys.insert(key);
        true
    }

    pub fn contains(&self, term: &str) -> bool {
        self.keys.contains(&term_key(term))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True when some term's last token sits at `end` (inclusive).
    pub fn ends_at(&self, text: &str, tokens: &[Token], end: usize) -> bool {
        self.terms.iter().any(|seq| {
            end + 1 >= seq.len() && sequence_at(text, tokens, end + 1 - seq.len(), seq)
        })
    }

    /// True when a term lies entirely inside `tokens[lo..hi]` on tokens not marked in
    /// `claimed`. An empty `claimed` slice means nothing is claimed.
    pub fn occurs_within(
        &self,
        text: &str,
        tokens: &[Token],
        lo: usize,
        hi: usize,
        claimed: &[bool],
    ) -> bool {
        let hi = hi.min(tokens.len());
        let free = |i: usize| !claimed.get(i).copied().unwrap_or(false);
        self.terms.iter().any(|seq| {
            lo + seq.len() <= hi
                && (lo..=hi - seq.len()).any(|start| {
                    (start..start + seq.len()).all(|i| free(i)) && sequence_at(text, tokens, start, seq)
                })
        })
    }

    pub fn occurs(&self, text: &str, tokens: &[Token]) -> bool {
        self.occurs_within(text, tokens, 0, tokens.len(), &[])
    }

    /// Number of distinct terms that occur at least once.
    pub fn count_distinct(&self, text: &str, tokens: &[Token]) -> usize {
        self.terms
            .iter()
            .filter(|seq| {
                seq.len() <= tokens.len()
                    && (0..=tokens.len() - seq.len()).any(|start| sequence_at(text, tokens, start, seq))
            })
            .count()
    }
}
