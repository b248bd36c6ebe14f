// src/normalize.rs
//! Emoticon and pictograph stripping applied before any scoring, so emoji are not
//! counted twice (once by the polarity analyzer, once by lexicon matching).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Emoticons that count as positive signal.
pub const POSITIVE_EMOTICONS: &[&str] = &[
    "😊", "😀", "😃", "😄", "👍", "❤️", "💯", "✨", "🎉", "😍", ":-)", ":)", ":D",
];

/// Emoticons that count as negative signal.
pub const NEGATIVE_EMOTICONS: &[&str] = &["😞", "😢", "😠", "😡", "👎", "😕", "😔", ":-(", ":(", "D:"];

// Emoticons, symbols & pictographs, transport, regional flags, dingbats, misc symbols,
// supplemental symbols, plus variation selector-16 and ZWJ left behind by sequences.
static PICTOGRAPHS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2702}-\x{27B0}",
        r"\x{2600}-\x{26FF}",
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1FA70}-\x{1FAFF}",
        r"\x{FE0F}\x{200D}",
        "]+"
    ))
    .expect("pictograph regex")
});

/// What the normalizer did to one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRemoval {
    pub original_text: String,
    pub cleaned_text: String,
    pub emojis_removed: bool,
}

/// Remove emoticons and pictographs, then trim. Runs to a fixpoint so that
/// `normalize(normalize(t)) == normalize(t)` for every input.
pub fn normalize(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let mut next = current.clone();
        for emo in POSITIVE_EMOTICONS.iter().chain(NEGATIVE_EMOTICONS) {
            next = remove_emoticon(&next, emo);
        }
        let next = PICTOGRAPHS.replace_all(&next, "").trim().to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// `normalize` plus provenance for the result payload.
pub fn strip_report(text: &str) -> EmojiRemoval {
    let cleaned = normalize(text);
    EmojiRemoval {
        emojis_removed: cleaned != text.trim(),
        original_text: text.to_string(),
        cleaned_text: cleaned,
    }
}

/// Byte ranges of `emoticon` in `text`. An alphanumeric edge of a textual emoticon must
/// not touch another alphanumeric char, so "D:" in "ID: 7" is not an emoticon.
pub fn emoticon_spans(text: &str, emoticon: &str) -> Vec<(usize, usize)> {
    let first_alnum = emoticon.chars().next().is_some_and(char::is_alphanumeric);
    let last_alnum = emoticon.chars().last().is_some_and(char::is_alphanumeric);

    let mut out = Vec::new();
    let mut from = 0;
    while let Some(pos) = text[from..].find(emoticon) {
        let start = from + pos;
        let end = start + emoticon.len();
        let before_ok = !first_alnum
            || !text[..start].chars().next_back().is_some_and(char::is_alphanumeric);
        let after_ok = !last_alnum || !text[end..].chars().next().is_some_and(char::is_alphanumeric);
        if before_ok && after_ok {
            out.push((start, end));
            from = end;
        } else {
            // step past the first char of this occurrence
            from = start + emoticon.chars().next().map_or(1, char::len_utf8);
        }
    }
    out
}

/// Occurrences of any emoticon in `list`.
pub fn count_emoticons(text: &str, list: &[&str]) -> usize {
    list.iter().map(|e| emoticon_spans(text, e).len()).sum()
}

fn remove_emoticon(text: &str, emoticon: &str) -> String {
    let spans = emoticon_spans(text, emoticon);
    if spans.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, end) in spans {
        out.push_str(&text[last..start]);
        last = end;
    }
    out.push_str(&text[last..]);
    out
}
