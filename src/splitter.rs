// src/splitter.rs
//! Split a comment into positive, negative and neutral sentence groups.

use serde::{Deserialize, Serialize};

use crate::scorer::LexicalScorer;
use crate::text;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentenceCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResult {
    pub positive_part: String,
    pub negative_part: String,
    pub neutral_part: String,
    pub sentence_counts: SentenceCounts,
}

/// Never fails: text without terminals is one sentence, blank text is zero.
pub fn split(scorer: &LexicalScorer<'_>, text: &str, balance_threshold: f64) -> SplitResult {
    let mut positive = Vec::new();
    let mut negative = Vec::new();
    let mut neutral = Vec::new();

    for sentence in text::sentences(text) {
        let balance = scorer.analyze_sentence(&sentence).balance;
        if balance > balance_threshold {
            positive.push(sentence);
        } else if balance < -balance_threshold {
            negative.push(sentence);
        } else {
            neutral.push(sentence);
        }
    }

    SplitResult {
        sentence_counts: SentenceCounts {
            positive: positive.len(),
            negative: negative.len(),
            neutral: neutral.len(),
        },
        positive_part: join(&positive),
        negative_part: join(&negative),
        neutral_part: join(&neutral),
    }
}

fn join(sentences: &[String]) -> String {
    if sentences.is_empty() {
        String::new()
    } else {
        format!("{}.", sentences.join(". "))
    }
}
