// src/report.rs
//! Batch report over many feedback comments: per-comment analysis and split parts,
//! comments grouped by label, and count/percentage summary.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyzer::SentimentAnalyzer;
use crate::result::{Label, SentimentResult};
use crate::splitter::SplitResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedFeedback {
    pub text: String,
    pub sentiment: Label,
    pub analysis: SentimentResult,
    pub parts: SplitResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelShare {
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub positive: LabelShare,
    pub negative: LabelShare,
    pub neutral: LabelShare,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedComments {
    pub positive: Vec<AnalyzedFeedback>,
    pub negative: Vec<AnalyzedFeedback>,
    pub neutral: Vec<AnalyzedFeedback>,
}

impl CategorizedComments {
    fn bucket(&mut self, label: Label) -> &mut Vec<AnalyzedFeedback> {
        match label {
            Label::Positive => &mut self.positive,
            Label::Negative => &mut self.negative,
            Label::Neutral => &mut self.neutral,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub success: bool,
    pub summary: ReportSummary,
    pub categorized_comments: CategorizedComments,
    pub analyzed_feedbacks: Vec<AnalyzedFeedback>,
    pub total_feedbacks: usize,
}

fn share(count: usize, total: usize) -> LabelShare {
    let percentage = if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
    };
    LabelShare { count, percentage }
}

/// Blank comments are skipped. Comments are analyzed in parallel; output order
/// follows input order.
pub fn generate_report(analyzer: &SentimentAnalyzer, feedbacks: &[String]) -> Report {
    let analyzed: Vec<AnalyzedFeedback> = feedbacks
        .par_iter()
        .filter(|f| !f.trim().is_empty())
        .map(|f| {
            let analysis = analyzer.analyze(f);
            AnalyzedFeedback {
                text: f.clone(),
                sentiment: analysis.label,
                parts: analyzer.split(f),
                analysis,
            }
        })
        .collect();

    let mut categorized = CategorizedComments::default();
    for item in &analyzed {
        categorized.bucket(item.sentiment).push(item.clone());
    }

    let total = analyzed.len();
    let summary = ReportSummary {
        positive: share(categorized.positive.len(), total),
        negative: share(categorized.negative.len(), total),
        neutral: share(categorized.neutral.len(), total),
    };
    info!(
        total,
        positive = summary.positive.count,
        negative = summary.negative.count,
        neutral = summary.neutral.count,
        "feedback report generated"
    );

    Report {
        success: true,
        summary,
        categorized_comments: categorized,
        analyzed_feedbacks: analyzed,
        total_feedbacks: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_round_to_two_places() {
        assert_eq!(share(1, 3).percentage, 33.33);
        assert_eq!(share(2, 3).percentage, 66.67);
        assert_eq!(share(0, 0).percentage, 0.0);
    }

    #[test]
    fn blank_feedbacks_are_skipped_and_order_kept() {
        let analyzer = SentimentAnalyzer::default();
        let feedbacks: Vec<String> = ["", "  ", "Salamat po", "Sayang ang oras"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let report = generate_report(&analyzer, &feedbacks);
        assert!(report.success);
        assert_eq!(report.total_feedbacks, 2);
        assert_eq!(report.analyzed_feedbacks[0].text, "Salamat po");
        assert_eq!(report.analyzed_feedbacks[1].text, "Sayang ang oras");
        let counted = report.summary.positive.count + report.summary.negative.count + report.summary.neutral.count;
        assert_eq!(counted, 2);
    }

    #[test]
    fn empty_batch_is_a_successful_empty_report() {
        let report = generate_report(&SentimentAnalyzer::default(), &[]);
        assert!(report.success);
        assert_eq!(report.total_feedbacks, 0);
        assert_eq!(report.summary, ReportSummary::default());
    }
}
