// src/boundary.rs
//! Action dispatch for the JSON request/response boundary (stdin one-shot and
//! `POST /dispatch`). Every failure becomes `{"success": false, "error": ...}`.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::analyzer::SentimentAnalyzer;
use crate::lexicon::entries_from_json;
use crate::report::generate_report;

pub const QUANTITATIVE_DELEGATED: &str =
    "Quantitative analysis is delegated to the statistics service";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    AnalyzeSingle {
        #[serde(default)]
        comment: String,
        #[serde(default)]
        lexicon: Option<Value>,
    },
    GenerateReport {
        #[serde(default)]
        feedbacks: Vec<String>,
        #[serde(default)]
        lexicon: Option<Value>,
    },
    SplitComment {
        #[serde(default)]
        comment: String,
    },
    AnalyzeQuantitative {},
}

const KNOWN_ACTIONS: &[&str] = &[
    "analyze_single",
    "generate_report",
    "split_comment",
    "analyze_quantitative",
];

pub fn failure(error: impl std::fmt::Display) -> Value {
    json!({ "success": false, "error": error.to_string() })
}

/// Raw request body in, response document out.
pub fn dispatch(analyzer: &SentimentAnalyzer, raw: &str) -> Value {
    if raw.trim().is_empty() {
        return failure("No input data received");
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(v) => dispatch_value(analyzer, v),
        Err(e) => {
            warn!(error = %e, "unparseable request body");
            failure(format!("Invalid request JSON: {e}"))
        }
    }
}

pub fn dispatch_value(analyzer: &SentimentAnalyzer, request: Value) -> Value {
    let action = match request.get("action") {
        Some(Value::String(a)) => a.clone(),
        Some(other) => return failure(format!("Unknown action: {other}")),
        None => return failure("Unknown action: null"),
    };
    if !KNOWN_ACTIONS.contains(&action.as_str()) {
        return failure(format!("Unknown action: {action}"));
    }
    match serde_json::from_value::<ActionRequest>(request) {
        Ok(req) => handle(analyzer, req),
        Err(e) => failure(format!("Invalid {action} request: {e}")),
    }
}

fn scoped(analyzer: &SentimentAnalyzer, lexicon: Option<&Value>) -> SentimentAnalyzer {
    match lexicon {
        Some(payload) => {
            let entries = entries_from_json(payload);
            if entries.is_empty() {
                analyzer.clone()
            } else {
                analyzer.with_lexicon(&entries)
            }
        }
        None => analyzer.clone(),
    }
}

pub fn handle(analyzer: &SentimentAnalyzer, request: ActionRequest) -> Value {
    match request {
        ActionRequest::AnalyzeSingle { comment, lexicon } => {
            if comment.trim().is_empty() {
                return json!({
                    "success": true,
                    "sentiment": "neutral",
                    "confidence": 0.0,
                    "method": "empty_text"
                });
            }
            let result = scoped(analyzer, lexicon.as_ref()).analyze(&comment);
            json!({
                "success": true,
                "sentiment": result.label,
                "confidence": (result.confidence * 100.0).round() / 100.0,
                "method": result.method,
                "details": result
            })
        }
        ActionRequest::GenerateReport { feedbacks, lexicon } => {
            let report = generate_report(&scoped(analyzer, lexicon.as_ref()), &feedbacks);
            serde_json::to_value(report).unwrap_or_else(|e| failure(format!("Report generation failed: {e}")))
        }
        ActionRequest::SplitComment { comment } => match serde_json::to_value(analyzer.split(&comment)) {
            Ok(Value::Object(mut map)) => {
                map.insert("success".to_string(), Value::Bool(true));
                Value::Object(map)
            }
            Ok(_) => failure("Comment split produced no object"),
            Err(e) => failure(format!("Comment split failed: {e}")),
        },
        ActionRequest::AnalyzeQuantitative {} => failure(QUANTITATIVE_DELEGATED),
    }
}
