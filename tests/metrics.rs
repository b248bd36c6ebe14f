// tests/metrics.rs
mod common;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use feedback_sentiment::metrics::Metrics;

#[tokio::test]
async fn metrics_endpoint_contains_expected_series() {
    let metrics = Metrics::init(1234).expect("install recorder");
    // second init reuses the installed recorder
    let again = Metrics::init(1234).expect("reuse recorder");

    let analyzer = common::tagalog();
    analyzer.analyze("Napakaganda ng event!");
    analyzer.analyze("");
    common::analyzer_with(common::FixedLanguage("en", 0.99), common::FailingPolarity)
        .analyze("The talk was fine");

    let resp = again
        .router()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8_lossy(&body);

    assert!(text.contains("sentiment_request_timeout_ms"), "body: {text}");
    assert!(text.contains(r#"sentiment_analyses_total{method="tagalog_lexicon"}"#), "body: {text}");
    assert!(text.contains(r#"sentiment_analyses_total{method="empty_text"}"#), "body: {text}");
    assert!(text.contains("sentiment_degraded_total"), "body: {text}");
    drop(metrics);
}
