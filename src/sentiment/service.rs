//! Sentiment service HTTP surface
//!
//! A small standalone microservice wrapping the VADER analyzer:
//! - `GET /` - service banner
//! - `GET /health` - health check
//! - `GET /analyze/{text}` - analyze a URL-encoded path segment
//! - `POST /analyze` - analyze the `text` field of a JSON body
//!
//! Error contract: every failure response still carries
//! `"sentiment": "neutral"` so callers can consume the body uniformly
//! without branching on status in the common case.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{analyze, PolarityScores, SentimentLabel};

/// Longest echo of the analyzed text in a response, in characters
const TEXT_ECHO_LIMIT: usize = 100;

/// Response body for a successful analysis
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub sentiment: SentimentLabel,
    pub scores: PolarityScores,
    pub text: String,
}

/// Request body for POST /analyze
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

/// Build the sentiment service router
pub fn build_router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/analyze/{text}", get(analyze_path))
        .route("/analyze", post(analyze_body))
}

/// GET / - service banner
async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Sentiment Analyzer Service is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/": "Service status",
            "/analyze/<text>": "Analyze sentiment of text",
            "/health": "Health check"
        }
    }))
}

/// GET /health - health check
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

/// GET /analyze/{text}
///
/// Axum URL-decodes the path segment before it reaches the handler.
async fn analyze_path(Path(text): Path<String>) -> Response {
    run_analysis(&text)
}

/// POST /analyze with body `{"text": "..."}`
///
/// Missing or empty text and unparseable bodies are client errors, but the
/// body still carries the neutral default.
async fn analyze_body(body: String) -> Response {
    let body: AnalyzeRequest = match serde_json::from_str(&body) {
        Ok(body) => body,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!("Invalid JSON body: {}", e),
                    "sentiment": SentimentLabel::Neutral,
                })),
            )
                .into_response();
        }
    };

    if body.text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "No text provided",
                "sentiment": SentimentLabel::Neutral,
            })),
        )
            .into_response();
    }

    run_analysis(&body.text)
}

/// Score the text and shape the response
fn run_analysis(text: &str) -> Response {
    let (label, scores) = analyze(text);

    tracing::debug!(sentiment = %label, compound = scores.compound, "analyzed text");

    Json(AnalyzeResponse {
        sentiment: label,
        scores,
        text: truncate_echo(text),
    })
    .into_response()
}

/// Echo at most `TEXT_ECHO_LIMIT` characters of the input back to the caller
fn truncate_echo(text: &str) -> String {
    if text.chars().count() > TEXT_ECHO_LIMIT {
        let truncated: String = text.chars().take(TEXT_ECHO_LIMIT).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    fn server() -> TestServer {
        TestServer::new(build_router()).unwrap()
    }

    #[tokio::test]
    async fn test_home_banner() {
        let server = server();
        let response = server.get("/").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Sentiment Analyzer Service is running");
        assert!(body["endpoints"].is_object());
    }

    #[tokio::test]
    async fn test_health() {
        let server = server();
        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_analyze_positive_text() {
        let server = server();
        let response = server.get("/analyze/I%20love%20this%20car").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: AnalyzeResponse = response.json();
        assert_eq!(body.sentiment, SentimentLabel::Positive);
        assert!(body.scores.compound >= 0.05);
        assert_eq!(body.text, "I love this car");
    }

    #[tokio::test]
    async fn test_analyze_negative_text() {
        let server = server();
        let response = server.get("/analyze/I%20hate%20this%20dealer").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: AnalyzeResponse = response.json();
        assert_eq!(body.sentiment, SentimentLabel::Negative);
        assert!(body.scores.compound <= -0.05);
    }

    #[tokio::test]
    async fn test_analyze_post_body() {
        let server = server();
        let response = server
            .post("/analyze")
            .json(&serde_json::json!({ "text": "I love this car" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: AnalyzeResponse = response.json();
        assert_eq!(body.sentiment, SentimentLabel::Positive);
    }

    #[tokio::test]
    async fn test_analyze_post_empty_text_is_client_error_with_neutral_default() {
        let server = server();
        let response = server
            .post("/analyze")
            .json(&serde_json::json!({ "text": "" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["sentiment"], "neutral");
        assert_eq!(body["error"], "No text provided");
    }

    #[tokio::test]
    async fn test_analyze_post_missing_text_field_is_client_error() {
        let server = server();
        let response = server
            .post("/analyze")
            .json(&serde_json::json!({}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["sentiment"], "neutral");
    }

    #[tokio::test]
    async fn test_analyze_post_malformed_json_still_carries_neutral() {
        let server = server();
        let response = server
            .post("/analyze")
            .text("{not json")
            .content_type("application/json")
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["sentiment"], "neutral");
    }

    #[tokio::test]
    async fn test_long_text_is_truncated_in_echo() {
        let server = server();
        let long_text = "a".repeat(150);
        let response = server
            .post("/analyze")
            .json(&serde_json::json!({ "text": long_text }))
            .await;

        let body: AnalyzeResponse = response.json();
        assert_eq!(body.text.chars().count(), 103);
        assert!(body.text.ends_with("..."));
    }

    #[test]
    fn test_truncate_echo_boundary() {
        let exactly_100 = "b".repeat(100);
        assert_eq!(truncate_echo(&exactly_100), exactly_100);

        let over = "b".repeat(101);
        let echoed = truncate_echo(&over);
        assert!(echoed.starts_with(&"b".repeat(100)));
        assert!(echoed.ends_with("..."));
    }
}
