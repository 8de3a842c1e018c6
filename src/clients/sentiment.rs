//! Sentiment service client
//!
//! HTTP client for the sentiment microservice. A failed or malformed
//! response degrades to the neutral label; review annotation never fails
//! because the analyzer is unreachable.

use async_trait::async_trait;
use serde_json::Value;
use std::str::FromStr;

use crate::sentiment::SentimentLabel;

/// Gateway to the sentiment service
#[async_trait]
pub trait SentimentApi: Send + Sync {
    /// Analyze a piece of text, degrading to neutral on any failure
    async fn analyze(&self, text: &str) -> SentimentLabel;
}

/// Reqwest-based sentiment service client
pub struct SentimentClient {
    base_url: String,
    http: reqwest::Client,
}

impl SentimentClient {
    /// Create a client for the sentiment service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SentimentApi for SentimentClient {
    async fn analyze(&self, text: &str) -> SentimentLabel {
        let request_url = format!("{}/analyze/{}", self.base_url, urlencoding::encode(text));

        let response = match self.http.get(&request_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Sentiment service unreachable: {}", e);
                return SentimentLabel::Neutral;
            }
        };

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to decode sentiment response: {}", e);
                return SentimentLabel::Neutral;
            }
        };

        body.get("sentiment")
            .and_then(Value::as_str)
            .and_then(|s| SentimentLabel::from_str(s).ok())
            .unwrap_or(SentimentLabel::Neutral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = SentimentClient::new("http://localhost:5000/");
        assert_eq!(client.base_url, "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_unreachable_service_degrades_to_neutral() {
        let client = SentimentClient::new("http://127.0.0.1:1");
        assert_eq!(client.analyze("I love this car").await, SentimentLabel::Neutral);
    }
}
