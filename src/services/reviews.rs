//! Review service
//!
//! Orchestrates the dealer backend and the sentiment service: fetches a
//! dealer's reviews, decorates each with a derived `sentiment` label, and
//! forwards new review submissions.
//!
//! Reviews are raw JSON records owned by the dealer backend; annotation
//! adds one field and never removes or renames the originals. The label is
//! recomputed on every fetch and never persisted.

use crate::clients::{DealerApi, SentimentApi};
use serde_json::Value;
use std::sync::Arc;

/// Error types for review operations
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    /// The caller supplied an unusable dealer id
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Review fetching, annotation and submission
pub struct ReviewService {
    dealer: Arc<dyn DealerApi>,
    sentiment: Arc<dyn SentimentApi>,
}

impl ReviewService {
    /// Create a new review service over the two gateways
    pub fn new(dealer: Arc<dyn DealerApi>, sentiment: Arc<dyn SentimentApi>) -> Self {
        Self { dealer, sentiment }
    }

    /// Fetch a dealer's reviews with each record annotated by sentiment.
    ///
    /// A dealer id of zero is a client error. An unreachable backend or a
    /// dealer without reviews yields an empty list, not an error. Records
    /// without a `review` text field pass through unannotated.
    pub async fn dealer_reviews(
        &self,
        dealer_id: i64,
    ) -> Result<Vec<Value>, ReviewServiceError> {
        if dealer_id == 0 {
            return Err(ReviewServiceError::BadRequest(
                "Missing dealer id".to_string(),
            ));
        }

        let reviews = match self.dealer.fetch_reviews(dealer_id).await {
            Some(Value::Array(reviews)) => reviews,
            Some(other) => {
                tracing::warn!(dealer_id, "Backend returned non-list reviews: {}", other);
                return Ok(Vec::new());
            }
            None => return Ok(Vec::new()),
        };

        let mut annotated = Vec::with_capacity(reviews.len());
        for mut review in reviews {
            let text = review
                .get("review")
                .and_then(Value::as_str)
                .map(str::to_string);

            if let Some(text) = text {
                let label = self.sentiment.analyze(&text).await;
                if let Some(record) = review.as_object_mut() {
                    record.insert("sentiment".to_string(), Value::String(label.to_string()));
                }
            }

            annotated.push(review);
        }

        Ok(annotated)
    }

    /// Forward a review payload to the backend's insert endpoint.
    ///
    /// Returns the backend's parsed response, or `None` when the call
    /// failed.
    pub async fn submit(&self, payload: &Value) -> Option<Value> {
        self.dealer.post_review(payload).await
    }
}
