//! Dealer backend client
//!
//! HTTP client for the external dealer-data service. All operations return
//! `Option<Value>`: the parsed JSON body on success, `None` on any network
//! or decoding failure. Callers treat `None` as "no data", never as an error
//! to propagate with detail.

use async_trait::async_trait;
use serde_json::Value;

/// Gateway to the dealer backend
#[async_trait]
pub trait DealerApi: Send + Sync {
    /// Fetch all dealers, or dealers in one state
    async fn fetch_dealers(&self, state: Option<&str>) -> Option<Value>;

    /// Fetch a single dealer by id
    async fn fetch_dealer(&self, id: i64) -> Option<Value>;

    /// Fetch the reviews of a dealer
    async fn fetch_reviews(&self, dealer_id: i64) -> Option<Value>;

    /// Submit a new review
    async fn post_review(&self, payload: &Value) -> Option<Value>;
}

/// Reqwest-based dealer backend client
pub struct DealerClient {
    base_url: String,
    http: reqwest::Client,
}

impl DealerClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// GET `endpoint` with the given query parameters, parsed as JSON.
    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Option<Value> {
        let request_url = build_request_url(&self.base_url, endpoint, params);
        tracing::debug!("GET from {}", request_url);

        let response = match self.http.get(&request_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Network exception occurred: {}", e);
                return None;
            }
        };

        match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Failed to decode backend response: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl DealerApi for DealerClient {
    async fn fetch_dealers(&self, state: Option<&str>) -> Option<Value> {
        let endpoint = match state {
            Some(state) => format!("/fetchDealers/{}", state),
            None => "/fetchDealers".to_string(),
        };
        self.get(&endpoint, &[]).await
    }

    async fn fetch_dealer(&self, id: i64) -> Option<Value> {
        self.get(&format!("/fetchDealer/{}", id), &[]).await
    }

    async fn fetch_reviews(&self, dealer_id: i64) -> Option<Value> {
        self.get(&format!("/fetchReviews/dealer/{}", dealer_id), &[])
            .await
    }

    async fn post_review(&self, payload: &Value) -> Option<Value> {
        let request_url = format!("{}/insert_review", self.base_url);
        tracing::debug!("POST to {}", request_url);

        let response = match self.http.post(&request_url).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Network exception occurred: {}", e);
                return None;
            }
        };

        match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Failed to decode backend response: {}", e);
                None
            }
        }
    }
}

/// Assemble a backend request URL.
///
/// The query string renders each pair as `key=value&`, keeping the trailing
/// separator. The legacy backend tolerates (and some of its consumers
/// expect) this exact format, so it is preserved for compatibility rather
/// than normalized.
fn build_request_url(base: &str, endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!("{}{}?", base, endpoint);
    for (key, value) in params {
        url.push_str(key);
        url.push('=');
        url.push_str(value);
        url.push('&');
    }
    url
}
