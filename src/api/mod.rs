//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints of the DealerHub web API:
//! - Car model listing
//! - Dealer listing/detail and sentiment-annotated reviews
//! - Review submission
//! - Login/logout/registration
//!
//! All endpoints speak JSON with session-cookie-based identity.

pub mod auth;
pub mod cars;
pub mod dealers;
pub mod middleware;
pub mod responses;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState};

/// Build the main API router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/get_cars", get(cars::get_cars))
        .route("/get_dealers", get(dealers::get_dealerships))
        .route("/get_dealers/{state}", get(dealers::get_dealerships_by_state))
        .route("/dealer/{id}", get(dealers::get_dealer_details))
        .route("/reviews/dealer/{id}", get(dealers::get_dealer_reviews))
        .route("/add_review", post(dealers::add_review))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/register", post(auth::register))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    // CORS with credentials so the session cookie travels
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    Router::new()
        .merge(build_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{DealerApi, SentimentApi};
    use crate::db::create_test_pool;
    use crate::db::repositories::{
        SqlxCarRepository, SqlxSessionRepository, SqlxUserRepository,
    };
    use crate::sentiment::SentimentLabel;
    use crate::services::{CarService, ReviewService, UserService};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// Dealer backend stub with canned payloads
    struct StubDealer {
        dealers: Option<Value>,
        reviews: Option<Value>,
        accept_posts: bool,
    }

    impl Default for StubDealer {
        fn default() -> Self {
            Self {
                dealers: Some(json!([
                    { "id": 1, "full_name": "Best Cars", "state": "CA" },
                    { "id": 2, "full_name": "Fast Autos", "state": "TX" },
                ])),
                reviews: Some(json!([
                    { "id": 10, "review": "I love this car", "dealership": 1 },
                    { "id": 11, "review": "I hate this dealer", "dealership": 1 },
                ])),
                accept_posts: true,
            }
        }
    }

    #[async_trait]
    impl DealerApi for StubDealer {
        async fn fetch_dealers(&self, _state: Option<&str>) -> Option<Value> {
            self.dealers.clone()
        }

        async fn fetch_dealer(&self, id: i64) -> Option<Value> {
            self.dealers.clone().and_then(|dealers| {
                dealers
                    .as_array()
                    .and_then(|list| {
                        list.iter()
                            .find(|d| d["id"] == json!(id))
                            .cloned()
                    })
            })
        }

        async fn fetch_reviews(&self, _dealer_id: i64) -> Option<Value> {
            self.reviews.clone()
        }

        async fn post_review(&self, payload: &Value) -> Option<Value> {
            if self.accept_posts {
                Some(json!({ "status": 200, "stored": payload }))
            } else {
                None
            }
        }
    }

    /// Sentiment stub classifying by a trivial keyword rule
    struct StubSentiment;

    #[async_trait]
    impl SentimentApi for StubSentiment {
        async fn analyze(&self, text: &str) -> SentimentLabel {
            if text.contains("love") {
                SentimentLabel::Positive
            } else if text.contains("hate") {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Neutral
            }
        }
    }

    async fn test_server_with(dealer: StubDealer) -> TestServer {
        let pool = create_test_pool().await.unwrap();

        let user_service = Arc::new(UserService::new(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool.clone()),
        ));
        let car_service = Arc::new(CarService::new(SqlxCarRepository::boxed(pool)));

        let dealer: Arc<dyn DealerApi> = Arc::new(dealer);
        let sentiment: Arc<dyn SentimentApi> = Arc::new(StubSentiment);
        let review_service = Arc::new(ReviewService::new(dealer.clone(), sentiment));

        let state = AppState {
            user_service,
            car_service,
            review_service,
            dealer,
        };

        let mut server =
            TestServer::new(build_router(state, "http://localhost:3000")).unwrap();
        server.save_cookies();
        server
    }

    async fn test_server() -> TestServer {
        test_server_with(StubDealer::default()).await
    }

    fn register_body(user_name: &str) -> Value {
        json!({
            "userName": user_name,
            "password": "pa55word",
            "firstName": "Test",
            "lastName": "User",
            "email": format!("{}@example.com", user_name),
        })
    }

    #[tokio::test]
    async fn test_get_cars_seeds_and_lists() {
        let server = test_server().await;

        let response = server.get("/get_cars").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = response.json();
        let cars = body["CarModels"].as_array().unwrap();
        assert_eq!(cars.len(), 15);
        assert!(cars
            .iter()
            .any(|c| c["CarModel"] == "Pathfinder" && c["CarMake"] == "NISSAN"));
    }

    #[tokio::test]
    async fn test_get_dealers_ok() {
        let server = test_server().await;

        let body: Value = server.get("/get_dealers").await.json();
        assert_eq!(body["status"], 200);
        assert_eq!(body["dealers"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_dealers_not_found_when_backend_empty() {
        let server = test_server_with(StubDealer {
            dealers: None,
            ..StubDealer::default()
        })
        .await;

        let body: Value = server.get("/get_dealers").await.json();
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "No dealerships found");
    }

    #[tokio::test]
    async fn test_get_dealer_by_id() {
        let server = test_server().await;

        let body: Value = server.get("/dealer/1").await.json();
        assert_eq!(body["status"], 200);
        assert_eq!(body["dealer"]["full_name"], "Best Cars");
    }

    #[tokio::test]
    async fn test_get_dealer_zero_id_is_bad_request() {
        let server = test_server().await;

        let body: Value = server.get("/dealer/0").await.json();
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_dealer_reviews_are_annotated() {
        let server = test_server().await;

        let body: Value = server.get("/reviews/dealer/1").await.json();
        assert_eq!(body["status"], 200);
        let reviews = body["reviews"].as_array().unwrap();
        assert_eq!(reviews[0]["sentiment"], "positive");
        assert_eq!(reviews[1]["sentiment"], "negative");
        // Original fields preserved
        assert_eq!(reviews[0]["dealership"], 1);
    }

    #[tokio::test]
    async fn test_dealer_reviews_empty_is_success() {
        let server = test_server_with(StubDealer {
            reviews: Some(json!([])),
            ..StubDealer::default()
        })
        .await;

        let body: Value = server.get("/reviews/dealer/1").await.json();
        assert_eq!(body["status"], 200);
        assert_eq!(body["reviews"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_add_review_unauthenticated_is_forbidden() {
        let server = test_server().await;

        let response = server
            .post("/add_review")
            .json(&json!({ "review": "Great!", "dealership": 1 }))
            .await;

        // Transport status stays 200; the body carries the outcome
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], 403);
    }

    #[tokio::test]
    async fn test_add_review_authenticated_stamps_name_and_date() {
        let server = test_server().await;

        server.post("/register").json(&register_body("reviewer")).await;

        let response = server
            .post("/add_review")
            .json(&json!({ "review": "Great!", "dealership": 1 }))
            .await;

        let body: Value = response.json();
        assert_eq!(body["status"], 200);
        assert_eq!(body["message"], "Review posted successfully");
    }

    #[tokio::test]
    async fn test_add_review_malformed_json_is_bad_request() {
        let server = test_server().await;
        server.post("/register").json(&register_body("writer")).await;

        let response = server
            .post("/add_review")
            .text("{not json")
            .content_type("application/json")
            .await;

        let body: Value = response.json();
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "Invalid JSON data");
    }

    #[tokio::test]
    async fn test_add_review_backend_failure_is_server_error_in_body() {
        let server = test_server_with(StubDealer {
            accept_posts: false,
            ..StubDealer::default()
        })
        .await;
        server.post("/register").json(&register_body("poster")).await;

        let response = server
            .post("/add_review")
            .json(&json!({ "review": "Fine" }))
            .await;

        let body: Value = response.json();
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let server = test_server().await;

        let response = server.post("/register").json(&register_body("alice")).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "Authenticated");
        assert_eq!(body["userName"], "alice");

        let response = server
            .post("/login")
            .json(&json!({ "userName": "alice", "password": "pa55word" }))
            .await;
        let body: Value = response.json();
        assert_eq!(body["status"], "Authenticated");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let server = test_server().await;

        server.post("/register").json(&register_body("bob")).await;
        let response = server.post("/register").json(&register_body("bob")).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["error"], "Already Registered");
        assert_eq!(body["userName"], "bob");
    }

    #[tokio::test]
    async fn test_login_bad_credentials_reports_failed_with_http_200() {
        let server = test_server().await;
        server.post("/register").json(&register_body("carol")).await;

        let response = server
            .post("/login")
            .json(&json!({ "userName": "carol", "password": "wrong" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "Failed");
        assert_eq!(body["userName"], "carol");
    }

    #[tokio::test]
    async fn test_logout_is_unconditional() {
        let server = test_server().await;

        // Without any session
        let body: Value = server.get("/logout").await.json();
        assert_eq!(body["status"], "Logged out");
        assert_eq!(body["userName"], "");

        // With a session: logout invalidates it for later submissions
        server.post("/register").json(&register_body("dave")).await;
        server.get("/logout").await;

        let body: Value = server
            .post("/add_review")
            .json(&json!({ "review": "Nice" }))
            .await
            .json();
        assert_eq!(body["status"], 403);
    }
}
