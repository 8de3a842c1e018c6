//! API middleware and shared handler plumbing
//!
//! Contains the shared application state, the JSON error envelope for
//! transport-level failures, and session-token extraction helpers.
//!
//! Most domain endpoints follow the legacy contract of encoding their
//! status inside an HTTP 200 body; `ApiError` is reserved for malformed
//! input and unexpected internal failures at the handler boundary.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::clients::DealerApi;
use crate::models::User;
use crate::services::{CarService, ReviewService, UserService};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub car_service: Arc<CarService>,
    pub review_service: Arc<ReviewService>,
    pub dealer: Arc<dyn DealerApi>,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Extract a session token from request headers.
///
/// The `Authorization: Bearer` header wins over the `session=` cookie.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    if let Some(cookie_header) = headers.get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie.strip_prefix("session=") {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Resolve the authenticated user behind a request, if any.
///
/// Anonymous requests and requests with stale or unknown tokens resolve to
/// `None`; lookup failures are logged and treated the same way.
pub async fn current_user(state: &AppState, headers: &HeaderMap) -> Option<User> {
    let token = extract_session_token(headers)?;

    match state.user_service.validate_session(&token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Session validation failed: {}", e);
            None
        }
    }
}
