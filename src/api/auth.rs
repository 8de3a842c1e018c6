//! Authentication API endpoints
//!
//! - POST /login - authenticate and open a session
//! - GET /logout - close the current session unconditionally
//! - POST /register - create an identity and open a session
//!
//! Login reports both outcomes with HTTP 200; the `status` field in the
//! body distinguishes "Authenticated" from "Failed". Registration rejects
//! duplicates with an "Already Registered" error field.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::api::middleware::{extract_session_token, ApiError, AppState};
use crate::api::responses::{AlreadyRegisteredResponse, AuthStatusResponse};
use crate::services::{LoginInput, RegisterInput, UserServiceError};

/// Session cookie lifetime, aligned with the stored session expiry
const SESSION_COOKIE_MAX_AGE: i64 = 7 * 24 * 60 * 60;

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
}

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub password: String,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// POST /login - authenticate a user by username/password.
///
/// Success and failure both come back as HTTP 200; callers inspect the
/// body's `status`.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = LoginInput::new(body.user_name.clone(), body.password);

    match state.user_service.login(input).await {
        Ok(session) => {
            let headers = session_cookie_headers(&session.id);
            Ok((headers, Json(AuthStatusResponse::authenticated(body.user_name))).into_response())
        }
        Err(UserServiceError::AuthenticationError(_)) => {
            Ok(Json(AuthStatusResponse::failed(body.user_name)).into_response())
        }
        Err(e) => Err(ApiError::internal_error(e.to_string())),
    }
}

/// GET /logout - log out the current session unconditionally.
///
/// A request without a valid session still gets the logged-out response.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        if let Err(e) = state.user_service.logout(&token).await {
            tracing::warn!("Failed to delete session on logout: {}", e);
        }
    }

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_static("session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"),
    );

    (response_headers, Json(AuthStatusResponse::logged_out()))
}

/// POST /register - register a new identity.
///
/// Duplicates get the "Already Registered" error body; success opens a
/// session immediately.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = RegisterInput {
        username: body.user_name.clone(),
        password: body.password.clone(),
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
    };

    let user = match state.user_service.register(input).await {
        Ok(user) => user,
        Err(UserServiceError::UserExists(_)) => {
            return Ok(
                Json(AlreadyRegisteredResponse::new(body.user_name)).into_response()
            );
        }
        Err(UserServiceError::ValidationError(msg)) => {
            return Err(ApiError::validation_error(msg));
        }
        Err(e) => return Err(ApiError::internal_error(e.to_string())),
    };

    // Open a session for the fresh identity
    let session = state
        .user_service
        .login(LoginInput::new(user.username.as_str(), body.password.as_str()))
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let headers = session_cookie_headers(&session.id);
    Ok((headers, Json(AuthStatusResponse::authenticated(body.user_name))).into_response())
}

/// Build the Set-Cookie header for a fresh session
fn session_cookie_headers(session_id: &str) -> HeaderMap {
    let cookie = format!(
        "session={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        session_id, SESSION_COOKIE_MAX_AGE
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());
    headers
}
