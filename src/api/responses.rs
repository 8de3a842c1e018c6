//! Shared API response types
//!
//! Typed renderings of the legacy wire contract. Field names (including
//! the camelCase identity fields) are part of that contract and must not
//! be normalized.

use serde::{Deserialize, Serialize};

/// Car model listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct CarsResponse {
    #[serde(rename = "CarModels")]
    pub car_models: Vec<CarEntry>,
}

/// One car model with its make's name
#[derive(Debug, Serialize, Deserialize)]
pub struct CarEntry {
    #[serde(rename = "CarModel")]
    pub model: String,
    #[serde(rename = "CarMake")]
    pub make: String,
}

/// Authentication outcome, returned with HTTP 200 in all cases;
/// callers inspect `status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub status: String,
}

impl AuthStatusResponse {
    pub fn authenticated(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            status: "Authenticated".to_string(),
        }
    }

    pub fn failed(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            status: "Failed".to_string(),
        }
    }

    pub fn logged_out() -> Self {
        Self {
            user_name: String::new(),
            status: "Logged out".to_string(),
        }
    }
}

/// Registration rejection for an already-taken username
#[derive(Debug, Serialize, Deserialize)]
pub struct AlreadyRegisteredResponse {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub error: String,
}

impl AlreadyRegisteredResponse {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            error: "Already Registered".to_string(),
        }
    }
}
