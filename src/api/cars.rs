//! Car listing API endpoint

use axum::{extract::State, Json};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{CarEntry, CarsResponse};

/// GET /get_cars - list all car models with their make's name.
///
/// The first call against an empty catalog seeds the reference data.
pub async fn get_cars(State(state): State<AppState>) -> Result<Json<CarsResponse>, ApiError> {
    let models = state
        .car_service
        .list_models()
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let car_models = models
        .into_iter()
        .map(|m| CarEntry {
            model: m.model_name,
            make: m.make_name,
        })
        .collect();

    Ok(Json(CarsResponse { car_models }))
}
