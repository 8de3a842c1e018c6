//! Data models
//!
//! This module contains the locally-persisted entities of the DealerHub
//! platform: car reference data (makes and models), users and sessions.
//!
//! Dealers and reviews are owned by the external dealer backend and are
//! passed through as raw JSON (`serde_json::Value`) so that upstream fields
//! are preserved exactly; they have no local model.

mod car;
mod session;
mod user;

pub use car::{BodyType, CarMake, CarModel, CarModelWithMake, MAX_MODEL_YEAR, MIN_MODEL_YEAR};
pub use session::Session;
pub use user::User;
