//! Car reference data models
//!
//! Car makes and models are seeded reference data: created once by the
//! population routine, read-only from the API's perspective.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earliest model year accepted for a car model
pub const MIN_MODEL_YEAR: i32 = 2015;

/// Latest model year accepted for a car model
pub const MAX_MODEL_YEAR: i32 = 2023;

/// A car manufacturer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarMake {
    /// Unique identifier
    pub id: i64,
    /// Manufacturer name
    pub name: String,
    /// Free-text description
    pub description: String,
}

/// A car model belonging to exactly one make
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarModel {
    /// Unique identifier
    pub id: i64,
    /// Owning make
    pub car_make_id: i64,
    /// Model name
    pub name: String,
    /// Body type
    pub body_type: BodyType,
    /// Model year, bounded to [MIN_MODEL_YEAR, MAX_MODEL_YEAR]
    pub year: i32,
}

impl CarModel {
    /// Validate the model's field invariants.
    ///
    /// The year must lie within the configured bounds. The body type is
    /// already constrained by the enum.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.year < MIN_MODEL_YEAR || self.year > MAX_MODEL_YEAR {
            anyhow::bail!(
                "Model year {} out of range [{}, {}]",
                self.year,
                MIN_MODEL_YEAR,
                MAX_MODEL_YEAR
            );
        }
        Ok(())
    }
}

/// A car model joined with its make's name, as returned by the listing API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarModelWithMake {
    /// Model name
    pub model_name: String,
    /// Make name
    pub make_name: String,
}

/// Car body type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BodyType {
    Sedan,
    Suv,
    Wagon,
    Coupe,
    Minivan,
    Truck,
    Convertible,
    Hatchback,
}

impl Default for BodyType {
    fn default() -> Self {
        Self::Sedan
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyType::Sedan => "SEDAN",
            BodyType::Suv => "SUV",
            BodyType::Wagon => "WAGON",
            BodyType::Coupe => "COUPE",
            BodyType::Minivan => "MINIVAN",
            BodyType::Truck => "TRUCK",
            BodyType::Convertible => "CONVERTIBLE",
            BodyType::Hatchback => "HATCHBACK",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for BodyType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SEDAN" => Ok(BodyType::Sedan),
            "SUV" => Ok(BodyType::Suv),
            "WAGON" => Ok(BodyType::Wagon),
            "COUPE" => Ok(BodyType::Coupe),
            "MINIVAN" => Ok(BodyType::Minivan),
            "TRUCK" => Ok(BodyType::Truck),
            "CONVERTIBLE" => Ok(BodyType::Convertible),
            "HATCHBACK" => Ok(BodyType::Hatchback),
            _ => Err(anyhow::anyhow!("Invalid body type: {}", s)),
        }
    }
}
