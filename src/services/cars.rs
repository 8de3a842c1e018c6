//! Car reference-data service
//!
//! Lists car models with their make names and owns the one-time seed of
//! reference data: the first listing against an empty make table populates
//! it with the standard catalog.

use crate::db::repositories::CarRepository;
use crate::models::{BodyType, CarMake, CarModel, CarModelWithMake};
use anyhow::Result;
use std::sync::Arc;

/// Car reference-data service
pub struct CarService {
    cars: Arc<dyn CarRepository>,
}

/// Seed catalog entry: make name, description, and its models
/// (name, body type, year).
const SEED_CATALOG: &[(&str, &str, &[(&str, BodyType, i32)])] = &[
    (
        "NISSAN",
        "Great cars. Japanese technology",
        &[
            ("Pathfinder", BodyType::Suv, 2023),
            ("Qashqai", BodyType::Suv, 2023),
            ("XTRAIL", BodyType::Suv, 2023),
        ],
    ),
    (
        "Mercedes",
        "Great cars. German technology",
        &[
            ("A-Class", BodyType::Suv, 2023),
            ("C-Class", BodyType::Suv, 2023),
            ("E-Class", BodyType::Suv, 2023),
        ],
    ),
    (
        "Audi",
        "Great cars. German technology",
        &[
            ("A4", BodyType::Suv, 2023),
            ("A5", BodyType::Suv, 2023),
            ("A6", BodyType::Suv, 2023),
        ],
    ),
    (
        "Kia",
        "Great cars. Korean technology",
        &[
            ("Sorrento", BodyType::Suv, 2023),
            ("Carnival", BodyType::Suv, 2023),
            ("Cerato", BodyType::Sedan, 2023),
        ],
    ),
    (
        "Toyota",
        "Great cars. Japanese technology",
        &[
            ("Corolla", BodyType::Sedan, 2023),
            ("Camry", BodyType::Sedan, 2023),
            ("Kluger", BodyType::Suv, 2023),
        ],
    ),
];

impl CarService {
    /// Create a new car service
    pub fn new(cars: Arc<dyn CarRepository>) -> Self {
        Self { cars }
    }

    /// List all car models with their make's name.
    ///
    /// Seeds the reference catalog first when the make table is empty.
    pub async fn list_models(&self) -> Result<Vec<CarModelWithMake>> {
        self.ensure_seeded().await?;
        self.cars.list_models_with_make().await
    }

    /// Populate the reference catalog when the make table is empty.
    pub async fn ensure_seeded(&self) -> Result<()> {
        if self.cars.count_makes().await? > 0 {
            return Ok(());
        }

        tracing::info!("Car catalog empty, seeding reference data");

        for (make_name, description, models) in SEED_CATALOG {
            let make = self
                .cars
                .insert_make(&CarMake {
                    id: 0,
                    name: make_name.to_string(),
                    description: description.to_string(),
                })
                .await?;

            for (model_name, body_type, year) in *models {
                self.cars
                    .insert_model(&CarModel {
                        id: 0,
                        car_make_id: make.id,
                        name: model_name.to_string(),
                        body_type: *body_type,
                        year: *year,
                    })
                    .await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::db::repositories::SqlxCarRepository;

    async fn service() -> CarService {
        let pool = create_test_pool().await.unwrap();
        CarService::new(SqlxCarRepository::boxed(pool))
    }

    #[tokio::test]
    async fn test_list_models_seeds_once() {
        let service = service().await;

        let models = service.list_models().await.unwrap();
        assert_eq!(models.len(), 15);
        assert!(models
            .iter()
            .any(|m| m.model_name == "Pathfinder" && m.make_name == "NISSAN"));

        // A second listing must not duplicate the catalog
        let models_again = service.list_models().await.unwrap();
        assert_eq!(models_again.len(), 15);
    }

    #[tokio::test]
    async fn test_seed_catalog_years_are_in_bounds() {
        for (_, _, models) in SEED_CATALOG {
            for (name, _, year) in *models {
                assert!(
                    (crate::models::MIN_MODEL_YEAR..=crate::models::MAX_MODEL_YEAR)
                        .contains(year),
                    "seed model {} has out-of-range year {}",
                    name,
                    year
                );
            }
        }
    }
}
