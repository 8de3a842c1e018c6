//! Car reference-data repository
//!
//! Database operations for car makes and models.
//!
//! This module provides:
//! - `CarRepository` trait defining the interface for car data access
//! - `SqlxCarRepository` implementing the trait for SQLite and MySQL

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{CarMake, CarModel, CarModelWithMake};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Car repository trait
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Count car makes
    async fn count_makes(&self) -> Result<i64>;

    /// Insert a car make, returning it with its assigned id
    async fn insert_make(&self, make: &CarMake) -> Result<CarMake>;

    /// Insert a car model, returning it with its assigned id
    async fn insert_model(&self, model: &CarModel) -> Result<CarModel>;

    /// List all car models joined with their make's name
    async fn list_models_with_make(&self) -> Result<Vec<CarModelWithMake>>;
}

/// SQLx-based car repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxCarRepository {
    pool: DynDatabasePool,
}

impl SqlxCarRepository {
    /// Create a new SQLx car repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn CarRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CarRepository for SqlxCarRepository {
    async fn count_makes(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => count_makes_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => count_makes_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn insert_make(&self, make: &CarMake) -> Result<CarMake> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => insert_make_sqlite(self.pool.as_sqlite().unwrap(), make).await,
            DatabaseDriver::Mysql => insert_make_mysql(self.pool.as_mysql().unwrap(), make).await,
        }
    }

    async fn insert_model(&self, model: &CarModel) -> Result<CarModel> {
        // Field invariants are enforced here, on the single write path
        model.validate()?;
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                insert_model_sqlite(self.pool.as_sqlite().unwrap(), model).await
            }
            DatabaseDriver::Mysql => insert_model_mysql(self.pool.as_mysql().unwrap(), model).await,
        }
    }

    async fn list_models_with_make(&self) -> Result<Vec<CarModelWithMake>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_models_with_make_sqlite(self.pool.as_sqlite().unwrap()).await
            }
            DatabaseDriver::Mysql => {
                list_models_with_make_mysql(self.pool.as_mysql().unwrap()).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn count_makes_sqlite(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM car_makes")
        .fetch_one(pool)
        .await
        .context("Failed to count car makes")?;
    Ok(count)
}

async fn insert_make_sqlite(pool: &SqlitePool, make: &CarMake) -> Result<CarMake> {
    let result = sqlx::query("INSERT INTO car_makes (name, description) VALUES (?, ?)")
        .bind(&make.name)
        .bind(&make.description)
        .execute(pool)
        .await
        .context("Failed to insert car make")?;

    Ok(CarMake {
        id: result.last_insert_rowid(),
        name: make.name.clone(),
        description: make.description.clone(),
    })
}

async fn insert_model_sqlite(pool: &SqlitePool, model: &CarModel) -> Result<CarModel> {
    let result = sqlx::query(
        r#"
        INSERT INTO car_models (car_make_id, name, body_type, year)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(model.car_make_id)
    .bind(&model.name)
    .bind(model.body_type.to_string())
    .bind(model.year)
    .execute(pool)
    .await
    .context("Failed to insert car model")?;

    Ok(CarModel {
        id: result.last_insert_rowid(),
        ..model.clone()
    })
}

async fn list_models_with_make_sqlite(pool: &SqlitePool) -> Result<Vec<CarModelWithMake>> {
    let rows = sqlx::query(
        r#"
        SELECT car_models.name AS model_name, car_makes.name AS make_name
        FROM car_models
        JOIN car_makes ON car_makes.id = car_models.car_make_id
        ORDER BY car_models.id
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to list car models")?;

    Ok(rows
        .into_iter()
        .map(|row| CarModelWithMake {
            model_name: row.get("model_name"),
            make_name: row.get("make_name"),
        })
        .collect())
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn count_makes_mysql(pool: &MySqlPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM car_makes")
        .fetch_one(pool)
        .await
        .context("Failed to count car makes")?;
    Ok(count)
}

async fn insert_make_mysql(pool: &MySqlPool, make: &CarMake) -> Result<CarMake> {
    let result = sqlx::query("INSERT INTO car_makes (name, description) VALUES (?, ?)")
        .bind(&make.name)
        .bind(&make.description)
        .execute(pool)
        .await
        .context("Failed to insert car make")?;

    Ok(CarMake {
        id: result.last_insert_id() as i64,
        name: make.name.clone(),
        description: make.description.clone(),
    })
}

async fn insert_model_mysql(pool: &MySqlPool, model: &CarModel) -> Result<CarModel> {
    let result = sqlx::query(
        r#"
        INSERT INTO car_models (car_make_id, name, body_type, year)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(model.car_make_id)
    .bind(&model.name)
    .bind(model.body_type.to_string())
    .bind(model.year)
    .execute(pool)
    .await
    .context("Failed to insert car model")?;

    Ok(CarModel {
        id: result.last_insert_id() as i64,
        ..model.clone()
    })
}

async fn list_models_with_make_mysql(pool: &MySqlPool) -> Result<Vec<CarModelWithMake>> {
    let rows = sqlx::query(
        r#"
        SELECT car_models.name AS model_name, car_makes.name AS make_name
        FROM car_models
        JOIN car_makes ON car_makes.id = car_models.car_make_id
        ORDER BY car_models.id
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to list car models")?;

    Ok(rows
        .into_iter()
        .map(|row| CarModelWithMake {
            model_name: row.get("model_name"),
            make_name: row.get("make_name"),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::models::BodyType;

    #[tokio::test]
    async fn test_insert_and_list_models_with_make() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqlxCarRepository::new(pool);

        assert_eq!(repo.count_makes().await.unwrap(), 0);

        let make = repo
            .insert_make(&CarMake {
                id: 0,
                name: "Nissan".to_string(),
                description: "Japanese manufacturer".to_string(),
            })
            .await
            .unwrap();
        assert!(make.id > 0);

        repo.insert_model(&CarModel {
            id: 0,
            car_make_id: make.id,
            name: "Pathfinder".to_string(),
            body_type: BodyType::Suv,
            year: 2019,
        })
        .await
        .unwrap();

        let listed = repo.list_models_with_make().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].model_name, "Pathfinder");
        assert_eq!(listed[0].make_name, "Nissan");
    }

    #[tokio::test]
    async fn test_insert_model_rejects_out_of_range_year() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqlxCarRepository::new(pool);

        let make = repo
            .insert_make(&CarMake {
                id: 0,
                name: "Audi".to_string(),
                description: "German manufacturer".to_string(),
            })
            .await
            .unwrap();

        let result = repo
            .insert_model(&CarModel {
                id: 0,
                car_make_id: make.id,
                name: "A4".to_string(),
                body_type: BodyType::Sedan,
                year: 2010,
            })
            .await;
        assert!(result.is_err());
    }
}
