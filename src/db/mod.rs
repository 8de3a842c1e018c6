//! Database layer
//!
//! Persistence for the locally-owned entities (users, sessions, car
//! reference data). Dealers and reviews live in the external dealer backend
//! and never touch this layer.
//!
//! The layer is built around a trait-based abstraction (`DatabasePool`)
//! that lets the application run against SQLite (default, single-binary
//! deployment) or MySQL without knowing the specific backend.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};
