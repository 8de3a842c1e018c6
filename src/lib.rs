//! DealerHub - a car dealership web platform
//!
//! This library provides the core functionality for the DealerHub platform:
//! the JSON web API, the clients for the external dealer backend and the
//! sentiment service, and the sentiment analysis microservice itself.

pub mod api;
pub mod clients;
pub mod config;
pub mod db;
pub mod models;
pub mod sentiment;
pub mod services;
