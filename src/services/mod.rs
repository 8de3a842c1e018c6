//! Business logic services
//!
//! Services sit between the HTTP handlers and the repositories/clients:
//! - `UserService` - registration, login, session validation
//! - `CarService` - car reference data listing and seeding
//! - `ReviewService` - review fetching, sentiment annotation, submission
//! - `password` - argon2 password hashing

pub mod cars;
pub mod password;
pub mod reviews;
pub mod user;

pub use cars::CarService;
pub use reviews::{ReviewService, ReviewServiceError};
pub use user::{LoginInput, RegisterInput, UserService, UserServiceError};
