//! Learning Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Courses, enrollments, progress, certificates, unlock rule
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers
//!
//! ## Invariants
//! - At most one enrollment, progress and certificate per `(email, course)`
//! - `week_unlocked` never decreases and never exceeds the last week
//! - A lesson completion is one atomic read-modify-write per pair
//! - Writes require a bearer token whose subject is the body's email

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LearningConfig;
pub use domain::repository::LearningStore;
pub use error::{LearningError, LearningResult};
pub use infra::{memory::InMemoryLearningRepository, postgres::PgLearningRepository};
pub use presentation::router::learning_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
