//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryLearningRepository;
pub use postgres::PgLearningRepository;
