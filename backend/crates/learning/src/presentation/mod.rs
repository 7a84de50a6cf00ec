//! Presentation Layer - HTTP handlers and DTOs

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::LearningAppState;
pub use router::learning_router;
