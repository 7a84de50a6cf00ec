//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod certificate;
pub mod complete_lesson;
pub mod config;
pub mod dashboard;
pub mod enroll;
pub mod list_courses;
