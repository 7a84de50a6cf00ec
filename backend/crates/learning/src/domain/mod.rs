//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Course, Enrollment, Progress, Certificate)
//! - Domain value objects (CourseSlug, LessonId)
//! - Domain services (weekly unlock rule)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
