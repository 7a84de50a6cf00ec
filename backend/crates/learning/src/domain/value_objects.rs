//! Domain Value Objects
//!
//! Immutable value types for the learning domain.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum course slug length in characters
pub const COURSE_SLUG_MAX_LENGTH: usize = 100;

/// Maximum lesson id length in characters
pub const LESSON_ID_MAX_LENGTH: usize = 200;

/// Course slug - the natural key of a course
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseSlug(String);

impl CourseSlug {
    pub fn new(slug: impl Into<String>) -> AppResult<Self> {
        let slug = slug.into().trim().to_string();

        if slug.is_empty() {
            return Err(AppError::bad_request("Course slug cannot be empty"));
        }
        if slug.chars().count() > COURSE_SLUG_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Course slug must be at most {} characters",
                COURSE_SLUG_MAX_LENGTH
            )));
        }

        Ok(Self(slug))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CourseSlug {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        CourseSlug::new(value)
    }
}

impl From<CourseSlug> for String {
    fn from(slug: CourseSlug) -> Self {
        slug.0
    }
}

impl fmt::Display for CourseSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lesson identifier, opaque to the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonId(String);

impl LessonId {
    pub fn new(id: impl Into<String>) -> AppResult<Self> {
        let id = id.into().trim().to_string();

        if id.is_empty() {
            return Err(AppError::bad_request("Lesson id cannot be empty"));
        }
        if id.chars().count() > LESSON_ID_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Lesson id must be at most {} characters",
                LESSON_ID_MAX_LENGTH
            )));
        }

        Ok(Self(id))
    }

    pub fn from_db(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LessonId {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        LessonId::new(value)
    }
}

impl From<LessonId> for String {
    fn from(id: LessonId) -> Self {
        id.0
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_slug_trims() {
        assert_eq!(CourseSlug::new(" 3-week-ai ").unwrap().as_str(), "3-week-ai");
    }

    #[test]
    fn test_course_slug_rejects_empty_and_long() {
        assert!(CourseSlug::new("   ").is_err());
        assert!(CourseSlug::new("s".repeat(COURSE_SLUG_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_lesson_id_rejects_empty() {
        assert!(LessonId::new("").is_err());
        assert_eq!(LessonId::new("w1-l1").unwrap().to_string(), "w1-l1");
    }
}
