//! List Courses Use Case

use std::sync::Arc;

use crate::domain::entities::Course;
use crate::domain::repository::CourseRepository;
use crate::error::LearningResult;

/// List courses use case
pub struct ListCoursesUseCase<C>
where
    C: CourseRepository,
{
    course_repo: Option<Arc<C>>,
}

impl<C> ListCoursesUseCase<C>
where
    C: CourseRepository,
{
    pub fn new(course_repo: Option<Arc<C>>) -> Self {
        Self { course_repo }
    }

    /// The active catalog, or the built-in program when the catalog is
    /// empty or no store is configured
    pub async fn execute(&self) -> LearningResult<Vec<Course>> {
        let courses = match &self.course_repo {
            Some(repo) => repo.list_active_courses().await?,
            None => Vec::new(),
        };

        if courses.is_empty() {
            return Ok(vec![Course::default_program()]);
        }

        Ok(courses)
    }
}
