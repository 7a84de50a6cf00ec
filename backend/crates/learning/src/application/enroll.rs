//! Enroll Use Case
//!
//! Ensures one enrollment and one progress record exist for the pair.

use auth::domain::value_object::email::Email;
use std::sync::Arc;

use crate::domain::entities::{Enrollment, Progress};
use crate::domain::repository::{EnrollmentRepository, ProgressRepository};
use crate::domain::value_objects::CourseSlug;
use crate::error::LearningResult;

/// Enroll input
pub struct EnrollInput {
    pub email: Email,
    pub course_slug: CourseSlug,
}

/// Enroll output
#[derive(Debug)]
pub struct EnrollOutput {
    pub enrollment_created: bool,
    pub progress_created: bool,
}

/// Enroll use case
pub struct EnrollUseCase<E, P>
where
    E: EnrollmentRepository,
    P: ProgressRepository,
{
    enrollment_repo: Arc<E>,
    progress_repo: Arc<P>,
}

impl<E, P> EnrollUseCase<E, P>
where
    E: EnrollmentRepository,
    P: ProgressRepository,
{
    pub fn new(enrollment_repo: Arc<E>, progress_repo: Arc<P>) -> Self {
        Self {
            enrollment_repo,
            progress_repo,
        }
    }

    /// Idempotent: records that already exist are left untouched
    pub async fn execute(&self, input: EnrollInput) -> LearningResult<EnrollOutput> {
        let enrollment_created = self
            .enrollment_repo
            .insert_enrollment_if_absent(&Enrollment::new(
                input.email.clone(),
                input.course_slug.clone(),
            ))
            .await?;

        let progress_created = self
            .progress_repo
            .insert_progress_if_absent(&Progress::new(
                input.email.clone(),
                input.course_slug.clone(),
            ))
            .await?;

        tracing::info!(
            email = %input.email,
            course = %input.course_slug,
            enrollment_created,
            progress_created,
            "Enrolled"
        );

        Ok(EnrollOutput {
            enrollment_created,
            progress_created,
        })
    }
}
