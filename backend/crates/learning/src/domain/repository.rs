//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use auth::domain::value_object::email::Email;
use kernel::id::CertificateId;

use crate::domain::entities::{Certificate, Course, Enrollment, LeaderboardEntry, Progress};
use crate::domain::services::UnlockRule;
use crate::domain::value_objects::{CourseSlug, LessonId};
use crate::error::LearningResult;

/// Course catalog repository trait
#[trait_variant::make(CourseRepository: Send)]
pub trait LocalCourseRepository {
    /// Active courses in catalog order
    async fn list_active_courses(&self) -> LearningResult<Vec<Course>>;
}

/// Enrollment repository trait
#[trait_variant::make(EnrollmentRepository: Send)]
pub trait LocalEnrollmentRepository {
    /// Store the enrollment unless one exists for its pair.
    /// Returns true if this call created it.
    async fn insert_enrollment_if_absent(&self, enrollment: &Enrollment) -> LearningResult<bool>;

    async fn find_enrollment(
        &self,
        email: &Email,
        slug: &CourseSlug,
    ) -> LearningResult<Option<Enrollment>>;
}

/// Progress repository trait
#[trait_variant::make(ProgressRepository: Send)]
pub trait LocalProgressRepository {
    /// Store the progress unless one exists for its pair.
    /// Returns true if this call created it.
    async fn insert_progress_if_absent(&self, progress: &Progress) -> LearningResult<bool>;

    async fn find_progress(
        &self,
        email: &Email,
        slug: &CourseSlug,
    ) -> LearningResult<Option<Progress>>;

    /// Create-if-absent, apply [`Progress::record_completion`] and persist,
    /// as one atomic step per pair. Returns the updated progress.
    async fn record_completion(
        &self,
        email: &Email,
        slug: &CourseSlug,
        lesson: &LessonId,
        xp_reward: i64,
        rule: UnlockRule,
    ) -> LearningResult<Progress>;

    /// Highest xp first across every course, ties in insertion order
    async fn top_by_xp(&self, limit: usize) -> LearningResult<Vec<LeaderboardEntry>>;
}

/// Certificate repository trait
#[trait_variant::make(CertificateRepository: Send)]
pub trait LocalCertificateRepository {
    /// Insert, or replace the certificate held for the same pair
    async fn upsert_certificate(&self, certificate: &Certificate) -> LearningResult<()>;

    async fn find_certificate(
        &self,
        email: &Email,
        slug: &CourseSlug,
    ) -> LearningResult<Option<Certificate>>;

    async fn find_certificate_by_id(
        &self,
        certificate_id: CertificateId,
    ) -> LearningResult<Option<Certificate>>;
}

/// Every learning collection behind one handle
pub trait LearningStore:
    CourseRepository
    + EnrollmentRepository
    + ProgressRepository
    + CertificateRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> LearningStore for T where
    T: CourseRepository
        + EnrollmentRepository
        + ProgressRepository
        + CertificateRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
