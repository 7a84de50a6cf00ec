//! In-Memory Repository Implementation
//!
//! Process-local store used by tests and by `ACADEMY_STORE=memory` runs.
//! Records are kept in insertion order, which is the leaderboard tie-break.

use auth::domain::value_object::email::Email;
use kernel::id::CertificateId;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{Certificate, Course, Enrollment, LeaderboardEntry, Progress};
use crate::domain::repository::{
    CertificateRepository, CourseRepository, EnrollmentRepository, ProgressRepository,
};
use crate::domain::services::UnlockRule;
use crate::domain::value_objects::{CourseSlug, LessonId};
use crate::error::LearningResult;

#[derive(Default)]
struct State {
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    progress: Vec<Progress>,
    certificates: Vec<Certificate>,
}

/// In-memory learning repository
#[derive(Clone, Default)]
pub struct InMemoryLearningRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryLearningRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a course catalog
    pub fn with_courses(courses: Vec<Course>) -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                courses,
                ..State::default()
            })),
        }
    }

    /// Number of enrollment records
    pub async fn enrollment_count(&self) -> usize {
        self.state.read().await.enrollments.len()
    }

    /// Number of progress records
    pub async fn progress_count(&self) -> usize {
        self.state.read().await.progress.len()
    }

    /// Number of certificate records
    pub async fn certificate_count(&self) -> usize {
        self.state.read().await.certificates.len()
    }
}

fn same_pair(
    email: &Email,
    slug: &CourseSlug,
    other_email: &Email,
    other_slug: &CourseSlug,
) -> bool {
    email == other_email && slug == other_slug
}

impl CourseRepository for InMemoryLearningRepository {
    async fn list_active_courses(&self) -> LearningResult<Vec<Course>> {
        let state = self.state.read().await;
        Ok(state.courses.iter().filter(|c| c.is_active).cloned().collect())
    }
}

impl EnrollmentRepository for InMemoryLearningRepository {
    async fn insert_enrollment_if_absent(&self, enrollment: &Enrollment) -> LearningResult<bool> {
        let mut state = self.state.write().await;
        let exists = state.enrollments.iter().any(|e| {
            same_pair(
                &e.user_email,
                &e.course_slug,
                &enrollment.user_email,
                &enrollment.course_slug,
            )
        });
        if exists {
            return Ok(false);
        }
        state.enrollments.push(enrollment.clone());
        Ok(true)
    }

    async fn find_enrollment(
        &self,
        email: &Email,
        slug: &CourseSlug,
    ) -> LearningResult<Option<Enrollment>> {
        let state = self.state.read().await;
        Ok(state
            .enrollments
            .iter()
            .find(|e| same_pair(&e.user_email, &e.course_slug, email, slug))
            .cloned())
    }
}

impl ProgressRepository for InMemoryLearningRepository {
    async fn insert_progress_if_absent(&self, progress: &Progress) -> LearningResult<bool> {
        let mut state = self.state.write().await;
        let exists = state.progress.iter().any(|p| {
            same_pair(
                &p.user_email,
                &p.course_slug,
                &progress.user_email,
                &progress.course_slug,
            )
        });
        if exists {
            return Ok(false);
        }
        state.progress.push(progress.clone());
        Ok(true)
    }

    async fn find_progress(
        &self,
        email: &Email,
        slug: &CourseSlug,
    ) -> LearningResult<Option<Progress>> {
        let state = self.state.read().await;
        Ok(state
            .progress
            .iter()
            .find(|p| same_pair(&p.user_email, &p.course_slug, email, slug))
            .cloned())
    }

    async fn record_completion(
        &self,
        email: &Email,
        slug: &CourseSlug,
        lesson: &LessonId,
        xp_reward: i64,
        rule: UnlockRule,
    ) -> LearningResult<Progress> {
        // One write guard covers lookup, mutation and store.
        let mut state = self.state.write().await;

        let index = match state
            .progress
            .iter()
            .position(|p| same_pair(&p.user_email, &p.course_slug, email, slug))
        {
            Some(index) => index,
            None => {
                state
                    .progress
                    .push(Progress::new(email.clone(), slug.clone()));
                state.progress.len() - 1
            }
        };

        let progress = &mut state.progress[index];
        progress.record_completion(lesson.clone(), xp_reward, &rule);
        Ok(progress.clone())
    }

    async fn top_by_xp(&self, limit: usize) -> LearningResult<Vec<LeaderboardEntry>> {
        let state = self.state.read().await;
        let mut entries: Vec<LeaderboardEntry> = state
            .progress
            .iter()
            .map(|p| LeaderboardEntry {
                user_email: p.user_email.clone(),
                xp: p.xp,
            })
            .collect();
        // Stable sort keeps insertion order among equal xp.
        entries.sort_by(|a, b| b.xp.cmp(&a.xp));
        entries.truncate(limit);
        Ok(entries)
    }
}

impl CertificateRepository for InMemoryLearningRepository {
    async fn upsert_certificate(&self, certificate: &Certificate) -> LearningResult<()> {
        let mut state = self.state.write().await;
        let existing = state.certificates.iter().position(|c| {
            same_pair(
                &c.user_email,
                &c.course_slug,
                &certificate.user_email,
                &certificate.course_slug,
            )
        });
        match existing {
            Some(index) => state.certificates[index] = certificate.clone(),
            None => state.certificates.push(certificate.clone()),
        }
        Ok(())
    }

    async fn find_certificate(
        &self,
        email: &Email,
        slug: &CourseSlug,
    ) -> LearningResult<Option<Certificate>> {
        let state = self.state.read().await;
        Ok(state
            .certificates
            .iter()
            .find(|c| same_pair(&c.user_email, &c.course_slug, email, slug))
            .cloned())
    }

    async fn find_certificate_by_id(
        &self,
        certificate_id: CertificateId,
    ) -> LearningResult<Option<Certificate>> {
        let state = self.state.read().await;
        Ok(state
            .certificates
            .iter()
            .find(|c| c.certificate_id == certificate_id)
            .cloned())
    }
}
