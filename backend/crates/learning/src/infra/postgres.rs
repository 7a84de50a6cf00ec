//! PostgreSQL Repository Implementations

use auth::domain::value_object::email::Email;
use chrono::{DateTime, Utc};
use kernel::id::CertificateId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{
    Certificate, Course, Enrollment, EnrollmentStatus, LeaderboardEntry, Progress,
};
use crate::domain::repository::{
    CertificateRepository, CourseRepository, EnrollmentRepository, ProgressRepository,
};
use crate::domain::services::UnlockRule;
use crate::domain::value_objects::{CourseSlug, LessonId};
use crate::error::{LearningError, LearningResult};

const PROGRESS_COLUMNS: &str = r#"
    user_email,
    course_slug,
    lessons_completed,
    week_unlocked,
    xp,
    created_at,
    updated_at
"#;

const CERTIFICATE_COLUMNS: &str = r#"
    certificate_id,
    user_email,
    course_slug,
    pdf_url,
    verified,
    issued_at
"#;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgLearningRepository {
    pool: PgPool,
}

impl PgLearningRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CourseRepository for PgLearningRepository {
    async fn list_active_courses(&self) -> LearningResult<Vec<Course>> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT title, slug, description, weeks, tools, is_active
            FROM courses
            WHERE is_active
            ORDER BY course_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CourseRow::into_course).collect())
    }
}

impl EnrollmentRepository for PgLearningRepository {
    async fn insert_enrollment_if_absent(&self, enrollment: &Enrollment) -> LearningResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO enrollments (
                user_email,
                course_slug,
                status,
                started_at,
                completed_at
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_email, course_slug) DO NOTHING
            "#,
        )
        .bind(enrollment.user_email.as_str())
        .bind(enrollment.course_slug.as_str())
        .bind(enrollment.status.as_str())
        .bind(enrollment.started_at)
        .bind(enrollment.completed_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_enrollment(
        &self,
        email: &Email,
        slug: &CourseSlug,
    ) -> LearningResult<Option<Enrollment>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT user_email, course_slug, status, started_at, completed_at
            FROM enrollments
            WHERE user_email = $1 AND course_slug = $2
            "#,
        )
        .bind(email.as_str())
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(EnrollmentRow::into_enrollment).transpose()
    }
}

impl ProgressRepository for PgLearningRepository {
    async fn insert_progress_if_absent(&self, progress: &Progress) -> LearningResult<bool> {
        let lessons = lesson_strings(&progress.lessons_completed);

        let result = sqlx::query(
            r#"
            INSERT INTO progress (
                user_email,
                course_slug,
                lessons_completed,
                week_unlocked,
                xp,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_email, course_slug) DO NOTHING
            "#,
        )
        .bind(progress.user_email.as_str())
        .bind(progress.course_slug.as_str())
        .bind(&lessons)
        .bind(progress.week_unlocked)
        .bind(progress.xp)
        .bind(progress.created_at)
        .bind(progress.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_progress(
        &self,
        email: &Email,
        slug: &CourseSlug,
    ) -> LearningResult<Option<Progress>> {
        let row = sqlx::query_as::<_, ProgressRow>(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress WHERE user_email = $1 AND course_slug = $2"
        ))
        .bind(email.as_str())
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProgressRow::into_progress))
    }

    async fn record_completion(
        &self,
        email: &Email,
        slug: &CourseSlug,
        lesson: &LessonId,
        xp_reward: i64,
        rule: UnlockRule,
    ) -> LearningResult<Progress> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO progress (user_email, course_slug)
            VALUES ($1, $2)
            ON CONFLICT (user_email, course_slug) DO NOTHING
            "#,
        )
        .bind(email.as_str())
        .bind(slug.as_str())
        .execute(&mut *tx)
        .await?;

        // Row lock serializes concurrent completions for the pair.
        let row = sqlx::query_as::<_, ProgressRow>(&format!(
            r#"
            SELECT {PROGRESS_COLUMNS}
            FROM progress
            WHERE user_email = $1 AND course_slug = $2
            FOR UPDATE
            "#
        ))
        .bind(email.as_str())
        .bind(slug.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let mut progress = row.into_progress();
        progress.record_completion(lesson.clone(), xp_reward, &rule);

        let lessons = lesson_strings(&progress.lessons_completed);

        sqlx::query(
            r#"
            UPDATE progress
            SET lessons_completed = $3,
                week_unlocked = $4,
                xp = $5,
                updated_at = $6
            WHERE user_email = $1 AND course_slug = $2
            "#,
        )
        .bind(email.as_str())
        .bind(slug.as_str())
        .bind(&lessons)
        .bind(progress.week_unlocked)
        .bind(progress.xp)
        .bind(progress.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(progress)
    }

    async fn top_by_xp(&self, limit: usize) -> LearningResult<Vec<LeaderboardEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"
            SELECT user_email, xp
            FROM progress
            ORDER BY xp DESC, progress_id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LeaderboardEntry {
                user_email: Email::from_db(r.user_email),
                xp: r.xp,
            })
            .collect())
    }
}

impl CertificateRepository for PgLearningRepository {
    async fn upsert_certificate(&self, certificate: &Certificate) -> LearningResult<()> {
        sqlx::query(
            r#"
            INSERT INTO certificates (
                certificate_id,
                user_email,
                course_slug,
                pdf_url,
                verified,
                issued_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_email, course_slug) DO UPDATE
            SET certificate_id = EXCLUDED.certificate_id,
                pdf_url = EXCLUDED.pdf_url,
                verified = EXCLUDED.verified,
                issued_at = EXCLUDED.issued_at
            "#,
        )
        .bind(certificate.certificate_id.as_uuid())
        .bind(certificate.user_email.as_str())
        .bind(certificate.course_slug.as_str())
        .bind(&certificate.pdf_url)
        .bind(certificate.verified)
        .bind(certificate.issued_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_certificate(
        &self,
        email: &Email,
        slug: &CourseSlug,
    ) -> LearningResult<Option<Certificate>> {
        let row = sqlx::query_as::<_, CertificateRow>(&format!(
            r#"
            SELECT {CERTIFICATE_COLUMNS}
            FROM certificates
            WHERE user_email = $1 AND course_slug = $2
            "#
        ))
        .bind(email.as_str())
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CertificateRow::into_certificate))
    }

    async fn find_certificate_by_id(
        &self,
        certificate_id: CertificateId,
    ) -> LearningResult<Option<Certificate>> {
        let row = sqlx::query_as::<_, CertificateRow>(&format!(
            "SELECT {CERTIFICATE_COLUMNS} FROM certificates WHERE certificate_id = $1"
        ))
        .bind(certificate_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CertificateRow::into_certificate))
    }
}

fn lesson_strings(lessons: &[LessonId]) -> Vec<String> {
    lessons.iter().map(|l| l.as_str().to_string()).collect()
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CourseRow {
    title: String,
    slug: String,
    description: Option<String>,
    weeks: i32,
    tools: Vec<String>,
    is_active: bool,
}

impl CourseRow {
    fn into_course(self) -> Course {
        Course {
            title: self.title,
            slug: CourseSlug::from_db(self.slug),
            description: self.description,
            weeks: self.weeks,
            tools: self.tools,
            is_active: self.is_active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    user_email: String,
    course_slug: String,
    status: String,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl EnrollmentRow {
    fn into_enrollment(self) -> LearningResult<Enrollment> {
        let status = EnrollmentStatus::parse(&self.status).ok_or_else(|| {
            LearningError::Internal(format!("Unknown enrollment status: {}", self.status))
        })?;

        Ok(Enrollment {
            user_email: Email::from_db(self.user_email),
            course_slug: CourseSlug::from_db(self.course_slug),
            status,
            started_at: self.started_at,
            completed_at: self.completed_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProgressRow {
    user_email: String,
    course_slug: String,
    lessons_completed: Vec<String>,
    week_unlocked: i32,
    xp: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProgressRow {
    fn into_progress(self) -> Progress {
        Progress {
            user_email: Email::from_db(self.user_email),
            course_slug: CourseSlug::from_db(self.course_slug),
            lessons_completed: self
                .lessons_completed
                .into_iter()
                .map(LessonId::from_db)
                .collect(),
            week_unlocked: self.week_unlocked,
            xp: self.xp,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LeaderboardRow {
    user_email: String,
    xp: i64,
}

#[derive(sqlx::FromRow)]
struct CertificateRow {
    certificate_id: Uuid,
    user_email: String,
    course_slug: String,
    pdf_url: Option<String>,
    verified: bool,
    issued_at: DateTime<Utc>,
}

impl CertificateRow {
    fn into_certificate(self) -> Certificate {
        Certificate {
            certificate_id: CertificateId::from_uuid(self.certificate_id),
            user_email: Email::from_db(self.user_email),
            course_slug: CourseSlug::from_db(self.course_slug),
            pdf_url: self.pdf_url,
            verified: self.verified,
            issued_at: self.issued_at,
        }
    }
}
