//! Domain Entities
//!
//! Core business entities for the learning domain. Every per-learner record
//! is keyed by `(user_email, course_slug)`.

use auth::domain::value_object::email::Email;
use chrono::{DateTime, Utc};
use kernel::id::CertificateId;
use serde::{Deserialize, Serialize};

use crate::domain::services::UnlockRule;
use crate::domain::value_objects::{CourseSlug, LessonId};

/// Slug of the built-in program served when the catalog is empty
pub const DEFAULT_COURSE_SLUG: &str = "3-week-ai";

/// Course entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub title: String,
    pub slug: CourseSlug,
    pub description: Option<String>,
    pub weeks: i32,
    pub tools: Vec<String>,
    pub is_active: bool,
}

impl Course {
    /// The built-in 3-week program
    pub fn default_program() -> Self {
        Self {
            title: "GetaiCertified 3-Week AI Program".to_string(),
            slug: CourseSlug::from_db(DEFAULT_COURSE_SLUG),
            description: Some(
                "Learn AI fundamentals, master 14+ tools, and ship a capstone.".to_string(),
            ),
            weeks: 3,
            tools: [
                "ChatGPT",
                "Midjourney",
                "Runway",
                "Notion AI",
                "Claude",
                "LangChain",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            is_active: true,
        }
    }
}

/// Enrollment lifecycle state. Only `Enrolled` is ever written today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Enrolled,
    Completed,
    Cancelled,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Enrolled => "enrolled",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "enrolled" => Some(EnrollmentStatus::Enrolled),
            "completed" => Some(EnrollmentStatus::Completed),
            "cancelled" => Some(EnrollmentStatus::Cancelled),
            _ => None,
        }
    }
}

/// Enrollment entity
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub user_email: Email,
    pub course_slug: CourseSlug,
    pub status: EnrollmentStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    /// A fresh enrollment, started now
    pub fn new(user_email: Email, course_slug: CourseSlug) -> Self {
        Self {
            user_email,
            course_slug,
            status: EnrollmentStatus::Enrolled,
            started_at: Some(Utc::now()),
            completed_at: None,
        }
    }
}

/// Progress entity
#[derive(Debug, Clone)]
pub struct Progress {
    pub user_email: Email,
    pub course_slug: CourseSlug,
    /// Distinct lessons in first-completion order
    pub lessons_completed: Vec<LessonId>,
    pub week_unlocked: i32,
    pub xp: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Progress {
    /// Empty progress: no lessons, week 1, no xp
    pub fn new(user_email: Email, course_slug: CourseSlug) -> Self {
        let now = Utc::now();
        Self {
            user_email,
            course_slug,
            lessons_completed: Vec::new(),
            week_unlocked: 1,
            xp: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a completed lesson and return the unlocked week.
    ///
    /// The lesson set only grows; xp is added on every call, including
    /// repeats of a lesson already in the set.
    pub fn record_completion(
        &mut self,
        lesson: LessonId,
        xp_reward: i64,
        rule: &UnlockRule,
    ) -> i32 {
        if !self.lessons_completed.contains(&lesson) {
            self.lessons_completed.push(lesson);
        }
        self.xp = self.xp.saturating_add(xp_reward);
        self.week_unlocked = rule
            .week_for(self.lessons_completed.len())
            .max(self.week_unlocked);
        self.updated_at = Utc::now();
        self.week_unlocked
    }
}

/// Certificate entity
#[derive(Debug, Clone)]
pub struct Certificate {
    pub certificate_id: CertificateId,
    pub user_email: Email,
    pub course_slug: CourseSlug,
    pub pdf_url: Option<String>,
    pub verified: bool,
    pub issued_at: DateTime<Utc>,
}

impl Certificate {
    /// A freshly issued, verified certificate with a new id
    pub fn issue(user_email: Email, course_slug: CourseSlug) -> Self {
        Self {
            certificate_id: CertificateId::new(),
            user_email,
            course_slug,
            pdf_url: None,
            verified: true,
            issued_at: Utc::now(),
        }
    }
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_email: Email,
    pub xp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress() -> Progress {
        Progress::new(
            Email::new("learner@example.com").unwrap(),
            CourseSlug::new(DEFAULT_COURSE_SLUG).unwrap(),
        )
    }

    fn lesson(id: &str) -> LessonId {
        LessonId::new(id).unwrap()
    }

    #[test]
    fn test_repeat_lesson_adds_xp_but_not_count() {
        let rule = UnlockRule::default();
        let mut p = progress();

        p.record_completion(lesson("a"), 10, &rule);
        p.record_completion(lesson("a"), 10, &rule);

        assert_eq!(p.lessons_completed.len(), 1);
        assert_eq!(p.xp, 20);
        assert_eq!(p.week_unlocked, 1);
    }

    #[test]
    fn test_completion_order_is_kept() {
        let rule = UnlockRule::default();
        let mut p = progress();
        for id in ["c", "a", "b", "a"] {
            p.record_completion(lesson(id), 0, &rule);
        }
        let ids: Vec<&str> = p.lessons_completed.iter().map(LessonId::as_str).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_default_program() {
        let course = Course::default_program();
        assert_eq!(course.slug.as_str(), "3-week-ai");
        assert_eq!(course.weeks, 3);
        assert_eq!(course.tools.len(), 6);
        assert!(course.is_active);
    }

    #[test]
    fn test_status_strings() {
        for status in [
            EnrollmentStatus::Enrolled,
            EnrollmentStatus::Completed,
            EnrollmentStatus::Cancelled,
        ] {
            assert_eq!(EnrollmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EnrollmentStatus::parse("paused"), None);
    }
}
