//! API DTOs (Data Transfer Objects)
//!
//! Field names are snake_case to match the existing web client.

use serde::{Deserialize, Serialize};

use crate::application::dashboard::DashboardView;
use crate::domain::entities::{Certificate, Course, LeaderboardEntry};
use crate::domain::value_objects::LessonId;

// ============================================================================
// Requests
// ============================================================================

/// POST /enroll body
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollRequest {
    pub email: String,
    pub course_slug: String,
}

/// POST /progress/complete body
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteLessonRequest {
    pub email: String,
    pub course_slug: String,
    pub lesson_id: String,
    /// XP for this completion; the configured reward when absent
    #[serde(default)]
    pub xp: Option<i64>,
}

/// POST /certificate body
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateRequest {
    pub email: String,
    pub course_slug: String,
}

/// GET /dashboard query
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardQuery {
    pub email: String,
    pub course_slug: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteLessonResponse {
    pub ok: bool,
    pub week_unlocked: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CertificateIdResponse {
    pub certificate_id: String,
}

/// Course as listed in the catalog
#[derive(Debug, Clone, Serialize)]
pub struct CourseResponse {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub weeks: i32,
    pub tools: Vec<String>,
    pub is_active: bool,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            title: course.title,
            slug: course.slug.into(),
            description: course.description,
            weeks: course.weeks,
            tools: course.tools,
            is_active: course.is_active,
        }
    }
}

/// Public certificate record
#[derive(Debug, Clone, Serialize)]
pub struct CertificateResponse {
    pub certificate_id: String,
    pub user_email: String,
    pub course_slug: String,
    pub pdf_url: Option<String>,
    pub verified: bool,
    pub issued_at: chrono::DateTime<chrono::Utc>,
}

impl From<Certificate> for CertificateResponse {
    fn from(c: Certificate) -> Self {
        Self {
            certificate_id: c.certificate_id.to_string(),
            user_email: c.user_email.into(),
            course_slug: c.course_slug.into(),
            pdf_url: c.pdf_url,
            verified: c.verified,
            issued_at: c.issued_at,
        }
    }
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardUserResponse {
    pub name: String,
    pub email: String,
    pub points: i64,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardProgressResponse {
    pub lessons_completed: Vec<String>,
    pub week_unlocked: i32,
    pub xp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntryResponse {
    pub user_email: String,
    pub xp: i64,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            user_email: entry.user_email.into(),
            xp: entry.xp,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub user: DashboardUserResponse,
    pub progress: DashboardProgressResponse,
    pub leaderboard: Vec<LeaderboardEntryResponse>,
}

impl From<DashboardView> for DashboardResponse {
    fn from(view: DashboardView) -> Self {
        Self {
            user: DashboardUserResponse {
                name: view.user.name,
                email: view.user.email.into(),
                points: view.user.points,
                badges: view.user.badges,
            },
            progress: DashboardProgressResponse {
                lessons_completed: view
                    .progress
                    .lessons_completed
                    .into_iter()
                    .map(String::from)
                    .collect(),
                week_unlocked: view.progress.week_unlocked,
                xp: view.progress.xp,
            },
            leaderboard: view.leaderboard.into_iter().map(Into::into).collect(),
        }
    }
}
