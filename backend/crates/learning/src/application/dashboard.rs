//! Dashboard Use Case
//!
//! Read-only view of one learner's standing in one course plus the global
//! leaderboard. Missing records (or a missing store) fall back to defaults
//! instead of failing.

use auth::domain::repository::UserRepository;
use auth::domain::value_object::email::Email;
use std::sync::Arc;

use crate::application::config::LearningConfig;
use crate::domain::entities::LeaderboardEntry;
use crate::domain::repository::ProgressRepository;
use crate::domain::value_objects::{CourseSlug, LessonId};
use crate::error::LearningResult;

/// Name shown for an email with no user record
pub const FALLBACK_NAME: &str = "Learner";

/// Dashboard input
pub struct DashboardInput {
    pub email: Email,
    /// Falls back to the configured default course
    pub course_slug: Option<CourseSlug>,
}

#[derive(Debug, Clone)]
pub struct DashboardUser {
    pub name: String,
    pub email: Email,
    pub points: i64,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DashboardProgress {
    pub lessons_completed: Vec<LessonId>,
    pub week_unlocked: i32,
    pub xp: i64,
}

/// Dashboard view
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub user: DashboardUser,
    pub progress: DashboardProgress,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Dashboard use case
pub struct DashboardUseCase<U, P>
where
    U: UserRepository,
    P: ProgressRepository,
{
    user_repo: Option<Arc<U>>,
    progress_repo: Option<Arc<P>>,
    config: Arc<LearningConfig>,
}

impl<U, P> DashboardUseCase<U, P>
where
    U: UserRepository,
    P: ProgressRepository,
{
    pub fn new(
        user_repo: Option<Arc<U>>,
        progress_repo: Option<Arc<P>>,
        config: Arc<LearningConfig>,
    ) -> Self {
        Self {
            user_repo,
            progress_repo,
            config,
        }
    }

    pub async fn execute(&self, input: DashboardInput) -> LearningResult<DashboardView> {
        let course_slug = match input.course_slug {
            Some(slug) => slug,
            None => CourseSlug::new(self.config.default_course_slug.as_str())?,
        };

        let user = match &self.user_repo {
            Some(repo) => repo.find_by_email(&input.email).await?,
            None => None,
        };

        let (progress, leaderboard) = match &self.progress_repo {
            Some(repo) => (
                repo.find_progress(&input.email, &course_slug).await?,
                repo.top_by_xp(self.config.leaderboard_size).await?,
            ),
            None => (None, Vec::new()),
        };

        let progress_xp = progress.as_ref().map(|p| p.xp).unwrap_or(0);

        let user = match user {
            Some(user) => DashboardUser {
                name: user.name.into_db(),
                email: input.email,
                points: user.points,
                badges: user.badges,
            },
            None => DashboardUser {
                name: FALLBACK_NAME.to_string(),
                email: input.email,
                points: progress_xp,
                badges: Vec::new(),
            },
        };

        let progress = match progress {
            Some(p) => DashboardProgress {
                lessons_completed: p.lessons_completed,
                week_unlocked: p.week_unlocked,
                xp: p.xp,
            },
            None => DashboardProgress {
                lessons_completed: Vec::new(),
                week_unlocked: 1,
                xp: 0,
            },
        };

        Ok(DashboardView {
            user,
            progress,
            leaderboard,
        })
    }
}
