//! Application Configuration
//!
//! Configuration for the learning application layer.

use crate::domain::entities::DEFAULT_COURSE_SLUG;
use crate::domain::services::UnlockRule;

/// Learning application configuration
#[derive(Debug, Clone)]
pub struct LearningConfig {
    /// Course used when a dashboard request names none
    pub default_course_slug: String,
    /// XP granted per completion when the request names none
    pub default_xp_reward: i64,
    /// Weekly unlock rule
    pub unlock: UnlockRule,
    /// Leaderboard length
    pub leaderboard_size: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            default_course_slug: DEFAULT_COURSE_SLUG.to_string(),
            default_xp_reward: 10,
            unlock: UnlockRule::default(),
            leaderboard_size: 10,
        }
    }
}
