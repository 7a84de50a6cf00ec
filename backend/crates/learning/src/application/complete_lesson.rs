//! Complete Lesson Use Case

use auth::domain::value_object::email::Email;
use std::sync::Arc;

use crate::application::config::LearningConfig;
use crate::domain::repository::ProgressRepository;
use crate::domain::value_objects::{CourseSlug, LessonId};
use crate::error::{LearningError, LearningResult};

/// Complete lesson input
pub struct CompleteLessonInput {
    pub email: Email,
    pub course_slug: CourseSlug,
    pub lesson_id: LessonId,
    /// Falls back to the configured reward
    pub xp_reward: Option<i64>,
}

/// Complete lesson output
#[derive(Debug)]
pub struct CompleteLessonOutput {
    pub week_unlocked: i32,
    pub xp: i64,
    pub lessons_completed: usize,
}

/// Complete lesson use case
pub struct CompleteLessonUseCase<P>
where
    P: ProgressRepository,
{
    progress_repo: Arc<P>,
    config: Arc<LearningConfig>,
}

impl<P> CompleteLessonUseCase<P>
where
    P: ProgressRepository,
{
    pub fn new(progress_repo: Arc<P>, config: Arc<LearningConfig>) -> Self {
        Self {
            progress_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: CompleteLessonInput,
    ) -> LearningResult<CompleteLessonOutput> {
        let xp_reward = input.xp_reward.unwrap_or(self.config.default_xp_reward);
        if xp_reward < 0 {
            return Err(LearningError::Validation(
                "xp must not be negative".to_string(),
            ));
        }

        let progress = self
            .progress_repo
            .record_completion(
                &input.email,
                &input.course_slug,
                &input.lesson_id,
                xp_reward,
                self.config.unlock,
            )
            .await?;

        tracing::info!(
            email = %input.email,
            course = %input.course_slug,
            lesson = %input.lesson_id,
            xp = progress.xp,
            week_unlocked = progress.week_unlocked,
            "Lesson completed"
        );

        Ok(CompleteLessonOutput {
            week_unlocked: progress.week_unlocked,
            xp: progress.xp,
            lessons_completed: progress.lessons_completed.len(),
        })
    }
}
