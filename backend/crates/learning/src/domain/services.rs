//! Domain Services
//!
//! Pure domain logic for weekly unlocks.

/// Lessons needed per additional unlocked week
pub const DEFAULT_LESSONS_PER_WEEK: usize = 4;

/// Last week of the program
pub const DEFAULT_MAX_WEEK: i32 = 3;

/// Maps a distinct completed-lesson count to the highest unlocked week.
///
/// `week = min(max_week, 1 + completed / lessons_per_week)`. Monotonic in
/// `completed`, never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockRule {
    pub lessons_per_week: usize,
    pub max_week: i32,
}

impl Default for UnlockRule {
    fn default() -> Self {
        Self {
            lessons_per_week: DEFAULT_LESSONS_PER_WEEK,
            max_week: DEFAULT_MAX_WEEK,
        }
    }
}

impl UnlockRule {
    pub fn new(lessons_per_week: usize, max_week: i32) -> Self {
        Self {
            lessons_per_week: lessons_per_week.max(1),
            max_week: max_week.max(1),
        }
    }

    pub fn week_for(&self, completed: usize) -> i32 {
        let earned = completed / self.lessons_per_week;
        let week = i32::try_from(earned).unwrap_or(i32::MAX).saturating_add(1);
        week.min(self.max_week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_boundaries() {
        let rule = UnlockRule::default();
        assert_eq!(rule.week_for(0), 1);
        assert_eq!(rule.week_for(3), 1);
        assert_eq!(rule.week_for(4), 2);
        assert_eq!(rule.week_for(7), 2);
        assert_eq!(rule.week_for(8), 3);
        assert_eq!(rule.week_for(9), 3);
        assert_eq!(rule.week_for(1_000), 3);
    }

    #[test]
    fn test_monotonic() {
        let rule = UnlockRule::default();
        let mut last = rule.week_for(0);
        for n in 1..64 {
            let week = rule.week_for(n);
            assert!(week >= last);
            last = week;
        }
    }

    #[test]
    fn test_new_clamps_degenerate_values() {
        let rule = UnlockRule::new(0, 0);
        assert_eq!(rule.lessons_per_week, 1);
        assert_eq!(rule.week_for(10), 1);
    }
}
