//! User Entity
//!
//! A learner account. Created on first contact (signup, login or external
//! sign-in) and never deleted. Resolution never overwrites name, points or
//! badges of an existing record.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{display_name::DisplayName, email::Email, user_id::UserId};

/// User entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: DisplayName,
    /// Login email (unique)
    pub email: Email,
    /// Profile image URL
    pub avatar_url: Option<String>,
    /// Referral code of the inviter
    pub referred_by: Option<String>,
    /// This user's own referral code
    pub referral_code: Option<String>,
    /// Gamified points, never negative
    pub points: i64,
    /// Earned badges, no duplicates, in award order
    pub badges: Vec<String>,
    /// Admin access flag
    pub is_admin: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new learner with zero points and no badges
    pub fn new(name: DisplayName, email: Email) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            name,
            email,
            avatar_url: None,
            referred_by: None,
            referral_code: None,
            points: 0,
            badges: Vec::new(),
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner() -> User {
        let email = Email::new("sam@example.com").unwrap();
        User::new(DisplayName::from_email(&email), email)
    }

    #[test]
    fn test_new_user_defaults() {
        let user = learner();
        assert_eq!(user.name.as_str(), "Sam");
        assert_eq!(user.points, 0);
        assert!(user.badges.is_empty());
        assert!(!user.is_admin);
        assert!(user.avatar_url.is_none());
    }
}
