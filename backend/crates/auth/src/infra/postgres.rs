//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{display_name::DisplayName, email::Email, user_id::UserId};
use crate::error::AuthResult;

const USER_COLUMNS: &str = r#"
    user_id,
    name,
    email,
    avatar_url,
    referred_by,
    referral_code,
    points,
    badges,
    is_admin,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn insert_if_absent(&self, user: &User) -> AuthResult<(User, bool)> {
        let inserted = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                avatar_url,
                referred_by,
                referral_code,
                points,
                badges,
                is_admin,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(&user.avatar_url)
        .bind(&user.referred_by)
        .bind(&user.referral_code)
        .bind(user.points)
        .bind(&user.badges)
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = inserted {
            return Ok((row.into_user(), true));
        }

        // Lost the race (or the caller skipped the lookup): return the winner.
        let existing = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(user.email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok((existing.into_user(), false))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn ping(&self) -> AuthResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    avatar_url: Option<String>,
    referred_by: Option<String>,
    referral_code: Option<String>,
    points: i64,
    badges: Vec<String>,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            name: DisplayName::from_db(self.name),
            email: Email::from_db(self.email),
            avatar_url: self.avatar_url,
            referred_by: self.referred_by,
            referral_code: self.referral_code,
            points: self.points,
            badges: self.badges,
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
