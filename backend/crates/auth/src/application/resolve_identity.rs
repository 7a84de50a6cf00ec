//! Resolve Identity Use Case
//!
//! Maps an email to its user record, creating the record on first contact.
//! Shared by signup, login and external sign-in.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{display_name::DisplayName, email::Email};
use crate::error::AuthResult;

/// Resolution output
#[derive(Debug, Clone)]
pub struct ResolvedIdentity {
    pub user: User,
    /// True when this call created the record
    pub created: bool,
}

/// Resolve-or-create use case
pub struct ResolveIdentityUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ResolveIdentityUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Look the email up; create a learner named after `name_hint` (or the
    /// title-cased local part) when absent. Existing records are returned
    /// untouched.
    pub async fn execute(
        &self,
        email: &Email,
        name_hint: Option<&str>,
    ) -> AuthResult<ResolvedIdentity> {
        if let Some(user) = self.user_repo.find_by_email(email).await? {
            return Ok(ResolvedIdentity {
                user,
                created: false,
            });
        }

        let name = DisplayName::from_hint_or_email(name_hint, email);
        let (user, created) = self
            .user_repo
            .insert_if_absent(&User::new(name, email.clone()))
            .await?;

        if created {
            tracing::info!(email = %user.email, name = %user.name, "User created");
        }

        Ok(ResolvedIdentity { user, created })
    }
}
