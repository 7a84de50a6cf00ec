//! Sign Up Use Case
//!
//! Registers a learner (or returns the existing one) and issues a token.

use std::sync::Arc;

use crate::application::resolve_identity::ResolveIdentityUseCase;
use crate::application::token::{IssuedToken, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{display_name::DisplayName, email::Email};
use crate::error::AuthResult;

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: Email,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    pub created: bool,
    pub token: IssuedToken,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // The name only matters when the learner is new.
        let name = match DisplayName::new(input.name) {
            Ok(name) => Some(name),
            Err(err) => match self.user_repo.find_by_email(&input.email).await? {
                Some(_) => None,
                None => return Err(err.into()),
            },
        };

        let resolved = ResolveIdentityUseCase::new(self.user_repo.clone())
            .execute(&input.email, name.as_ref().map(DisplayName::as_str))
            .await?;

        let token = self.tokens.issue(&resolved.user.email)?;

        tracing::info!(
            email = %resolved.user.email,
            created = resolved.created,
            "User signed up"
        );

        Ok(SignUpOutput {
            user: resolved.user,
            created: resolved.created,
            token,
        })
    }
}
