//! Current User Use Case
//!
//! Turns a bearer token into the caller's user record.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Current user use case
pub struct CurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    /// Validate the token and load its subject. A valid token for an email
    /// with no user record is rejected like a bad token.
    pub async fn execute(&self, token: &str) -> AuthResult<User> {
        let email = self.tokens.validate(token)?;

        self.user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}
