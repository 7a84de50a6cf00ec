//! Sign In Use Cases
//!
//! Email login and external-identity login. Both create the learner on
//! first contact and return a bearer token.

use std::sync::Arc;

use crate::application::resolve_identity::ResolveIdentityUseCase;
use crate::application::token::{IssuedToken, TokenService};
use crate::application::verifier::IdentityVerifier;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Sign in input
pub struct SignInInput {
    pub email: Email,
    /// Used only when the learner does not exist yet
    pub name_hint: Option<String>,
}

/// Sign in output
pub struct SignInOutput {
    pub email: Email,
    pub token: IssuedToken,
}

/// Email login use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let resolved = ResolveIdentityUseCase::new(self.user_repo.clone())
            .execute(&input.email, input.name_hint.as_deref())
            .await?;

        let token = self.tokens.issue(&resolved.user.email)?;

        tracing::info!(email = %resolved.user.email, "User signed in");

        Ok(SignInOutput {
            email: resolved.user.email,
            token,
        })
    }
}

/// External-identity login use case
pub struct ExternalSignInUseCase<U, V>
where
    U: UserRepository,
    V: IdentityVerifier,
{
    user_repo: Arc<U>,
    verifier: Arc<V>,
    tokens: Arc<TokenService>,
}

impl<U, V> ExternalSignInUseCase<U, V>
where
    U: UserRepository,
    V: IdentityVerifier,
{
    pub fn new(user_repo: Arc<U>, verifier: Arc<V>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            verifier,
            tokens,
        }
    }

    pub async fn execute(&self, assertion: &str) -> AuthResult<SignInOutput> {
        let email = self.verifier.verify(assertion).await?;

        let resolved = ResolveIdentityUseCase::new(self.user_repo.clone())
            .execute(&email, None)
            .await?;

        let token = self.tokens.issue(&resolved.user.email)?;

        tracing::info!(email = %resolved.user.email, "User signed in with external identity");

        Ok(SignInOutput {
            email: resolved.user.email,
            token,
        })
    }
}
