//! Auth Middleware
//!
//! Bearer-token guard for protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::{CurrentUserUseCase, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Option<Arc<R>>,
    pub tokens: Arc<TokenService>,
}

/// The authenticated caller, stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn email(&self) -> &Email {
        &self.0.email
    }

    /// Fail with `Forbidden` unless the caller is `target`
    pub fn ensure_is(&self, target: &Email) -> AuthResult<()> {
        if self.email() != target {
            tracing::warn!(caller = %self.email(), target = %target, "Email mismatch");
            return Err(AuthError::EmailMismatch);
        }
        Ok(())
    }
}

/// Middleware that requires a valid bearer token for an existing user
pub async fn require_bearer<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = platform::bearer::extract_bearer(req.headers())?.to_string();

    let repo = state.repo.clone().ok_or(AuthError::NotConfigured)?;
    let user = CurrentUserUseCase::new(repo, state.tokens.clone())
        .execute(&token)
        .await?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
