//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::{IdentityVerifier, TokenService};
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_bearer};

/// Create the Auth router.
///
/// Routes (relative to the mount point, normally `/api`):
/// `POST /auth/signup`, `POST /auth/login`, `POST /auth/google`, `GET /me`.
/// `repo = None` runs without a store: every route answers 503.
pub fn auth_router<R, V>(repo: Option<R>, tokens: Arc<TokenService>, verifier: V) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    let repo = repo.map(Arc::new);

    let state = AuthAppState {
        repo: repo.clone(),
        tokens: tokens.clone(),
        verifier: Arc::new(verifier),
    };

    let guard = AuthMiddlewareState { repo, tokens };

    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(from_fn_with_state(guard, require_bearer::<R>));

    Router::new()
        .route("/auth/signup", post(handlers::sign_up::<R, V>))
        .route("/auth/login", post(handlers::login::<R, V>))
        .route("/auth/google", post(handlers::google_auth::<R, V>))
        .with_state(state)
        .merge(protected)
}
