//! Learning Router

use auth::application::TokenService;
use auth::domain::repository::UserRepository;
use auth::middleware::{AuthMiddlewareState, require_bearer};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::LearningConfig;
use crate::domain::repository::LearningStore;
use crate::presentation::handlers::{self, LearningAppState};

/// Create the learning router.
///
/// Public: `GET /courses`, `GET /dashboard`, `GET /certificate/{certificate_id}`.
/// Bearer-protected: `POST /enroll`, `POST /progress/complete`,
/// `POST /certificate`. Without a store the catalog and dashboard fall back
/// to defaults and every write answers 503.
pub fn learning_router<U, L>(
    users: Option<U>,
    store: Option<L>,
    tokens: Arc<TokenService>,
    config: LearningConfig,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LearningStore,
{
    let users = users.map(Arc::new);

    let state = LearningAppState {
        users: users.clone(),
        store: store.map(Arc::new),
        config: Arc::new(config),
    };

    let guard = AuthMiddlewareState {
        repo: users,
        tokens,
    };

    let protected = Router::new()
        .route("/enroll", post(handlers::enroll::<U, L>))
        .route("/progress/complete", post(handlers::complete_lesson::<U, L>))
        .route("/certificate", post(handlers::issue_certificate::<U, L>))
        .route_layer(from_fn_with_state(guard, require_bearer::<U>));

    Router::new()
        .route("/courses", get(handlers::list_courses::<U, L>))
        .route("/dashboard", get(handlers::dashboard::<U, L>))
        .route(
            "/certificate/{certificate_id}",
            get(handlers::verify_certificate::<U, L>),
        )
        .merge(protected)
        .with_state(state)
}
