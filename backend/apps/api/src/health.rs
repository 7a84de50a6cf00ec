//! Service root and health routes

use auth::PgUserRepository;
use auth::domain::repository::UserRepository;
use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    /// Present only when Postgres backs the service
    pub database: Option<PgUserRepository>,
    /// Store label reported to clients
    pub store: &'static str,
}

#[derive(Serialize)]
pub struct RootResponse {
    pub name: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub backend: &'static str,
    pub database: &'static str,
    pub store: &'static str,
}

/// GET /
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        name: "GetaiCertified API",
        status: "ok",
    })
}

/// GET /api/health -- process and database status (mounted under `/api`)
async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    let database = match &state.database {
        Some(repo) => match repo.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!(error = %e, "Health check: database unreachable");
                "error"
            }
        },
        None => "not configured",
    };

    Json(HealthResponse {
        backend: "running",
        database,
        store: state.store,
    })
}

/// `GET /` at the service root
pub fn root_router() -> Router {
    Router::new().route("/", get(root))
}

/// `GET /health`, to be nested under `/api`
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> serde_json::Value {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app() -> Router {
        root_router().nest(
            "/api",
            health_router(HealthState {
                database: None,
                store: "memory",
            }),
        )
    }

    #[tokio::test]
    async fn test_root() {
        let body = get_json(app(), "/").await;
        assert_eq!(body["name"], "GetaiCertified API");
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_health_without_database() {
        let body = get_json(app(), "/api/health").await;
        assert_eq!(body["backend"], "running");
        assert_eq!(body["database"], "not configured");
        assert_eq!(body["store"], "memory");
    }
}
