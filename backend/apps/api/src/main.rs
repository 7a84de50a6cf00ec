//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors are the domain crates' error types.

mod config;
mod health;

use auth::domain::repository::UserRepository;
use auth::{
    InMemoryUserRepository, PgUserRepository, PlaceholderVerifier, TokenService, auth_router,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use config::{ServerConfig, StoreKind};
use health::HealthState;
use learning::{
    InMemoryLearningRepository, LearningConfig, LearningStore, PgLearningRepository,
    learning_router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,learning=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let tokens = Arc::new(TokenService::new(&config.auth));
    let learning_config = LearningConfig::default();

    let (api, database) = match &config.store {
        StoreKind::Postgres { url } => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let users = PgUserRepository::new(pool.clone());
            let api = api_router(
                Some(users.clone()),
                Some(PgLearningRepository::new(pool)),
                tokens,
                learning_config,
            );
            (api, Some(users))
        }
        StoreKind::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            let api = api_router(
                Some(InMemoryUserRepository::new()),
                Some(InMemoryLearningRepository::new()),
                tokens,
                learning_config,
            );
            (api, None)
        }
        StoreKind::None => {
            tracing::warn!("No store configured; write endpoints will answer 503");
            let api = api_router::<InMemoryUserRepository, InMemoryLearningRepository>(
                None,
                None,
                tokens,
                learning_config,
            );
            (api, None)
        }
    };

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let health_state = HealthState {
        database,
        store: config.store.label(),
    };

    // Build router
    let app = Router::new()
        .merge(health::root_router())
        .nest("/api", api.merge(health::health_router(health_state)))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(store = config.store.label(), "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Every `/api` route backed by one pair of stores
fn api_router<U, L>(
    users: Option<U>,
    store: Option<L>,
    tokens: Arc<TokenService>,
    config: LearningConfig,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LearningStore,
{
    Router::new()
        .merge(auth_router(users.clone(), tokens.clone(), PlaceholderVerifier))
        .merge(learning_router(users, store, tokens, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::AuthConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let api = api_router(
            Some(InMemoryUserRepository::new()),
            Some(InMemoryLearningRepository::new()),
            Arc::new(TokenService::new(&AuthConfig::development())),
            LearningConfig::default(),
        );
        Router::new().nest("/api", api)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> Value {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let resp = app
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{method} {uri}");
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_signup_token_works_across_routers() {
        let app = app();

        let signup = send(
            &app,
            "POST",
            "/api/auth/signup",
            None,
            json!({"name": "Ada", "email": "ada@example.com"}),
        )
        .await;
        let token = signup["token"].as_str().unwrap().to_string();

        let enrolled = send(
            &app,
            "POST",
            "/api/enroll",
            Some(&token),
            json!({"email": "ada@example.com", "course_slug": "3-week-ai"}),
        )
        .await;
        assert_eq!(enrolled, json!({"ok": true}));

        let dashboard = send(
            &app,
            "GET",
            "/api/dashboard?email=ada@example.com",
            None,
            Value::Null,
        )
        .await;
        assert_eq!(dashboard["user"]["name"], "Ada");
        assert_eq!(dashboard["progress"]["week_unlocked"], 1);
    }
}
