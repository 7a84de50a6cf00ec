//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, Form, FromRequest, Request, State};
use axum::http::header;
use std::sync::Arc;

use crate::application::{
    ExternalSignInUseCase, IdentityVerifier, SignInInput, SignInUseCase, SignUpInput,
    SignUpUseCase, TokenService,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    GoogleAuthRequest, LoginForm, LoginRequest, SignUpRequest, SignUpResponse, TokenResponse,
    UserProfileResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, V>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    pub repo: Option<Arc<R>>,
    pub tokens: Arc<TokenService>,
    pub verifier: Arc<V>,
}

impl<R, V> AuthAppState<R, V>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    /// The store, or `NotConfigured`
    pub fn repo(&self) -> AuthResult<Arc<R>> {
        self.repo.clone().ok_or(AuthError::NotConfigured)
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R, V>(
    State(state): State<AuthAppState<R, V>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Json<SignUpResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    let email = Email::new(req.email)?;
    let use_case = SignUpUseCase::new(state.repo()?, state.tokens.clone());

    let output = use_case
        .execute(SignUpInput {
            name: req.name,
            email,
        })
        .await?;

    Ok(Json(SignUpResponse {
        user: UserProfileResponse::from(&output.user),
        token: output.token.token,
    }))
}

// ============================================================================
// Login
// ============================================================================

/// Login body: a urlencoded form, otherwise JSON whatever the content type
#[derive(Debug, Default)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl<S> FromRequest<S> for LoginPayload
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        // An unreadable body is the same as a body without an email.
        if is_form {
            let form = Form::<LoginForm>::from_request(req, state)
                .await
                .map(|Form(form)| form)
                .unwrap_or_default();
            Ok(Self {
                email: form.username.or(form.email),
                name: None,
            })
        } else {
            // Any other content type is read as JSON.
            let body = Bytes::from_request(req, state)
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<LoginRequest>(&bytes).ok())
                .unwrap_or_default();
            Ok(Self {
                email: body.email,
                name: body.name,
            })
        }
    }
}

/// POST /api/auth/login
pub async fn login<R, V>(
    State(state): State<AuthAppState<R, V>>,
    payload: LoginPayload,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    let email = payload
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or(AuthError::EmailRequired)?;
    let email = Email::new(email)?;

    let use_case = SignInUseCase::new(state.repo()?, state.tokens.clone());
    let output = use_case
        .execute(SignInInput {
            email,
            name_hint: payload.name,
        })
        .await?;

    Ok(Json(TokenResponse::bearer(output.token.token)))
}

// ============================================================================
// External Identity
// ============================================================================

/// POST /api/auth/google
pub async fn google_auth<R, V>(
    State(state): State<AuthAppState<R, V>>,
    Json(req): Json<GoogleAuthRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    V: IdentityVerifier + Clone + Send + Sync + 'static,
{
    let use_case =
        ExternalSignInUseCase::new(state.repo()?, state.verifier.clone(), state.tokens.clone());

    let output = use_case.execute(&req.id_token).await?;

    Ok(Json(TokenResponse::bearer(output.token.token)))
}

// ============================================================================
// Current User (requires authentication)
// ============================================================================

/// GET /api/me
pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<UserProfileResponse> {
    Json(UserProfileResponse::from(&current.0))
}
