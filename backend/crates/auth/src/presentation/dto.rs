//! API DTOs (Data Transfer Objects)
//!
//! Field names are snake_case to match the existing web client.

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub user: UserProfileResponse,
    pub token: String,
}

// ============================================================================
// Login
// ============================================================================

/// JSON login body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    /// Name for a learner created by this login
    pub name: Option<String>,
}

/// Form login body (OAuth2 password-flow clients send `username`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// External identity login body
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleAuthRequest {
    pub id_token: String,
}

/// Bearer token response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

// ============================================================================
// User Info
// ============================================================================

/// Public user profile (no internal id)
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub referred_by: Option<String>,
    pub referral_code: Option<String>,
    pub points: i64,
    pub badges: Vec<String>,
    pub is_admin: bool,
}

impl From<&User> for UserProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            avatar_url: user.avatar_url.clone(),
            referred_by: user.referred_by.clone(),
            referral_code: user.referral_code.clone(),
            points: user.points,
            badges: user.badges.clone(),
            is_admin: user.is_admin,
        }
    }
}
