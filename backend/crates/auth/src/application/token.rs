//! Token Service
//!
//! Issues and validates HS256-signed bearer tokens whose subject is the
//! learner's email. Validation failures are never distinguished for the
//! caller: expired, tampered and malformed tokens are all
//! [`AuthError::InvalidToken`].

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// JWT claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the learner's email
    pub sub: String,
    /// Issued-at (UTC Unix seconds)
    pub iat: i64,
    /// Expiration (UTC Unix seconds)
    pub exp: i64,
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies bearer tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl: chrono::Duration::try_seconds(config.token_ttl_secs())
                .unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Issue a token for `subject` valid for the configured lifetime
    pub fn issue(&self, subject: &Email) -> AuthResult<IssuedToken> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the clock read `issued_at`
    pub fn issue_at(&self, subject: &Email, issued_at: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::Internal("Token expiry out of range".to_string()))?;
        let claims = Claims {
            sub: subject.as_str().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token and return its subject
    pub fn validate(&self, token: &str) -> AuthResult<Email> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AuthError::InvalidToken
        })?;

        Email::new(data.claims.sub).map_err(|_| AuthError::InvalidToken)
    }
}
