//! External Identity Verification
//!
//! Seam for third-party sign-in (e.g. Google ID tokens). The verifier turns
//! an opaque assertion into a trusted email.

use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Verifies an external identity assertion
#[trait_variant::make(IdentityVerifier: Send)]
pub trait LocalIdentityVerifier {
    /// Return the asserted email, or `InvalidExternalToken`
    async fn verify(&self, assertion: &str) -> AuthResult<Email>;
}

/// Stand-in verifier: any assertion containing `@` is taken as that email.
///
/// This performs no cryptographic check at all. Deployments facing real
/// users must supply a verifier that validates the provider's signed token.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderVerifier;

impl IdentityVerifier for PlaceholderVerifier {
    async fn verify(&self, assertion: &str) -> AuthResult<Email> {
        let assertion = assertion.trim();
        if !assertion.contains('@') {
            return Err(AuthError::InvalidExternalToken);
        }
        Email::new(assertion).map_err(|_| AuthError::InvalidExternalToken)
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthError, IdentityVerifier, PlaceholderVerifier};

    #[tokio::test]
    async fn test_placeholder_accepts_email_like_assertion() {
        let email = PlaceholderVerifier.verify("  Grace@Example.com ").await.unwrap();
        assert_eq!(email.as_str(), "grace@example.com");
    }

    #[tokio::test]
    async fn test_placeholder_rejects_opaque_token() {
        let err = PlaceholderVerifier
            .verify("eyJhbGciOiJSUzI1NiJ9.payload.sig")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidExternalToken));
    }

    #[tokio::test]
    async fn test_placeholder_rejects_malformed_email() {
        let err = PlaceholderVerifier.verify("not@valid").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidExternalToken));
    }
}
