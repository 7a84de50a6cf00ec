//! Cryptographic Utilities
//!
//! Key material for token signing. The secret bytes are wiped on drop and
//! never printed by `Debug`.

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of generated secrets (HS256 wants at least 32 bytes)
pub const GENERATED_SECRET_LEN: usize = 32;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Error when loading a signing secret
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Signing secret must not be empty")]
    Empty,

    #[error("Signing secret is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Symmetric signing secret
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Fresh random secret (development and tests)
    pub fn random() -> Self {
        Self(random_bytes(GENERATED_SECRET_LEN))
    }

    /// Use the UTF-8 bytes of a configured passphrase as the key
    pub fn from_text(text: &str) -> Result<Self, SecretError> {
        if text.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(text.as_bytes().to_vec()))
    }

    /// Decode a base64-encoded key
    pub fn from_base64(encoded: &str) -> Result<Self, SecretError> {
        let bytes = from_base64(encoded.trim())?;
        if bytes.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningSecret([REDACTED; {}])", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_from_base64() {
        assert_eq!(from_base64("aGVsbG8gd29ybGQ=").unwrap(), b"hello world");
        assert!(from_base64("not base64!").is_err());
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = SigningSecret::random();
        let b = SigningSecret::random();
        assert_eq!(a.len(), GENERATED_SECRET_LEN);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_secret_from_text() {
        let secret = SigningSecret::from_text("dev-secret-change-me").unwrap();
        assert_eq!(secret.as_bytes(), b"dev-secret-change-me");
        assert!(matches!(SigningSecret::from_text(""), Err(SecretError::Empty)));
    }

    #[test]
    fn test_secret_from_base64() {
        let encoded = format!("{}Bwc=", "BwcH".repeat(10));
        let secret = SigningSecret::from_base64(&encoded).unwrap();
        assert_eq!(secret.as_bytes(), &[7u8; 32]);

        assert!(matches!(
            SigningSecret::from_base64("***"),
            Err(SecretError::InvalidBase64(_))
        ));
        assert!(matches!(SigningSecret::from_base64(""), Err(SecretError::Empty)));
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = SigningSecret::from_text("super-secret").unwrap();
        let printed = format!("{:?}", secret);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("REDACTED"));
    }
}
