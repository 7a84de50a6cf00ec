//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod current_user;
pub mod resolve_identity;
pub mod sign_in;
pub mod sign_up;
pub mod token;
pub mod verifier;

// Re-exports
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use resolve_identity::{ResolveIdentityUseCase, ResolvedIdentity};
pub use sign_in::{ExternalSignInUseCase, SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{Claims, IssuedToken, TokenService};
pub use verifier::{IdentityVerifier, PlaceholderVerifier};
