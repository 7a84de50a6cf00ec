//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by every backend crate:
//! - Unified error type and HTTP-facing error classification
//! - Typed identifiers for stored records
//!
//! Anything domain specific (emails, slugs, XP rules) lives in the
//! owning crate, not here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
