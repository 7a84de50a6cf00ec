//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Signing secrets (random generation, base64 decoding, zeroize on drop)
//! - `Authorization: Bearer` header parsing

pub mod bearer;
pub mod crypto;
