//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait (the `user` collection, keyed by email)
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert the user unless one with the same email exists.
    ///
    /// Returns the stored record and whether this call created it. Two
    /// concurrent inserts for one email both receive the same record.
    async fn insert_if_absent(&self, user: &User) -> AuthResult<(User, bool)>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check the store is reachable
    async fn ping(&self) -> AuthResult<()>;
}
