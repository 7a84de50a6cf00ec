//! In-Memory Repository Implementation
//!
//! Process-local store used by tests and by `ACADEMY_STORE=memory` runs.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// In-memory user repository keyed by email
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn insert_if_absent(&self, user: &User) -> AuthResult<(User, bool)> {
        let mut users = self.users.write().await;
        if let Some(existing) = users.get(&user.email) {
            return Ok((existing.clone(), false));
        }
        users.insert(user.email.clone(), user.clone());
        Ok((user.clone(), true))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn ping(&self) -> AuthResult<()> {
        Ok(())
    }
}
