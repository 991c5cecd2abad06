//! User directory persisted under the `users` key as a flat array

use crate::error::{LedgerError, LedgerResult};
use crate::models::User;

use super::backend::Backend;

/// Backend key for the user directory
pub const USERS_KEY: &str = "users";

/// Repository for registered users
#[derive(Debug)]
pub struct UserDirectory<B: Backend> {
    backend: B,
}

impl<B: Backend> UserDirectory<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Load every registered user, in registration order
    pub fn load(&self) -> LedgerResult<Vec<User>> {
        match self.backend.get(USERS_KEY)? {
            None => Ok(Vec::new()),
            Some(text) => serde_json::from_str(&text)
                .map_err(|e| LedgerError::StorageCorrupt(format!("{}: {}", USERS_KEY, e))),
        }
    }

    /// Replace the stored user list
    pub fn save(&mut self, users: &[User]) -> LedgerResult<()> {
        let text = serde_json::to_string_pretty(users)?;
        self.backend.set(USERS_KEY, &text)
    }

    /// Find a user by email (case-insensitive)
    pub fn find_by_email(&self, email: &str) -> LedgerResult<Option<User>> {
        Ok(self.load()?.into_iter().find(|u| u.has_email(email)))
    }
}
