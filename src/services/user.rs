//! User registration and sign-in
//!
//! Passwords are stored as Argon2 PHC strings. Registering a user also
//! seeds their ledger with a default `Cash` account.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountType, LedgerState, Money, User};
use crate::storage::{Backend, EntityStore, UserDirectory, USERS_KEY};

use super::ensure_present;

/// Name of the account every new user starts with
pub const DEFAULT_ACCOUNT_NAME: &str = "Cash";

/// Service for the user directory
pub struct UserService<'a, B: Backend> {
    backend: &'a mut B,
}

impl<'a, B: Backend> UserService<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    /// Register a new user with a unique email
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> LedgerResult<User> {
        let name = name.trim();
        let email = email.trim();
        ensure_present("name", name)?;
        ensure_present("email", email)?;
        ensure_present("password", password)?;

        let previous = self.backend.get(USERS_KEY)?;
        let mut users = UserDirectory::new(&mut *self.backend).load()?;
        if users.iter().any(|u| u.has_email(email)) {
            return Err(LedgerError::Duplicate {
                entity_type: "User",
                identifier: email.to_string(),
            });
        }

        let user = User::new(name, email, hash_password(password)?);

        let mut ledger = LedgerState::default();
        ledger.accounts.push(Account::new(
            DEFAULT_ACCOUNT_NAME,
            AccountType::Checking,
            Money::zero(),
        ));

        // The directory goes first; an account-less user record is undone below
        users.push(user.clone());
        UserDirectory::new(&mut *self.backend).save(&users)?;

        if let Err(e) = EntityStore::new(&mut *self.backend).save(user.id, &ledger) {
            let restored = match &previous {
                Some(text) => self.backend.set(USERS_KEY, text),
                None => self.backend.remove(USERS_KEY),
            };
            if let Err(restore_err) = restored {
                warn!(user = %user.id, error = %restore_err, "Failed to restore user directory");
            }
            return Err(e);
        }

        info!(user = %user.id, "Registered user");
        Ok(user)
    }

    /// Check an email/password pair
    pub fn authenticate(&mut self, email: &str, password: &str) -> LedgerResult<User> {
        let user = UserDirectory::new(&mut *self.backend)
            .find_by_email(email)?
            .ok_or(LedgerError::Authentication)?;

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| LedgerError::StorageCorrupt(format!("password hash: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| LedgerError::Authentication)?;

        Ok(user)
    }

    /// All registered users, in registration order
    pub fn list(&mut self) -> LedgerResult<Vec<User>> {
        UserDirectory::new(&mut *self.backend).load()
    }
}

fn hash_password(password: &str) -> LedgerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LedgerError::Config(format!("Failed to hash password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FailingBackend;
    use crate::storage::{MemoryBackend, PARTITION_KEYS};

    #[test]
    fn test_register_seeds_cash_account() {
        let mut backend = MemoryBackend::new();
        let user = UserService::new(&mut backend)
            .register("Ann", "ann@example.com", "secret")
            .unwrap();

        assert_ne!(user.password_hash, "secret");
        assert!(user.password_hash.starts_with("$argon2"));

        let ledger = EntityStore::new(&mut backend).load(user.id).unwrap();
        assert_eq!(ledger.accounts.len(), 1);
        assert_eq!(ledger.accounts[0].name, "Cash");
        assert!(ledger.accounts[0].balance.is_zero());
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let mut backend = MemoryBackend::new();
        let mut service = UserService::new(&mut backend);
        service.register("Ann", "ann@example.com", "secret").unwrap();

        let err = service
            .register("Other Ann", "ANN@example.com", "secret2")
            .unwrap_err();

        assert!(matches!(err, LedgerError::Duplicate { .. }));
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_required_fields() {
        let mut backend = MemoryBackend::new();
        let mut service = UserService::new(&mut backend);

        assert!(service.register("", "a@b.c", "pw").unwrap_err().is_validation());
        assert!(service.register("Ann", " ", "pw").unwrap_err().is_validation());
        assert!(service.register("Ann", "a@b.c", "").unwrap_err().is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_authenticate() {
        let mut backend = MemoryBackend::new();
        let mut service = UserService::new(&mut backend);
        let user = service.register("Ann", "ann@example.com", "secret").unwrap();

        assert_eq!(service.authenticate("Ann@Example.com", "secret").unwrap().id, user.id);
        assert!(matches!(
            service.authenticate("ann@example.com", "wrong"),
            Err(LedgerError::Authentication)
        ));
        assert!(matches!(
            service.authenticate("bob@example.com", "secret"),
            Err(LedgerError::Authentication)
        ));
    }

    #[test]
    fn test_failed_directory_write_leaves_nothing_behind() {
        let mut backend = FailingBackend::new();
        backend.fail_writes_to = Some(USERS_KEY);

        let err = UserService::new(&mut backend)
            .register("Ann", "ann@example.com", "secret")
            .unwrap_err();

        assert!(err.is_storage());
        assert!(backend.inner.is_empty());
    }

    #[test]
    fn test_failed_ledger_write_restores_directory() {
        let mut backend = FailingBackend::new();
        let ann = UserService::new(&mut backend)
            .register("Ann", "ann@example.com", "secret")
            .unwrap();
        let users_before = backend.inner.get(USERS_KEY).unwrap();
        let accounts_before = backend.inner.get(PARTITION_KEYS[0]).unwrap();

        backend.fail_writes_to = Some(PARTITION_KEYS[1]);
        let err = UserService::new(&mut backend)
            .register("Bob", "bob@example.com", "secret")
            .unwrap_err();

        assert!(err.is_storage());
        assert_eq!(backend.inner.get(USERS_KEY).unwrap(), users_before);
        assert_eq!(backend.inner.get(PARTITION_KEYS[0]).unwrap(), accounts_before);

        let users = UserService::new(&mut backend).list().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, ann.id);
    }

    #[test]
    fn test_failed_first_registration_removes_directory() {
        let mut backend = FailingBackend::new();
        backend.fail_writes_to = Some(PARTITION_KEYS[0]);

        assert!(UserService::new(&mut backend)
            .register("Ann", "ann@example.com", "secret")
            .is_err());
        assert_eq!(backend.inner.get(USERS_KEY).unwrap(), None);
    }
}
