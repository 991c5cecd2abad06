//! Per-user entity store
//!
//! Each of the four collections lives under its own backend key as a JSON
//! object mapping user id to that user's ordered records. A store always
//! reads and writes one user's partitions wholesale and leaves every other
//! user's partitions as it found them.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{LedgerState, UserId};

use super::backend::Backend;

/// Backend key for accounts
pub const ACCOUNTS_KEY: &str = "accounts";
/// Backend key for transactions
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Backend key for budgets
pub const BUDGETS_KEY: &str = "budgets";
/// Backend key for savings goals
pub const SAVINGS_GOALS_KEY: &str = "savingsGoals";

/// The four partitioned keys, in write order
pub const PARTITION_KEYS: [&str; 4] = [ACCOUNTS_KEY, TRANSACTIONS_KEY, BUDGETS_KEY, SAVINGS_GOALS_KEY];

type Partitions = BTreeMap<String, Value>;

/// Loads and saves one user's [`LedgerState`] through a [`Backend`]
#[derive(Debug)]
pub struct EntityStore<B: Backend> {
    backend: B,
}

impl<B: Backend> EntityStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Load every collection for `user_id`
    ///
    /// Absent keys and absent partitions load as empty collections.
    pub fn load(&self, user_id: UserId) -> LedgerResult<LedgerState> {
        let partition = partition_key(user_id);

        Ok(LedgerState {
            accounts: self.load_partition(ACCOUNTS_KEY, &partition)?,
            transactions: self.load_partition(TRANSACTIONS_KEY, &partition)?,
            budgets: self.load_partition(BUDGETS_KEY, &partition)?,
            savings_goals: self.load_partition(SAVINGS_GOALS_KEY, &partition)?,
        })
    }

    /// Load every collection for `user_id`, emptying only those that fail
    ///
    /// Returns the keys that could not be loaded with their errors. A
    /// collection that loaded keeps its records, so the next save does not
    /// overwrite it with an empty sequence.
    pub fn load_each(&self, user_id: UserId) -> (LedgerState, Vec<(&'static str, LedgerError)>) {
        let partition = partition_key(user_id);
        let mut failures = Vec::new();

        let state = LedgerState {
            accounts: or_empty(ACCOUNTS_KEY, self.load_partition(ACCOUNTS_KEY, &partition), &mut failures),
            transactions: or_empty(
                TRANSACTIONS_KEY,
                self.load_partition(TRANSACTIONS_KEY, &partition),
                &mut failures,
            ),
            budgets: or_empty(BUDGETS_KEY, self.load_partition(BUDGETS_KEY, &partition), &mut failures),
            savings_goals: or_empty(
                SAVINGS_GOALS_KEY,
                self.load_partition(SAVINGS_GOALS_KEY, &partition),
                &mut failures,
            ),
        };

        (state, failures)
    }

    /// Replace every collection for `user_id` with `state`
    ///
    /// All four values are encoded before the first write. If a write
    /// fails, keys already written are restored to their previous values.
    pub fn save(&mut self, user_id: UserId, state: &LedgerState) -> LedgerResult<()> {
        let partition = partition_key(user_id);

        let mut pending = Vec::with_capacity(PARTITION_KEYS.len());
        pending.push(self.encode(ACCOUNTS_KEY, &partition, &state.accounts)?);
        pending.push(self.encode(TRANSACTIONS_KEY, &partition, &state.transactions)?);
        pending.push(self.encode(BUDGETS_KEY, &partition, &state.budgets)?);
        pending.push(self.encode(SAVINGS_GOALS_KEY, &partition, &state.savings_goals)?);

        for (index, write) in pending.iter().enumerate() {
            if let Err(e) = self.backend.set(write.key, &write.next) {
                self.restore(&pending[..index]);
                return Err(match e {
                    LedgerError::StorageUnavailable(_) => e,
                    other => LedgerError::StorageUnavailable(other.to_string()),
                });
            }
        }

        Ok(())
    }

    fn read_partitions(&self, key: &str) -> LedgerResult<Option<(String, Partitions)>> {
        let Some(text) = self.backend.get(key)? else {
            return Ok(None);
        };

        let partitions: Partitions = serde_json::from_str(&text)
            .map_err(|e| LedgerError::StorageCorrupt(format!("{}: {}", key, e)))?;

        Ok(Some((text, partitions)))
    }

    fn load_partition<T: DeserializeOwned>(&self, key: &str, partition: &str) -> LedgerResult<Vec<T>> {
        let Some((_, mut partitions)) = self.read_partitions(key)? else {
            return Ok(Vec::new());
        };

        match partitions.remove(partition) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| LedgerError::StorageCorrupt(format!("{}: {}", key, e))),
        }
    }

    fn encode<T: Serialize>(
        &self,
        key: &'static str,
        partition: &str,
        records: &[T],
    ) -> LedgerResult<PendingWrite> {
        let (previous, mut partitions) = match self.read_partitions(key) {
            Ok(Some((text, partitions))) => (Some(text), partitions),
            Ok(None) => (None, Partitions::new()),
            Err(LedgerError::StorageCorrupt(reason)) => {
                warn!(key, %reason, "Replacing unreadable partition data");
                (self.backend.get(key)?, Partitions::new())
            }
            Err(e) => return Err(e),
        };

        partitions.insert(partition.to_string(), serde_json::to_value(records)?);
        let next = serde_json::to_string_pretty(&partitions)?;

        Ok(PendingWrite {
            key,
            previous,
            next,
        })
    }

    fn restore(&mut self, written: &[PendingWrite]) {
        for write in written.iter().rev() {
            let result = match &write.previous {
                Some(text) => self.backend.set(write.key, text),
                None => self.backend.remove(write.key),
            };
            if let Err(e) = result {
                warn!(key = write.key, error = %e, "Failed to restore partition after save failure");
            }
        }
    }
}

fn or_empty<T>(
    key: &'static str,
    loaded: LedgerResult<Vec<T>>,
    failures: &mut Vec<(&'static str, LedgerError)>,
) -> Vec<T> {
    loaded.unwrap_or_else(|e| {
        failures.push((key, e));
        Vec::new()
    })
}

struct PendingWrite {
    key: &'static str,
    previous: Option<String>,
    next: String,
}

/// Partition key for a user: the full UUID
pub fn partition_key(user_id: UserId) -> String {
    user_id.as_uuid().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, Budget, Money, Month};
    use crate::storage::testing::FailingBackend;
    use crate::storage::{FileBackend, MemoryBackend};
    use tempfile::TempDir;

    fn sample_state() -> LedgerState {
        let mut state = LedgerState::default();
        state
            .accounts
            .push(Account::new("Cash", AccountType::Checking, Money::from_units(1000)));
        state.budgets.push(Budget::new(
            "Food",
            Money::from_units(500),
            Month::new(2025, 1).unwrap(),
        ));
        state
    }

    #[test]
    fn test_load_missing_keys_is_empty() {
        let store = EntityStore::new(MemoryBackend::new());
        let state = store.load(UserId::new()).unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = EntityStore::new(MemoryBackend::new());
        let user = UserId::new();
        let state = sample_state();

        store.save(user, &state).unwrap();
        assert_eq!(store.load(user).unwrap(), state);
    }

    #[test]
    fn test_save_preserves_other_users() {
        let mut store = EntityStore::new(MemoryBackend::new());
        let alice = UserId::new();
        let bob = UserId::new();
        let alice_state = sample_state();

        store.save(alice, &alice_state).unwrap();
        store.save(bob, &LedgerState::default()).unwrap();

        assert_eq!(store.load(alice).unwrap(), alice_state);
        assert!(store.load(bob).unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_prior_content() {
        let mut store = EntityStore::new(MemoryBackend::new());
        let user = UserId::new();

        store.save(user, &sample_state()).unwrap();
        store.save(user, &LedgerState::default()).unwrap();

        assert!(store.load(user).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_partition_reports_corrupt() {
        let mut backend = MemoryBackend::new();
        backend.set(ACCOUNTS_KEY, "not json").unwrap();
        let store = EntityStore::new(backend);

        let err = store.load(UserId::new()).unwrap_err();
        assert!(matches!(err, LedgerError::StorageCorrupt(_)));
    }

    #[test]
    fn test_load_each_empties_only_corrupt_partition() {
        let user = UserId::new();
        let mut store = EntityStore::new(MemoryBackend::new());
        let state = sample_state();
        store.save(user, &state).unwrap();
        store.backend_mut().set(BUDGETS_KEY, "{not json").unwrap();

        let (loaded, failures) = store.load_each(user);

        assert_eq!(loaded.accounts, state.accounts);
        assert!(loaded.budgets.is_empty());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, BUDGETS_KEY);
        assert!(matches!(failures[0].1, LedgerError::StorageCorrupt(_)));
    }

    #[test]
    fn test_corrupt_records_report_corrupt() {
        let user = UserId::new();
        let mut backend = MemoryBackend::new();
        let text = format!("{{\"{}\": [{{\"id\": 5}}]}}", partition_key(user));
        backend.set(TRANSACTIONS_KEY, &text).unwrap();
        let store = EntityStore::new(backend);

        let err = store.load(user).unwrap_err();
        assert!(matches!(err, LedgerError::StorageCorrupt(_)));
    }

    #[test]
    fn test_unreadable_backend_reports_unavailable() {
        let mut backend = FailingBackend::new();
        backend.fail_reads = true;
        let store = EntityStore::new(backend);

        let err = store.load(UserId::new()).unwrap_err();
        assert!(matches!(err, LedgerError::StorageUnavailable(_)));
    }

    #[test]
    fn test_failed_save_restores_written_keys() {
        let user = UserId::new();
        let mut store = EntityStore::new(FailingBackend::new());
        let original = sample_state();
        store.save(user, &original).unwrap();

        store.backend_mut().fail_writes_to = Some(BUDGETS_KEY);
        let mut changed = original.clone();
        changed.accounts.clear();
        changed.transactions.clear();

        let err = store.save(user, &changed).unwrap_err();
        assert!(matches!(err, LedgerError::StorageUnavailable(_)));

        store.backend_mut().fail_writes_to = None;
        assert_eq!(store.load(user).unwrap(), original);
    }

    #[test]
    fn test_failed_first_save_leaves_keys_absent() {
        let mut backend = FailingBackend::new();
        backend.fail_writes_to = Some(SAVINGS_GOALS_KEY);
        let mut store = EntityStore::new(backend);

        assert!(store.save(UserId::new(), &sample_state()).is_err());
        for key in PARTITION_KEYS {
            assert_eq!(store.backend().inner.get(key).unwrap(), None);
        }
    }

    #[test]
    fn test_file_backed_store() {
        let temp_dir = TempDir::new().unwrap();
        let user = UserId::new();
        let state = sample_state();

        let mut store = EntityStore::new(FileBackend::new(temp_dir.path()));
        store.save(user, &state).unwrap();

        let reopened = EntityStore::new(FileBackend::new(temp_dir.path()));
        assert_eq!(reopened.load(user).unwrap(), state);
        assert!(temp_dir.path().join("accounts.json").exists());
    }
}
