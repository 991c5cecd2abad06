//! Signed-in user session
//!
//! A [`Session`] owns one user's loaded [`LedgerState`] and the
//! [`EntityStore`] it came from. Services borrow the session mutably for
//! the length of one operation and change it only through
//! [`Session::commit`], so a rejected or unsaved operation never becomes
//! visible.

pub mod events;

pub use events::{EntityType, LedgerChange, LedgerEvent};

use chrono::Utc;
use tracing::{debug, error, warn};

use crate::error::LedgerResult;
use crate::models::{Account, Budget, CategorySet, LedgerState, SavingsGoal, Transaction, UserId};
use crate::storage::{Backend, EntityStore};

/// One user's ledger plus the store it is persisted to
#[derive(Debug)]
pub struct Session<B: Backend> {
    user_id: UserId,
    store: EntityStore<B>,
    state: LedgerState,
    categories: CategorySet,
    revision: u64,
    events: Vec<LedgerChange>,
}

impl<B: Backend> Session<B> {
    /// Open a session, starting any collection that fails to load empty
    ///
    /// Collections that load keep their records.
    pub fn open(user_id: UserId, store: EntityStore<B>, categories: CategorySet) -> Self {
        let (state, failures) = store.load_each(user_id);
        for (key, e) in &failures {
            warn!(user = %user_id, key = *key, error = %e, "Failed to load collection, starting it empty");
        }

        Self::with_state(user_id, store, categories, state)
    }

    /// Open a session, surfacing load failures
    pub fn try_open(
        user_id: UserId,
        store: EntityStore<B>,
        categories: CategorySet,
    ) -> LedgerResult<Self> {
        let state = store.load(user_id)?;
        Ok(Self::with_state(user_id, store, categories, state))
    }

    fn with_state(
        user_id: UserId,
        store: EntityStore<B>,
        categories: CategorySet,
        state: LedgerState,
    ) -> Self {
        Self {
            user_id,
            store,
            state,
            categories,
            revision: 0,
            events: Vec::new(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Current snapshot of all four collections
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn accounts(&self) -> &[Account] {
        &self.state.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.state.budgets
    }

    pub fn savings_goals(&self) -> &[SavingsGoal] {
        &self.state.savings_goals
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Number of commits since the session was opened
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drain queued change events
    pub fn take_events(&mut self) -> Vec<LedgerChange> {
        std::mem::take(&mut self.events)
    }

    pub fn store(&self) -> &EntityStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore<B> {
        &mut self.store
    }

    /// Apply a mutation atomically
    ///
    /// `apply` works on a copy of the state. The copy is saved and then
    /// replaces the live state; if `apply` rejects or the save fails the
    /// live state is left exactly as it was.
    pub(crate) fn commit<T>(
        &mut self,
        apply: impl FnOnce(&mut LedgerState) -> LedgerResult<(T, LedgerEvent)>,
    ) -> LedgerResult<T> {
        let mut working = self.state.clone();
        let (output, event) = apply(&mut working)?;

        if let Err(e) = self.store.save(self.user_id, &working) {
            error!(user = %self.user_id, error = %e, %event, "Save failed, change discarded");
            return Err(e);
        }

        self.state = working;
        self.revision += 1;
        debug!(user = %self.user_id, revision = self.revision, %event, "Committed");
        self.events.push(LedgerChange {
            revision: self.revision,
            committed_at: Utc::now(),
            event,
        });

        Ok(output)
    }
}
