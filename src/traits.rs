//! Storage abstraction for ledger entries and imported transactions
//!
//! The engine works against any backend (PostgreSQL, SQLite, in-memory,
//! etc.) that implements these traits. The transition methods on
//! [`TransactionStore`] are the engine's only write path and must be
//! conditional writes: each one applies the whole transition or none of
//! it, and fails if the record is not in the required state. That is what
//! lets a losing concurrent actor (manual vs. batch) observe a clean
//! conflict instead of corrupting state.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

use crate::types::*;

/// Read-only access to internal financial-ledger entries
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Get a ledger entry by id
    async fn get_entry(&self, entry_id: i64) -> ReconcileResult<Option<LedgerEntry>>;

    /// List entries with the given expected direction and a due date
    /// within the inclusive range
    async fn list_entries(
        &self,
        direction: Direction,
        due_from: NaiveDate,
        due_to: NaiveDate,
    ) -> ReconcileResult<Vec<LedgerEntry>>;
}

/// Access to imported bank transactions and their state transitions
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Get a transaction by id
    async fn get_transaction(&self, tx_id: i64) -> ReconcileResult<Option<ImportedTransaction>>;

    /// List pending transactions matching the filter, ordered by
    /// transaction date ascending, then id ascending
    async fn list_pending(&self, filter: &BatchFilter)
        -> ReconcileResult<Vec<ImportedTransaction>>;

    /// Ids of ledger entries currently claimed by a Reconciled or
    /// Divergent transaction
    async fn claimed_entry_ids(&self) -> ReconcileResult<HashSet<i64>>;

    /// The transaction holding an active link on the given entry, if any
    async fn find_link_holder(&self, entry_id: i64) -> ReconcileResult<Option<i64>>;

    /// Transition Pending -> Reconciled, claiming the entry
    ///
    /// Fails with `InvalidState` if the transaction is not Pending, and
    /// with `Conflict` if the entry is already claimed by another active
    /// link. On success returns the updated transaction.
    async fn mark_reconciled(
        &mut self,
        tx_id: i64,
        entry_id: i64,
        score: Option<u8>,
        kind: ReconciliationKind,
        reconciled_by: Option<String>,
        at: NaiveDateTime,
    ) -> ReconcileResult<ImportedTransaction>;

    /// Transition Pending -> Divergent, claiming the entry
    ///
    /// Same preconditions as [`mark_reconciled`](Self::mark_reconciled).
    async fn mark_divergent(
        &mut self,
        tx_id: i64,
        entry_id: i64,
        score: u8,
        at: NaiveDateTime,
    ) -> ReconcileResult<ImportedTransaction>;

    /// Transition Pending -> Ignored
    ///
    /// Fails with `InvalidState` if the transaction is not Pending.
    async fn mark_ignored(
        &mut self,
        tx_id: i64,
        reconciled_by: String,
        at: NaiveDateTime,
    ) -> ReconcileResult<ImportedTransaction>;

    /// Transition Reconciled/Divergent -> Pending, releasing the claim
    /// and clearing all audit fields
    ///
    /// Fails with `InvalidState` from any other status.
    async fn unreconcile(&mut self, tx_id: i64) -> ReconcileResult<ImportedTransaction>;
}
