//! In-memory storage implementation for testing and development
//!
//! Transition writes perform their status and claim checks under a single
//! write lock, giving the same all-or-nothing semantics a database
//! backend would get from a conditional `UPDATE ... WHERE status =
//! 'pending'`.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory entry and transaction store
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<i64, LedgerEntry>>>,
    transactions: Arc<RwLock<HashMap<i64, ImportedTransaction>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a ledger entry, as the ledger/obligation modules would
    pub fn insert_entry(&self, entry: LedgerEntry) {
        self.entries.write().unwrap().insert(entry.id, entry);
    }

    /// Seed an imported transaction, as statement ingestion would
    pub fn insert_transaction(&self, tx: ImportedTransaction) {
        self.transactions.write().unwrap().insert(tx.id, tx);
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
        self.transactions.write().unwrap().clear();
    }
}

#[async_trait]
impl EntryStore for MemoryStorage {
    async fn get_entry(&self, entry_id: i64) -> ReconcileResult<Option<LedgerEntry>> {
        Ok(self.entries.read().unwrap().get(&entry_id).cloned())
    }

    async fn list_entries(
        &self,
        direction: Direction,
        due_from: NaiveDate,
        due_to: NaiveDate,
    ) -> ReconcileResult<Vec<LedgerEntry>> {
        let entries = self.entries.read().unwrap();
        let mut filtered: Vec<LedgerEntry> = entries
            .values()
            .filter(|entry| {
                entry.direction == direction
                    && entry.due_date >= due_from
                    && entry.due_date <= due_to
            })
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));
        Ok(filtered)
    }
}

#[async_trait]
impl TransactionStore for MemoryStorage {
    async fn get_transaction(&self, tx_id: i64) -> ReconcileResult<Option<ImportedTransaction>> {
        Ok(self.transactions.read().unwrap().get(&tx_id).cloned())
    }

    async fn list_pending(
        &self,
        filter: &BatchFilter,
    ) -> ReconcileResult<Vec<ImportedTransaction>> {
        let transactions = self.transactions.read().unwrap();
        let mut pending: Vec<ImportedTransaction> = transactions
            .values()
            .filter(|tx| tx.is_pending() && filter.matches(tx))
            .cloned()
            .collect();
        pending.sort_by(|a, b| {
            a.transaction_date
                .cmp(&b.transaction_date)
                .then(a.id.cmp(&b.id))
        });
        Ok(pending)
    }

    async fn claimed_entry_ids(&self) -> ReconcileResult<HashSet<i64>> {
        let transactions = self.transactions.read().unwrap();
        Ok(transactions
            .values()
            .filter(|tx| tx.holds_claim())
            .filter_map(|tx| tx.linked_entry_id)
            .collect())
    }

    async fn find_link_holder(&self, entry_id: i64) -> ReconcileResult<Option<i64>> {
        let transactions = self.transactions.read().unwrap();
        Ok(transactions
            .values()
            .find(|tx| tx.holds_claim() && tx.linked_entry_id == Some(entry_id))
            .map(|tx| tx.id))
    }

    async fn mark_reconciled(
        &mut self,
        tx_id: i64,
        entry_id: i64,
        score: Option<u8>,
        kind: ReconciliationKind,
        reconciled_by: Option<String>,
        at: NaiveDateTime,
    ) -> ReconcileResult<ImportedTransaction> {
        let mut transactions = self.transactions.write().unwrap();

        let current = transactions
            .get(&tx_id)
            .ok_or(ReconcileError::TransactionNotFound(tx_id))?;
        if !current.is_pending() {
            return Err(ReconcileError::InvalidState(format!(
                "Transaction {} is {:?}, expected Pending",
                tx_id, current.status
            )));
        }

        if let Some(holder) = transactions
            .values()
            .find(|tx| tx.holds_claim() && tx.linked_entry_id == Some(entry_id))
        {
            return Err(ReconcileError::Conflict {
                entry_id,
                held_by: holder.id,
            });
        }

        let tx = transactions
            .get_mut(&tx_id)
            .ok_or(ReconcileError::TransactionNotFound(tx_id))?;
        tx.status = ReconciliationStatus::Reconciled;
        tx.linked_entry_id = Some(entry_id);
        tx.match_score = score;
        tx.reconciliation_kind = Some(kind);
        tx.reconciled_at = Some(at);
        tx.reconciled_by = reconciled_by;
        Ok(tx.clone())
    }

    async fn mark_divergent(
        &mut self,
        tx_id: i64,
        entry_id: i64,
        score: u8,
        at: NaiveDateTime,
    ) -> ReconcileResult<ImportedTransaction> {
        let mut transactions = self.transactions.write().unwrap();

        let current = transactions
            .get(&tx_id)
            .ok_or(ReconcileError::TransactionNotFound(tx_id))?;
        if !current.is_pending() {
            return Err(ReconcileError::InvalidState(format!(
                "Transaction {} is {:?}, expected Pending",
                tx_id, current.status
            )));
        }

        if let Some(holder) = transactions
            .values()
            .find(|tx| tx.holds_claim() && tx.linked_entry_id == Some(entry_id))
        {
            return Err(ReconcileError::Conflict {
                entry_id,
                held_by: holder.id,
            });
        }

        let tx = transactions
            .get_mut(&tx_id)
            .ok_or(ReconcileError::TransactionNotFound(tx_id))?;
        tx.status = ReconciliationStatus::Divergent;
        tx.linked_entry_id = Some(entry_id);
        tx.match_score = Some(score);
        tx.reconciliation_kind = Some(ReconciliationKind::Automatic);
        tx.reconciled_at = Some(at);
        tx.reconciled_by = None;
        Ok(tx.clone())
    }

    async fn mark_ignored(
        &mut self,
        tx_id: i64,
        reconciled_by: String,
        at: NaiveDateTime,
    ) -> ReconcileResult<ImportedTransaction> {
        let mut transactions = self.transactions.write().unwrap();

        let tx = transactions
            .get_mut(&tx_id)
            .ok_or(ReconcileError::TransactionNotFound(tx_id))?;
        if !tx.is_pending() {
            return Err(ReconcileError::InvalidState(format!(
                "Transaction {} is {:?}, expected Pending",
                tx_id, tx.status
            )));
        }

        tx.status = ReconciliationStatus::Ignored;
        tx.linked_entry_id = None;
        tx.match_score = None;
        tx.reconciliation_kind = Some(ReconciliationKind::Manual);
        tx.reconciled_at = Some(at);
        tx.reconciled_by = Some(reconciled_by);
        Ok(tx.clone())
    }

    async fn unreconcile(&mut self, tx_id: i64) -> ReconcileResult<ImportedTransaction> {
        let mut transactions = self.transactions.write().unwrap();

        let tx = transactions
            .get_mut(&tx_id)
            .ok_or(ReconcileError::TransactionNotFound(tx_id))?;
        if !tx.holds_claim() {
            return Err(ReconcileError::InvalidState(format!(
                "Transaction {} is {:?}, expected Reconciled or Divergent",
                tx_id, tx.status
            )));
        }

        tx.status = ReconciliationStatus::Pending;
        tx.linked_entry_id = None;
        tx.match_score = None;
        tx.reconciliation_kind = None;
        tx.reconciled_at = None;
        tx.reconciled_by = None;
        Ok(tx.clone())
    }
}
